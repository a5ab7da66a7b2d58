use std::fmt::{Display, Formatter};

use crate::reference::Ptr;
use crate::types::{Label, Uid};

/// Which outgoing arc of a node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Branch {
    Low,
    High,
}

impl Branch {
    /// The branch taken when the node's variable has the given value.
    pub const fn of(value: bool) -> Self {
        if value {
            Branch::High
        } else {
            Branch::Low
        }
    }
}

/// A decision node.
///
/// Both child slots carry the target's label, so the node alone is enough to
/// schedule work on its children.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Node {
    pub uid: Uid,
    pub label: Label,
    pub low: Ptr,
    pub high: Ptr,
}

impl Node {
    pub fn new(uid: Uid, label: Label, low: Ptr, high: Ptr) -> Self {
        Self { uid, label, low, high }
    }

    /// Pointer to this node.
    pub fn ptr(&self) -> Ptr {
        Ptr::node(self.label, self.uid)
    }

    pub fn child(&self, branch: Branch) -> Ptr {
        match branch {
            Branch::Low => self.low,
            Branch::High => self.high,
        }
    }

    /// Both children respect the level order.
    pub fn is_ordered(&self) -> bool {
        self.low.label() > self.label && self.high.label() > self.label
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}({}, {})", self.uid, self.label, self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_children() {
        let n = Node::new(Uid::new(0), Label::new(0), Ptr::FALSE, Ptr::TRUE);
        assert_eq!(n.child(Branch::Low), Ptr::FALSE);
        assert_eq!(n.child(Branch::of(true)), Ptr::TRUE);
        assert!(n.is_ordered());
        assert_eq!(n.ptr(), Ptr::node(Label::new(0), Uid::new(0)));
    }

    #[test]
    fn test_node_unordered() {
        let child = Ptr::node(Label::new(1), Uid::new(1));
        let n = Node::new(Uid::new(0), Label::new(1), child, Ptr::TRUE);
        assert!(!n.is_ordered());
    }
}
