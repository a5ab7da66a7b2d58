use std::fmt::{Display, Formatter};
use std::ops::Not;

use crate::types::{Label, Uid};

/// A child slot: the identity of the target together with a cached copy of
/// its label.
///
/// Carrying the label means a node's level (and the level of each of its
/// children) is known without ever visiting the child, which is what keeps
/// every sweep sequential.
///
/// The derived ordering compares the label first and the uid second, which is
/// exactly the top-down order of a diagram: lower levels first, sinks last
/// (with `false` before `true`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ptr {
    label: Label,
    uid: Uid,
}

impl Ptr {
    pub const FALSE: Ptr = Ptr {
        label: Label::SINK,
        uid: Uid::FALSE,
    };
    pub const TRUE: Ptr = Ptr {
        label: Label::SINK,
        uid: Uid::TRUE,
    };

    /// Pointer to an internal node.
    ///
    /// # Panics
    ///
    /// Panics if either `label` or `uid` is a reserved sink value.
    pub fn node(label: Label, uid: Uid) -> Self {
        assert!(!label.is_sink(), "Internal node cannot carry the sink label");
        assert!(!uid.is_sink(), "Internal node cannot carry a sink uid");
        Self { label, uid }
    }

    /// Pointer to the sink with the given value.
    pub const fn sink(value: bool) -> Self {
        if value {
            Ptr::TRUE
        } else {
            Ptr::FALSE
        }
    }

    pub const fn label(self) -> Label {
        self.label
    }

    pub const fn uid(self) -> Uid {
        self.uid
    }

    pub const fn is_sink(self) -> bool {
        self.uid.is_sink()
    }

    pub const fn is_node(self) -> bool {
        !self.is_sink()
    }

    /// The value of a sink, or `None` for internal nodes.
    pub fn value(self) -> Option<bool> {
        match self.uid {
            Uid::FALSE => Some(false),
            Uid::TRUE => Some(true),
            _ => None,
        }
    }
}

/// Flips sinks, leaves internal pointers untouched.
impl Not for Ptr {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self.value() {
            Some(value) => Ptr::sink(!value),
            None => self,
        }
    }
}

impl Display for Ptr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_sink() {
            write!(f, "{}", self.uid)
        } else {
            write!(f, "{}@{}", self.uid, self.label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_pointers() {
        assert!(Ptr::FALSE.is_sink());
        assert!(Ptr::TRUE.is_sink());
        assert_eq!(Ptr::FALSE.value(), Some(false));
        assert_eq!(Ptr::TRUE.value(), Some(true));
        assert_eq!(Ptr::sink(true), Ptr::TRUE);
        assert_eq!(!Ptr::TRUE, Ptr::FALSE);
    }

    #[test]
    fn test_top_down_order() {
        let a = Ptr::node(Label::new(0), Uid::new(9));
        let b = Ptr::node(Label::new(1), Uid::new(2));
        let c = Ptr::node(Label::new(1), Uid::new(3));
        let mut ptrs = vec![Ptr::TRUE, c, Ptr::FALSE, b, a];
        ptrs.sort();
        assert_eq!(ptrs, vec![a, b, c, Ptr::FALSE, Ptr::TRUE]);
    }

    #[test]
    fn test_negate_leaves_nodes() {
        let a = Ptr::node(Label::new(0), Uid::new(0));
        assert_eq!(!a, a);
        assert_eq!(a.value(), None);
    }

    #[test]
    #[should_panic(expected = "sink label")]
    fn test_node_with_sink_label() {
        Ptr::node(Label::SINK, Uid::new(0));
    }
}
