//! The diagram value every algorithm consumes and produces.
//!
//! A [`Diagram`] is an array of [`Node`]s sorted top-down, by label and then
//! by uid, together with a root pointer. Nodes refer to each other only by
//! [`Ptr`] values; there is no ownership between nodes.
//!
//! Diagrams are immutable. Every algorithm reads its inputs through sorted
//! sequences and writes a fresh output diagram, so one value can be shared by
//! any number of calls.
//!
//! # Invariants
//!
//! Checked by [`Diagram::from_nodes`], and therefore held by every value:
//!
//! - every child is strictly below its parent (level monotonicity)
//! - every child pointer names a node of the diagram and caches its label
//! - uids are unique and none is reserved for a sink
//! - the root is the unique top-most node, and every node is reachable from it
//!
//! A diagram whose root is a sink has no nodes at all.

use std::fmt::{Display, Formatter};

use log::debug;

use crate::error::{Error, Result};
use crate::node::Node;
use crate::reference::Ptr;
use crate::seq::{MemorySorter, SortedSeq, Sorter};
use crate::types::{Label, Uid};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Diagram {
    /// Nodes in top-down order.
    nodes: Vec<Node>,
    root: Ptr,
}

impl Diagram {
    /// The constant diagram with the given value.
    pub fn sink(value: bool) -> Self {
        Self {
            nodes: Vec::new(),
            root: Ptr::sink(value),
        }
    }

    /// The diagram of the single variable `label`.
    pub fn var(label: Label) -> Self {
        let node = Node::new(Uid::new(0), label, Ptr::FALSE, Ptr::TRUE);
        Self {
            root: node.ptr(),
            nodes: vec![node],
        }
    }

    /// The diagram of the negated variable `label`.
    pub fn nvar(label: Label) -> Self {
        let node = Node::new(Uid::new(0), label, Ptr::TRUE, Ptr::FALSE);
        Self {
            root: node.ptr(),
            nodes: vec![node],
        }
    }

    /// Builds a diagram from raw nodes in any order.
    ///
    /// Rejects the input if any invariant listed in the [module
    /// documentation](self) is violated. Each node is checked once, and
    /// children are located by binary search over the sorted array.
    pub fn from_nodes(nodes: Vec<Node>, root: Ptr) -> Result<Self> {
        for node in nodes.iter() {
            if node.uid.is_sink() || node.label.is_sink() {
                return Err(Error::ReservedIdentity {
                    uid: node.uid,
                    label: node.label,
                });
            }
            for child in [node.low, node.high] {
                if child.label() <= node.label {
                    return Err(Error::LevelOrder {
                        uid: node.uid,
                        label: node.label,
                        child_label: child.label(),
                    });
                }
            }
        }

        let mut uids: Vec<Uid> = nodes.iter().map(|n| n.uid).collect();
        uids.sort_unstable();
        if let Some(w) = uids.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::DuplicateUid { uid: w[0] });
        }

        let nodes: Vec<Node> = MemorySorter.sort_by_key(nodes, |n| n.ptr()).collect();

        if root.is_sink() {
            return match nodes.first() {
                Some(node) => Err(Error::UnreachableNode { uid: node.uid }),
                None => Ok(Self::sink(root.value() == Some(true))),
            };
        }
        if nodes.first().map(|n| n.ptr()) != Some(root) {
            return Err(Error::BadRoot { root });
        }

        let position = |ptr: Ptr| nodes.binary_search_by_key(&ptr, |n| n.ptr()).ok();

        // Parents precede children in top-down order, so a single pass
        // decides reachability.
        let mut reached = vec![false; nodes.len()];
        reached[0] = true;
        for (i, node) in nodes.iter().enumerate() {
            if !reached[i] {
                return Err(Error::UnreachableNode { uid: node.uid });
            }
            for child in [node.low, node.high] {
                if child.is_sink() {
                    continue;
                }
                match position(child) {
                    Some(j) => reached[j] = true,
                    None => {
                        return Err(Error::DanglingChild {
                            uid: node.uid,
                            target: child,
                        })
                    }
                }
            }
        }

        debug!("from_nodes: accepted {} nodes, root {}", nodes.len(), root);
        Ok(Self { nodes, root })
    }

    /// Wraps the output of a sweep, which holds the invariants by construction.
    pub(crate) fn from_sorted(nodes: Vec<Node>, root: Ptr) -> Self {
        debug_assert!(nodes.windows(2).all(|w| w[0].ptr() < w[1].ptr()));
        debug_assert!(
            Diagram::from_nodes(nodes.clone(), root).is_ok(),
            "sweep produced a malformed diagram"
        );
        Self { nodes, root }
    }

    pub fn root(&self) -> Ptr {
        self.root
    }

    /// Nodes in top-down order (root first).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of internal nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the diagram is a lone sink.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The value of the diagram if it is a lone sink.
    pub fn sink_value(&self) -> Option<bool> {
        self.root.value()
    }

    pub fn is_false(&self) -> bool {
        self.sink_value() == Some(false)
    }

    pub fn is_true(&self) -> bool {
        self.sink_value() == Some(true)
    }

    /// Label of the root; [`Label::SINK`] for a lone sink.
    pub fn top_label(&self) -> Label {
        self.root.label()
    }

    /// Looks up the node a pointer names.
    pub fn get(&self, ptr: Ptr) -> Option<&Node> {
        if ptr.is_sink() {
            return None;
        }
        self.nodes
            .binary_search_by_key(&ptr, |n| n.ptr())
            .ok()
            .map(|i| &self.nodes[i])
    }

    /// Sequence of the nodes, root first.
    pub fn top_down(&self) -> SortedSeq<Node> {
        SortedSeq::from_sorted(self.nodes.clone())
    }

    /// Sequence of the nodes, deepest level first (label descending, then uid
    /// descending), root last.
    pub fn bottom_up(&self) -> SortedSeq<Node> {
        SortedSeq::from_sorted(self.nodes.iter().rev().copied().collect::<Vec<_>>())
    }
}

impl SortedSeq<Node> {
    /// Advances a top-down node sequence to `target` and returns that node,
    /// leaving it at the front so several requests can read it in turn.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not in the rest of the sequence.
    pub(crate) fn seek(&mut self, target: Ptr) -> Node {
        match self.advance_while(|n| n.ptr() < target) {
            Some(node) if node.ptr() == target => *node,
            other => panic!("expected {} in the node sequence, found {:?}", target, other),
        }
    }
}

impl Display for Diagram {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Diagram(root = {}", self.root)?;
        for node in self.nodes.iter() {
            write!(f, ", {}", node)?;
        }
        write!(f, ")")
    }
}
