//! Bottom-up construction of diagrams.

use log::debug;

use crate::diagram::Diagram;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::queue::{PriorityQueue, Queue};
use crate::reference::Ptr;
use crate::seq::{MemorySorter, Sorter};
use crate::types::{Label, Uid};

/// Assembles a diagram one node at a time, children before parents.
///
/// Nothing is shared or reduced automatically: every call to
/// [`add_node`](Builder::add_node) creates a new node, which makes the builder
/// suitable for writing test inputs that exercise [`reduce`](crate::reduce).
///
/// # Examples
///
/// ```
/// use sweep_bdd::{Builder, Label, Ptr};
///
/// let mut builder = Builder::new();
/// let a = builder.add_node(Label::new(1), Ptr::FALSE, Ptr::TRUE).unwrap();
/// let b = builder.add_node(Label::new(1), Ptr::FALSE, Ptr::TRUE).unwrap();
/// let root = builder.add_node(Label::new(0), a, b).unwrap();
/// let d = builder.build(root).unwrap();
///
/// assert_eq!(d.len(), 3);
/// assert_eq!(d.reduce().len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Builder {
    /// Node `i` has uid `i`.
    nodes: Vec<Node>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes added so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a node and returns a pointer to it.
    ///
    /// Both children must be sinks or pointers returned by this builder, and
    /// must lie strictly below `label`.
    pub fn add_node(&mut self, label: Label, low: Ptr, high: Ptr) -> Result<Ptr> {
        let uid = Uid::new(self.nodes.len() as u64);
        if label.is_sink() {
            return Err(Error::ReservedIdentity { uid, label });
        }
        for child in [low, high] {
            if child.label() <= label {
                return Err(Error::LevelOrder {
                    uid,
                    label,
                    child_label: child.label(),
                });
            }
            if child.is_node() && !self.contains(child) {
                return Err(Error::DanglingChild { uid, target: child });
            }
        }
        let node = Node::new(uid, label, low, high);
        self.nodes.push(node);
        Ok(node.ptr())
    }

    fn contains(&self, ptr: Ptr) -> bool {
        usize::try_from(ptr.uid().id())
            .ok()
            .and_then(|i| self.nodes.get(i))
            .is_some_and(|n| n.ptr() == ptr)
    }

    /// Finishes the diagram rooted at `root`.
    ///
    /// Nodes that cannot be reached from `root` are left out.
    pub fn build(self, root: Ptr) -> Result<Diagram> {
        if root.is_sink() {
            return Diagram::from_nodes(Vec::new(), root);
        }
        if !self.contains(root) {
            return Err(Error::BadRoot { root });
        }

        // Top-down sweep from the root collects the reachable part.
        let mut nodes = MemorySorter.sort_by_key(self.nodes, |n| n.ptr());
        let mut queue: Queue<Ptr, ()> = Queue::new();
        queue.insert(root, ());
        let mut reachable = Vec::new();
        while let Some((ptr, ())) = queue.extract_min() {
            while queue.extract_if_min(&ptr).is_some() {}
            let node = nodes.seek(ptr);
            for child in [node.low, node.high] {
                if child.is_node() {
                    queue.insert(child, ());
                }
            }
            reachable.push(node);
        }
        debug!(
            "build: {} of {} nodes reachable from {}",
            reachable.len(),
            nodes.consumed() + nodes.remaining(),
            root
        );

        Diagram::from_nodes(reachable, root)
    }
}

impl Diagram {
    /// The conjunction of the given literals.
    ///
    /// An empty list gives the `true` sink. Fails if a label occurs twice.
    pub fn cube(literals: &[(Label, bool)]) -> Result<Diagram> {
        let literals: Vec<(Label, bool)> =
            MemorySorter.sort_by_key(literals.to_vec(), |&(l, _)| std::cmp::Reverse(l)).collect();
        if let Some(w) = literals.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::DuplicateAssignment { label: w[0].0 });
        }

        let mut builder = Builder::new();
        let mut current = Ptr::TRUE;
        for (label, value) in literals {
            current = if value {
                builder.add_node(label, Ptr::FALSE, current)?
            } else {
                builder.add_node(label, current, Ptr::FALSE)?
            };
        }
        builder.build(current)
    }
}
