//! Model counting and satisfying assignments.
//!
//! The counts are computed by top-down sweeps: each request carries the
//! number of partial assignments (or paths) that reach its target from the
//! root, and requests for the same node are summed when the node is reached.

use log::debug;
use num_bigint::BigUint;

use crate::diagram::Diagram;
use crate::node::Branch;
use crate::queue::{PriorityQueue, Queue};
use crate::reference::Ptr;
use crate::types::Label;

/// Pushes `weight` from the root down to the sinks.
///
/// `step(weight, parent, child)` computes the share that flows from a node to
/// one of its children. Returns the total that arrives at the `true` sink.
fn sweep(diagram: &Diagram, root_weight: BigUint, step: impl Fn(&BigUint, Label, Ptr) -> BigUint) -> BigUint {
    let mut total = BigUint::ZERO;
    match diagram.root().value() {
        Some(true) => return root_weight,
        Some(false) => return total,
        None => {}
    }

    let mut nodes = diagram.top_down();
    let mut queue: Queue<Ptr, BigUint> = Queue::new();
    queue.insert(diagram.root(), root_weight);

    while let Some((ptr, mut weight)) = queue.extract_min() {
        while let Some(more) = queue.extract_if_min(&ptr) {
            weight += more;
        }
        let node = nodes.seek(ptr);
        for child in [node.low, node.high] {
            match child.value() {
                Some(true) => total += step(&weight, node.label, child),
                Some(false) => {}
                None => queue.insert(child, step(&weight, node.label, child)),
            }
        }
    }
    debug!(
        "count sweep: {} nodes, {} requests",
        nodes.consumed(),
        queue.inserted()
    );
    total
}

/// Number of assignments to the variables `0..varcount` that satisfy the
/// diagram.
///
/// # Panics
///
/// Panics if some label of the diagram is not below `varcount`.
///
/// # Examples
///
/// ```
/// use num_bigint::BigUint;
/// use sweep_bdd::{sat_count, Diagram, Label};
///
/// let f = Diagram::var(Label::new(0)).or(&Diagram::var(Label::new(1))).unwrap();
/// assert_eq!(sat_count(&f, 2), BigUint::from(3u32));
/// assert_eq!(sat_count(&f, 4), BigUint::from(12u32));
/// ```
pub fn sat_count(diagram: &Diagram, varcount: u32) -> BigUint {
    if let Some(last) = diagram.nodes().last() {
        assert!(
            last.label.index() < varcount,
            "sat_count: {} is not below varcount {}",
            last.label,
            varcount
        );
    }
    let level = |ptr: Ptr| if ptr.is_sink() { varcount } else { ptr.label().index() };
    let root_weight = BigUint::from(1u32) << level(diagram.root());
    sweep(diagram, root_weight, |weight, label, child| {
        // Variables skipped between the node and its child are free.
        weight << (level(child) - label.index() - 1)
    })
}

/// Number of paths from the root to the `true` sink.
pub fn path_count(diagram: &Diagram) -> BigUint {
    sweep(diagram, BigUint::from(1u32), |weight, _, _| weight.clone())
}

/// Walks a satisfying path of the reduced diagram, taking the `prefer`
/// branch wherever it does not lead to `false`.
fn sat_path(diagram: &Diagram, prefer: bool) -> Option<Vec<(Label, bool)>> {
    // In a reduced diagram every internal node reaches `true`.
    let reduced = diagram.reduce();
    if reduced.is_false() {
        return None;
    }

    let mut nodes = reduced.top_down();
    let mut path = Vec::new();
    let mut current = reduced.root();
    while current.is_node() {
        let node = nodes.seek(current);
        let value = if node.child(Branch::of(prefer)) != Ptr::FALSE {
            prefer
        } else {
            !prefer
        };
        path.push((node.label, value));
        current = node.child(Branch::of(value));
    }
    Some(path)
}

/// The lexicographically smallest satisfying path, preferring `low` branches.
///
/// Returns the labels tested along that path with the values taken; labels not
/// in the list are free. Returns `None` if the diagram is unsatisfiable.
pub fn one_sat(diagram: &Diagram) -> Option<Vec<(Label, bool)>> {
    sat_path(diagram, false)
}

/// The lexicographically largest satisfying path, preferring `high` branches.
///
/// ```
/// use sweep_bdd::{max_sat, Diagram, Label};
///
/// let f = Diagram::var(Label::new(0)).xor(&Diagram::var(Label::new(1))).unwrap();
/// assert_eq!(max_sat(&f), Some(vec![(Label::new(0), true), (Label::new(1), false)]));
/// ```
pub fn max_sat(diagram: &Diagram) -> Option<Vec<(Label, bool)>> {
    sat_path(diagram, true)
}

impl Diagram {
    /// Number of internal nodes.
    pub fn node_count(&self) -> usize {
        self.len()
    }

    /// Number of distinct labels used by internal nodes.
    pub fn level_count(&self) -> usize {
        let mut levels = 0;
        let mut last: Option<Label> = None;
        for node in self.nodes() {
            if last != Some(node.label) {
                levels += 1;
                last = Some(node.label);
            }
        }
        levels
    }

    /// See [`path_count`].
    pub fn path_count(&self) -> BigUint {
        path_count(self)
    }

    /// See [`sat_count`].
    pub fn sat_count(&self, varcount: u32) -> BigUint {
        sat_count(self, varcount)
    }

    /// See [`one_sat`].
    pub fn one_sat(&self) -> Option<Vec<(Label, bool)>> {
        one_sat(self)
    }

    /// See [`max_sat`].
    pub fn max_sat(&self) -> Option<Vec<(Label, bool)>> {
        max_sat(self)
    }
}
