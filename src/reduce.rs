//! Bottom-up canonicalization.
//!
//! # Algorithm
//!
//! The diagram is swept level by level, from the deepest level up to the root.
//! Two sorted inputs drive the sweep:
//!
//! - the nodes in bottom-up order (label descending), and
//! - the *arcs* `(source, target, branch)` of the diagram, sorted by target in
//!   the same bottom-up order.
//!
//! A single priority queue keyed by source holds announcements of the form
//! "the `branch` child of `source` is now `target`". All arcs into the sinks
//! are announced up front. When the sweep reaches a level:
//!
//! 1. every node of the level extracts its two announcements (low and high);
//!    a node whose children resolve to the same target is dropped at once and
//!    mapped onto that target (reduction rule 1),
//! 2. the remaining nodes are sorted by their resolved `(low, high)` pair,
//! 3. a scan over that order emits the first node of each distinct pair and
//!    maps every later node with the same pair onto it (reduction rule 2),
//! 4. every `old -> new` mapping of the level is joined with the arcs whose
//!    target is `old`, and each matching arc is announced to its source with
//!    the new target.
//!
//! The root is the single node of the topmost level and goes through the same
//! steps, so a root whose children coincide collapses onto its child.
//!
//! Output uids are handed out densely in emission order: the deepest level
//! gets the smallest uids and the root gets the largest. Because both the
//! emission order within a level and the uids of the children are determined
//! by the function alone, equal functions reduce to identical diagrams.

use std::cmp::Reverse;

use log::{debug, trace};

use crate::diagram::Diagram;
use crate::node::{Branch, Node};
use crate::queue::{PriorityQueue, Queue};
use crate::reference::Ptr;
use crate::seq::{MemorySorter, Sorter};
use crate::types::{Label, Uid};

/// An arc of the diagram, as seen from its target.
#[derive(Debug, Copy, Clone)]
struct Arc {
    source: Ptr,
    target: Ptr,
    branch: Branch,
}

/// Queue key: the source in bottom-up order, low before high.
type SourceKey = (Reverse<Ptr>, Branch);

/// Returns the canonical form of `diagram` under the two reduction rules.
///
/// # Examples
///
/// ```
/// use sweep_bdd::{reduce, Diagram, Label, Node, Ptr, Uid};
///
/// // Both children of the root are copies of `x1`.
/// let x1a = Node::new(Uid::new(1), Label::new(1), Ptr::FALSE, Ptr::TRUE);
/// let x1b = Node::new(Uid::new(2), Label::new(1), Ptr::FALSE, Ptr::TRUE);
/// let root = Node::new(Uid::new(0), Label::new(0), x1a.ptr(), x1b.ptr());
/// let d = Diagram::from_nodes(vec![root, x1a, x1b], root.ptr()).unwrap();
///
/// let r = reduce(&d);
/// assert_eq!(r, Diagram::var(Label::new(1)));
/// ```
pub fn reduce(diagram: &Diagram) -> Diagram {
    if diagram.is_empty() {
        return diagram.clone();
    }
    debug!("reduce: {} nodes", diagram.len());

    let sorter = MemorySorter;

    let mut nodes = diagram.bottom_up();
    let arcs: Vec<Arc> = diagram
        .nodes()
        .iter()
        .flat_map(|n| {
            [
                Arc { source: n.ptr(), target: n.low, branch: Branch::Low },
                Arc { source: n.ptr(), target: n.high, branch: Branch::High },
            ]
        })
        .collect();
    let mut arcs = sorter.sort_by_key(arcs, |a| (Reverse(a.target), Reverse(a.source), a.branch));

    let mut queue: Queue<SourceKey, Ptr> = Queue::with_capacity(2 * diagram.len());

    // Arcs into the sinks are already resolved.
    while let Some(arc) = arcs.next_if(|a| a.target.is_sink()) {
        queue.insert((Reverse(arc.source), arc.branch), arc.target);
    }

    let mut output: Vec<Node> = Vec::with_capacity(diagram.len());
    let mut next_uid = 0u64;
    let mut root = diagram.root();
    let mut rule1 = 0usize;
    let mut rule2 = 0usize;

    while let Some(label) = nodes.peek().map(|n| n.label) {
        // Step 1: merge each node of the level with its announcements.
        let mut mapping: Vec<(Ptr, Ptr)> = Vec::new();
        let mut survivors: Vec<(Ptr, Ptr, Ptr)> = Vec::new();
        while let Some(node) = nodes.next_if(|n| n.label == label) {
            let low = take_announcement(&mut queue, node.ptr(), Branch::Low);
            let high = take_announcement(&mut queue, node.ptr(), Branch::High);
            if low == high {
                trace!("reduce: {} is redundant, forwarding {}", node.uid, low);
                rule1 += 1;
                mapping.push((node.ptr(), low));
            } else {
                survivors.push((node.ptr(), low, high));
            }
        }

        // Steps 2 and 3: group by children, emit one node per group.
        let survivors = sorter.sort_by_key(survivors, |&(_, low, high)| (low, high));
        let mut canonical: Option<(Ptr, Ptr, Ptr)> = None;
        for (old, low, high) in survivors {
            match canonical {
                Some((l, h, new)) if l == low && h == high => {
                    trace!("reduce: {} duplicates {}", old, new);
                    rule2 += 1;
                    mapping.push((old, new));
                }
                _ => {
                    let node = emit(&mut output, &mut next_uid, label, low, high);
                    mapping.push((old, node.ptr()));
                    canonical = Some((low, high, node.ptr()));
                }
            }
        }

        // Step 4: tell the parents.
        let mapping = sorter.sort_by_key(mapping, |&(old, _)| Reverse(old));
        for (old, new) in mapping {
            while let Some(arc) = arcs.next_if(|a| a.target == old) {
                queue.insert((Reverse(arc.source), arc.branch), new);
            }
            if old == root {
                root = new;
            }
        }
    }
    assert!(queue.is_empty(), "reduce: {} announcements left over", queue.len());
    assert!(arcs.is_done(), "reduce: {} arcs left over", arcs.remaining());

    debug!(
        "reduce: {} -> {} nodes ({} by rule 1, {} by rule 2, {} announcements)",
        diagram.len(),
        output.len(),
        rule1,
        rule2,
        queue.inserted()
    );

    let output: Vec<Node> = sorter.sort_by_key(output, |n| n.ptr()).collect();
    Diagram::from_sorted(output, root)
}

fn take_announcement(queue: &mut Queue<SourceKey, Ptr>, source: Ptr, branch: Branch) -> Ptr {
    queue
        .extract_if_min(&(Reverse(source), branch))
        .unwrap_or_else(|| panic!("reduce: no announcement for the {:?} child of {}", branch, source))
}

fn emit(output: &mut Vec<Node>, next_uid: &mut u64, label: Label, low: Ptr, high: Ptr) -> Node {
    let node = Node::new(Uid::new(*next_uid), label, low, high);
    *next_uid += 1;
    output.push(node);
    node
}

impl Diagram {
    /// Returns the canonical form of this diagram. See [`reduce`].
    pub fn reduce(&self) -> Diagram {
        reduce(self)
    }

    /// Checks both reduction rules: no node has equal children, and no two
    /// nodes of a level share their pair of children.
    pub fn is_reduced(&self) -> bool {
        if self.nodes().iter().any(|n| n.low == n.high) {
            return false;
        }
        let signatures = MemorySorter.sort_by_key(
            self.nodes().iter().map(|n| (n.label, n.low, n.high)).collect(),
            |&s| s,
        );
        let signatures: Vec<_> = signatures.collect();
        signatures.windows(2).all(|w| w[0] != w[1])
    }

    /// Checks whether two diagrams represent the same function.
    ///
    /// Reduced diagrams of equal functions are identical, so this reduces both
    /// sides and compares them node by node.
    pub fn equivalent(&self, other: &Diagram) -> bool {
        reduce(self) == reduce(other)
    }
}
