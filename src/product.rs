//! Numbering of product nodes.
//!
//! [`apply`](crate::apply::apply) and [`ite`](crate::ite::ite) discover their
//! output nodes as tuples of input pointers. Those tuples only become uids
//! after the sweep: the nodes of each level are sorted by tuple and numbered
//! densely from 0, and the child slots are rewired by a sorted join of the
//! arcs against the numbered nodes. Output identities therefore never depend
//! on the size of the input uids.

use log::debug;

use crate::diagram::Diagram;
use crate::node::{Branch, Node};
use crate::reference::Ptr;
use crate::seq::{MemorySorter, Sorter};
use crate::types::{Label, Uid};

/// A child slot of a product node before numbering.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Slot<K> {
    Sink(Ptr),
    Product(Label, K),
}

impl<K> Slot<K> {
    pub(crate) fn is_product(&self) -> bool {
        matches!(self, Slot::Product(..))
    }
}

/// An output node identified by the tuple of input pointers it stands for.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ProductNode<K> {
    pub(crate) label: Label,
    pub(crate) key: K,
    pub(crate) low: Slot<K>,
    pub(crate) high: Slot<K>,
}

/// Turns product nodes into a diagram rooted at `root`.
///
/// Every product slot must name one of `nodes`, and `root` must be the only
/// node on the top-most level.
pub(crate) fn number<K: Ord + Copy>(nodes: Vec<ProductNode<K>>, root: Slot<K>) -> Diagram {
    let root_label = match root {
        Slot::Sink(ptr) => return Diagram::sink(ptr.value() == Some(true)),
        Slot::Product(label, _) => label,
    };

    let sorter = MemorySorter;
    let nodes = sorter.sort_by_key(nodes, |n| (n.label, n.key));

    let mut output: Vec<Node> = Vec::with_capacity(nodes.len());
    let mut numbered: Vec<(Label, K, Ptr)> = Vec::with_capacity(nodes.len());
    let mut arcs: Vec<((Label, K), Ptr, Branch)> = Vec::new();
    let mut level: Option<(Label, u64)> = None;

    for node in nodes {
        let id = match level {
            Some((label, next)) if label == node.label => next,
            _ => 0,
        };
        level = Some((node.label, id + 1));
        let ptr = Ptr::node(node.label, Uid::new(id));

        let mut slot_ptr = |slot: Slot<K>, branch: Branch| match slot {
            Slot::Sink(sink) => sink,
            Slot::Product(label, key) => {
                arcs.push(((label, key), ptr, branch));
                Ptr::FALSE
            }
        };
        let low = slot_ptr(node.low, Branch::Low);
        let high = slot_ptr(node.high, Branch::High);
        output.push(Node::new(ptr.uid(), ptr.label(), low, high));
        numbered.push((node.label, node.key, ptr));
    }

    // Resolve every arc's target against the numbered nodes.
    let mut numbered = sorter.sort_by_key(numbered, |&(label, key, _)| (label, key));
    let arcs = sorter.sort_by_key(arcs, |&(target, _, _)| target);
    let mut fixups: Vec<(Ptr, Branch, Ptr)> = Vec::with_capacity(arcs.len());
    for (target, source, branch) in arcs {
        match numbered.advance_while(|&(label, key, _)| (label, key) < target) {
            Some(&(label, key, ptr)) if (label, key) == target => fixups.push((source, branch, ptr)),
            _ => panic!("product arc from {} points to a node that was not emitted", source),
        }
    }

    let mut fixups = sorter.sort_by_key(fixups, |&(source, branch, _)| (source, branch));
    for node in output.iter_mut() {
        while let Some((_, branch, target)) = fixups.next_if(|&(source, _, _)| source == node.ptr()) {
            match branch {
                Branch::Low => node.low = target,
                Branch::High => node.high = target,
            }
        }
    }
    assert!(fixups.is_done(), "product fix-up for a node that was not emitted");

    let root = match output.first() {
        Some(first) if first.label == root_label => first.ptr(),
        _ => panic!("product root at {} is not the top-most node", root_label),
    };
    debug!("product: numbered {} nodes", output.len());
    Diagram::from_sorted(output, root)
}
