//! Top-down elimination of variables by fixed values.
//!
//! The sweep visits the nodes reachable under the given assignment in
//! top-down order, driven by a priority queue of visit requests. A node whose
//! label is assigned is elided: its requests are passed on to the child the
//! assignment selects. Every other node is copied to the output as it is.
//!
//! A request remembers the parent arc that issued it. When a request reaches
//! its target only after passing through elided nodes, the parent's child
//! slot is stale; a fix-up `(parent, branch, new target)` is recorded and all
//! fix-ups are merged into the copied nodes after the sweep.
//!
//! The output is not reduced.

use log::{debug, trace};

use crate::diagram::Diagram;
use crate::error::{Error, Result};
use crate::node::{Branch, Node};
use crate::queue::{PriorityQueue, Queue};
use crate::reference::Ptr;
use crate::seq::{MemorySorter, SortedSeq, Sorter};
use crate::types::Label;

/// A pending visit.
#[derive(Debug, Copy, Clone)]
struct Request {
    /// The arc that asked for the visit; `None` on the root chain.
    parent: Option<(Ptr, Branch)>,
    /// Whether the request was passed on by an elided node.
    redirected: bool,
}

/// Fixes the variables in `assignments` and removes their nodes.
///
/// `assignments` may come in any order but must not mention a label twice.
/// Assignments to labels that do not occur in the diagram are ignored. The
/// result agrees with `diagram` on every input consistent with `assignments`,
/// and must be passed through [`reduce`](crate::reduce::reduce) to become
/// canonical.
///
/// # Examples
///
/// ```
/// use sweep_bdd::{substitute, Diagram, Label};
///
/// let x = Diagram::var(Label::new(0));
/// let y = Diagram::var(Label::new(1));
/// let f = x.and(&y).unwrap();
///
/// let g = substitute(&f, &[(Label::new(0), true)]).unwrap();
/// assert_eq!(g.reduce(), y);
/// ```
pub fn substitute(diagram: &Diagram, assignments: &[(Label, bool)]) -> Result<Diagram> {
    let sorter = MemorySorter;

    let assignments: Vec<(Label, bool)> = sorter.sort_by_key(assignments.to_vec(), |&(l, _)| l).collect();
    if let Some(w) = assignments.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(Error::DuplicateAssignment { label: w[0].0 });
    }
    let mut assignments = SortedSeq::from_sorted(assignments);

    if diagram.is_empty() || assignments.is_done() {
        return Ok(diagram.clone());
    }
    debug!(
        "substitute: {} nodes, {} assignments",
        diagram.len(),
        assignments.remaining()
    );

    let mut nodes = diagram.top_down();

    let mut queue: Queue<Ptr, Request> = Queue::new();
    queue.insert(
        diagram.root(),
        Request {
            parent: None,
            redirected: false,
        },
    );

    let mut output: Vec<Node> = Vec::new();
    let mut fixups: Vec<(Ptr, Branch, Ptr)> = Vec::new();
    let mut root: Option<Ptr> = None;
    let mut last_emitted: Option<Ptr> = None;
    let mut elided = 0usize;
    let mut coalesced = 0usize;

    while let Some((target, first)) = queue.extract_min() {
        // Several parents may have asked for the same node.
        let mut requests = vec![first];
        while let Some(request) = queue.extract_if_min(&target) {
            requests.push(request);
        }
        coalesced += requests.len() - 1;

        let node = nodes.seek(target);
        assignments.advance_while(|&(l, _)| l < node.label);

        if let Some(&(_, value)) = assignments.peek().filter(|&&(l, _)| l == node.label) {
            let child = node.child(Branch::of(value));
            trace!("substitute: eliding {} in favour of {}", node, child);
            elided += 1;
            for request in requests {
                match request.parent {
                    Some((source, branch)) if child.is_sink() => fixups.push((source, branch, child)),
                    None if child.is_sink() => {
                        debug!("substitute: diagram collapses to {}", child);
                        return Ok(Diagram::sink(child.value() == Some(true)));
                    }
                    _ => queue.insert(
                        child,
                        Request {
                            redirected: true,
                            ..request
                        },
                    ),
                }
            }
            continue;
        }

        assert_ne!(last_emitted, Some(target), "substitute: {} emitted twice", target);
        last_emitted = Some(target);
        output.push(node);

        for request in requests {
            match request.parent {
                None => root = Some(target),
                Some((source, branch)) if request.redirected => fixups.push((source, branch, target)),
                Some(_) => {}
            }
        }
        for branch in [Branch::Low, Branch::High] {
            let child = node.child(branch);
            if child.is_node() {
                queue.insert(
                    child,
                    Request {
                        parent: Some((node.ptr(), branch)),
                        redirected: false,
                    },
                );
            }
        }
    }

    debug!(
        "substitute: {} -> {} nodes ({} elided, {} requests coalesced, {} fix-ups)",
        diagram.len(),
        output.len(),
        elided,
        coalesced,
        fixups.len()
    );

    // Output is already in top-down order, as is every sweep's emission.
    let mut fixups = sorter.sort_by_key(fixups, |&(source, branch, _)| (source, branch));
    for node in output.iter_mut() {
        while let Some((_, branch, target)) = fixups.next_if(|&(source, _, _)| source == node.ptr()) {
            match branch {
                Branch::Low => node.low = target,
                Branch::High => node.high = target,
            }
        }
    }
    assert!(fixups.is_done(), "substitute: fix-up for a node that was not emitted");

    let root = root.unwrap_or_else(|| panic!("substitute: root chain ended without a node"));
    Ok(Diagram::from_sorted(output, root))
}

impl Diagram {
    /// Fixes the variables in `assignments`. See [`substitute`].
    pub fn substitute(&self, assignments: &[(Label, bool)]) -> Result<Diagram> {
        substitute(self, assignments)
    }

    /// Fixes one variable and reduces the result.
    pub fn restrict(&self, label: Label, value: bool) -> Diagram {
        match substitute(self, &[(label, value)]) {
            Ok(d) => d.reduce(),
            Err(e) => unreachable!("single assignment rejected: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::eval::eval;
    use crate::types::Uid;

    fn node(uid: u64, label: u32, low: Ptr, high: Ptr) -> Node {
        Node::new(Uid::new(uid), Label::new(label), low, high)
    }

    fn l(label: u32) -> Label {
        Label::new(label)
    }

    /// (x0 & x1) | (!x0 & x2) over three levels, with x2 shared.
    fn mux() -> Diagram {
        let x2 = node(3, 2, Ptr::FALSE, Ptr::TRUE);
        let x1 = node(2, 1, Ptr::FALSE, Ptr::TRUE);
        let x1b = node(4, 1, x2.ptr(), x2.ptr());
        let root = node(1, 0, x1b.ptr(), x1.ptr());
        Diagram::from_nodes(vec![root, x1, x1b, x2], root.ptr()).unwrap()
    }

    fn assignments(n: usize) -> impl Iterator<Item = Vec<bool>> {
        (0..1u32 << n).map(move |bits| (0..n).map(|i| bits >> i & 1 == 1).collect())
    }

    #[test]
    fn test_substitute_root_true() {
        let d = mux();
        let s = substitute(&d, &[(l(0), true)]).unwrap();
        println!("s = {}", s);
        // The former high child of the root becomes the new root.
        assert_eq!(s.root(), d.nodes()[0].high);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_substitute_root_false() {
        let d = mux();
        let s = substitute(&d, &[(l(0), false)]).unwrap();
        assert_eq!(s.root(), d.nodes()[0].low);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_substitute_inner_level() {
        let d = mux();
        let s = substitute(&d, &[(l(1), false)]).unwrap();
        println!("s = {}", s);
        for x in assignments(3).filter(|x| !x[1]) {
            assert_eq!(eval(&s, &x), eval(&d, &x));
        }
        // The root's high arc is redirected straight to the false sink.
        assert_eq!(s.nodes()[0].high, Ptr::FALSE);
    }

    #[test]
    fn test_substitute_chain_of_elisions() {
        let d = mux();
        let s = substitute(&d, &[(l(2), true), (l(1), true)]).unwrap();
        println!("s = {}", s);
        for x in assignments(3).filter(|x| x[1] && x[2]) {
            assert_eq!(eval(&s, &x), eval(&d, &x));
        }
        assert!(s.reduce().is_true());
    }

    #[test]
    fn test_substitute_collapses_to_sink() {
        let d = Diagram::var(l(0));
        assert_eq!(substitute(&d, &[(l(0), true)]).unwrap(), Diagram::sink(true));
        assert_eq!(substitute(&d, &[(l(0), false)]).unwrap(), Diagram::sink(false));
    }

    #[test]
    fn test_substitute_unused_label() {
        let d = mux();
        assert_eq!(substitute(&d, &[(l(7), true)]).unwrap(), d);
        assert_eq!(substitute(&d, &[]).unwrap(), d);
    }

    #[test]
    fn test_substitute_assignment_order() {
        let d = mux();
        let unsorted = substitute(&d, &[(l(2), true), (l(9), false), (l(0), false)]).unwrap();
        let sorted = substitute(&d, &[(l(0), false), (l(2), true), (l(9), false)]).unwrap();
        assert_eq!(unsorted, sorted);
        assert!(unsorted.reduce().is_true());
    }

    #[test]
    fn test_substitute_duplicate_label() {
        let d = mux();
        assert_eq!(
            substitute(&d, &[(l(1), true), (l(0), false), (l(1), true)]),
            Err(Error::DuplicateAssignment { label: l(1) })
        );
        // Rejected even for a lone sink.
        assert!(substitute(&Diagram::sink(true), &[(l(0), true), (l(0), false)]).is_err());
    }

    #[test]
    fn test_substitute_shared_child_emitted_once() {
        // Both children of x1b and the high child of x1 lead to x2.
        let x2 = node(3, 2, Ptr::FALSE, Ptr::TRUE);
        let x1 = node(2, 1, Ptr::FALSE, x2.ptr());
        let x1b = node(4, 1, x2.ptr(), Ptr::TRUE);
        let root = node(1, 0, x1b.ptr(), x1.ptr());
        let d = Diagram::from_nodes(vec![root, x1, x1b, x2], root.ptr()).unwrap();

        let s = substitute(&d, &[(l(5), true)]).unwrap();
        assert_eq!(s.len(), 4);
        assert_eq!(s, d);
    }

    #[test]
    fn test_restrict() {
        let d = mux();
        assert_eq!(d.restrict(l(0), true), Diagram::var(l(1)));
        assert_eq!(d.restrict(l(0), false), Diagram::var(l(2)));
    }
}
