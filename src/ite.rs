//! If-then-else as a single top-down product of three diagrams.
//!
//! Every output node stands for a triple `(f, g, h)` of input pointers and is
//! handled on the smallest level among them. Each input is read through its
//! own top-down sequence, so a triple whose level is shared by several inputs
//! visits them one at a time: queue `Q[i]` holds triples that still need the
//! node of input `i`, keyed by that pointer first. The sweep serves the queue
//! with the smallest level, and the lowest index on a tie. A triple that has
//! read its node from input `i` is handed over to the next input on the same
//! level together with the children read so far.
//!
//! The output is not reduced.

use log::{debug, trace};

use crate::diagram::Diagram;
use crate::product::{number, ProductNode, Slot};
use crate::queue::{PriorityQueue, Queue};
use crate::reference::Ptr;
use crate::types::Label;

type Triple = [Ptr; 3];

/// Children read so far, per input.
type Children = [Option<(Ptr, Ptr)>; 3];

/// `if f then g else h`.
///
/// The result evaluates to `eval(g, x)` where `f` holds and to `eval(h, x)`
/// elsewhere. It is not reduced.
///
/// # Examples
///
/// ```
/// use sweep_bdd::{eval, ite, Diagram, Label};
///
/// let x = Diagram::var(Label::new(0));
/// let y = Diagram::var(Label::new(1));
/// let z = Diagram::var(Label::new(2));
///
/// let f = ite(&x, &y, &z);
/// assert_eq!(eval(&f, &[true, true, false]), Ok(true));
/// assert_eq!(eval(&f, &[false, true, false]), Ok(false));
/// ```
pub fn ite(f: &Diagram, g: &Diagram, h: &Diagram) -> Diagram {
    debug!("ite: {} / {} / {} nodes", f.len(), g.len(), h.len());

    let root = resolve([f.root(), g.root(), h.root()]);
    let root_key = match root {
        Slot::Product(_, key) => key,
        Slot::Sink(sink) => {
            debug!("ite: resolved to {} at the roots", sink);
            return number(Vec::new(), root);
        }
    };

    let mut cursors = [f, g, h].map(|d| d.top_down());
    let mut queues: [Queue<(Ptr, Triple), Children>; 3] = std::array::from_fn(|_| Queue::new());
    request(&mut queues, root_key);

    let mut output: Vec<ProductNode<Triple>> = Vec::new();
    let mut coalesced = 0usize;
    let mut handed_over = 0usize;

    loop {
        let next = (0..3)
            .filter_map(|i| queues[i].peek_min().map(|&(ptr, _)| (ptr.label(), i)))
            .min();
        let Some((level, i)) = next else {
            break;
        };
        let Some(((ptr, triple), mut children)) = queues[i].extract_min() else {
            break;
        };
        while queues[i].extract_if_min(&(ptr, triple)).is_some() {
            coalesced += 1;
        }

        let node = cursors[i].seek(ptr);
        children[i] = Some((node.low, node.high));
        if let Some(j) = (i + 1..3).find(|&j| triple[j].label() == level) {
            handed_over += 1;
            queues[j].insert((triple[j], triple), children);
            continue;
        }

        let mut low = triple;
        let mut high = triple;
        for ((read, lo), hi) in children.iter().zip(low.iter_mut()).zip(high.iter_mut()) {
            if let Some((l, h)) = *read {
                *lo = l;
                *hi = h;
            }
        }
        let low = resolve(low);
        let high = resolve(high);
        for slot in [low, high] {
            if let Slot::Product(_, key) = slot {
                request(&mut queues, key);
            }
        }
        trace!("ite: {:?} -> {:?} / {:?}", triple, low, high);
        output.push(ProductNode {
            label: level,
            key: triple,
            low,
            high,
        });
    }

    debug!(
        "ite: {} nodes emitted ({} coalesced, {} handed over)",
        output.len(),
        coalesced,
        handed_over
    );
    number(output, root)
}

/// Smallest label among the triple.
fn level(triple: Triple) -> Label {
    triple.iter().map(|p| p.label()).min().unwrap_or(Label::SINK)
}

/// Normalizes a triple and decides it if it selects a sink.
///
/// Components that can no longer influence the result are replaced by the
/// `false` sink, so equivalent triples coalesce.
fn resolve(triple: Triple) -> Slot<Triple> {
    let [f, g, h] = triple;
    let triple = match f.value() {
        Some(true) => [Ptr::TRUE, g, Ptr::FALSE],
        Some(false) => [Ptr::FALSE, Ptr::FALSE, h],
        // Node pointers of different inputs may coincide, only sinks compare.
        None if g.is_sink() && g == h => [Ptr::TRUE, g, Ptr::FALSE],
        None => triple,
    };
    let [f, g, h] = triple;
    match f.value() {
        Some(true) if g.is_sink() => Slot::Sink(g),
        Some(false) if h.is_sink() => Slot::Sink(h),
        _ => Slot::Product(level(triple), triple),
    }
}

/// Queues a request for `triple` with the first input on its level.
fn request(queues: &mut [Queue<(Ptr, Triple), Children>; 3], triple: Triple) {
    let level = level(triple);
    match (0..3).find(|&i| triple[i].label() == level) {
        Some(i) => queues[i].insert((triple[i], triple), [None; 3]),
        None => panic!("ite: {:?} has no node to read", triple),
    }
}

impl Diagram {
    /// `if self then then_ else else_`, reduced.
    pub fn ite(&self, then_: &Diagram, else_: &Diagram) -> Diagram {
        ite(self, then_, else_).reduce()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::eval::eval;
    use crate::node::Node;
    use crate::types::Uid;

    fn var(i: u32) -> Diagram {
        Diagram::var(Label::new(i))
    }

    fn assignments(n: usize) -> impl Iterator<Item = Vec<bool>> {
        (0..1u32 << n).map(move |bits| (0..n).map(|i| bits >> i & 1 == 1).collect())
    }

    #[test]
    fn test_ite_mux() {
        let (x, y, z) = (var(0), var(1), var(2));
        let f = ite(&x, &y, &z);
        for v in assignments(3) {
            assert_eq!(eval(&f, &v), Ok(if v[0] { v[1] } else { v[2] }));
        }
        let expected = x.and(&y).unwrap().or(&x.negate().and(&z).unwrap()).unwrap();
        assert_eq!(f.reduce(), expected);
    }

    #[test]
    fn test_ite_terminal_cases() {
        let (x, y, z) = (var(0), var(1), var(2));
        let t = Diagram::sink(true);
        let f = Diagram::sink(false);

        assert_eq!(ite(&t, &y, &z).reduce(), y);
        assert_eq!(ite(&f, &y, &z).reduce(), z);
        assert_eq!(ite(&x, &y, &y).reduce(), y);
        assert_eq!(ite(&x, &t, &f).reduce(), x);
        assert_eq!(ite(&x, &f, &t).reduce(), Diagram::nvar(Label::new(0)));
        assert!(ite(&t, &t, &z).is_true());
        assert!(ite(&x, &f, &f).is_false());
    }

    #[test]
    fn test_ite_shared_levels() {
        // All three inputs test x0 and x1.
        let (x, y) = (var(0), var(1));
        let a = x.xor(&y).unwrap();
        let b = x.and(&y).unwrap();
        let c = x.or(&y).unwrap();
        let f = ite(&a, &b, &c);
        for v in assignments(2) {
            let cond = v[0] ^ v[1];
            let expected = if cond { v[0] && v[1] } else { v[0] || v[1] };
            assert_eq!(eval(&f, &v), Ok(expected), "at {:?}", v);
        }
        assert_eq!(a.ite(&b, &c), x.and(&y).unwrap());
    }

    #[test]
    fn test_ite_equal_pointers_in_different_inputs() {
        // Both branches have a single node with uid 0 on level 1.
        let y = var(1);
        let ny = Diagram::nvar(Label::new(1));
        assert_eq!(y.root(), ny.root());
        let f = ite(&var(0), &y, &ny);
        for v in assignments(2) {
            assert_eq!(eval(&f, &v), Ok(if v[0] { v[1] } else { !v[1] }));
        }
    }

    #[test]
    fn test_ite_triples_emitted_once() {
        let (x, y, z) = (var(0), var(1), var(2));
        let g = y.xor(&z).unwrap();
        let h = y.and(&z).unwrap();
        let f = ite(&x, &g, &h);
        let mut ptrs: Vec<Ptr> = f.nodes().iter().map(|n| n.ptr()).collect();
        ptrs.dedup();
        assert_eq!(ptrs.len(), f.len());
    }

    #[test]
    fn test_ite_large_input_uids() {
        let n = Node::new(Uid::new(1 << 40), Label::new(0), Ptr::FALSE, Ptr::TRUE);
        let x = Diagram::from_nodes(vec![n], n.ptr()).unwrap();
        let f = ite(&x, &var(1), &var(2));
        assert!(f.nodes().iter().all(|n| n.uid.id() < 2));
        assert_eq!(f.reduce(), x.ite(&var(1), &var(2)));
    }
}
