//! Synchronized top-down product of two diagrams.
//!
//! # Algorithm
//!
//! Every node of the output stands for a pair `(v1, v2)` of a node (or sink)
//! from each input. The pairs are discovered top-down, starting from the pair
//! of roots, and processed level by level. Both inputs are read once through
//! top-down sequences, so each pair must be handled when the sweep over the
//! side that *supplies its label* reaches it:
//!
//! - `Q1` holds pairs with `v1.label < v2.label`, keyed by `(v1, v2)`,
//! - `Q2` holds pairs with `v1.label > v2.label`, keyed by `(v2, v1)`,
//! - pairs on equal labels go to both queues.
//!
//! The sweep always serves the queue whose head is on the smaller level, and
//! `Q1` on a tie. An equal-level pair therefore reaches `Q1` first: `Q1` reads
//! the children of `v1` and hands them over to `Q2` as a new request for the
//! same pair. `Q2` then reads `v2`, combines both and emits the output node.
//! The copies of the pair that were queued in `Q2` without data are drained
//! together with it and discarded.
//!
//! When a queue is served, all requests for the same pair are drained at
//! once, so every pair is emitted exactly once.
//!
//! Output nodes are identified by their pair during the sweep and receive
//! dense per-level uids afterwards (see [`product`](crate::product)), so any
//! valid inputs can be combined. The output is not reduced.

use log::{debug, trace};

use crate::diagram::Diagram;
use crate::error::Result;
use crate::op::{BoolOp, Operator};
use crate::product::{number, ProductNode, Slot};
use crate::queue::{PriorityQueue, Queue};
use crate::reference::Ptr;

/// Tuning knobs for [`apply_with_config`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ApplyConfig {
    /// Resolve a pair to a sink as soon as one side is a sink that fixes the
    /// operator's value, e.g. `false` for AND. Turning this off makes the
    /// product descend into the other side anyway.
    pub shortcut_sinks: bool,
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self { shortcut_sinks: true }
    }
}

/// Combines two diagrams with a binary operator.
///
/// The result evaluates to `op(eval(left, x), eval(right, x))` for every
/// assignment `x`. The operator must be defined on all four pairs of sink
/// values, otherwise [`PartialOperator`](crate::error::Error::PartialOperator)
/// is returned before the sweep starts. This is the only way it fails. The
/// result is not reduced.
///
/// # Examples
///
/// ```
/// use sweep_bdd::{apply, eval, reduce, BoolOp, Diagram, Label};
///
/// let x = Diagram::var(Label::new(0));
/// let y = Diagram::var(Label::new(1));
///
/// let f = reduce(&apply(&x, &y, BoolOp::OR).unwrap());
/// assert_eq!(eval(&f, &[false, true]), Ok(true));
/// assert_eq!(eval(&f, &[false, false]), Ok(false));
///
/// // Any total closure works as well.
/// let g = apply(&x, &y, |a: bool, b: bool| Some(a && !b)).unwrap();
/// assert_eq!(eval(&g, &[true, false]), Ok(true));
/// ```
pub fn apply(left: &Diagram, right: &Diagram, op: impl Operator) -> Result<Diagram> {
    apply_with_config(left, right, op, &ApplyConfig::default())
}

/// [`apply`] with explicit configuration.
pub fn apply_with_config(left: &Diagram, right: &Diagram, op: impl Operator, config: &ApplyConfig) -> Result<Diagram> {
    let table = op.table()?;
    debug!(
        "apply: {} x {} nodes with {:?}",
        left.len(),
        right.len(),
        table
    );

    let mut product = Product {
        table,
        shortcut_sinks: config.shortcut_sinks,
        shortcuts: 0,
    };

    let root = product.resolve(left.root(), right.root());
    if let Slot::Sink(sink) = root {
        debug!("apply: resolved to {} at the roots", sink);
        return Ok(number(Vec::new(), root));
    }

    let mut nodes1 = left.top_down();
    let mut nodes2 = right.top_down();

    let mut q1: Queue<(Ptr, Ptr), ()> = Queue::new();
    let mut q2: Queue<(Ptr, Ptr), Option<(Ptr, Ptr)>> = Queue::new();
    forward(&mut q1, &mut q2, left.root(), right.root());

    let mut output: Vec<ProductNode<(Ptr, Ptr)>> = Vec::new();
    let mut coalesced = 0usize;
    let mut handed_over = 0usize;

    loop {
        let next = match (q1.peek_min(), q2.peek_min()) {
            (None, None) => break,
            (Some(&(v1, v2)), None) => Side::Left(v1, v2),
            (None, Some(&(v2, v1))) => Side::Right(v1, v2),
            (Some(&(v1, v2)), Some(&(w2, w1))) => {
                if v1.label() <= w2.label() {
                    Side::Left(v1, v2)
                } else {
                    Side::Right(w1, w2)
                }
            }
        };

        match next {
            Side::Left(v1, v2) => {
                let mut copies = 0usize;
                while q1.extract_if_min(&(v1, v2)).is_some() {
                    copies += 1;
                }
                coalesced += copies - 1;

                let n1 = nodes1.seek(v1);
                if v1.label() == v2.label() {
                    trace!("apply: handing ({}, {}) over with {}'s children", v1, v2, v1);
                    handed_over += 1;
                    q2.insert((v2, v1), Some((n1.low, n1.high)));
                    continue;
                }
                let low = (n1.low, v2);
                let high = (n1.high, v2);
                output.push(product.emit(&mut q1, &mut q2, (v1, v2), low, high));
            }
            Side::Right(v1, v2) => {
                let mut copies = 0usize;
                let mut children1: Option<(Ptr, Ptr)> = None;
                while let Some(data) = q2.extract_if_min(&(v2, v1)) {
                    copies += 1;
                    children1 = children1.or(data);
                }

                let n2 = nodes2.seek(v2);
                let (low, high) = if v1.label() == v2.label() {
                    // The hand-over itself is not a duplicate.
                    coalesced += copies - 2;
                    let (low1, high1) = children1
                        .unwrap_or_else(|| panic!("apply: ({}, {}) reached Q2 before Q1", v1, v2));
                    ((low1, n2.low), (high1, n2.high))
                } else {
                    coalesced += copies - 1;
                    ((v1, n2.low), (v1, n2.high))
                };
                output.push(product.emit(&mut q1, &mut q2, (v1, v2), low, high));
            }
        }
    }

    debug!(
        "apply: {} nodes emitted ({} requests, {} coalesced, {} handed over, {} sink shortcuts)",
        output.len(),
        q1.inserted() + q2.inserted(),
        coalesced,
        handed_over,
        product.shortcuts
    );

    Ok(number(output, root))
}

/// Which queue serves the next pair `(v1, v2)`.
enum Side {
    Left(Ptr, Ptr),
    Right(Ptr, Ptr),
}

struct Product {
    table: BoolOp,
    shortcut_sinks: bool,
    shortcuts: usize,
}

impl Product {
    /// Turns a pair of input pointers into an output slot: a sink if the
    /// value is already decided, the pair itself otherwise.
    fn resolve(&mut self, a: Ptr, b: Ptr) -> Slot<(Ptr, Ptr)> {
        if a.is_sink() && b.is_sink() {
            return Slot::Sink(self.table.apply_sinks(a, b));
        }
        if self.shortcut_sinks {
            let decided = match (a.value(), b.value()) {
                (Some(x), None) => self.table.left_shortcut(x),
                (None, Some(y)) => self.table.right_shortcut(y),
                _ => None,
            };
            if let Some(value) = decided {
                self.shortcuts += 1;
                return Slot::Sink(Ptr::sink(value));
            }
        }
        Slot::Product(a.label().min(b.label()), (a, b))
    }

    /// Emits the node for `pair` and schedules its children.
    fn emit(
        &mut self,
        q1: &mut Queue<(Ptr, Ptr), ()>,
        q2: &mut Queue<(Ptr, Ptr), Option<(Ptr, Ptr)>>,
        pair: (Ptr, Ptr),
        low: (Ptr, Ptr),
        high: (Ptr, Ptr),
    ) -> ProductNode<(Ptr, Ptr)> {
        let low_slot = self.resolve(low.0, low.1);
        let high_slot = self.resolve(high.0, high.1);
        for (slot, (a, b)) in [(low_slot, low), (high_slot, high)] {
            if slot.is_product() {
                forward(q1, q2, a, b);
            }
        }
        trace!("apply: ({}, {}) -> {:?} / {:?}", pair.0, pair.1, low_slot, high_slot);
        ProductNode {
            label: pair.0.label().min(pair.1.label()),
            key: pair,
            low: low_slot,
            high: high_slot,
        }
    }
}

/// Queues a request for the pair `(a, b)` on the side(s) that own its level.
fn forward(q1: &mut Queue<(Ptr, Ptr), ()>, q2: &mut Queue<(Ptr, Ptr), Option<(Ptr, Ptr)>>, a: Ptr, b: Ptr) {
    if a.label() <= b.label() {
        q1.insert((a, b), ());
    }
    if a.label() >= b.label() {
        q2.insert((b, a), None);
    }
}

impl Diagram {
    /// Combines with `other` through `op` and reduces the result.
    pub fn combine(&self, other: &Diagram, op: impl Operator) -> Result<Diagram> {
        Ok(apply(self, other, op)?.reduce())
    }

    /// Conjunction, reduced.
    pub fn and(&self, other: &Diagram) -> Result<Diagram> {
        self.combine(other, BoolOp::AND)
    }

    /// Disjunction, reduced.
    pub fn or(&self, other: &Diagram) -> Result<Diagram> {
        self.combine(other, BoolOp::OR)
    }

    /// Exclusive or, reduced.
    pub fn xor(&self, other: &Diagram) -> Result<Diagram> {
        self.combine(other, BoolOp::XOR)
    }

    /// Implication `self -> other`, reduced.
    pub fn imp(&self, other: &Diagram) -> Result<Diagram> {
        self.combine(other, BoolOp::IMP)
    }

    /// Equivalence, reduced.
    pub fn iff(&self, other: &Diagram) -> Result<Diagram> {
        self.combine(other, BoolOp::IFF)
    }

    /// Difference `self & !other`, reduced.
    pub fn diff(&self, other: &Diagram) -> Result<Diagram> {
        self.combine(other, BoolOp::DIFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::error::Error;
    use crate::eval::eval;
    use crate::node::Node;
    use crate::types::{Label, Uid};

    fn node(uid: u64, label: u32, low: Ptr, high: Ptr) -> Node {
        Node::new(Uid::new(uid), Label::new(label), low, high)
    }

    fn assignments(n: usize) -> impl Iterator<Item = Vec<bool>> {
        (0..1u32 << n).map(move |bits| (0..n).map(|i| bits >> i & 1 == 1).collect())
    }

    /// x0 ? x2 : (x1 & x2), not reduced.
    fn sample() -> Diagram {
        let x2 = node(3, 2, Ptr::FALSE, Ptr::TRUE);
        let x1 = node(2, 1, Ptr::FALSE, x2.ptr());
        let root = node(1, 0, x1.ptr(), x2.ptr());
        Diagram::from_nodes(vec![root, x1, x2], root.ptr()).unwrap()
    }

    const OPS: [BoolOp; 10] = [
        BoolOp::AND,
        BoolOp::NAND,
        BoolOp::OR,
        BoolOp::NOR,
        BoolOp::XOR,
        BoolOp::IFF,
        BoolOp::IMP,
        BoolOp::IMP_INV,
        BoolOp::DIFF,
        BoolOp::LESS,
    ];

    #[test]
    fn test_apply_and_single_variable() {
        let g = Diagram::var(Label::new(0));
        let f = apply(&g, &g, BoolOp::AND).unwrap();
        println!("f = {}", f);
        assert_eq!(eval(&f, &[true]), Ok(true));
        assert_eq!(eval(&f, &[false]), Ok(false));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn test_apply_all_operators() {
        let a = sample();
        let b = Diagram::var(Label::new(1)).xor(&Diagram::var(Label::new(2))).unwrap();
        for op in OPS {
            for config in [ApplyConfig::default(), ApplyConfig { shortcut_sinks: false }] {
                let f = apply_with_config(&a, &b, op, &config).unwrap();
                for x in assignments(3) {
                    let expected = op.apply(eval(&a, &x).unwrap(), eval(&b, &x).unwrap());
                    assert_eq!(eval(&f, &x), Ok(expected), "{:?} at {:?}", op, x);
                }
            }
        }
    }

    #[test]
    fn test_apply_commutative() {
        let a = sample();
        let b = Diagram::nvar(Label::new(1));
        for op in OPS.into_iter().filter(|op| op.is_commutative()) {
            let ab = apply(&a, &b, op).unwrap();
            let ba = apply(&b, &a, op).unwrap();
            assert!(ab.equivalent(&ba), "{:?}", op);
        }
    }

    #[test]
    fn test_apply_sinks() {
        let t = Diagram::sink(true);
        let f = Diagram::sink(false);
        assert_eq!(apply(&t, &f, BoolOp::OR).unwrap(), t);
        assert_eq!(apply(&t, &f, BoolOp::AND).unwrap(), f);
        assert_eq!(apply(&t, &t, BoolOp::XOR).unwrap(), f);
    }

    #[test]
    fn test_apply_shortcut() {
        let a = sample();
        let f = Diagram::sink(false);
        assert_eq!(apply(&a, &f, BoolOp::AND).unwrap(), f);
        assert_eq!(apply(&f, &a, BoolOp::IMP).unwrap(), Diagram::sink(true));

        // Without shortcutting the product walks all of `a`.
        let config = ApplyConfig { shortcut_sinks: false };
        let g = apply_with_config(&a, &f, BoolOp::AND, &config).unwrap();
        assert_eq!(g.len(), a.len());
        assert!(g.reduce().is_false());
    }

    #[test]
    fn test_apply_sink_against_node() {
        // XOR with true never short-circuits: it negates.
        let a = sample();
        let f = apply(&a, &Diagram::sink(true), BoolOp::XOR).unwrap();
        for x in assignments(3) {
            assert_eq!(eval(&f, &x), eval(&a, &x).map(|v| !v));
        }
    }

    #[test]
    fn test_apply_output_not_reduced() {
        let x = Diagram::var(Label::new(0));
        let f = apply(&x, &x, BoolOp::XOR).unwrap();
        assert_eq!(f.len(), 1);
        assert!(!f.is_reduced());
        assert!(f.reduce().is_false());
    }

    #[test]
    fn test_apply_shared_pairs_emitted_once() {
        // Both branches of the root of `a` meet x2 paired with the same node.
        let a = sample();
        let b = Diagram::var(Label::new(2));
        let f = apply(&a, &b, BoolOp::AND).unwrap();
        let mut ptrs: Vec<Ptr> = f.nodes().iter().map(|n| n.ptr()).collect();
        ptrs.dedup();
        assert_eq!(ptrs.len(), f.len());
    }

    #[test]
    fn test_apply_partial_operator() {
        let x = Diagram::var(Label::new(0));
        let op = |a: bool, b: bool| if a && b { None } else { Some(a || b) };
        assert_eq!(
            apply(&x, &x, op),
            Err(Error::PartialOperator {
                left: true,
                right: true
            })
        );
        // Rejected up front, even when the sinks alone would not need that pair.
        assert!(apply(&Diagram::sink(false), &Diagram::sink(false), op).is_err());
    }

    #[test]
    fn test_apply_large_input_uids() {
        // Any uid below the sink range is a valid input.
        let a = node(u64::MAX - 2, 0, Ptr::FALSE, Ptr::TRUE);
        let a = Diagram::from_nodes(vec![a], a.ptr()).unwrap();
        let b = node(1 << 33, 1, Ptr::FALSE, Ptr::TRUE);
        let b = Diagram::from_nodes(vec![b], b.ptr()).unwrap();

        let f = apply(&a, &b, BoolOp::AND).unwrap();
        for x in assignments(2) {
            assert_eq!(eval(&f, &x), Ok(x[0] && x[1]));
        }
        // Output uids are dense on every level.
        assert!(f.nodes().iter().all(|n| n.uid.id() < 2));

        let g = apply(&a, &a, BoolOp::XOR).unwrap();
        assert_eq!(g.nodes(), &[node(0, 0, Ptr::FALSE, Ptr::FALSE)]);
    }

    #[test]
    fn test_apply_chained_unreduced() {
        let a = sample();
        let b = Diagram::nvar(Label::new(1));
        let ab = apply(&a, &b, BoolOp::OR).unwrap();
        let f = apply(&ab, &a, BoolOp::XOR).unwrap();
        for x in assignments(3) {
            let expected = (eval(&a, &x).unwrap() || !x[1]) ^ eval(&a, &x).unwrap();
            assert_eq!(eval(&f, &x), Ok(expected));
        }
    }

    #[test]
    fn test_convenience_ops() {
        let x = Diagram::var(Label::new(0));
        let y = Diagram::var(Label::new(1));
        let cases: [(Diagram, fn(bool, bool) -> bool); 6] = [
            (x.and(&y).unwrap(), |a, b| a && b),
            (x.or(&y).unwrap(), |a, b| a || b),
            (x.xor(&y).unwrap(), |a, b| a ^ b),
            (x.imp(&y).unwrap(), |a, b| !a || b),
            (x.iff(&y).unwrap(), |a, b| a == b),
            (x.diff(&y).unwrap(), |a, b| a && !b),
        ];
        for (f, expected) in cases.iter() {
            assert!(f.is_reduced());
            for v in assignments(2) {
                assert_eq!(eval(f, &v), Ok(expected(v[0], v[1])));
            }
        }
    }
}
