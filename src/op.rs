//! Binary operators over sink values.
//!
//! [`apply`](crate::apply::apply) combines two diagrams with any [`Operator`]:
//! either a [`BoolOp`] truth table or a closure `Fn(bool, bool) -> Option<bool>`
//! where `None` marks a pair the operator is undefined for. Totality is
//! checked before a sweep starts.

use std::fmt;

use crate::error::{Error, Result};
use crate::reference::Ptr;

/// Something that can combine two sink values.
pub trait Operator {
    /// Returns the value of the operator, or `None` if it is undefined.
    fn eval(&self, left: bool, right: bool) -> Option<bool>;

    /// Tabulates the operator, failing on the first undefined pair.
    fn table(&self) -> Result<BoolOp> {
        let mut table = [false; 4];
        for (i, (left, right)) in PAIRS.into_iter().enumerate() {
            table[i] = self.eval(left, right).ok_or(Error::PartialOperator { left, right })?;
        }
        Ok(BoolOp(table))
    }
}

impl<F> Operator for F
where
    F: Fn(bool, bool) -> Option<bool>,
{
    fn eval(&self, left: bool, right: bool) -> Option<bool> {
        self(left, right)
    }
}

const PAIRS: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

/// A total boolean operator, stored as its truth table indexed by
/// `2 * left + right`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct BoolOp([bool; 4]);

impl BoolOp {
    pub const AND: BoolOp = BoolOp([false, false, false, true]);
    pub const NAND: BoolOp = BoolOp([true, true, true, false]);
    pub const OR: BoolOp = BoolOp([false, true, true, true]);
    pub const NOR: BoolOp = BoolOp([true, false, false, false]);
    pub const XOR: BoolOp = BoolOp([false, true, true, false]);
    pub const IFF: BoolOp = BoolOp([true, false, false, true]);
    /// `left -> right`
    pub const IMP: BoolOp = BoolOp([true, true, false, true]);
    /// `right -> left`
    pub const IMP_INV: BoolOp = BoolOp([true, false, true, true]);
    /// `left & !right`
    pub const DIFF: BoolOp = BoolOp([false, false, true, false]);
    /// `!left & right`
    pub const LESS: BoolOp = BoolOp([false, true, false, false]);

    /// Builds a table from a partial function, failing if it is not total.
    pub fn from_fn(f: impl Fn(bool, bool) -> Option<bool>) -> Result<Self> {
        f.table()
    }

    #[inline]
    pub fn apply(self, left: bool, right: bool) -> bool {
        self.0[2 * left as usize + right as usize]
    }

    /// Combines two sink pointers.
    ///
    /// # Panics
    ///
    /// Panics if either pointer is not a sink.
    pub(crate) fn apply_sinks(self, left: Ptr, right: Ptr) -> Ptr {
        match (left.value(), right.value()) {
            (Some(l), Some(r)) => Ptr::sink(self.apply(l, r)),
            _ => panic!("apply_sinks called on internal node(s) {} and {}", left, right),
        }
    }

    /// The operator with its arguments swapped.
    pub fn flip(self) -> Self {
        let t = self.0;
        BoolOp([t[0], t[2], t[1], t[3]])
    }

    pub fn is_commutative(self) -> bool {
        self == self.flip()
    }

    /// If a left argument of `value` fixes the result, returns that result:
    /// `op(value, false) == op(value, true)`.
    pub fn left_shortcut(self, value: bool) -> Option<bool> {
        let (a, b) = (self.apply(value, false), self.apply(value, true));
        (a == b).then_some(a)
    }

    /// If a right argument of `value` fixes the result, returns that result:
    /// `op(false, value) == op(true, value)`.
    pub fn right_shortcut(self, value: bool) -> Option<bool> {
        self.flip().left_shortcut(value)
    }
}

impl Operator for BoolOp {
    fn eval(&self, left: bool, right: bool) -> Option<bool> {
        Some(self.apply(left, right))
    }

    fn table(&self) -> Result<BoolOp> {
        Ok(*self)
    }
}

impl fmt::Debug for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            BoolOp::AND => "AND",
            BoolOp::NAND => "NAND",
            BoolOp::OR => "OR",
            BoolOp::NOR => "NOR",
            BoolOp::XOR => "XOR",
            BoolOp::IFF => "IFF",
            BoolOp::IMP => "IMP",
            BoolOp::IMP_INV => "IMP_INV",
            BoolOp::DIFF => "DIFF",
            BoolOp::LESS => "LESS",
            BoolOp(t) => return write!(f, "BoolOp({:?})", t),
        };
        write!(f, "BoolOp::{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_tables() {
        for (l, r) in PAIRS {
            assert_eq!(BoolOp::AND.apply(l, r), l && r);
            assert_eq!(BoolOp::NAND.apply(l, r), !(l && r));
            assert_eq!(BoolOp::OR.apply(l, r), l || r);
            assert_eq!(BoolOp::NOR.apply(l, r), !(l || r));
            assert_eq!(BoolOp::XOR.apply(l, r), l ^ r);
            assert_eq!(BoolOp::IFF.apply(l, r), l == r);
            assert_eq!(BoolOp::IMP.apply(l, r), !l || r);
            assert_eq!(BoolOp::IMP_INV.apply(l, r), l || !r);
            assert_eq!(BoolOp::DIFF.apply(l, r), l && !r);
            assert_eq!(BoolOp::LESS.apply(l, r), !l && r);
        }
    }

    #[test]
    fn test_from_fn() {
        let op = BoolOp::from_fn(|l, r| Some(l && r)).unwrap();
        assert_eq!(op, BoolOp::AND);

        let partial = BoolOp::from_fn(|l, r| if l && r { None } else { Some(l) });
        assert_eq!(
            partial,
            Err(Error::PartialOperator {
                left: true,
                right: true
            })
        );
    }

    #[test]
    fn test_flip_and_commutativity() {
        assert_eq!(BoolOp::IMP.flip(), BoolOp::IMP_INV);
        assert_eq!(BoolOp::DIFF.flip(), BoolOp::LESS);
        assert!(BoolOp::AND.is_commutative());
        assert!(BoolOp::XOR.is_commutative());
        assert!(!BoolOp::IMP.is_commutative());
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(BoolOp::AND.left_shortcut(false), Some(false));
        assert_eq!(BoolOp::AND.left_shortcut(true), None);
        assert_eq!(BoolOp::OR.right_shortcut(true), Some(true));
        assert_eq!(BoolOp::IMP.left_shortcut(false), Some(true));
        assert_eq!(BoolOp::IMP.right_shortcut(true), Some(true));
        assert_eq!(BoolOp::IMP.right_shortcut(false), None);
        assert_eq!(BoolOp::XOR.left_shortcut(true), None);
    }

    #[test]
    fn test_apply_sinks() {
        assert_eq!(BoolOp::OR.apply_sinks(Ptr::FALSE, Ptr::TRUE), Ptr::TRUE);
        assert_eq!(BoolOp::AND.apply_sinks(Ptr::FALSE, Ptr::TRUE), Ptr::FALSE);
    }

    #[test]
    fn test_debug_names() {
        assert_eq!(format!("{:?}", BoolOp::XOR), "BoolOp::XOR");
        let custom = BoolOp::from_fn(|_, _| Some(true)).unwrap();
        assert_eq!(format!("{:?}", custom), "BoolOp([true, true, true, true])");
    }
}
