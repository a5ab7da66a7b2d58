//! Existential and universal quantification.
//!
//! Both are compositions of the core sweeps: the two cofactors are produced by
//! [`substitute`], combined by [`apply`] and canonicalized by [`reduce`].

use log::debug;

use crate::apply::apply;
use crate::diagram::Diagram;
use crate::error::Result;
use crate::op::BoolOp;
use crate::reduce::reduce;
use crate::substitute::substitute;
use crate::types::Label;

fn quantify(diagram: &Diagram, labels: &[Label], op: BoolOp) -> Result<Diagram> {
    let mut result = diagram.reduce();
    for &label in labels {
        let low = substitute(&result, &[(label, false)])?;
        let high = substitute(&result, &[(label, true)])?;
        result = reduce(&apply(&low, &high, op)?);
        debug!("quantify {:?} over {}: {} nodes", op, label, result.len());
    }
    Ok(result)
}

/// `exists label. diagram`, reduced.
///
/// ```
/// use sweep_bdd::{exists, Diagram, Label};
///
/// let x = Diagram::var(Label::new(0));
/// let y = Diagram::var(Label::new(1));
/// let f = x.and(&y).unwrap();
/// assert_eq!(exists(&f, Label::new(0)).unwrap(), y);
/// ```
pub fn exists(diagram: &Diagram, label: Label) -> Result<Diagram> {
    quantify(diagram, &[label], BoolOp::OR)
}

/// `forall label. diagram`, reduced.
pub fn forall(diagram: &Diagram, label: Label) -> Result<Diagram> {
    quantify(diagram, &[label], BoolOp::AND)
}

impl Diagram {
    /// Existentially quantifies every label in `labels`.
    pub fn exists(&self, labels: &[Label]) -> Result<Diagram> {
        quantify(self, labels, BoolOp::OR)
    }

    /// Universally quantifies every label in `labels`.
    pub fn forall(&self, labels: &[Label]) -> Result<Diagram> {
        quantify(self, labels, BoolOp::AND)
    }
}
