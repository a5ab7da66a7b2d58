//! Evaluation of a diagram under a full assignment.

use log::trace;

use crate::diagram::Diagram;
use crate::error::{Error, Result};
use crate::reference::Ptr;
use crate::types::Label;

/// Follows the single path selected by `assignment` from the root to a sink
/// and returns the sink's value.
///
/// `assignment[l]` is the value of the variable with label `l`. Only the labels
/// met on the path need to be covered; a shorter vector is an error only if
/// the path actually reaches an uncovered label.
///
/// Visits at most one node per level and uses no queue.
///
/// # Examples
///
/// ```
/// use sweep_bdd::{eval, Diagram, Label};
///
/// let x = Diagram::var(Label::new(0));
/// assert_eq!(eval(&x, &[true]), Ok(true));
/// assert_eq!(eval(&x, &[false]), Ok(false));
/// ```
pub fn eval(diagram: &Diagram, assignment: &[bool]) -> Result<bool> {
    let mut current = diagram.root();
    loop {
        if let Some(value) = current.value() {
            return Ok(value);
        }
        let node = diagram.get(current).unwrap_or_else(|| {
            panic!("validated diagram lost node {}", current);
        });
        let value = *assignment
            .get(node.label.as_usize())
            .ok_or(Error::MissingAssignment {
                label: node.label,
                len: assignment.len(),
            })?;
        current = if value { node.high } else { node.low };
        trace!("eval: {} = {} -> {}", node.label, value, current);
    }
}

/// Evaluates under a sparse assignment of `(label, value)` pairs sorted by
/// label. Labels absent from the list must not occur on the chosen path.
pub fn eval_sparse(diagram: &Diagram, assignment: &[(Label, bool)]) -> Result<bool> {
    let mut current: Ptr = diagram.root();
    let mut cursor = assignment.iter().peekable();
    loop {
        if let Some(value) = current.value() {
            return Ok(value);
        }
        let node = diagram.get(current).unwrap_or_else(|| {
            panic!("validated diagram lost node {}", current);
        });
        // The path visits labels in increasing order, so the cursor only moves forward.
        while cursor.next_if(|(l, _)| *l < node.label).is_some() {}
        let value = match cursor.peek() {
            Some(&&(l, v)) if l == node.label => v,
            _ => {
                return Err(Error::MissingAssignment {
                    label: node.label,
                    len: assignment.len(),
                })
            }
        };
        current = if value { node.high } else { node.low };
    }
}
