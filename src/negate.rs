//! Negation by flipping sinks.

use log::debug;

use crate::diagram::Diagram;
use crate::node::Node;

/// Returns the complement of `diagram`.
///
/// A single sequential pass that swaps the two sinks in every child slot.
/// Node identities and the shape are kept, so a reduced input gives a reduced
/// output.
pub fn negate(diagram: &Diagram) -> Diagram {
    if let Some(value) = diagram.sink_value() {
        return Diagram::sink(!value);
    }
    let nodes: Vec<Node> = diagram
        .top_down()
        .map(|n| Node::new(n.uid, n.label, !n.low, !n.high))
        .collect();
    debug!("negate: {} nodes", nodes.len());
    Diagram::from_sorted(nodes, diagram.root())
}

impl Diagram {
    /// See [`negate`].
    pub fn negate(&self) -> Diagram {
        negate(self)
    }
}

impl std::ops::Not for &Diagram {
    type Output = Diagram;

    fn not(self) -> Diagram {
        negate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::eval::eval;
    use crate::types::Label;

    #[test]
    fn test_negate_sinks() {
        assert_eq!(negate(&Diagram::sink(true)), Diagram::sink(false));
        assert_eq!(!&Diagram::sink(false), Diagram::sink(true));
    }

    #[test]
    fn test_negate_var() {
        assert_eq!(Diagram::var(Label::new(2)).negate(), Diagram::nvar(Label::new(2)));
    }

    #[test]
    fn test_negate_semantics() {
        let x = Diagram::var(Label::new(0));
        let y = Diagram::var(Label::new(1));
        let z = Diagram::var(Label::new(2));
        let f = x.and(&y).unwrap().or(&z).unwrap();
        let g = !&f;
        assert!(g.is_reduced());
        assert_eq!(negate(&g), f);
        for bits in 0..8u32 {
            let v: Vec<bool> = (0..3).map(|i| bits >> i & 1 == 1).collect();
            assert_eq!(eval(&g, &v), eval(&f, &v).map(|b| !b));
        }
    }
}
