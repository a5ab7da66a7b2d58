//! Diagram to DOT (Graphviz) conversion.
//!
//! The generated graph follows these conventions:
//! - **Sinks** are rendered as squares on the bottom rank
//! - **Internal nodes** are rendered as circles, one rank per level
//! - **Edges**: solid lines for high branches, dashed lines for low branches
//! - **The root** gets an extra rectangle on the top rank
//!
//! # Examples
//!
//! ```
//! use sweep_bdd::{Diagram, Label};
//!
//! let x = Diagram::var(Label::new(0));
//! let y = Diagram::var(Label::new(1));
//! let f = x.and(&y).unwrap();
//!
//! let dot = f.to_dot().unwrap();
//! // Render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::Write as _;

use crate::diagram::Diagram;
use crate::reference::Ptr;

/// Configuration options for DOT output generation.
///
/// ```
/// use sweep_bdd::dot::DotConfig;
/// use sweep_bdd::{Diagram, Label};
///
/// let x = Diagram::var(Label::new(0));
/// let config = DotConfig {
///     node_shape: "ellipse",
///     use_html_labels: false,
///     ..DotConfig::default()
/// };
/// let dot = x.to_dot_with_config(&config).unwrap();
/// assert!(dot.contains("shape=ellipse"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for internal nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for sinks (default: "square")
    pub sink_shape: &'static str,
    /// Shape for the root marker (default: "rect")
    pub root_shape: &'static str,
    /// Style for high edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for low edges (default: "dashed")
    pub low_edge_style: &'static str,
    /// Whether to use HTML labels for subscripts (default: true)
    pub use_html_labels: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            sink_shape: "square",
            root_shape: "rect",
            high_edge_style: "solid",
            low_edge_style: "dashed",
            use_html_labels: true,
        }
    }
}

/// DOT identifier of the node a pointer names.
fn dot_id(ptr: Ptr) -> String {
    match ptr.value() {
        Some(value) => format!("{}", value as u8),
        None => format!("n{}", ptr.uid().id()),
    }
}

impl Diagram {
    /// Converts the diagram to DOT format with the default configuration.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the diagram to DOT format.
    ///
    /// Nodes are written in top-down order, so every level forms one
    /// contiguous `rank=same` group.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}, fixedsize=true];", config.node_shape)?;

        writeln!(dot, "{{ rank=sink")?;
        writeln!(dot, "0 [shape={}, label=\"0\"];", config.sink_shape)?;
        writeln!(dot, "1 [shape={}, label=\"1\"];", config.sink_shape)?;
        writeln!(dot, "}}")?;

        let mut level = None;
        for node in self.nodes() {
            if level != Some(node.label) {
                if level.is_some() {
                    writeln!(dot, "}}")?;
                }
                writeln!(dot, "{{ rank=same")?;
                level = Some(node.label);
            }
            let label = if config.use_html_labels {
                format!("<x<SUB>{}</SUB>>", node.label.index())
            } else {
                format!("\"x{}\"", node.label.index())
            };
            writeln!(dot, "{} [label={}];", dot_id(node.ptr()), label)?;
        }
        if level.is_some() {
            writeln!(dot, "}}")?;
        }

        for node in self.nodes() {
            let id = dot_id(node.ptr());
            writeln!(dot, "{} -- {} [style={}];", id, dot_id(node.high), config.high_edge_style)?;
            writeln!(dot, "{} -- {} [style={}];", id, dot_id(node.low), config.low_edge_style)?;
        }

        writeln!(dot, "{{ rank=source")?;
        writeln!(dot, "r [shape={}, label=\"{}\"];", config.root_shape, self.root())?;
        writeln!(dot, "}}")?;
        writeln!(dot, "r -- {};", dot_id(self.root()))?;

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::types::Label;

    #[test]
    fn test_to_dot_basic() {
        let f = Diagram::cube(&[(Label::new(0), false), (Label::new(1), true), (Label::new(2), true)]).unwrap();
        let dot = f.to_dot().unwrap();
        println!("{}", dot);
        assert!(dot.starts_with("graph {"));
        assert!(dot.ends_with("}\n"));
        assert_eq!(dot.matches("rank=same").count(), 3);
        assert_eq!(dot.matches(" -- ").count(), 2 * f.len() + 1);
    }

    #[test]
    fn test_to_dot_sink() {
        let dot = Diagram::sink(false).to_dot().unwrap();
        assert!(!dot.contains("rank=same"));
        assert!(dot.contains("r -- 0;"));
    }

    #[test]
    fn test_to_dot_with_config() {
        let x = Diagram::var(Label::new(3));
        let config = DotConfig {
            use_html_labels: false,
            low_edge_style: "dotted",
            ..DotConfig::default()
        };
        let dot = x.to_dot_with_config(&config).unwrap();
        assert!(dot.contains("n0 [label=\"x3\"];"));
        assert!(dot.contains("n0 -- 0 [style=dotted];"));
        assert!(dot.contains("n0 -- 1 [style=solid];"));
    }

    /// Helper test to write DOT file for manual inspection (disabled by default)
    #[test]
    #[ignore]
    fn test_write_dot_file() {
        let x = Diagram::var(Label::new(0));
        let y = Diagram::var(Label::new(1));
        let f = x.xor(&y).unwrap();

        let dot = f.to_dot().unwrap();
        std::fs::write("test_output.dot", &dot).unwrap();
        println!("DOT output:\n{}", dot);
    }
}
