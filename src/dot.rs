//! ARG to DOT (Graphviz) conversion.
//!
//! Renders the reachability graph for debugging: parent/child edges are solid
//! arrows, covering links are dotted arrows from the covered node to its
//! coverer, error nodes are filled red, covered nodes are dashed. The output
//! can be rendered with `dot -Tpng arg.dot -o arg.png`.

use std::fmt::Write;

use crate::graph::Arg;

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for ordinary nodes (default: "ellipse")
    pub node_shape: &'static str,
    /// Fill color for error nodes (default: "red")
    pub error_color: &'static str,
    /// Style for covered nodes (default: "dashed")
    pub covered_style: &'static str,
    /// Style for covering links (default: "dotted")
    pub covering_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "ellipse",
            error_color: "red",
            covered_style: "dashed",
            covering_edge_style: "dotted",
        }
    }
}

impl<S> Arg<S> {
    /// Converts the live part of the graph to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "digraph ARG {{")?;
        writeln!(out, "  node [shape={}];", config.node_shape)?;

        for id in self.node_ids() {
            let mut attrs = vec![format!("label=\"{} @ {}\"", id, self.location(id))];
            if self.is_error(id) {
                attrs.push(format!("style=filled, fillcolor={}", config.error_color));
            } else if self.is_covered(id) {
                attrs.push(format!("style={}", config.covered_style));
            }
            writeln!(out, "  {} [{}];", id.index(), attrs.join(", "))?;
        }

        for id in self.node_ids() {
            for &child in self.children(id) {
                writeln!(out, "  {} -> {};", id.index(), child.index())?;
            }
        }

        for id in self.node_ids() {
            if let Some(by) = self.covered_by(id) {
                writeln!(
                    out,
                    "  {} -> {} [style={}, constraint=false];",
                    id.index(),
                    by.index(),
                    config.covering_edge_style,
                )?;
            }
        }

        writeln!(out, "}}")?;
        Ok(out)
    }
}
