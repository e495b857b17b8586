//! A minimal view of the program's control-flow automaton.
//!
//! The engine never builds a CFA from source; the embedder constructs one (or
//! adapts its own) and the engine only queries entering/leaving edges per
//! location while reconstructing counterexample paths.

use std::collections::HashMap;

use crate::types::Location;

/// One labelled control-flow edge between two program locations.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Edge {
    pub from: Location,
    pub to: Location,
    /// Presentation label (statement or assume text); not interpreted by the
    /// engine.
    pub label: String,
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.from, self.label, self.to)
    }
}

/// The control-flow automaton: edges indexed by their endpoints.
///
/// Edges are stored in insertion order and the per-location indexes preserve
/// it, so "the first matching edge" is well-defined and stable.
#[derive(Debug, Default)]
pub struct Cfa {
    edges: Vec<Edge>,
    entering: HashMap<Location, Vec<usize>>,
    leaving: HashMap<Location, Vec<usize>>,
}

impl Cfa {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn add_edge(&mut self, from: Location, to: Location, label: impl Into<String>) {
        let index = self.edges.len();
        self.edges.push(Edge {
            from,
            to,
            label: label.into(),
        });
        self.leaving.entry(from).or_default().push(index);
        self.entering.entry(to).or_default().push(index);
    }

    /// Edges ending at `loc`, in insertion order.
    pub fn entering(&self, loc: Location) -> impl Iterator<Item = &Edge> {
        self.entering
            .get(&loc)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    /// Edges starting at `loc`, in insertion order.
    pub fn leaving(&self, loc: Location) -> impl Iterator<Item = &Edge> {
        self.leaving
            .get(&loc)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }
}
