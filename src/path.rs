//! Counterexample paths through the reachability graph.
//!
//! A path is the sequence of `(node, edge)` pairs from the root to an error
//! node, walking canonical first parents. Each pair carries the control-flow
//! edge entering the node from its first parent; the error node appears twice,
//! once with its incoming and once with its (first) outgoing edge, so the
//! terminal element is symmetric and doubly referenced.

use std::collections::VecDeque;
use std::fmt;

use crate::cfa::Edge;
use crate::types::NodeId;

#[derive(Debug, Clone, Default)]
pub struct Path {
    elements: VecDeque<(NodeId, Edge)>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_front(&mut self, node: NodeId, edge: Edge) {
        self.elements.push_front((node, edge));
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NodeId, Edge)> {
        self.elements.iter()
    }

    /// The nodes along the path, in order. The error node is listed twice.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.elements.iter().map(|(n, _)| *n)
    }

    pub fn first(&self) -> Option<&(NodeId, Edge)> {
        self.elements.front()
    }

    /// The terminal element: the error node with its outgoing edge.
    pub fn last(&self) -> Option<&(NodeId, Edge)> {
        self.elements.back()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, edge) in &self.elements {
            writeln!(f, "{}: {}", node, edge)?;
        }
        Ok(())
    }
}
