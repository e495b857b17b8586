//! Type-safe handles for graph nodes and program locations.
//!
//! This module provides newtype wrappers that enforce compile-time distinction
//! between node ids (arena indices of abstract states) and program locations
//! (vertices of the control-flow graph), preventing common mix-ups in graph
//! manipulation code.

use std::fmt;

/// A handle to a node of the reachability graph.
///
/// Node ids are assigned monotonically by the arena in [`Arg`][crate::graph::Arg]
/// and are never reused, so the id order is the discovery order. All hashing,
/// equality and deterministic iteration is done on the id, never on the wrapped
/// abstract state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A program location: one vertex of the control-flow graph.
///
/// Locations are opaque to the engine; it only compares them for equality when
/// matching control-flow edges against graph edges during path extraction, and
/// uses them as keys for the reached set's location view.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Location(u32);

impl Location {
    pub fn new(id: u32) -> Self {
        Location(id)
    }

    /// Returns the raw location id.
    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}
