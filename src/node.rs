use crate::types::{Location, NodeId};

/// One node of the abstract reachability graph.
///
/// The node wraps a domain-level abstract state (opaque to the engine) and
/// carries the structural bookkeeping: parent/child links, the covering link,
/// and the error/removed flags. All mutation goes through
/// [`Arg`][crate::graph::Arg], which keeps the links symmetric.
#[derive(Debug, Clone)]
pub struct ArgNode<S> {
    pub(crate) state: S,
    pub(crate) location: Location,
    /// Insertion order; index 0 is the canonical first parent used for
    /// counterexample paths.
    pub(crate) parents: Vec<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) covered_by: Option<NodeId>,
    pub(crate) is_error: bool,
    pub(crate) removed: bool,
}

impl<S> ArgNode<S> {
    pub(crate) fn new(state: S, location: Location, is_error: bool) -> Self {
        Self {
            state,
            location,
            parents: Vec::new(),
            children: Vec::new(),
            covered_by: None,
            is_error,
            removed: false,
        }
    }

    /// The wrapped domain-level abstract state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The program location this state belongs to.
    pub fn location(&self) -> Location {
        self.location
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The canonical predecessor used for counterexample construction.
    pub fn first_parent(&self) -> Option<NodeId> {
        self.parents.first().copied()
    }

    /// The node subsuming this one, if any.
    pub fn covered_by(&self) -> Option<NodeId> {
        self.covered_by
    }

    pub fn is_covered(&self) -> bool {
        self.covered_by.is_some()
    }

    /// True if the wrapped state violates the property under check.
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// True once the node has been excised from the graph. A removed node
    /// appears in no other node's links.
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}
