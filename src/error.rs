//! Error types of the engine.
//!
//! Two classes exist: expected outcomes ("no refinement possible", "real
//! counterexample") are plain values of
//! [`RefinementOutcome`][crate::refine::RefinementOutcome], never errors.
//! The types here are all fatal: they signal that a core graph invariant was
//! broken by the exploration driver or the abstract domain, and there is no
//! safe partial state to continue from.

use thiserror::Error;

use crate::types::{Location, NodeId};

/// A violation of one of the global graph/reached-set invariants, with the
/// offending node ids.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConsistencyError {
    #[error("asymmetric link: {parent} lists child {child}, but {child} does not list {parent} as parent (or vice versa)")]
    AsymmetricLink { parent: NodeId, child: NodeId },

    #[error("removed node {node} is still referenced by {referrer}")]
    RemovedButReferenced { node: NodeId, referrer: NodeId },

    #[error("node {node} is in an inconsistent lifecycle state (live-reached: {live}, covered: {covered}, removed: {removed})")]
    LifecycleMismatch {
        node: NodeId,
        live: bool,
        covered: bool,
        removed: bool,
    },

    #[error("reached node {node} is not reachable from the root")]
    NotInGraph { node: NodeId },

    #[error("node {node} expected in the reached set but absent")]
    NotInReached { node: NodeId },

    #[error("covering cycle through {node}")]
    CoveringCycle { node: NodeId },

    #[error("reached set has no root node")]
    NoRoot,
}

/// A fatal failure of the refinement engine.
#[derive(Debug, Error)]
pub enum RefineError {
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error("refinement started on an empty reached set")]
    EmptyReachedSet,

    #[error("refinement started but last node {node} is not an error node")]
    LastNotError { node: NodeId },

    #[error("no control-flow edge from {parent_location} to {location} while reconstructing the path at {node}")]
    MissingIncomingEdge {
        node: NodeId,
        location: Location,
        parent_location: Location,
    },

    #[error("error node {node} at {location} has no outgoing control-flow edge")]
    MissingOutgoingEdge { node: NodeId, location: Location },

    #[error("refinement strategy failed")]
    Strategy(#[source] Box<dyn std::error::Error + Send + Sync>),
}
