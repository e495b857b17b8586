//! The trait seams towards the pluggable abstract domain and refinement
//! strategy.
//!
//! The engine itself never interprets abstract states; the exploration driver
//! uses [`AbstractDomain`] to compute successors, detect error states and
//! decide coverage, and the refinement engine hands extracted error paths to a
//! [`RefinementStrategy`]. Both are injected as plain trait objects or
//! generics at construction, so no subclassing hierarchy is needed.

use crate::graph::Arg;
use crate::path::Path;
use crate::types::NodeId;

/// Errors raised inside a refinement strategy are strategy-specific and
/// propagated verbatim; the engine treats them as fatal, since a strategy
/// failing midway leaves no well-defined partial state.
pub type StrategyError = Box<dyn std::error::Error + Send + Sync>;

/// The minimal contract the engine requires of an abstract domain.
///
/// Successor computation, merging and precision adjustment are driver
/// concerns and deliberately absent here.
pub trait AbstractDomain {
    /// The domain-level abstract state wrapped by each graph node.
    type State;
    /// Domain-level tuning data controlling abstraction granularity.
    type Precision: Clone;

    /// True if `state` violates the property under check.
    fn is_error(&self, state: &Self::State) -> bool;

    /// The subsumption test: true if `covering` represents every behavior of
    /// `covered`. Drivers call
    /// [`Arg::mark_covered`][crate::graph::Arg::mark_covered] when this holds.
    fn covers(&self, covering: &Self::State, covered: &Self::State) -> bool;
}

/// A counterexample refinement strategy.
///
/// Must be a pure function of the path and the strategy's own persistent
/// knowledge (e.g. accumulated interpolants).
pub trait RefinementStrategy<S> {
    /// Analyzes an error path.
    ///
    /// Returns `Ok(None)` if no refinement is possible (the path could not be
    /// ruled out; the error is real), or `Ok(Some(root))` with the shallowest
    /// node from which re-exploration with updated precision must resume.
    ///
    /// When several control-flow edges coincide between two locations, the
    /// path carries the first matching edge; a strategy that distinguishes
    /// coincident edges semantically must disambiguate them itself.
    fn refine(&mut self, arg: &Arg<S>, path: &Path) -> Result<Option<NodeId>, StrategyError>;
}
