//! # arg-rs: Abstract Reachability Graphs with CEGAR refinement
//!
//! **`arg-rs`** is the reachability-graph engine at the heart of a configurable
//! software model checker: an explicit graph of abstract states (an **ARG**)
//! explored under a pluggable abstract domain, with the counterexample-guided
//! prune/re-explore protocol that makes lazy abstraction refinement work.
//!
//! ## How it fits together
//!
//! The exploration driver (yours) pops work from the [`ReachedSet`][crate::reached::ReachedSet]
//! waitlist, computes successors through its abstract domain, and inserts new
//! nodes into the [`Arg`][crate::graph::Arg]. When an error node appears, the
//! [`Refiner`][crate::refine::Refiner] extracts the path that led to it, hands
//! it to a pluggable [`RefinementStrategy`][crate::domain::RefinementStrategy],
//! and — if refinement succeeds — prunes the subtree below the refinement
//! root, repairs the covering (subsumption) relation and recomputes the
//! waitlist, so previously computed exploration work outside the pruned region
//! is reused.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: all nodes live in a single arena owned
//!   by [`Arg`][crate::graph::Arg] and are addressed by integer
//!   [`NodeId`][crate::types::NodeId] handles, so the cyclic-looking
//!   parent/child/covering links need no ownership cycles.
//! - **Invariant-Preserving Pruning**: `clean()` keeps the five global graph
//!   invariants (link symmetry, no dangling removed nodes, lifecycle
//!   exclusivity, reachability, acyclic covering) across every refinement
//!   cycle; [`check`][crate::check::check] re-derives them independently for
//!   tests and debug builds.
//! - **Deterministic**: node ids, waitlist order and restart sets are all
//!   deterministic for a fixed traversal policy, keeping counterexamples
//!   reproducible.
//!
//! ## Basic Usage
//!
//! ```rust
//! use arg_rs::cfa::Cfa;
//! use arg_rs::domain::{RefinementStrategy, StrategyError};
//! use arg_rs::graph::Arg;
//! use arg_rs::path::Path;
//! use arg_rs::reached::{ReachedSet, TraversalOrder};
//! use arg_rs::refine::Refiner;
//! use arg_rs::types::{Location, NodeId};
//!
//! // 1. A tiny control-flow automaton: L0 -> L1 -> L2 -> L3
//! let (l0, l1, l2, l3) = (Location::new(0), Location::new(1), Location::new(2), Location::new(3));
//! let mut cfa = Cfa::new();
//! cfa.add_edge(l0, l1, "x := 0");
//! cfa.add_edge(l1, l2, "[x == 1]");
//! cfa.add_edge(l2, l3, "halt");
//!
//! // 2. The driver explores: nodes go into the graph and the reached set
//! let mut arg = Arg::new();
//! let mut reached = ReachedSet::new(TraversalOrder::Bfs);
//! let root = arg.add_root("x: ?", l0, false);
//! reached.add(root, l0, ());
//! let n1 = arg.add_node("x: ?", l1, false, root);
//! reached.add(n1, l1, ());
//! let err = arg.add_node("x: ?", l2, true, n1);
//! reached.add(err, l2, ());
//!
//! // 3. A strategy that restarts from the first node after the root
//! struct Restart;
//! impl<S> RefinementStrategy<S> for Restart {
//!     fn refine(&mut self, _arg: &Arg<S>, path: &Path) -> Result<Option<NodeId>, StrategyError> {
//!         Ok(path.first().map(|&(node, _)| node))
//!     }
//! }
//!
//! // 4. One refinement cycle: the error node is pruned, n1 is re-scheduled
//! let mut refiner = Refiner::new(Restart);
//! let outcome = refiner.perform_refinement(&mut arg, &mut reached, &cfa).unwrap();
//! assert!(outcome.success);
//! assert_eq!(outcome.root, Some(n1));
//! assert!(arg.is_removed(err));
//! assert_eq!(reached.waitlist().count(), 1);
//! ```
//!
//! ## Core Components
//!
//! - **[`graph`]**: the arena-backed ARG manager and its structural operations.
//! - **[`reached`]**: the reached set, waitlist and location-keyed view.
//! - **[`refine`]**: path extraction, strategy delegation and pruning.
//! - **[`check`]**: the full-graph consistency checker for tests/debug builds.
//! - **[`dot`]**: Graphviz export of the ARG.

pub mod cfa;
pub mod check;
pub mod domain;
pub mod dot;
pub mod error;
pub mod graph;
pub mod node;
pub mod path;
pub mod reached;
pub mod refine;
pub mod types;
