//! Full-graph consistency checking.
//!
//! [`check`] re-derives the global invariants of the graph and the reached
//! set from scratch and reports the first violation with the offending node
//! ids. It traverses the whole graph, so it is meant for tests and debug
//! builds only; `perform_refinement` runs it under `debug_assertions` before
//! touching anything.
//!
//! Checked invariants:
//!
//! - I1: `n ∈ p.children` iff `p ∈ n.parents`;
//! - I2: no reachable node links to a removed node;
//! - I3: every graph-reachable node is exactly one of live-reached
//!   (in the reached set and uncovered), covered, or removed;
//! - I4: every reached node is graph-reachable from the root;
//! - I5: covering chains are acyclic and never reflexive.

use std::collections::{BTreeSet, VecDeque};

use crate::error::ConsistencyError;
use crate::graph::Arg;
use crate::reached::ReachedSet;
use crate::types::NodeId;

/// Validates the graph and reached set. Pure; never mutates.
pub fn check<S, P>(arg: &Arg<S>, reached: &ReachedSet<P>) -> Result<(), ConsistencyError> {
    let first = reached.first().ok_or(ConsistencyError::NoRoot)?;

    let mut visited = BTreeSet::new();
    let mut worklist = VecDeque::from([first]);

    while let Some(node) = worklist.pop_front() {
        if !visited.insert(node) {
            continue;
        }

        for &parent in arg.parents(node) {
            if arg.is_removed(parent) {
                return Err(ConsistencyError::RemovedButReferenced {
                    node: parent,
                    referrer: node,
                });
            }
            if !arg.children(parent).contains(&node) {
                return Err(ConsistencyError::AsymmetricLink {
                    parent,
                    child: node,
                });
            }
        }
        for &child in arg.children(node) {
            if arg.is_removed(child) {
                return Err(ConsistencyError::RemovedButReferenced {
                    node: child,
                    referrer: node,
                });
            }
            if !arg.parents(child).contains(&node) {
                return Err(ConsistencyError::AsymmetricLink {
                    parent: node,
                    child,
                });
            }
        }

        let covered = arg.is_covered(node);
        let removed = arg.is_removed(node);
        let live = reached.contains(node) && !covered;
        if !exactly_one([live, covered, removed]) {
            return Err(ConsistencyError::LifecycleMismatch {
                node,
                live,
                covered,
                removed,
            });
        }

        check_covering_chain(arg, node)?;

        worklist.extend(arg.children(node).iter().copied());
    }

    for node in reached.node_ids() {
        if !visited.contains(&node) {
            return Err(ConsistencyError::NotInGraph { node });
        }
    }

    Ok(())
}

fn exactly_one(flags: [bool; 3]) -> bool {
    flags.iter().filter(|&&f| f).count() == 1
}

fn check_covering_chain<S>(arg: &Arg<S>, node: NodeId) -> Result<(), ConsistencyError> {
    let mut seen = BTreeSet::from([node]);
    let mut current = arg.covered_by(node);
    while let Some(up) = current {
        if !seen.insert(up) {
            return Err(ConsistencyError::CoveringCycle { node: up });
        }
        if arg.is_removed(up) {
            return Err(ConsistencyError::RemovedButReferenced {
                node: up,
                referrer: node,
            });
        }
        current = arg.covered_by(up);
    }
    Ok(())
}
