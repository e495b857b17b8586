//! The refinement engine: error-path extraction, strategy delegation and the
//! prune/re-explore protocol.
//!
//! [`Refiner::perform_refinement`] is the single entry point of a CEGAR
//! refinement cycle. It reconstructs the counterexample path backwards from
//! `reached.last`, hands it to the pluggable
//! [`RefinementStrategy`][crate::domain::RefinementStrategy], and on success
//! prunes the subtree below the returned refinement root, repairs the covering
//! relation and recomputes the waitlist. The pruning pass (`clean`) owns the
//! global consistency invariants: once started it runs to completion, and
//! every graph mutation it performs goes through
//! [`Arg::remove`][crate::graph::Arg::remove].

use std::collections::BTreeSet;

use log::debug;

use crate::cfa::Cfa;
use crate::domain::RefinementStrategy;
use crate::error::{ConsistencyError, RefineError};
use crate::graph::Arg;
use crate::path::Path;
use crate::reached::ReachedSet;
use crate::types::NodeId;

/// The structured result of one refinement cycle.
///
/// On `success = false` the error path could not be ruled out: the driver
/// must terminate the analysis and report a genuine property violation. On
/// `success = true` the engine has pruned the graph and already installed
/// `to_reexplore` as the new waitlist contents; the outcome carries the same
/// pairs so the driver can re-install them itself if it manages the waitlist
/// externally (replacing, never merging).
#[derive(Debug, Clone)]
pub struct RefinementOutcome<P> {
    pub success: bool,
    /// Every node excised from the graph, including covered nodes removed by
    /// the un-covering repair.
    pub removed: BTreeSet<NodeId>,
    /// The restart points with their precisions, in id order.
    pub to_reexplore: Vec<(NodeId, P)>,
    /// The refinement root, if refinement succeeded.
    pub root: Option<NodeId>,
}

impl<P> RefinementOutcome<P> {
    fn unsuccessful() -> Self {
        Self {
            success: false,
            removed: BTreeSet::new(),
            to_reexplore: Vec::new(),
            root: None,
        }
    }
}

pub struct Refiner<R> {
    strategy: R,
}

impl<R> Refiner<R> {
    pub fn new(strategy: R) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &R {
        &self.strategy
    }

    /// Runs one refinement cycle on the error node `reached.last`.
    ///
    /// Fatal errors ([`RefineError`]) indicate that the graph and the
    /// control-flow structure have diverged or that a core invariant is
    /// broken; they are not user-recoverable. "No refinement possible" is a
    /// normal outcome, returned with `success = false` and the graph
    /// untouched.
    pub fn perform_refinement<S, P: Clone>(
        &mut self,
        arg: &mut Arg<S>,
        reached: &mut ReachedSet<P>,
        cfa: &Cfa,
    ) -> Result<RefinementOutcome<P>, RefineError>
    where
        R: RefinementStrategy<S>,
    {
        debug!("starting refinement");
        let last = reached.last().ok_or(RefineError::EmptyReachedSet)?;
        #[cfg(debug_assertions)]
        crate::check::check(arg, reached)?;

        let path = build_path(arg, cfa, last)?;
        debug!("error path:\n{}", path);

        match self.strategy.refine(arg, &path).map_err(RefineError::Strategy)? {
            Some(root) => {
                debug!("refinement successful, root = {}", root);
                clean(arg, reached, root)
            }
            None => {
                debug!("refinement unsuccessful");
                Ok(RefinementOutcome::unsuccessful())
            }
        }
    }
}

/// Reconstructs the error path from the root to `last`.
///
/// Each element pairs a node with the control-flow edge entering it from its
/// canonical first parent; when several edges coincide between the two
/// locations, the first one found is used (the strategy reasons over the path
/// of states, not the edge literal). The error node is additionally recorded
/// with its first outgoing edge, so it is doubly referenced.
fn build_path<S>(arg: &Arg<S>, cfa: &Cfa, last: NodeId) -> Result<Path, RefineError> {
    if !arg.is_error(last) {
        return Err(RefineError::LastNotError { node: last });
    }

    let mut path = Path::new();

    let last_location = arg.location(last);
    let outgoing = cfa
        .leaving(last_location)
        .next()
        .cloned()
        .ok_or(RefineError::MissingOutgoingEdge {
            node: last,
            location: last_location,
        })?;
    path.push_front(last, outgoing);

    let mut current = Some(last);
    while let Some(node) = current {
        let parent = arg.first_parent(node);
        if let Some(parent) = parent {
            let location = arg.location(node);
            let parent_location = arg.location(parent);
            let edge = cfa
                .entering(location)
                .find(|e| e.from == parent_location)
                .cloned()
                .ok_or(RefineError::MissingIncomingEdge {
                    node,
                    location,
                    parent_location,
                })?;
            path.push_front(node, edge);
        }
        current = parent;
    }

    Ok(path)
}

/// Prunes the subtree below `root`, repairs the covering relation and
/// recomputes the waitlist.
///
/// Restart points are the parents (outside the pruned subtree) of every
/// removed node, plus `root` itself, plus the surviving parents of covered
/// nodes whose coverer was removed. Such orphaned covered nodes are removed
/// as well, never merely uncovered in place: their justification for being
/// covered is gone and their precision is stale, so they must be re-explored
/// from their parents. Covering may chain (a coverer covered later on), so
/// removing an orphan can orphan further nodes; removal runs a worklist
/// until no covered node without a live coverer is left.
fn clean<S, P: Clone>(
    arg: &mut Arg<S>,
    reached: &mut ReachedSet<P>,
    root: NodeId,
) -> Result<RefinementOutcome<P>, RefineError> {
    let mut to_unreach = arg.subtree(root);
    to_unreach.remove(&root);

    let mut to_waitlist = BTreeSet::from([root]);
    for &n in &to_unreach {
        for &p in arg.parents(n) {
            if !to_unreach.contains(&p) {
                to_waitlist.insert(p);
            }
        }
    }

    // Covered nodes whose coverer is about to disappear. Collected before any
    // removal, since removing the coverer would silently uncover them. Not
    // needed when the whole graph below its root is discarded.
    let mut orphaned: Vec<NodeId> = Vec::new();
    if !arg.parents(root).is_empty() {
        for (by, covered) in arg.covered_entries() {
            if to_unreach.contains(&by) {
                orphaned.extend(covered.iter().copied().filter(|n| !to_unreach.contains(n)));
            }
        }
    }

    let mut removed = to_unreach.clone();
    for &n in &to_unreach {
        let location = arg.location(n);
        arg.remove(n);
        reached.discard(n, location);
    }

    while let Some(n) = orphaned.pop() {
        if removed.contains(&n) {
            continue;
        }
        // nodes covered by `n` lose their coverer in turn; snapshot them
        // before the removal silently uncovers them
        orphaned.extend(arg.covered_nodes(n));
        for &p in arg.parents(n) {
            to_waitlist.insert(p);
        }
        let location = arg.location(n);
        arg.remove(n);
        reached.discard(n, location);
        removed.insert(n);
    }
    // a restart point recorded early may itself have fallen to the orphan
    // removal; only survivors go back on the waitlist
    to_waitlist.retain(|n| !removed.contains(n));

    debug!("pruned {} nodes below {}, {} restart points", removed.len(), root, to_waitlist.len());

    reached.clear_waitlist();
    let mut to_reexplore = Vec::with_capacity(to_waitlist.len());
    for &n in &to_waitlist {
        let precision = reached
            .precision(n)
            .cloned()
            .ok_or(ConsistencyError::NotInReached { node: n })?;
        reached.re_add_to_waitlist(n, precision.clone());
        to_reexplore.push((n, precision));
    }

    Ok(RefinementOutcome {
        success: true,
        removed,
        to_reexplore,
        root: Some(root),
    })
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::check;
    use crate::domain::StrategyError;
    use crate::reached::TraversalOrder;
    use crate::types::Location;

    /// Returns the given node as refinement root, once; `None` afterwards.
    struct FixedRoot(Option<NodeId>);

    impl<S> RefinementStrategy<S> for FixedRoot {
        fn refine(&mut self, _arg: &Arg<S>, _path: &Path) -> Result<Option<NodeId>, StrategyError> {
            Ok(self.0.take())
        }
    }

    struct Failing;

    impl<S> RefinementStrategy<S> for Failing {
        fn refine(&mut self, _arg: &Arg<S>, _path: &Path) -> Result<Option<NodeId>, StrategyError> {
            Err("interpolation query timed out".into())
        }
    }

    fn loc(id: u32) -> Location {
        Location::new(id)
    }

    /// The linear program behind Scenarios A-D: one edge per step plus one
    /// edge leaving the error location.
    fn line_cfa() -> Cfa {
        let mut cfa = Cfa::new();
        cfa.add_edge(loc(0), loc(1), "x := 0");
        cfa.add_edge(loc(1), loc(2), "x := x + 1");
        cfa.add_edge(loc(2), loc(3), "[x > 0]");
        cfa.add_edge(loc(3), loc(4), "halt");
        cfa.add_edge(loc(1), loc(2), "[skip]");
        cfa
    }

    /// Builds the 4-node path r -> a -> b -> e with e.is_error.
    fn scenario_graph() -> (Arg<&'static str>, ReachedSet<u32>, [NodeId; 4]) {
        let mut arg = Arg::new();
        let mut reached = ReachedSet::new(TraversalOrder::Bfs);
        let r = arg.add_root("r", loc(0), false);
        reached.add(r, loc(0), 0);
        let a = arg.add_node("a", loc(1), false, r);
        reached.add(a, loc(1), 0);
        let b = arg.add_node("b", loc(2), false, a);
        reached.add(b, loc(2), 0);
        let e = arg.add_node("e", loc(3), true, b);
        reached.add(e, loc(3), 0);
        (arg, reached, [r, a, b, e])
    }

    #[test]
    fn test_build_path() {
        let (arg, _reached, [_r, a, b, e]) = scenario_graph();
        let cfa = line_cfa();
        let path = build_path(&arg, &cfa, e).unwrap();

        // a, b, e with incoming edges, then e again with its outgoing edge
        assert_eq!(path.nodes().collect::<Vec<_>>(), vec![a, b, e, e]);
        let labels: Vec<_> = path.iter().map(|(_, edge)| edge.label.as_str()).collect();
        assert_eq!(labels, vec!["x := 0", "x := x + 1", "[x > 0]", "halt"]);
        // tie-break: the first matching entering edge of L2 wins
        assert_eq!(path.iter().nth(1).unwrap().1.label, "x := x + 1");
    }

    #[test]
    fn test_build_path_missing_edge_is_fatal() {
        let (arg, _reached, [_r, _a, _b, e]) = scenario_graph();
        let mut cfa = Cfa::new();
        // edge a -> b missing from the control flow
        cfa.add_edge(loc(0), loc(1), "x := 0");
        cfa.add_edge(loc(2), loc(3), "[x > 0]");
        cfa.add_edge(loc(3), loc(4), "halt");

        let err = build_path(&arg, &cfa, e).unwrap_err();
        assert!(matches!(err, RefineError::MissingIncomingEdge { .. }), "{err:?}");
    }

    #[test]
    fn test_build_path_missing_outgoing_edge_is_fatal() {
        let (arg, _reached, [_r, _a, _b, e]) = scenario_graph();
        let err = build_path(&arg, &Cfa::new(), e).unwrap_err();
        assert!(matches!(err, RefineError::MissingOutgoingEdge { .. }), "{err:?}");
        // with the full CFA the same node succeeds
        assert!(build_path(&arg, &line_cfa(), e).is_ok());
    }

    #[test]
    fn test_build_path_non_error_last() {
        let (arg, _reached, [_r, _a, b, _e]) = scenario_graph();
        let err = build_path(&arg, &line_cfa(), b).unwrap_err();
        assert!(matches!(err, RefineError::LastNotError { .. }), "{err:?}");
    }

    #[test]
    fn test_scenario_a_prune_below_root() {
        let (mut arg, mut reached, [r, a, b, e]) = scenario_graph();
        let cfa = line_cfa();

        let mut refiner = Refiner::new(FixedRoot(Some(a)));
        let outcome = refiner.perform_refinement(&mut arg, &mut reached, &cfa).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.root, Some(a));
        assert_eq!(outcome.removed, BTreeSet::from([b, e]));
        assert_eq!(outcome.to_reexplore, vec![(a, 0)]);

        assert!(arg.is_removed(b));
        assert!(arg.is_removed(e));
        assert!(!arg.is_removed(r));
        assert!(!arg.is_removed(a));
        // P2: nothing of the pruned subtree is reachable from the root
        assert_eq!(arg.subtree(r), BTreeSet::from([r, a]));

        assert!(!reached.contains(b));
        assert!(!reached.contains(e));
        assert_eq!(reached.waitlist().cloned().collect::<Vec<_>>(), vec![(a, 0)]);
        check::check(&arg, &reached).unwrap();
    }

    #[test]
    fn test_scenario_b_covered_sibling_removed() {
        // as scenario A, but with a sibling c of b (attached to a) that is
        // covered by b; c is discovered before the error node so that the
        // error node stays `reached.last`
        let mut arg = Arg::new();
        let mut reached = ReachedSet::new(TraversalOrder::Bfs);
        let r = arg.add_root("r", loc(0), false);
        reached.add(r, loc(0), 0u32);
        let a = arg.add_node("a", loc(1), false, r);
        reached.add(a, loc(1), 0);
        let b = arg.add_node("b", loc(2), false, a);
        reached.add(b, loc(2), 0);
        let c = arg.add_node("c", loc(2), false, a);
        reached.add(c, loc(2), 0);
        arg.mark_covered(c, b);
        reached.remove_from_waitlist_only(c, &0);
        let e = arg.add_node("e", loc(3), true, b);
        reached.add(e, loc(3), 0);
        let cfa = line_cfa();

        let mut refiner = Refiner::new(FixedRoot(Some(a)));
        let outcome = refiner.perform_refinement(&mut arg, &mut reached, &cfa).unwrap();

        // P3: c's coverer b was removed, so c is removed too
        assert!(outcome.success);
        assert_eq!(outcome.removed, BTreeSet::from([b, e, c]));
        assert!(arg.is_removed(c));
        assert!(!reached.contains(c));
        // P4: a is the only restart point, not double-added for c
        assert_eq!(outcome.to_reexplore, vec![(a, 0)]);
        assert_eq!(reached.waitlist_len(), 1);
        check::check(&arg, &reached).unwrap();
    }

    #[test]
    fn test_scenario_c_refinement_root_is_graph_root() {
        let (mut arg, mut reached, [r, a, b, e]) = scenario_graph();
        let cfa = line_cfa();

        let mut refiner = Refiner::new(FixedRoot(Some(r)));
        let outcome = refiner.perform_refinement(&mut arg, &mut reached, &cfa).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.removed, BTreeSet::from([a, b, e]));
        assert_eq!(outcome.to_reexplore, vec![(r, 0)]);
        assert_eq!(arg.live_size(), 1);
        assert_eq!(reached.len(), 1);
        check::check(&arg, &reached).unwrap();
    }

    #[test]
    fn test_scenario_d_no_refinement_leaves_graph_untouched() {
        let (mut arg, mut reached, [r, a, b, e]) = scenario_graph();
        let cfa = line_cfa();

        let waitlist_before: Vec<_> = reached.waitlist().cloned().collect();
        let mut refiner = Refiner::new(FixedRoot(None));
        let outcome = refiner.perform_refinement(&mut arg, &mut reached, &cfa).unwrap();

        // P5: negative outcome, byte-for-byte unchanged state
        assert!(!outcome.success);
        assert!(outcome.removed.is_empty());
        assert!(outcome.to_reexplore.is_empty());
        assert_eq!(outcome.root, None);
        for n in [r, a, b, e] {
            assert!(!arg.is_removed(n));
            assert!(reached.contains(n));
        }
        assert_eq!(reached.waitlist().cloned().collect::<Vec<_>>(), waitlist_before);
        assert_eq!(reached.last(), Some(e));
        check::check(&arg, &reached).unwrap();
    }

    #[test]
    fn test_strategy_error_is_fatal() {
        let (mut arg, mut reached, _ids) = scenario_graph();
        let cfa = line_cfa();
        let mut refiner = Refiner::new(Failing);
        let err = refiner.perform_refinement(&mut arg, &mut reached, &cfa).unwrap_err();
        assert!(matches!(err, RefineError::Strategy(_)), "{err:?}");
    }

    #[test]
    fn test_empty_reached_set() {
        let mut arg: Arg<&'static str> = Arg::new();
        let mut reached: ReachedSet<u32> = ReachedSet::default();
        let mut refiner = Refiner::new(FixedRoot(None));
        let err = refiner.perform_refinement(&mut arg, &mut reached, &Cfa::new()).unwrap_err();
        assert!(matches!(err, RefineError::EmptyReachedSet), "{err:?}");
    }

    #[test]
    fn test_restart_points_with_outside_parent() {
        // r -> a -> b -> e, plus an extra edge d -> b from outside the pruned
        // subtree; d must become a restart point (P4).
        let (mut arg, mut reached, [r, a, b, _e]) = scenario_graph();
        let d = arg.add_node("d", loc(1), false, r);
        reached.add(d, loc(1), 0);
        arg.add_child(d, b);

        let outcome = clean(&mut arg, &mut reached, a).unwrap();
        assert_eq!(
            outcome.to_reexplore.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            vec![a, d],
        );
        assert!(!arg.is_removed(d));
        check::check(&arg, &reached).unwrap();
    }

    #[test]
    fn test_orphaned_covered_outside_subtree_removed() {
        // d hangs off the root and is covered by b, which lies inside the
        // pruned subtree: d loses its justification and is removed as well,
        // with its surviving parent r becoming a restart point (P3, P4).
        let (mut arg, mut reached, [r, a, b, _e]) = scenario_graph();
        let d = arg.add_node("d", loc(2), false, r);
        reached.add(d, loc(2), 0);
        arg.mark_covered(d, b);
        reached.remove_from_waitlist_only(d, &0);

        let outcome = clean(&mut arg, &mut reached, a).unwrap();
        assert!(outcome.removed.contains(&d));
        assert!(arg.is_removed(d));
        assert!(!reached.contains(d));
        assert_eq!(
            outcome.to_reexplore.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            vec![r, a],
        );
        check::check(&arg, &reached).unwrap();
    }

    #[test]
    fn test_chained_covering_removed_transitively() {
        // x is covered by y, and y is later covered by b inside the pruned
        // subtree. Removing y as an orphan uncovers x, which has no live
        // coverer either and must fall with it (P3); r, the surviving parent
        // of both, becomes a restart point.
        let (mut arg, mut reached, [r, a, b, _e]) = scenario_graph();
        let y = arg.add_node("y", loc(2), false, r);
        reached.add(y, loc(2), 0);
        let x = arg.add_node("x", loc(2), false, r);
        reached.add(x, loc(2), 0);
        arg.mark_covered(x, y);
        reached.remove_from_waitlist_only(x, &0);
        arg.mark_covered(y, b);
        reached.remove_from_waitlist_only(y, &0);

        let outcome = clean(&mut arg, &mut reached, a).unwrap();
        assert!(outcome.removed.contains(&y));
        assert!(outcome.removed.contains(&x));
        assert!(arg.is_removed(x));
        assert!(!reached.contains(x));
        assert_eq!(
            outcome.to_reexplore.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            vec![r, a],
        );
        check::check(&arg, &reached).unwrap();
    }

    #[test]
    fn test_covered_by_survivor_stays_covered() {
        // c is covered by a, which survives the prune below a: the covering
        // link must stay intact.
        let (mut arg, mut reached, [r, a, _b, _e]) = scenario_graph();
        let c = arg.add_node("c", loc(1), false, r);
        reached.add(c, loc(1), 0);
        arg.mark_covered(c, a);
        reached.remove_from_waitlist_only(c, &0);

        let outcome = clean(&mut arg, &mut reached, a).unwrap();
        assert!(!outcome.removed.contains(&c));
        assert_eq!(arg.covered_by(c), Some(a));
        check::check(&arg, &reached).unwrap();
    }

    // A miniature end-to-end CEGAR run: value analysis over a two-location
    // loop. With tracking disabled the error branch looks feasible; the
    // strategy requests re-exploration from the root with tracking enabled,
    // after which the error branch is infeasible and the program is verified.
    mod cegar_loop {
        use test_log::test;

        use super::*;
        use crate::domain::AbstractDomain;

        type State = (Location, Option<i64>);

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct Track(bool);

        /// Constant propagation for a single variable `x`; `None` means
        /// "any value".
        struct ValueDomain;

        impl AbstractDomain for ValueDomain {
            type State = State;
            type Precision = Track;

            fn is_error(&self, state: &State) -> bool {
                state.0 == loc(9)
            }

            fn covers(&self, covering: &State, covered: &State) -> bool {
                covering.0 == covered.0 && (covering.1.is_none() || covering.1 == covered.1)
            }
        }

        fn transfer(state: &State, label: &str, to: Location, precision: Track) -> Option<State> {
            let x = state.1;
            let x = match label {
                "x := 0" => {
                    if precision.0 {
                        Some(0)
                    } else {
                        None
                    }
                }
                "[x == 5]" => match x {
                    Some(v) if v != 5 => return None,
                    other => other,
                },
                "[x != 5]" => match x {
                    Some(5) => return None,
                    other => other,
                },
                _ => panic!("unknown label {label}"),
            };
            Some((to, x))
        }

        /// Explores until the waitlist is empty or an error node appears.
        /// Returns the error node, if any.
        fn explore<D>(
            domain: &D,
            arg: &mut Arg<State>,
            reached: &mut ReachedSet<Track>,
            cfa: &Cfa,
        ) -> Option<NodeId>
        where
            D: AbstractDomain<State = State>,
        {
            while let Some((node, precision)) = reached.pop() {
                if arg.is_removed(node) || arg.is_covered(node) {
                    continue;
                }
                let state = *arg.state(node);
                let edges: Vec<_> = cfa.leaving(state.0).cloned().collect();
                for edge in edges {
                    let Some(successor) = transfer(&state, &edge.label, edge.to, precision) else {
                        continue;
                    };
                    let new = arg.add_node(successor, edge.to, domain.is_error(&successor), node);
                    reached.add(new, edge.to, precision);
                    if arg.is_error(new) {
                        return Some(new);
                    }
                    // stop check: a subsuming live state at this location covers
                    let candidate = reached
                        .location_view(edge.to)
                        .find(|&c| c != new && !arg.is_covered(c) && domain.covers(arg.state(c), &successor));
                    if let Some(candidate) = candidate {
                        arg.mark_covered(new, candidate);
                        reached.remove_from_waitlist_only(new, &precision);
                    }
                }
            }
            None
        }

        struct EnableTracking;

        impl RefinementStrategy<State> for EnableTracking {
            fn refine(&mut self, arg: &Arg<State>, path: &Path) -> Result<Option<NodeId>, StrategyError> {
                // spurious iff the path was explored without tracking; then
                // restart from the graph root with full precision
                let &(first, _) = path.first().ok_or("empty path")?;
                if arg.state(first).1.is_none() {
                    Ok(arg.first_parent(first))
                } else {
                    Ok(None)
                }
            }
        }

        fn loop_cfa() -> Cfa {
            let mut cfa = Cfa::new();
            cfa.add_edge(loc(0), loc(1), "x := 0");
            cfa.add_edge(loc(1), loc(1), "[x != 5]");
            cfa.add_edge(loc(1), loc(9), "[x == 5]");
            cfa.add_edge(loc(9), loc(9), "[x == 5]");
            cfa
        }

        #[test]
        fn test_spurious_error_is_refined_away() {
            let cfa = loop_cfa();
            let domain = ValueDomain;
            let mut arg = Arg::new();
            let mut reached = ReachedSet::new(TraversalOrder::Bfs);
            let mut refiner = Refiner::new(EnableTracking);

            let root = arg.add_root((loc(0), None), loc(0), false);
            reached.add(root, loc(0), Track(false));

            // round 1: abstract error found
            let error = explore(&domain, &mut arg, &mut reached, &cfa);
            assert!(error.is_some());
            check::check(&arg, &reached).unwrap();

            let outcome = refiner.perform_refinement(&mut arg, &mut reached, &cfa).unwrap();
            assert!(outcome.success);
            assert_eq!(outcome.root, Some(root));
            assert_eq!(arg.live_size(), 1);
            check::check(&arg, &reached).unwrap();

            // driver contract: install the restart set with updated precision
            reached.clear_waitlist();
            for (node, _stale) in &outcome.to_reexplore {
                reached.re_add_to_waitlist(*node, Track(true));
            }

            // round 2: tracking makes the error branch infeasible
            let error = explore(&domain, &mut arg, &mut reached, &cfa);
            assert_eq!(error, None);
            assert!(reached.waitlist_is_empty());
            check::check(&arg, &reached).unwrap();
            // the loop closed by covering: one covered node at L1
            assert!(arg.node_ids().any(|n| arg.is_covered(n)));
        }
    }
}
