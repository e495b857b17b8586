//! The reached set: every discovered, non-pruned node with its precision,
//! plus the waitlist of nodes still awaiting successor computation.
//!
//! The exploration driver pops work from the waitlist, computes successors
//! through the abstract domain and adds them back here; the refinement engine
//! rebuilds the waitlist after pruning. The per-location view is maintained
//! incrementally on every `add`/`discard`, so stop/merge checks never need an
//! explicit refresh.
//!
//! A node that becomes covered keeps its reached entry (and precision) and
//! only leaves the waitlist, via [`ReachedSet::remove_from_waitlist_only`].

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use log::debug;

use crate::types::{Location, NodeId};

/// Waitlist ordering policy. The policy is fixed at construction and `pop`
/// is deterministic for a fixed policy, which keeps counterexamples
/// reproducible.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TraversalOrder {
    /// Breadth-first: pop the oldest entry.
    #[default]
    Bfs,
    /// Depth-first: pop the newest entry.
    Dfs,
}

pub struct ReachedSet<P> {
    reached: BTreeMap<NodeId, P>,
    first: Option<NodeId>,
    last: Option<NodeId>,
    waitlist: VecDeque<(NodeId, P)>,
    by_location: HashMap<Location, BTreeSet<NodeId>>,
    order: TraversalOrder,
}

impl<P> Default for ReachedSet<P> {
    fn default() -> Self {
        Self::new(TraversalOrder::default())
    }
}

impl<P> ReachedSet<P> {
    pub fn new(order: TraversalOrder) -> Self {
        Self {
            reached: BTreeMap::new(),
            first: None,
            last: None,
            waitlist: VecDeque::new(),
            by_location: HashMap::new(),
            order,
        }
    }

    /// The root node, set by the first `add`. Never removed while any other
    /// node exists.
    pub fn first(&self) -> Option<NodeId> {
        self.first
    }

    /// The most recently added node; the starting point of counterexample
    /// path construction.
    pub fn last(&self) -> Option<NodeId> {
        self.last
    }

    pub fn len(&self) -> usize {
        self.reached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reached.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.reached.contains_key(&node)
    }

    pub fn precision(&self, node: NodeId) -> Option<&P> {
        self.reached.get(&node)
    }

    /// All reached nodes in id order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.reached.keys().copied()
    }

    /// Inserts a newly discovered node and appends it to the waitlist.
    ///
    /// # Panics
    ///
    /// Panics if `node` is already in the reached set; duplicates must never
    /// be silent.
    pub fn add(&mut self, node: NodeId, location: Location, precision: P)
    where
        P: Clone,
    {
        let previous = self.reached.insert(node, precision.clone());
        assert!(previous.is_none(), "Node {} is already reached", node);
        debug!("add({} at {})", node, location);

        if self.first.is_none() {
            self.first = Some(node);
        }
        self.last = Some(node);
        self.waitlist.push_back((node, precision));
        self.by_location.entry(location).or_default().insert(node);
    }

    /// Removes and returns one waitlist entry according to the traversal
    /// order.
    pub fn pop(&mut self) -> Option<(NodeId, P)> {
        match self.order {
            TraversalOrder::Bfs => self.waitlist.pop_front(),
            TraversalOrder::Dfs => self.waitlist.pop_back(),
        }
    }

    /// Reinserts an already-reached node into the waitlist without touching
    /// its reached entry. Used after pruning to resume exploration from cut
    /// points.
    pub fn re_add_to_waitlist(&mut self, node: NodeId, precision: P) {
        assert!(self.contains(node), "Node {} is not reached", node);
        self.waitlist.push_back((node, precision));
    }

    /// Removes the first matching pending entry without forgetting that the
    /// node was reached. Used when a node becomes covered after being queued.
    pub fn remove_from_waitlist_only(&mut self, node: NodeId, precision: &P)
    where
        P: PartialEq,
    {
        if let Some(pos) = self
            .waitlist
            .iter()
            .position(|(n, p)| *n == node && p == precision)
        {
            self.waitlist.remove(pos);
        }
    }

    /// Drops a node entirely: reached entry, all pending waitlist entries and
    /// the location index. Used by the refinement engine while pruning.
    pub(crate) fn discard(&mut self, node: NodeId, location: Location) {
        self.reached.remove(&node);
        self.waitlist.retain(|(n, _)| *n != node);
        if let Some(set) = self.by_location.get_mut(&location) {
            set.remove(&node);
            if set.is_empty() {
                self.by_location.remove(&location);
            }
        }
        if self.last == Some(node) {
            self.last = None;
        }
    }

    pub(crate) fn clear_waitlist(&mut self) {
        self.waitlist.clear();
    }

    pub fn waitlist_len(&self) -> usize {
        self.waitlist.len()
    }

    pub fn waitlist_is_empty(&self) -> bool {
        self.waitlist.is_empty()
    }

    /// Pending waitlist entries in queue order, oldest first.
    pub fn waitlist(&self) -> impl Iterator<Item = &(NodeId, P)> {
        self.waitlist.iter()
    }

    /// The reached nodes at `loc`, in id order. Reflects every `add` and
    /// removal without explicit refresh calls.
    pub fn location_view(&self, loc: Location) -> impl Iterator<Item = NodeId> + '_ {
        self.by_location.get(&loc).into_iter().flatten().copied()
    }
}
