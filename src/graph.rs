//! The abstract reachability graph (ARG) manager.
//!
//! All nodes live in a single dense arena owned by [`Arg`] and are addressed
//! by integer [`NodeId`] handles; `parents`/`children`/`covered_by` are handle
//! sets, so the cyclic-looking link structure needs no ownership cycles.
//! Removal marks the slot and detaches every link; ids are never reused, which
//! keeps the discovery order stable for deterministic iteration.
//!
//! The manager maintains these invariants across every completed operation:
//!
//! - link symmetry: `n ∈ p.children` iff `p ∈ n.parents`;
//! - a removed node appears in no other node's links or in the covered index;
//! - the covering relation is acyclic and never reflexive.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::node::ArgNode;
use crate::types::{Location, NodeId};

pub struct Arg<S> {
    nodes: Vec<ArgNode<S>>,
    /// Coverer to covered-set index, the exact inverse of `covered_by`.
    covered_index: BTreeMap<NodeId, BTreeSet<NodeId>>,
    removed_count: usize,
}

impl<S> Default for Arg<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Arg<S> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            covered_index: BTreeMap::new(),
            removed_count: 0,
        }
    }

    /// Number of node slots ever allocated, including removed ones.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live (non-removed) nodes.
    pub fn live_size(&self) -> usize {
        self.nodes.len() - self.removed_count
    }

    pub fn node(&self, id: NodeId) -> &ArgNode<S> {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut ArgNode<S> {
        &mut self.nodes[id.index()]
    }

    pub fn state(&self, id: NodeId) -> &S {
        &self.node(id).state
    }

    pub fn location(&self, id: NodeId) -> Location {
        self.node(id).location
    }

    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).parents
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn first_parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_parent()
    }

    pub fn covered_by(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).covered_by
    }

    pub fn is_covered(&self, id: NodeId) -> bool {
        self.node(id).is_covered()
    }

    pub fn is_error(&self, id: NodeId) -> bool {
        self.node(id).is_error
    }

    pub fn is_removed(&self, id: NodeId) -> bool {
        self.node(id).removed
    }

    /// All live node ids in discovery order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len())
            .map(NodeId::new)
            .filter(move |&id| !self.node(id).removed)
    }

    /// The set of nodes covered by `id`.
    pub fn covered_nodes(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.covered_index.get(&id).into_iter().flatten().copied()
    }

    /// All (coverer, covered set) entries, in id order.
    pub fn covered_entries(&self) -> impl Iterator<Item = (NodeId, &BTreeSet<NodeId>)> {
        self.covered_index.iter().map(|(&by, set)| (by, set))
    }

    fn alloc(&mut self, state: S, location: Location, is_error: bool) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(ArgNode::new(state, location, is_error));
        id
    }

    /// Creates the root node. Must be the first node added.
    pub fn add_root(&mut self, state: S, location: Location, is_error: bool) -> NodeId {
        assert!(self.nodes.is_empty(), "Root must be the first node");
        let id = self.alloc(state, location, is_error);
        debug!("add_root(loc = {}) -> {}", location, id);
        id
    }

    /// Creates a successor node and links it under `parent`.
    pub fn add_node(&mut self, state: S, location: Location, is_error: bool, parent: NodeId) -> NodeId {
        assert!(!self.node(parent).removed, "Parent {} is removed", parent);
        let id = self.alloc(state, location, is_error);
        self.add_child(parent, id);
        debug!("add_node(loc = {}, parent = {}) -> {}", location, parent, id);
        id
    }

    /// Links `child` under `parent`, updating both sides of the relation.
    ///
    /// A second parent may be attached to an existing node (e.g. during a
    /// merge); re-adding an existing link is a no-op.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        assert_ne!(parent, child, "Node {} cannot be its own parent", parent);
        assert!(!self.node(parent).removed, "Parent {} is removed", parent);
        assert!(!self.node(child).removed, "Child {} is removed", child);

        if self.node(parent).children.contains(&child) {
            debug_assert!(self.node(child).parents.contains(&parent));
            return;
        }
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parents.push(parent);
    }

    /// Marks `node` as subsumed by `by` and registers the inverse link in the
    /// covered index.
    ///
    /// # Panics
    ///
    /// Panics if the link would break the covering relation: covering
    /// yourself, covering twice, covering by a removed or already covered
    /// node, or a link that would close a (transitive) covering cycle.
    pub fn mark_covered(&mut self, node: NodeId, by: NodeId) {
        assert_ne!(node, by, "Node {} cannot cover itself", node);
        assert!(!self.node(node).removed, "Covered node {} is removed", node);
        assert!(!self.node(by).removed, "Covering node {} is removed", by);
        if let Some(existing) = self.node(node).covered_by {
            panic!("Node {} is already covered by {}", node, existing);
        }
        assert!(
            self.node(by).covered_by.is_none(),
            "Covering node {} is itself covered",
            by,
        );
        // Walk the covering chain upwards from `by`; reaching `node` would
        // close a cycle. With the uncovered-coverer assertion above the chain
        // is empty, but the walk keeps the check independent of that rule.
        let mut current = self.node(by).covered_by;
        while let Some(up) = current {
            assert_ne!(up, node, "Covering {} by {} would close a cycle", node, by);
            current = self.node(up).covered_by;
        }

        debug!("mark_covered({} by {})", node, by);
        self.node_mut(node).covered_by = Some(by);
        self.covered_index.entry(by).or_default().insert(node);
    }

    /// Returns all nodes reachable from `root` via `children`, including
    /// `root` itself, as an id-ordered set.
    pub fn subtree(&self, root: NodeId) -> BTreeSet<NodeId> {
        assert!(!self.node(root).removed, "Subtree root {} is removed", root);
        let mut result = BTreeSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if result.insert(id) {
                stack.extend(self.node(id).children.iter().copied());
            }
        }
        result
    }

    /// Detaches `node` from every parent, child and covering link, then marks
    /// it removed.
    ///
    /// Nodes covered *by* `node` are uncovered in place so that no link to the
    /// removed slot survives; the refinement engine removes such orphans
    /// entirely before calling this (see [`crate::refine`]).
    pub fn remove(&mut self, node: NodeId) {
        assert!(!self.node(node).removed, "Node {} is already removed", node);
        debug!("remove({})", node);

        let parents = std::mem::take(&mut self.node_mut(node).parents);
        for p in parents {
            self.node_mut(p).children.retain(|&c| c != node);
        }
        let children = std::mem::take(&mut self.node_mut(node).children);
        for c in children {
            self.node_mut(c).parents.retain(|&p| p != node);
        }

        if let Some(by) = self.node_mut(node).covered_by.take() {
            if let Some(set) = self.covered_index.get_mut(&by) {
                set.remove(&node);
                if set.is_empty() {
                    self.covered_index.remove(&by);
                }
            }
        }
        if let Some(covered) = self.covered_index.remove(&node) {
            for c in covered {
                self.node_mut(c).covered_by = None;
            }
        }

        self.node_mut(node).removed = true;
        self.removed_count += 1;
    }
}

impl<S> std::fmt::Debug for Arg<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arg")
            .field("size", &self.size())
            .field("live_size", &self.live_size())
            .field("covered", &self.covered_index.len())
            .finish()
    }
}
