//! Graph store
//!
//! The store owns the canonical node and edge collections and is the only
//! place they are mutated. Every operation preserves the structural
//! invariants: edge endpoints always exist, at most one non-transient edge
//! per ordered (source, target) pair, and at most one transient suggestion
//! edge at any time.
//!
//! Operations that would violate an invariant are silently rejected as
//! no-ops rather than surfaced as errors; callers observe the difference
//! through the returned event list, which is empty for a rejection.

use crate::commands::{GraphCommand, NodePatch};
use crate::elements::{Edge, Node};
use crate::events::GraphEvent;
use crate::reconnect::ReconnectionPlan;
use crate::value_objects::{AttachmentSide, EdgeId, NodeId, NodeStyle, Position2D};
use indexmap::IndexMap;
use tracing::debug;

/// Position output of a layout run, keyed by node id.
///
/// Insertion order follows the store's node order so applying the map is
/// deterministic.
pub type PositionMap = IndexMap<NodeId, Position2D>;

/// Owns the node and edge collections of one diagram
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
}

impl GraphStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node by id
    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Get an edge by id
    pub fn edge(&self, edge_id: &EdgeId) -> Option<&Edge> {
        self.edges.get(edge_id)
    }

    /// Iterate nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, including a transient suggestion if present
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether a node with this id exists
    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Whether a permanent edge exists for the ordered pair
    pub fn has_edge_between(&self, source: &NodeId, target: &NodeId) -> bool {
        self.edges
            .values()
            .any(|e| !e.transient && e.source == *source && e.target == *target)
    }

    /// The current transient suggestion edge, if any
    pub fn transient_edge(&self) -> Option<&Edge> {
        self.edges.values().find(|e| e.transient)
    }

    /// Nodes with a permanent edge terminating at `node_id`
    pub fn incomers(&self, node_id: &NodeId) -> Vec<NodeId> {
        let mut seen = Vec::new();
        for edge in self.edges.values() {
            if !edge.transient
                && edge.target == *node_id
                && edge.source != *node_id
                && !seen.contains(&edge.source)
            {
                seen.push(edge.source.clone());
            }
        }
        seen
    }

    /// Nodes with a permanent edge originating at `node_id`
    pub fn outgoers(&self, node_id: &NodeId) -> Vec<NodeId> {
        let mut seen = Vec::new();
        for edge in self.edges.values() {
            if !edge.transient
                && edge.source == *node_id
                && edge.target != *node_id
                && !seen.contains(&edge.target)
            {
                seen.push(edge.target.clone());
            }
        }
        seen
    }

    /// Ids of every edge touching `node_id`, transient included
    pub fn connected_edges(&self, node_id: &NodeId) -> Vec<EdgeId> {
        self.edges
            .values()
            .filter(|e| e.touches(node_id))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Add a node. A duplicate id is rejected as a no-op.
    pub fn add_node(&mut self, node: Node) -> Vec<GraphEvent> {
        if self.nodes.contains_key(&node.id) {
            debug!("node {} already exists, add ignored", node.id);
            return Vec::new();
        }
        let node_id = node.id.clone();
        self.nodes.insert(node_id.clone(), node);
        vec![GraphEvent::NodeAdded { node_id }]
    }

    /// Add a permanent edge.
    ///
    /// Rejected as a no-op when an endpoint is missing, the id is taken, or
    /// a permanent edge for the same ordered pair already exists. An edge
    /// flagged transient is routed through [`set_transient_edge`](Self::set_transient_edge).
    pub fn add_edge(&mut self, mut edge: Edge) -> Vec<GraphEvent> {
        if edge.transient {
            return self.set_transient_edge(edge);
        }
        if !self.nodes.contains_key(&edge.source) || !self.nodes.contains_key(&edge.target) {
            debug!(
                "edge {} -> {} references a missing node, add ignored",
                edge.source, edge.target
            );
            return Vec::new();
        }
        if self.edges.contains_key(&edge.id) {
            debug!("edge {} already exists, add ignored", edge.id);
            return Vec::new();
        }
        if self.has_edge_between(&edge.source, &edge.target) {
            debug!(
                "duplicate edge {} -> {} ignored",
                edge.source, edge.target
            );
            return Vec::new();
        }
        edge.hidden = edge.hidden || self.either_endpoint_hidden(&edge.source, &edge.target);
        let event = GraphEvent::EdgeAdded {
            edge_id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
        };
        self.edges.insert(edge.id.clone(), edge);
        vec![event]
    }

    /// Apply a partial update to a node.
    ///
    /// A visibility change is propagated to every edge touching the node;
    /// an edge stays hidden while either of its endpoints is hidden.
    pub fn update_node(&mut self, node_id: &NodeId, patch: NodePatch) -> Vec<GraphEvent> {
        if patch.is_empty() {
            return Vec::new();
        }
        let Some(node) = self.nodes.get_mut(node_id) else {
            debug!("update for unknown node {} ignored", node_id);
            return Vec::new();
        };
        if let Some(label) = patch.label {
            node.label = label;
        }
        if let Some(position) = patch.position {
            node.position = position;
        }
        if let Some(size) = patch.size {
            node.size = size;
        }
        if let Some(color) = patch.background_color {
            node.style
                .get_or_insert_with(NodeStyle::default)
                .background_color = Some(color);
        }
        let visibility_changed = patch.hidden.is_some();
        if let Some(hidden) = patch.hidden {
            node.hidden = hidden;
        }
        if visibility_changed {
            self.refresh_edge_visibility(node_id);
        }
        vec![GraphEvent::NodeUpdated {
            node_id: node_id.clone(),
        }]
    }

    /// Show or hide a node and the edges touching it
    pub fn set_hidden(&mut self, node_id: &NodeId, hidden: bool) -> Vec<GraphEvent> {
        self.update_node(node_id, NodePatch::hidden(hidden))
    }

    /// Remove a node, cascading atomically: bridge edges are computed from
    /// the current edge set, every connected edge is removed, the bridges
    /// are added, and finally the node itself is dropped. An unknown id is
    /// a no-op.
    pub fn remove_node(&mut self, node_id: &NodeId) -> Vec<GraphEvent> {
        if !self.nodes.contains_key(node_id) {
            debug!("removal of unknown node {} ignored", node_id);
            return Vec::new();
        }
        let plan = ReconnectionPlan::for_node(node_id, self.edges.values());
        let mut events = Vec::new();
        for edge in &plan.removed {
            self.edges.shift_remove(&edge.id);
            events.push(GraphEvent::EdgeRemoved {
                edge_id: edge.id.clone(),
            });
        }
        self.nodes.shift_remove(node_id);
        events.push(GraphEvent::NodeRemoved {
            node_id: node_id.clone(),
        });
        for bridge in plan.bridges {
            events.extend(self.add_edge(bridge));
        }
        events
    }

    /// Remove several nodes as one batch.
    ///
    /// Each node's bridging is computed against the edge set as updated by
    /// the prior deletions in the batch, so no bridge ever resurrects a path
    /// through an already-deleted node.
    pub fn remove_nodes(&mut self, node_ids: &[NodeId]) -> Vec<GraphEvent> {
        let mut events = Vec::new();
        for node_id in node_ids {
            events.extend(self.remove_node(node_id));
        }
        events
    }

    /// Remove a single edge. An unknown id is a no-op.
    pub fn remove_edge(&mut self, edge_id: &EdgeId) -> Vec<GraphEvent> {
        if self.edges.shift_remove(edge_id).is_none() {
            debug!("removal of unknown edge {} ignored", edge_id);
            return Vec::new();
        }
        vec![GraphEvent::EdgeRemoved {
            edge_id: edge_id.clone(),
        }]
    }

    /// Replace the entire graph, as a snapshot restore does.
    ///
    /// Input that would violate an invariant is dropped during the swap:
    /// duplicate node ids, edges with missing endpoints, duplicate ordered
    /// pairs, and transient suggestion edges.
    pub fn replace_all(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Vec<GraphEvent> {
        self.nodes.clear();
        self.edges.clear();
        for node in nodes {
            if self.nodes.contains_key(&node.id) {
                debug!("duplicate node {} dropped during replace", node.id);
                continue;
            }
            self.nodes.insert(node.id.clone(), node);
        }
        for mut edge in edges {
            if edge.transient {
                debug!("transient edge {} dropped during replace", edge.id);
                continue;
            }
            if !self.nodes.contains_key(&edge.source) || !self.nodes.contains_key(&edge.target) {
                debug!("dangling edge {} dropped during replace", edge.id);
                continue;
            }
            if self.edges.contains_key(&edge.id)
                || self.has_edge_between(&edge.source, &edge.target)
            {
                debug!("duplicate edge {} dropped during replace", edge.id);
                continue;
            }
            edge.hidden = edge.hidden || self.either_endpoint_hidden(&edge.source, &edge.target);
            self.edges.insert(edge.id.clone(), edge);
        }
        vec![GraphEvent::GraphReplaced {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
        }]
    }

    /// Remove every node and edge
    pub fn clear(&mut self) -> Vec<GraphEvent> {
        if self.nodes.is_empty() && self.edges.is_empty() {
            return Vec::new();
        }
        self.nodes.clear();
        self.edges.clear();
        vec![GraphEvent::GraphCleared]
    }

    /// Install `edge` as the single transient suggestion, replacing any
    /// previous one.
    ///
    /// Rejected (leaving no suggestion in place) when an endpoint is missing
    /// or a permanent edge for the pair already exists. Re-suggesting the
    /// current candidate is a no-op, which keeps per-drag-frame updates
    /// idempotent.
    pub fn set_transient_edge(&mut self, mut edge: Edge) -> Vec<GraphEvent> {
        edge.transient = true;
        if self.transient_edge().is_some_and(|t| t.id == edge.id) {
            return Vec::new();
        }
        let mut events = self.clear_transient_edge();
        if !self.nodes.contains_key(&edge.source) || !self.nodes.contains_key(&edge.target) {
            debug!(
                "suggestion {} -> {} references a missing node, ignored",
                edge.source, edge.target
            );
            return events;
        }
        if self.has_edge_between(&edge.source, &edge.target) {
            debug!(
                "suggestion {} -> {} duplicates a permanent edge, ignored",
                edge.source, edge.target
            );
            return events;
        }
        if self.edges.contains_key(&edge.id) {
            debug!("suggestion id {} already taken, ignored", edge.id);
            return events;
        }
        edge.hidden = self.either_endpoint_hidden(&edge.source, &edge.target);
        events.push(GraphEvent::EdgeAdded {
            edge_id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
        });
        self.edges.insert(edge.id.clone(), edge);
        events
    }

    /// Drop the transient suggestion, if any
    pub fn clear_transient_edge(&mut self) -> Vec<GraphEvent> {
        let Some(edge_id) = self.transient_edge().map(|e| e.id.clone()) else {
            return Vec::new();
        };
        self.edges.shift_remove(&edge_id);
        vec![GraphEvent::EdgeRemoved { edge_id }]
    }

    /// Turn the transient suggestion into a permanent edge.
    ///
    /// If a permanent edge for the pair appeared in the meantime the
    /// suggestion is dropped instead of committed.
    pub fn commit_transient_edge(&mut self) -> Vec<GraphEvent> {
        let Some((edge_id, source, target)) = self
            .transient_edge()
            .map(|e| (e.id.clone(), e.source.clone(), e.target.clone()))
        else {
            return Vec::new();
        };
        if self.has_edge_between(&source, &target) {
            debug!(
                "suggestion {} duplicates a permanent edge, dropped on commit",
                edge_id
            );
            self.edges.shift_remove(&edge_id);
            return vec![GraphEvent::EdgeRemoved { edge_id }];
        }
        if let Some(edge) = self.edges.get_mut(&edge_id) {
            edge.transient = false;
        }
        vec![GraphEvent::EdgeCommitted { edge_id }]
    }

    /// Move every node in the map and reset edge-attachment sides to match
    /// the layout flow direction. Unknown ids in the map are ignored.
    pub fn apply_positions(
        &mut self,
        positions: &PositionMap,
        entry_side: AttachmentSide,
        exit_side: AttachmentSide,
    ) -> Vec<GraphEvent> {
        let mut events = Vec::new();
        for (node_id, position) in positions {
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.position = *position;
                node.entry_side = entry_side;
                node.exit_side = exit_side;
                events.push(GraphEvent::NodeUpdated {
                    node_id: node_id.clone(),
                });
            }
        }
        events
    }

    /// Dispatch a command to the matching operation
    pub fn apply(&mut self, command: GraphCommand) -> Vec<GraphEvent> {
        match command {
            GraphCommand::AddNode { node } => self.add_node(node),
            GraphCommand::AddEdge { edge } => self.add_edge(edge),
            GraphCommand::UpdateNode { node_id, patch } => self.update_node(&node_id, patch),
            GraphCommand::SetHidden { node_id, hidden } => self.set_hidden(&node_id, hidden),
            GraphCommand::RemoveNode { node_id } => self.remove_node(&node_id),
            GraphCommand::RemoveNodes { node_ids } => self.remove_nodes(&node_ids),
            GraphCommand::RemoveEdge { edge_id } => self.remove_edge(&edge_id),
            GraphCommand::ReplaceAll { nodes, edges } => self.replace_all(nodes, edges),
            GraphCommand::Clear => self.clear(),
        }
    }

    fn either_endpoint_hidden(&self, source: &NodeId, target: &NodeId) -> bool {
        let hidden = |id: &NodeId| self.nodes.get(id).is_some_and(|n| n.hidden);
        hidden(source) || hidden(target)
    }

    fn refresh_edge_visibility(&mut self, node_id: &NodeId) {
        let updates: Vec<(EdgeId, bool)> = self
            .edges
            .values()
            .filter(|e| e.touches(node_id))
            .map(|e| {
                (
                    e.id.clone(),
                    self.either_endpoint_hidden(&e.source, &e.target),
                )
            })
            .collect();
        for (edge_id, hidden) in updates {
            if let Some(edge) = self.edges.get_mut(&edge_id) {
                edge.hidden = hidden;
            }
        }
    }
}
