//! Editor facade
//!
//! Translates the gestures reported by the rendering collaborator into
//! store operations and owns the session state that is not graph structure:
//! the current selection, the viewport, and the snapshot slot. Everything
//! runs on the caller's single thread of control; persistence is a
//! synchronous request/response exchange with the snapshot store.

use crate::commands::NodePatch;
use crate::elements::{Edge, Node};
use crate::events::GraphEvent;
use crate::identifiers::IdGenerator;
use crate::layout::{apply_layout, LayoutAlgorithm, LayoutConfig};
use crate::persistence::{Snapshot, SnapshotError, SnapshotStore};
use crate::projections::GraphView;
use crate::store::GraphStore;
use crate::suggestion::{ProximityConfig, ProximitySuggester};
use crate::value_objects::{Color, EdgeId, NodeId, Position2D, Viewport};
use tracing::info;

/// What a restore attempt found in the snapshot slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// A snapshot was found and the graph was replaced with it
    Restored,
    /// Nothing valid was stored; the current graph is untouched
    NoData,
}

/// Session-level facade over the graph editing engine
pub struct DiagramEditor {
    store: GraphStore,
    suggester: ProximitySuggester,
    layout_config: LayoutConfig,
    ids: Box<dyn IdGenerator>,
    snapshots: Box<dyn SnapshotStore>,
    selection: Option<NodeId>,
    viewport: Viewport,
}

impl DiagramEditor {
    /// Create an editor over an empty graph
    pub fn new(ids: Box<dyn IdGenerator>, snapshots: Box<dyn SnapshotStore>) -> Self {
        Self {
            store: GraphStore::new(),
            suggester: ProximitySuggester::default(),
            layout_config: LayoutConfig::default(),
            ids,
            snapshots,
            selection: None,
            viewport: Viewport::default(),
        }
    }

    /// The underlying store, for reads
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Project the graph for rendering with the current selection applied
    pub fn view(&self) -> GraphView {
        GraphView::project(&self.store, self.selection.as_ref())
    }

    /// Replace the proximity-suggestion configuration
    pub fn set_proximity_config(&mut self, config: ProximityConfig) {
        self.suggester = ProximitySuggester::new(config);
    }

    /// The layout configuration used by [`run_layout`](Self::run_layout)
    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout_config
    }

    /// Replace the layout configuration
    pub fn set_layout_config(&mut self, config: LayoutConfig) {
        self.layout_config = config;
    }

    /// Click on empty canvas: create a node at the pointer position
    pub fn add_node_at(&mut self, position: Position2D) -> NodeId {
        let node_id = self.ids.next_node_id();
        let label = format!("Node {node_id}");
        self.store
            .add_node(Node::new(node_id.clone(), position, label));
        node_id
    }

    /// Handle-to-handle connect gesture between two existing nodes
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Vec<GraphEvent> {
        self.store.add_edge(Edge::between(source, target))
    }

    /// Drag from a node's handle onto empty canvas: create a node there and
    /// connect the dragged handle to it
    pub fn connect_to_new_node(
        &mut self,
        source: &NodeId,
        position: Position2D,
    ) -> Option<NodeId> {
        if !self.store.contains_node(source) {
            return None;
        }
        let node_id = self.add_node_at(position);
        self.store.add_edge(Edge::between(source, &node_id));
        Some(node_id)
    }

    /// Click on a node: it becomes the single selection
    pub fn select(&mut self, node_id: &NodeId) {
        if self.store.contains_node(node_id) {
            self.selection = Some(node_id.clone());
        }
    }

    /// Click away: drop the selection
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// The currently selected node, if any
    pub fn selected_node(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    /// Rename the selected node
    pub fn rename_selected(&mut self, label: impl Into<String>) -> Vec<GraphEvent> {
        match &self.selection {
            Some(node_id) => {
                let node_id = node_id.clone();
                self.store.update_node(&node_id, NodePatch::label(label))
            }
            None => Vec::new(),
        }
    }

    /// Change the selected node's background color
    pub fn recolor_selected(&mut self, color: Color) -> Vec<GraphEvent> {
        match &self.selection {
            Some(node_id) => {
                let node_id = node_id.clone();
                self.store
                    .update_node(&node_id, NodePatch::background_color(color))
            }
            None => Vec::new(),
        }
    }

    /// Show or hide the selected node and the edges touching it
    pub fn set_selected_hidden(&mut self, hidden: bool) -> Vec<GraphEvent> {
        match &self.selection {
            Some(node_id) => {
                let node_id = node_id.clone();
                self.store.set_hidden(&node_id, hidden)
            }
            None => Vec::new(),
        }
    }

    /// Per-frame pointer move while dragging a node
    pub fn drag_moved(&mut self, node_id: &NodeId, position: Position2D) -> Vec<GraphEvent> {
        let mut events = self
            .store
            .update_node(node_id, NodePatch::position(position));
        events.extend(self.suggester.drag_moved(&mut self.store, node_id));
        events
    }

    /// Pointer release after a drag: commit the suggestion, if one stands
    pub fn drag_ended(&mut self, node_id: &NodeId) -> Vec<GraphEvent> {
        self.suggester.drag_ended(&mut self.store, node_id)
    }

    /// Aborted drag gesture: no transient edge survives
    pub fn drag_cancelled(&mut self) -> Vec<GraphEvent> {
        self.suggester.drag_cancelled(&mut self.store)
    }

    /// Delete a node, rewiring its neighbors through bridge edges
    pub fn delete_node(&mut self, node_id: &NodeId) -> Vec<GraphEvent> {
        if self.selection.as_ref() == Some(node_id) {
            self.selection = None;
        }
        self.store.remove_node(node_id)
    }

    /// Delete the selected node
    pub fn delete_selected(&mut self) -> Vec<GraphEvent> {
        match self.selection.take() {
            Some(node_id) => self.store.remove_node(&node_id),
            None => Vec::new(),
        }
    }

    /// Delete a batch of nodes, bridging each against the progressively
    /// updated edge set
    pub fn delete_nodes(&mut self, node_ids: &[NodeId]) -> Vec<GraphEvent> {
        if self
            .selection
            .as_ref()
            .is_some_and(|selected| node_ids.contains(selected))
        {
            self.selection = None;
        }
        self.store.remove_nodes(node_ids)
    }

    /// Delete a single edge
    pub fn delete_edge(&mut self, edge_id: &EdgeId) -> Vec<GraphEvent> {
        self.store.remove_edge(edge_id)
    }

    /// Recompute every node position with the given algorithm and the
    /// editor's layout configuration
    pub fn run_layout(&mut self, algorithm: &dyn LayoutAlgorithm) -> Vec<GraphEvent> {
        apply_layout(&mut self.store, algorithm, &self.layout_config)
    }

    /// The current pan/zoom state
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Update the pan/zoom state
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Write the committed graph and viewport to the snapshot slot
    pub fn save(&mut self) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::capture(&self.store, &self.viewport);
        self.snapshots.write(&snapshot)?;
        info!(
            "diagram saved: {} nodes, {} edges",
            snapshot.nodes.len(),
            snapshot.edges.len()
        );
        Ok(())
    }

    /// Replace the whole graph and viewport from the snapshot slot.
    ///
    /// When nothing valid is stored the current graph is left untouched and
    /// the caller is told restore had no effect.
    pub fn restore(&mut self) -> Result<RestoreOutcome, SnapshotError> {
        let Some(snapshot) = self.snapshots.read()? else {
            info!("no stored diagram to restore");
            return Ok(RestoreOutcome::NoData);
        };
        let (nodes, edges, viewport) = snapshot.into_elements();
        self.store.replace_all(nodes, edges);
        self.viewport = viewport;
        self.selection = None;
        info!(
            "diagram restored: {} nodes, {} edges",
            self.store.node_count(),
            self.store.edge_count()
        );
        Ok(RestoreOutcome::Restored)
    }
}
