//! Graph commands
//!
//! Commands represent intent to modify graph state. The presentation layer
//! translates user gestures into commands (or calls the equivalent store
//! methods directly); `GraphStore::apply` dispatches them and returns the
//! events each mutation produced.

use crate::elements::{Edge, Node};
use crate::value_objects::{Color, EdgeId, NodeId, Position2D, Size};
use serde::{Deserialize, Serialize};

/// Partial update applied to an existing node.
///
/// Absent fields leave the node untouched. A change to `hidden` is propagated
/// by the store to every edge touching the node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePatch {
    /// New display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// New canvas position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position2D>,
    /// New rendered size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// New background color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    /// New visibility flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl NodePatch {
    /// Patch that only changes the label
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Patch that only moves the node
    pub fn position(position: Position2D) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Patch that only changes the background color
    pub fn background_color(color: Color) -> Self {
        Self {
            background_color: Some(color),
            ..Self::default()
        }
    }

    /// Patch that only changes visibility
    pub fn hidden(hidden: bool) -> Self {
        Self {
            hidden: Some(hidden),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Commands for graph operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GraphCommand {
    /// Add a node to the graph
    AddNode {
        /// The node to add
        node: Node,
    },

    /// Add a permanent edge between two existing nodes
    AddEdge {
        /// The edge to add
        edge: Edge,
    },

    /// Apply a partial update to a node
    UpdateNode {
        /// The id of the node to update
        node_id: NodeId,
        /// The fields to change
        patch: NodePatch,
    },

    /// Show or hide a node and the edges touching it
    SetHidden {
        /// The id of the node to change
        node_id: NodeId,
        /// The new visibility flag
        hidden: bool,
    },

    /// Remove a node, rewiring its neighbors through bridge edges
    RemoveNode {
        /// The id of the node to remove
        node_id: NodeId,
    },

    /// Remove several nodes as one batch, bridging sequentially
    RemoveNodes {
        /// The ids of the nodes to remove, in deletion order
        node_ids: Vec<NodeId>,
    },

    /// Remove a single edge
    RemoveEdge {
        /// The id of the edge to remove
        edge_id: EdgeId,
    },

    /// Replace the entire graph, as done by a snapshot restore
    ReplaceAll {
        /// The full replacement node set
        nodes: Vec<Node>,
        /// The full replacement edge set
        edges: Vec<Edge>,
    },

    /// Remove every node and edge
    Clear,
}
