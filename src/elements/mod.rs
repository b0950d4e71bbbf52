//! Diagram elements
//!
//! Nodes and edges are the mutable entities owned by the graph store. All
//! structural consistency between them is enforced by the store; the types
//! here only carry state.

use crate::value_objects::{AttachmentSide, EdgeId, NodeId, NodeStyle, Position2D, Size};
use serde::{Deserialize, Serialize};

/// A node in the diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, immutable after creation
    pub id: NodeId,
    /// Top-left position on the canvas
    pub position: Position2D,
    /// User-editable display label
    pub label: String,
    /// Optional style overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
    /// Rendered size, consumed by the layout engine
    #[serde(default)]
    pub size: Size,
    /// Whether the node is hidden from the canvas
    #[serde(default)]
    pub hidden: bool,
    /// Side where incoming edges attach
    #[serde(default = "default_entry_side")]
    pub entry_side: AttachmentSide,
    /// Side where outgoing edges attach
    #[serde(default = "default_exit_side")]
    pub exit_side: AttachmentSide,
}

fn default_entry_side() -> AttachmentSide {
    AttachmentSide::Left
}

fn default_exit_side() -> AttachmentSide {
    AttachmentSide::Right
}

impl Node {
    /// Create a visible node with default size and styling
    pub fn new(id: NodeId, position: Position2D, label: impl Into<String>) -> Self {
        Self {
            id,
            position,
            label: label.into(),
            style: None,
            size: Size::default(),
            hidden: false,
            entry_side: default_entry_side(),
            exit_side: default_exit_side(),
        }
    }
}

/// A directed edge between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier
    pub id: EdgeId,
    /// Id of the node the edge originates from
    pub source: NodeId,
    /// Id of the node the edge terminates at
    pub target: NodeId,
    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether the edge is hidden from the canvas
    #[serde(default)]
    pub hidden: bool,
    /// Marks a proximity suggestion that has not been committed yet
    #[serde(default)]
    pub transient: bool,
}

impl Edge {
    /// Create a permanent edge with an explicit id
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            source,
            target,
            label: None,
            hidden: false,
            transient: false,
        }
    }

    /// Create a permanent edge whose id is derived from the ordered pair
    pub fn between(source: &NodeId, target: &NodeId) -> Self {
        Self::new(
            EdgeId::directed(source, target),
            source.clone(),
            target.clone(),
        )
    }

    /// Whether either endpoint is the given node
    pub fn touches(&self, node_id: &NodeId) -> bool {
        self.source == *node_id || self.target == *node_id
    }
}
