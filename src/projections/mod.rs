//! Presentation projections
//!
//! Read-only views over the store for the rendering collaborator. The
//! projection injects per-render presentation state (the current selection
//! and effective visibility) without mutating anything the store owns, so
//! structural data and presentation state cannot drift apart.

use crate::store::GraphStore;
use crate::value_objects::{AttachmentSide, Color, EdgeId, NodeId, Position2D, Size};

/// Render-ready view of a node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub id: NodeId,
    pub position: Position2D,
    pub label: String,
    pub size: Size,
    /// User-chosen fill color, if any
    pub background_color: Option<Color>,
    pub hidden: bool,
    /// Whether this node is the current selection
    pub selected: bool,
    pub entry_side: AttachmentSide,
    pub exit_side: AttachmentSide,
}

/// Render-ready view of an edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeView {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub label: Option<String>,
    /// Effective visibility: hidden when the edge or either endpoint is
    pub hidden: bool,
    pub transient: bool,
}

/// A full render pass over the graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl GraphView {
    /// Project the store with the given selection applied
    pub fn project(store: &GraphStore, selection: Option<&NodeId>) -> Self {
        let nodes = store
            .nodes()
            .map(|node| NodeView {
                id: node.id.clone(),
                position: node.position,
                label: node.label.clone(),
                size: node.size,
                background_color: node.style.as_ref().and_then(|s| s.background_color),
                hidden: node.hidden,
                selected: selection == Some(&node.id),
                entry_side: node.entry_side,
                exit_side: node.exit_side,
            })
            .collect();
        let hidden_node = |id: &NodeId| store.node(id).is_some_and(|n| n.hidden);
        let edges = store
            .edges()
            .map(|edge| EdgeView {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                label: edge.label.clone(),
                hidden: edge.hidden || hidden_node(&edge.source) || hidden_node(&edge.target),
                transient: edge.transient,
            })
            .collect();
        Self { nodes, edges }
    }
}
