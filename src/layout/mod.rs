//! Graph layout
//!
//! Layout algorithms compute a fresh position for every node without ever
//! creating or removing graph elements. The algorithm sits behind the
//! narrow [`LayoutAlgorithm`] trait so alternative implementations can be
//! substituted without touching the store.

pub mod layered;

pub use layered::LayeredLayout;

use crate::elements::{Edge, Node};
use crate::events::GraphEvent;
use crate::store::GraphStore;
use crate::value_objects::AttachmentSide;
use serde::{Deserialize, Serialize};

pub use crate::store::PositionMap;

/// Flow direction of the layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// Ranks flow from left to right
    #[default]
    LeftToRight,
    /// Ranks flow from right to left
    RightToLeft,
    /// Ranks flow from top to bottom
    TopToBottom,
    /// Ranks flow from bottom to top
    BottomToTop,
}

impl LayoutDirection {
    /// Whether ranks advance along the x axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }

    /// The node sides where incoming and outgoing edges attach under this
    /// flow direction
    pub fn attachment_sides(&self) -> (AttachmentSide, AttachmentSide) {
        match self {
            Self::LeftToRight => (AttachmentSide::Left, AttachmentSide::Right),
            Self::RightToLeft => (AttachmentSide::Right, AttachmentSide::Left),
            Self::TopToBottom => (AttachmentSide::Top, AttachmentSide::Bottom),
            Self::BottomToTop => (AttachmentSide::Bottom, AttachmentSide::Top),
        }
    }
}

/// Configuration for a layout run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Flow direction of the ranks
    pub direction: LayoutDirection,
    /// Minimum separation between consecutive ranks
    pub rank_spacing: f64,
    /// Minimum separation between nodes within a rank
    pub node_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::LeftToRight,
            rank_spacing: 100.0,
            node_spacing: 50.0,
        }
    }
}

/// A layout algorithm: nodes and edges in, position map out.
///
/// Implementations must be deterministic (the same input and configuration
/// always yield the same positions) and must return a position for every
/// node they were given.
pub trait LayoutAlgorithm {
    /// Compute a position for every node
    fn compute(&self, nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> PositionMap;
}

/// Run a layout over the store and apply the result: every node is moved
/// and its edge-attachment sides are reset to match the flow direction.
pub fn apply_layout(
    store: &mut GraphStore,
    algorithm: &dyn LayoutAlgorithm,
    config: &LayoutConfig,
) -> Vec<GraphEvent> {
    let nodes: Vec<Node> = store.nodes().cloned().collect();
    let edges: Vec<Edge> = store.edges().cloned().collect();
    let positions = algorithm.compute(&nodes, &edges, config);
    let (entry_side, exit_side) = config.direction.attachment_sides();
    store.apply_positions(&positions, entry_side, exit_side)
}
