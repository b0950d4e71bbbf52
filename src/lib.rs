//! Diagram editor domain for the Composable Information Machine
//!
//! This is the graph-editing and layout engine behind an interactive
//! node-and-edge diagram editor: the canonical node/edge collections and
//! the incremental operations that keep them consistent, proximity-based
//! edge suggestion while a node is dragged, edge reconnection when a node
//! is deleted, a deterministic layered layout, and snapshot persistence.
//! Rendering, export, and the storage backend are external collaborators
//! reached through narrow interfaces.

pub mod commands;
pub mod editor;
pub mod elements;
pub mod events;
pub mod identifiers;
pub mod layout;
pub mod persistence;
pub mod projections;
pub mod reconnect;
pub mod store;
pub mod suggestion;
pub mod value_objects;

// Re-export main types
pub use commands::{GraphCommand, NodePatch};
pub use editor::{DiagramEditor, RestoreOutcome};
pub use elements::{Edge, Node};
pub use events::GraphEvent;
pub use store::{GraphStore, PositionMap};

// Re-export the component seams
pub use identifiers::{IdGenerator, SequenceIdGenerator, UuidIdGenerator};
pub use layout::{
    apply_layout, LayeredLayout, LayoutAlgorithm, LayoutConfig, LayoutDirection,
};
pub use persistence::{
    decode, encode, FileSnapshotStore, MemorySnapshotStore, Snapshot, SnapshotError,
    SnapshotStore,
};
pub use projections::{EdgeView, GraphView, NodeView};
pub use reconnect::ReconnectionPlan;
pub use suggestion::{closest_candidate, EdgeCandidate, ProximityConfig, ProximitySuggester};

// Re-export value objects
pub use value_objects::{
    AttachmentSide, Color, EdgeId, NodeId, NodeStyle, Position2D, Size, Viewport,
};
