//! Snapshot persistence
//!
//! Converts the live graph to and from the wire snapshot format and defines
//! the narrow storage contract the editor saves into: a single named slot,
//! last write wins, where a read yields either a valid snapshot or nothing.
//! A malformed stored blob reads as "nothing to restore" so the editing
//! session is never interrupted by bad persisted data.

use crate::elements::{Edge, Node};
use crate::store::GraphStore;
use crate::value_objects::{EdgeId, NodeId, NodeStyle, Position2D, Viewport};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Wire form of a node's user data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNodeData {
    /// Display label
    pub label: String,
}

/// Wire form of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: NodeId,
    pub position: Position2D,
    pub data: SnapshotNodeData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

/// Wire form of an edge's user data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEdgeData {
    /// Display label
    pub label: String,
}

/// Wire form of an edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SnapshotEdgeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

/// The serialized form of the full graph plus viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
    pub viewport: Viewport,
}

impl Snapshot {
    /// Capture the committed graph state.
    ///
    /// A transient suggestion edge is provisional and never persisted.
    pub fn capture(store: &GraphStore, viewport: &Viewport) -> Self {
        let nodes = store
            .nodes()
            .map(|node| SnapshotNode {
                id: node.id.clone(),
                position: node.position,
                data: SnapshotNodeData {
                    label: node.label.clone(),
                },
                style: node.style.clone(),
                hidden: node.hidden.then_some(true),
            })
            .collect();
        let edges = store
            .edges()
            .filter(|edge| !edge.transient)
            .map(|edge| SnapshotEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                data: edge.label.clone().map(|label| SnapshotEdgeData { label }),
                hidden: edge.hidden.then_some(true),
            })
            .collect();
        Self {
            nodes,
            edges,
            viewport: *viewport,
        }
    }

    /// Rebuild domain elements from the wire form
    pub fn into_elements(self) -> (Vec<Node>, Vec<Edge>, Viewport) {
        let nodes = self
            .nodes
            .into_iter()
            .map(|wire| {
                let mut node = Node::new(wire.id, wire.position, wire.data.label);
                node.style = wire.style;
                node.hidden = wire.hidden.unwrap_or(false);
                node
            })
            .collect();
        let edges = self
            .edges
            .into_iter()
            .map(|wire| {
                let mut edge = Edge::new(wire.id, wire.source, wire.target);
                edge.label = wire.data.map(|data| data.label);
                edge.hidden = wire.hidden.unwrap_or(false);
                edge
            })
            .collect();
        (nodes, edges, self.viewport)
    }
}

/// Errors from snapshot encoding or storage
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("snapshot storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Encode a snapshot as the stored JSON blob
pub fn encode(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    serde_json::to_string(snapshot).map_err(SnapshotError::Encode)
}

/// Decode a stored JSON blob back into a snapshot
pub fn decode(raw: &str) -> Result<Snapshot, SnapshotError> {
    serde_json::from_str(raw).map_err(SnapshotError::Decode)
}

/// Storage contract for one snapshot slot: last write wins, a read yields
/// the latest valid snapshot or nothing
pub trait SnapshotStore {
    /// Overwrite the slot with this snapshot
    fn write(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError>;

    /// Read the slot. Absent and malformed content both yield `None`.
    fn read(&self) -> Result<Option<Snapshot>, SnapshotError>;
}

/// In-memory slot, useful for tests and ephemeral sessions.
///
/// Round-trips through the codec so it exercises the same wire format as
/// durable stores.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Option<String>,
}

impl MemorySnapshotStore {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn write(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        self.slot = Some(encode(snapshot)?);
        Ok(())
    }

    fn read(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let Some(raw) = self.slot.as_deref() else {
            return Ok(None);
        };
        match decode(raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(error) => {
                warn!("stored snapshot is malformed, treating as absent: {error}");
                Ok(None)
            }
        }
    }
}

/// Slot backed by a single JSON file
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store writing to the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn write(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let raw = encode(snapshot)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn read(&self) -> Result<Option<Snapshot>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        match decode(&raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(error) => {
                warn!(
                    "snapshot file {} is malformed, treating as absent: {error}",
                    self.path.display()
                );
                Ok(None)
            }
        }
    }
}
