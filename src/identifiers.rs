//! Identifier generation
//!
//! Id generation is an explicit dependency handed to the editor rather than
//! hidden global state, so tests can construct ids directly and sessions can
//! choose their uniqueness strategy.

use crate::value_objects::NodeId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh node identifiers
pub trait IdGenerator {
    /// Produce the next unique node id
    fn next_node_id(&self) -> NodeId;
}

/// Generator combining a process-wide sequence with the creation date.
///
/// Ids look like `node_20260807142530_7`: unique within a session through the
/// counter, and across restarts through the timestamp.
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    counter: AtomicU64,
}

impl SequenceIdGenerator {
    /// Create a generator starting at sequence zero
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_node_id(&self) -> NodeId {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);
        let created = chrono::Utc::now().format("%Y%m%d%H%M%S");
        NodeId::new(format!("node_{created}_{sequence}"))
    }
}

/// Uuid-backed generator for callers that need ids unique across sessions
/// without coordination
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_node_id(&self) -> NodeId {
        NodeId::new(format!("node_{}", uuid::Uuid::new_v4()))
    }
}
