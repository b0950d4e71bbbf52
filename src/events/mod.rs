//! Graph events
//!
//! Every store mutation reports what actually happened as a list of events.
//! A silently rejected operation (duplicate edge, unknown id) produces no
//! events, which is how callers distinguish a no-op from a change without
//! treating the rejection as an error.

use crate::value_objects::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};

/// A change that was applied to the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphEvent {
    /// A node was added
    NodeAdded {
        /// The id of the new node
        node_id: NodeId,
    },

    /// One or more fields of a node changed
    NodeUpdated {
        /// The id of the changed node
        node_id: NodeId,
    },

    /// A node was removed
    NodeRemoved {
        /// The id of the removed node
        node_id: NodeId,
    },

    /// An edge was added (permanent or transient)
    EdgeAdded {
        /// The id of the new edge
        edge_id: EdgeId,
        /// The source node of the edge
        source: NodeId,
        /// The target node of the edge
        target: NodeId,
    },

    /// A transient suggestion became a permanent edge
    EdgeCommitted {
        /// The id of the committed edge
        edge_id: EdgeId,
    },

    /// An edge was removed
    EdgeRemoved {
        /// The id of the removed edge
        edge_id: EdgeId,
    },

    /// The whole graph was replaced by a bulk restore
    GraphReplaced {
        /// Number of nodes after the swap
        nodes: usize,
        /// Number of edges after the swap
        edges: usize,
    },

    /// The whole graph was emptied
    GraphCleared,
}

impl GraphEvent {
    /// Short name of the event kind, used in logs
    pub fn event_type(&self) -> &'static str {
        match self {
            GraphEvent::NodeAdded { .. } => "NodeAdded",
            GraphEvent::NodeUpdated { .. } => "NodeUpdated",
            GraphEvent::NodeRemoved { .. } => "NodeRemoved",
            GraphEvent::EdgeAdded { .. } => "EdgeAdded",
            GraphEvent::EdgeCommitted { .. } => "EdgeCommitted",
            GraphEvent::EdgeRemoved { .. } => "EdgeRemoved",
            GraphEvent::GraphReplaced { .. } => "GraphReplaced",
            GraphEvent::GraphCleared => "GraphCleared",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        let event = GraphEvent::NodeAdded {
            node_id: NodeId::from("n1"),
        };
        assert_eq!(event.event_type(), "NodeAdded");

        let event = GraphEvent::GraphCleared;
        assert_eq!(event.event_type(), "GraphCleared");
    }

    #[test]
    fn test_event_serialization() {
        let event = GraphEvent::EdgeAdded {
            edge_id: EdgeId::from("a->b"),
            source: NodeId::from("a"),
            target: NodeId::from("b"),
        };

        let serialized = serde_json::to_string(&event).unwrap();
        let deserialized: GraphEvent = serde_json::from_str(&serialized).unwrap();
        assert_eq!(event, deserialized);
    }
}
