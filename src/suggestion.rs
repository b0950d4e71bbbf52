//! Proximity-based edge suggestion
//!
//! While a node is dragged, the suggester scans every other node for the
//! closest one within a configured radius and maintains a single transient
//! edge toward it. The scan is O(N) per pointer event, which is driven by
//! input frequency rather than graph size.

use crate::elements::Edge;
use crate::events::GraphEvent;
use crate::store::GraphStore;
use crate::value_objects::{EdgeId, NodeId};

/// Configuration for proximity suggestion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityConfig {
    /// Maximum distance at which a neighboring node attracts a suggestion
    pub threshold: f64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self { threshold: 150.0 }
    }
}

/// A candidate edge derived from the dragged node and its closest neighbor
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeCandidate {
    /// The node with the smaller x-coordinate
    pub source: NodeId,
    /// The node with the larger x-coordinate
    pub target: NodeId,
}

impl EdgeCandidate {
    /// Deterministic id for this candidate
    pub fn edge_id(&self) -> EdgeId {
        EdgeId::directed(&self.source, &self.target)
    }

    /// Materialize the candidate as a transient edge
    pub fn into_edge(self) -> Edge {
        let mut edge = Edge::between(&self.source, &self.target);
        edge.transient = true;
        edge
    }
}

/// Find the closest other node within the threshold and orient the pair.
///
/// Direction follows horizontal position: the node with the smaller
/// x-coordinate becomes the source. When the two positions are exactly
/// equal the dragged node becomes the target. Distance ties keep the
/// earlier node in store insertion order, so repeated scans over an
/// unchanged graph agree.
pub fn closest_candidate(
    store: &GraphStore,
    dragged: &NodeId,
    config: &ProximityConfig,
) -> Option<EdgeCandidate> {
    let node = store.node(dragged)?;
    let mut closest: Option<(&crate::elements::Node, f64)> = None;
    for other in store.nodes() {
        if other.id == node.id {
            continue;
        }
        let distance = node.position.distance_to(&other.position);
        if distance < config.threshold && closest.is_none_or(|(_, best)| distance < best) {
            closest = Some((other, distance));
        }
    }
    let (neighbor, _) = closest?;

    let neighbor_is_source =
        neighbor.position.x < node.position.x || neighbor.position == node.position;
    Some(if neighbor_is_source {
        EdgeCandidate {
            source: neighbor.id.clone(),
            target: node.id.clone(),
        }
    } else {
        EdgeCandidate {
            source: node.id.clone(),
            target: neighbor.id.clone(),
        }
    })
}

/// Maintains the transient suggestion edge across a drag gesture
#[derive(Debug, Clone, Default)]
pub struct ProximitySuggester {
    config: ProximityConfig,
}

impl ProximitySuggester {
    /// Create a suggester with the given configuration
    pub fn new(config: ProximityConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    /// Per-frame drag update: replace the transient edge with the current
    /// candidate, or clear it when no node is close enough or the pair is
    /// already connected.
    pub fn drag_moved(&self, store: &mut GraphStore, dragged: &NodeId) -> Vec<GraphEvent> {
        match closest_candidate(store, dragged, &self.config) {
            Some(candidate) if !store.has_edge_between(&candidate.source, &candidate.target) => {
                store.set_transient_edge(candidate.into_edge())
            }
            _ => store.clear_transient_edge(),
        }
    }

    /// Drag release: refresh the suggestion against the release position,
    /// then commit it as a permanent edge (dropping it if the pair gained a
    /// permanent edge in the meantime).
    pub fn drag_ended(&self, store: &mut GraphStore, dragged: &NodeId) -> Vec<GraphEvent> {
        let mut events = self.drag_moved(store, dragged);
        events.extend(store.commit_transient_edge());
        events
    }

    /// Aborted drag: the transient edge never survives the gesture
    pub fn drag_cancelled(&self, store: &mut GraphStore) -> Vec<GraphEvent> {
        store.clear_transient_edge()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Node;
    use crate::value_objects::Position2D;

    fn node_at(id: &str, x: f64, y: f64) -> Node {
        Node::new(NodeId::from(id), Position2D::new(x, y), id.to_uppercase())
    }

    fn store_with(nodes: Vec<Node>) -> GraphStore {
        let mut store = GraphStore::new();
        for node in nodes {
            store.add_node(node);
        }
        store
    }

    #[test]
    fn test_suggests_only_node_within_threshold() {
        // Y at distance 50, everything else at 200
        let mut store = store_with(vec![
            node_at("x", 0.0, 0.0),
            node_at("y", 50.0, 0.0),
            node_at("far1", 200.0, 0.0),
            node_at("far2", 0.0, 200.0),
        ]);
        let suggester = ProximitySuggester::default();

        suggester.drag_moved(&mut store, &NodeId::from("x"));

        let transient = store.transient_edge().expect("expected a suggestion");
        assert_eq!(transient.source, NodeId::from("x"));
        assert_eq!(transient.target, NodeId::from("y"));
    }

    #[test]
    fn test_no_suggestion_outside_threshold() {
        let mut store = store_with(vec![node_at("x", 0.0, 0.0), node_at("y", 151.0, 0.0)]);
        let suggester = ProximitySuggester::default();

        suggester.drag_moved(&mut store, &NodeId::from("x"));

        assert!(store.transient_edge().is_none());
    }

    #[test]
    fn test_direction_follows_smaller_x() {
        let mut store = store_with(vec![node_at("left", 0.0, 0.0), node_at("right", 60.0, 0.0)]);
        let suggester = ProximitySuggester::default();

        // dragging the right node: the left neighbor becomes the source
        suggester.drag_moved(&mut store, &NodeId::from("right"));

        let transient = store.transient_edge().unwrap();
        assert_eq!(transient.source, NodeId::from("left"));
        assert_eq!(transient.target, NodeId::from("right"));
    }

    #[test]
    fn test_equal_positions_make_dragged_node_the_target() {
        let mut store = store_with(vec![node_at("a", 10.0, 10.0), node_at("b", 10.0, 10.0)]);
        let suggester = ProximitySuggester::default();

        suggester.drag_moved(&mut store, &NodeId::from("b"));

        let transient = store.transient_edge().unwrap();
        assert_eq!(transient.source, NodeId::from("a"));
        assert_eq!(transient.target, NodeId::from("b"));
    }

    #[test]
    fn test_no_suggestion_when_pair_already_connected() {
        let mut store = store_with(vec![node_at("a", 0.0, 0.0), node_at("b", 50.0, 0.0)]);
        store.add_edge(Edge::between(&NodeId::from("a"), &NodeId::from("b")));
        let suggester = ProximitySuggester::default();

        suggester.drag_moved(&mut store, &NodeId::from("b"));

        assert!(store.transient_edge().is_none());
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_moving_away_clears_previous_suggestion() {
        let mut store = store_with(vec![node_at("a", 0.0, 0.0), node_at("b", 50.0, 0.0)]);
        let suggester = ProximitySuggester::default();

        suggester.drag_moved(&mut store, &NodeId::from("b"));
        assert!(store.transient_edge().is_some());

        store.update_node(
            &NodeId::from("b"),
            crate::commands::NodePatch::position(Position2D::new(500.0, 0.0)),
        );
        suggester.drag_moved(&mut store, &NodeId::from("b"));

        assert!(store.transient_edge().is_none());
    }

    #[test]
    fn test_drag_ended_commits_suggestion() {
        let mut store = store_with(vec![node_at("a", 0.0, 0.0), node_at("b", 50.0, 0.0)]);
        let suggester = ProximitySuggester::default();

        suggester.drag_moved(&mut store, &NodeId::from("b"));
        suggester.drag_ended(&mut store, &NodeId::from("b"));

        assert!(store.transient_edge().is_none());
        assert!(store.has_edge_between(&NodeId::from("a"), &NodeId::from("b")));
    }

    #[test]
    fn test_cancelled_drag_leaves_no_transient_edge() {
        let mut store = store_with(vec![node_at("a", 0.0, 0.0), node_at("b", 50.0, 0.0)]);
        let suggester = ProximitySuggester::default();

        suggester.drag_moved(&mut store, &NodeId::from("b"));
        suggester.drag_cancelled(&mut store);

        assert!(store.transient_edge().is_none());
        assert_eq!(store.edge_count(), 0);
    }
}
