//! Deletion reconnection
//!
//! When a node is deleted, its incomers are rewired to its outgoers so
//! reachability through the deleted node survives the deletion. The plan is
//! computed as pure data from the current edge set; the store applies it as
//! part of the atomic node removal.

use crate::elements::Edge;
use crate::value_objects::NodeId;
use std::collections::HashSet;

/// The edge rewiring produced by deleting one node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconnectionPlan {
    /// Every edge touching the deleted node, to be removed
    pub removed: Vec<Edge>,
    /// Bridge edges from each incomer to each outgoer, minus pairs that
    /// would duplicate an edge surviving the removal
    pub bridges: Vec<Edge>,
}

impl ReconnectionPlan {
    /// Compute the plan for deleting `node_id` against the given edge set.
    ///
    /// Transient suggestion edges touching the node are removed like any
    /// other connected edge but never contribute incomers or outgoers.
    /// For a batch deletion this must be called once per node against the
    /// edge set as updated by the prior deletions, not against the original
    /// set, or bridges would resurrect edges to already-deleted nodes.
    pub fn for_node<'a>(
        node_id: &NodeId,
        edges: impl IntoIterator<Item = &'a Edge>,
    ) -> Self {
        let mut removed = Vec::new();
        let mut incomers: Vec<NodeId> = Vec::new();
        let mut outgoers: Vec<NodeId> = Vec::new();
        let mut surviving: HashSet<(NodeId, NodeId)> = HashSet::new();

        for edge in edges {
            if edge.touches(node_id) {
                if !edge.transient {
                    if edge.target == *node_id && edge.source != *node_id {
                        incomers.push(edge.source.clone());
                    }
                    if edge.source == *node_id && edge.target != *node_id {
                        outgoers.push(edge.target.clone());
                    }
                }
                removed.push(edge.clone());
            } else if !edge.transient {
                surviving.insert((edge.source.clone(), edge.target.clone()));
            }
        }

        let mut bridges = Vec::new();
        let mut planned: HashSet<(NodeId, NodeId)> = HashSet::new();
        for incomer in &incomers {
            for outgoer in &outgoers {
                let pair = (incomer.clone(), outgoer.clone());
                if surviving.contains(&pair) || !planned.insert(pair) {
                    continue;
                }
                bridges.push(Edge::between(incomer, outgoer));
            }
        }

        Self { removed, bridges }
    }

    /// Whether the deletion touches no edges at all
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.bridges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::EdgeId;

    fn edge(source: &str, target: &str) -> Edge {
        Edge::between(&NodeId::from(source), &NodeId::from(target))
    }

    #[test]
    fn test_cross_product_bridging() {
        // incomers {A, B}, outgoers {C, D}
        let edges = vec![
            edge("a", "n"),
            edge("b", "n"),
            edge("n", "c"),
            edge("n", "d"),
        ];

        let plan = ReconnectionPlan::for_node(&NodeId::from("n"), &edges);

        assert_eq!(plan.removed.len(), 4);
        let bridge_ids: Vec<&str> = plan.bridges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(bridge_ids, vec!["a->c", "a->d", "b->c", "b->d"]);
    }

    #[test]
    fn test_bridge_skips_existing_edge() {
        let edges = vec![edge("a", "n"), edge("n", "c"), edge("a", "c")];

        let plan = ReconnectionPlan::for_node(&NodeId::from("n"), &edges);

        assert_eq!(plan.removed.len(), 2);
        assert!(plan.bridges.is_empty());
    }

    #[test]
    fn test_transient_edges_are_removed_but_never_bridge() {
        let mut suggestion = edge("x", "n");
        suggestion.transient = true;
        let edges = vec![suggestion, edge("n", "c")];

        let plan = ReconnectionPlan::for_node(&NodeId::from("n"), &edges);

        assert_eq!(plan.removed.len(), 2);
        assert!(plan.bridges.is_empty());
    }

    #[test]
    fn test_self_loop_on_deleted_node_does_not_bridge() {
        let self_loop = Edge::new(
            EdgeId::from("n->n"),
            NodeId::from("n"),
            NodeId::from("n"),
        );
        let edges = vec![edge("a", "n"), self_loop, edge("n", "c")];

        let plan = ReconnectionPlan::for_node(&NodeId::from("n"), &edges);

        assert_eq!(plan.removed.len(), 3);
        let bridge_ids: Vec<&str> = plan.bridges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(bridge_ids, vec!["a->c"]);
    }

    #[test]
    fn test_node_without_edges_yields_empty_plan() {
        let edges = vec![edge("a", "b")];

        let plan = ReconnectionPlan::for_node(&NodeId::from("n"), &edges);

        assert!(plan.is_empty());
    }
}
