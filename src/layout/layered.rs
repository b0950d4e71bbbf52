//! Layered (rank-based) layout
//!
//! Nodes are assigned to discrete ranks consistent with edge direction, so
//! a node sits one rank past its furthest predecessor, and each rank becomes
//! a column (or row) along the flow axis. Within a rank, nodes are stacked
//! in store order and the stack is centered on the cross axis.

use super::{LayoutAlgorithm, LayoutConfig, LayoutDirection};
use crate::elements::{Edge, Node};
use crate::store::PositionMap;
use crate::value_objects::Position2D;
use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Deterministic layered layout in the configured flow direction
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredLayout;

impl LayeredLayout {
    /// Create the layout algorithm
    pub fn new() -> Self {
        Self
    }

    /// Assign a rank to every node, returned parallel to `nodes`.
    ///
    /// Acyclic graphs get exact longest-path ranks through a topological
    /// pass. A cyclic graph falls back to capped relaxation so the engine
    /// still terminates with a deterministic (if imperfect) ranking rather
    /// than failing the layout.
    fn assign_ranks(nodes: &[Node], edges: &[Edge]) -> Vec<usize> {
        let mut graph = DiGraph::<usize, ()>::with_capacity(nodes.len(), edges.len());
        let mut index_of = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index_of.insert(node.id.clone(), graph.add_node(i));
        }
        for edge in edges {
            // transient suggestions and self-loops never constrain ranks
            if edge.transient || edge.source == edge.target {
                continue;
            }
            if let (Some(&source), Some(&target)) =
                (index_of.get(&edge.source), index_of.get(&edge.target))
            {
                graph.add_edge(source, target, ());
            }
        }

        let mut ranks = vec![0usize; nodes.len()];
        match toposort(&graph, None) {
            Ok(order) => {
                for index in order {
                    let rank = ranks[graph[index]];
                    for successor in graph.neighbors(index) {
                        let successor = graph[successor];
                        if ranks[successor] < rank + 1 {
                            ranks[successor] = rank + 1;
                        }
                    }
                }
            }
            Err(_) => {
                let cap = nodes.len().saturating_sub(1);
                for _ in 0..nodes.len() {
                    let mut changed = false;
                    for edge in graph.edge_references() {
                        let source = graph[edge.source()];
                        let target = graph[edge.target()];
                        let candidate = (ranks[source] + 1).min(cap);
                        if ranks[target] < candidate {
                            ranks[target] = candidate;
                            changed = true;
                        }
                    }
                    if !changed {
                        break;
                    }
                }
            }
        }
        ranks
    }
}

impl LayoutAlgorithm for LayeredLayout {
    fn compute(&self, nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> PositionMap {
        let mut positions = PositionMap::new();
        if nodes.is_empty() {
            return positions;
        }

        let ranks = Self::assign_ranks(nodes, edges);

        // compact rank values so the cyclic fallback cannot leave gaps
        let mut used: Vec<usize> = ranks.clone();
        used.sort_unstable();
        used.dedup();
        let compacted: HashMap<usize, usize> =
            used.iter().enumerate().map(|(i, &r)| (r, i)).collect();

        let mut grouped: Vec<Vec<usize>> = vec![Vec::new(); used.len()];
        for (i, rank) in ranks.iter().enumerate() {
            grouped[compacted[rank]].push(i);
        }

        let horizontal = config.direction.is_horizontal();
        let primary_size =
            |node: &Node| if horizontal { node.size.width } else { node.size.height };
        let cross_size =
            |node: &Node| if horizontal { node.size.height } else { node.size.width };

        let mut primary_offset = 0.0;
        for rank_nodes in &grouped {
            let extent = rank_nodes
                .iter()
                .map(|&i| primary_size(&nodes[i]))
                .fold(0.0, f64::max);
            let stack: f64 = rank_nodes
                .iter()
                .map(|&i| cross_size(&nodes[i]))
                .sum::<f64>()
                + config.node_spacing * (rank_nodes.len() - 1) as f64;

            let mut cross = -stack / 2.0;
            for &i in rank_nodes {
                let node = &nodes[i];
                let along = primary_offset + (extent - primary_size(node)) / 2.0;
                let position = match config.direction {
                    LayoutDirection::LeftToRight => Position2D::new(along, cross),
                    LayoutDirection::RightToLeft => {
                        Position2D::new(-(along + primary_size(node)), cross)
                    }
                    LayoutDirection::TopToBottom => Position2D::new(cross, along),
                    LayoutDirection::BottomToTop => {
                        Position2D::new(cross, -(along + primary_size(node)))
                    }
                };
                positions.insert(node.id.clone(), position);
                cross += cross_size(node) + config.node_spacing;
            }
            primary_offset += extent + config.rank_spacing;
        }

        positions
    }
}
