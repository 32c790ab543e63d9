//! Basic structural statistics for an undirected graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: sizes of the node and edge sets.
//! - **density**: `edge_count / (node_count * (node_count - 1) / 2)`. A
//!   complete graph has density 1.0; empty and single-node graphs have 0.0.
//! - **component_count**: number of connected components.
//! - **isolated_node_count**: nodes with degree 0.
//! - **max_degree** / **mean_degree**: degree extremes. The mean is
//!   `2 * edge_count / node_count`.

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::{Graph, max_edge_count};

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Fraction of possible edges present. Zero for graphs with 0 or 1 node.
    pub density: f64,
    /// Number of connected components (0 for the empty graph).
    pub component_count: usize,
    /// Number of nodes with no incident edges.
    pub isolated_node_count: usize,
    /// Highest degree of any node.
    pub max_degree: usize,
    /// Average degree. Zero for the empty graph.
    pub mean_degree: f64,
}

impl GraphStats {
    /// Compute statistics for `graph`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_graph(graph: &Graph) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let component_count = if node_count == 0 {
            0
        } else {
            connected_components(&graph.graph)
        };

        let degrees = (0..node_count).map(|i| graph.degree(i));
        let isolated_node_count = degrees.clone().filter(|&d| d == 0).count();
        let max_degree = degrees.max().unwrap_or(0);

        let mean_degree = if node_count == 0 {
            0.0
        } else {
            (2 * edge_count) as f64 / node_count as f64
        };

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            component_count,
            isolated_node_count,
            max_degree,
            mean_degree,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    let max_edges = max_edge_count(node_count);
    if max_edges == 0 {
        return 0.0;
    }
    edge_count as f64 / max_edges as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
