//! Local and global clustering coefficients.
//!
//! For a node `v` of degree `d(v)` with `t(v)` edges among its neighbors:
//!
//! ```text
//! C(v) = 2 t(v) / (d(v) (d(v) - 1))     for d(v) >= 2
//! C(v) = 0                              otherwise
//! ```
//!
//! The global value is the plain mean of `C(v)` over **all** nodes. Nodes
//! with degree below 2 count as zeros rather than being dropped, which is
//! the usual "average clustering" convention (not transitivity).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::instrument;

use crate::graph::Graph;
use crate::stats::mean;

/// Clustering coefficients for one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusteringResult {
    /// Local coefficient per node id, each in `[0, 1]`.
    pub coefficients: BTreeMap<String, f64>,
    /// Mean of all local coefficients (0.0 for the empty graph).
    pub global: f64,
}

impl ClusteringResult {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<f64> {
        self.coefficients.get(id).copied()
    }
}

/// Compute local clustering for every node plus the global average.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn clustering_coefficients(graph: &Graph) -> ClusteringResult {
    let local = local_clustering(graph);
    let coefficients = graph
        .nodes()
        .map(|(i, id)| (id.to_string(), local[i]))
        .collect();

    ClusteringResult {
        coefficients,
        global: mean(&local),
    }
}

/// Global (average) clustering without building the per-id map.
pub(crate) fn average_clustering(graph: &Graph) -> f64 {
    mean(&local_clustering(graph))
}

#[allow(clippy::cast_precision_loss)]
fn local_clustering(graph: &Graph) -> Vec<f64> {
    (0..graph.node_count())
        .map(|v| {
            let d = graph.degree(v);
            if d < 2 {
                return 0.0;
            }
            let links = neighbor_links(graph, v);
            (2 * links) as f64 / (d * (d - 1)) as f64
        })
        .collect()
}

/// Number of edges among the neighbors of `v` (triangles through `v`).
fn neighbor_links(graph: &Graph, v: usize) -> usize {
    let around = graph.neighbors(v);
    // Each neighbor-neighbor edge is seen once from either end.
    let doubled: usize = around
        .iter()
        .map(|&u| sorted_intersection_len(around, graph.neighbors(u)))
        .sum();
    doubled / 2
}

fn sorted_intersection_len(a: &[usize], b: &[usize]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
