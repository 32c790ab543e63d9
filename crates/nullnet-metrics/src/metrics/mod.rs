//! Per-node structural metrics for undirected graphs.
//!
//! # Overview
//!
//! Each metric answers a different question about node importance:
//!
//! - **Closeness centrality** (`closeness`): How few hops separate a node
//!   from everything it can reach?
//! - **Betweenness centrality** (`betweenness`): Which nodes act as bridges
//!   on shortest paths between other pairs?
//! - **Clustering coefficient** (`clustering`): How tightly knit is a node's
//!   neighborhood?
//!
//! # Usage
//!
//! All metrics take a [`Graph`] reference and return scores keyed by node id.
//! Keys iterate in sorted id order, so aggregates over a result are
//! reproducible run to run.
//!
//! ```rust
//! use nullnet_metrics::graph::Graph;
//! use nullnet_metrics::metrics::{betweenness_centrality, closeness_centrality, clustering_coefficients};
//!
//! let g = Graph::parse("A B\nB C\n")?;
//! let cc = closeness_centrality(&g);
//! let bc = betweenness_centrality(&g);
//! let cl = clustering_coefficients(&g);
//! assert!(cc.get("B") > cc.get("A"));
//! assert_eq!(bc.get("B"), Some(0.5));
//! assert_eq!(cl.global, 0.0);
//! # Ok::<(), nullnet_metrics::AnalysisError>(())
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::graph::Graph;
use crate::stats::mean;

pub mod betweenness;
pub mod closeness;
pub mod clustering;

pub use betweenness::{betweenness_centrality, betweenness_pair_counts};
pub use closeness::closeness_centrality;
pub use clustering::{ClusteringResult, clustering_coefficients};

// ---------------------------------------------------------------------------
// CentralityResult
// ---------------------------------------------------------------------------

/// Centrality scores for every node of one graph, keyed by node id.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct CentralityResult {
    pub scores: BTreeMap<String, f64>,
}

impl CentralityResult {
    /// Key index-ordered `values` by the ids of `graph`.
    pub(crate) fn from_indexed(graph: &Graph, values: &[f64]) -> Self {
        let scores = graph
            .nodes()
            .map(|(i, id)| (id.to_string(), values.get(i).copied().unwrap_or(0.0)))
            .collect();
        Self { scores }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<f64> {
        self.scores.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate `(id, score)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.scores.iter().map(|(id, &score)| (id.as_str(), score))
    }

    /// Arithmetic mean of all scores; 0.0 for an empty result.
    #[must_use]
    pub fn mean(&self) -> f64 {
        let values: Vec<f64> = self.scores.values().copied().collect();
        mean(&values)
    }
}
