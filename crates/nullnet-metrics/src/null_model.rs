//! G(n,m) null-model sampling.
//!
//! # Overview
//!
//! A null-model graph keeps the observed node count `n` and edge count `m`
//! and nothing else: its `m` edges are drawn uniformly, without replacement,
//! from the `n(n-1)/2` possible unordered pairs. Metrics computed on a batch
//! of such graphs give the baseline the observed graph is compared to.
//!
//! # Sampling
//!
//! Pair slots are numbered row by row over the upper triangle of the
//! adjacency matrix:
//!
//! ```text
//! slot:   0      1      2      3      4      5
//! pair: (0,1)  (0,2)  (0,3)  (1,2)  (1,3)  (2,3)      n = 4
//! ```
//!
//! `m` distinct slots are drawn with [`rand::seq::index::sample`], sorted,
//! and decoded in one sweep over the rows.
//!
//! The random source is always passed in. Seeding it fixes every graph this
//! module produces.

use rand::Rng;
use rand::seq::index;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::AnalysisError;
use crate::graph::{Graph, max_edge_count};
use crate::metrics::{betweenness, closeness, clustering};
use crate::stats::mean;

// ---------------------------------------------------------------------------
// Graph generation
// ---------------------------------------------------------------------------

/// Draw one uniform random simple graph with `n` nodes and `m` edges.
///
/// Nodes are labelled `"0"` to `"n-1"`.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidParameter`] if `m > n(n-1)/2`.
pub fn gnm_random_graph<R: Rng + ?Sized>(
    n: usize,
    m: usize,
    rng: &mut R,
) -> Result<Graph, AnalysisError> {
    check_edge_budget(n, m)?;

    let mut slots = index::sample(rng, max_edge_count(n), m).into_vec();
    slots.sort_unstable();

    Ok(Graph::from_index_pairs(n, &decode_pairs(n, &slots)))
}

/// Draw `sample_count` independent G(n,m) graphs.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidParameter`] if `m > n(n-1)/2`, even when
/// `sample_count` is zero.
pub fn generate<R: Rng + ?Sized>(
    n: usize,
    m: usize,
    sample_count: usize,
    rng: &mut R,
) -> Result<Vec<Graph>, AnalysisError> {
    check_edge_budget(n, m)?;
    (0..sample_count)
        .map(|_| gnm_random_graph(n, m, &mut *rng))
        .collect()
}

fn check_edge_budget(n: usize, m: usize) -> Result<(), AnalysisError> {
    let max_edges = max_edge_count(n);
    if m > max_edges {
        return Err(AnalysisError::InvalidParameter {
            nodes: n,
            edges: m,
            max_edges,
        });
    }
    Ok(())
}

/// Map sorted slot numbers to `(row, col)` pairs with `row < col`.
fn decode_pairs(n: usize, sorted_slots: &[usize]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(sorted_slots.len());
    let mut row = 0;
    let mut row_start = 0;

    for &slot in sorted_slots {
        // Row `row` holds n - 1 - row slots.
        while slot >= row_start + (n - 1 - row) {
            row_start += n - 1 - row;
            row += 1;
        }
        pairs.push((row, row + 1 + (slot - row_start)));
    }

    pairs
}

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

/// Summary metrics of one null-model graph. Per-node values are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NullModelSample {
    pub closeness_mean: f64,
    pub betweenness_mean: f64,
    pub clustering: f64,
}

impl NullModelSample {
    /// Compute the summaries for `graph`.
    #[must_use]
    pub fn summarize(graph: &Graph) -> Self {
        Self {
            closeness_mean: mean(&closeness::closeness_scores(graph)),
            betweenness_mean: mean(&betweenness::betweenness_scores(graph)),
            clustering: clustering::average_clustering(graph),
        }
    }
}

/// Per-metric null distributions, one entry per sample, in sampling order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NullModelDistributions {
    pub closeness: Vec<f64>,
    pub betweenness: Vec<f64>,
    pub clustering: Vec<f64>,
}

impl NullModelDistributions {
    pub fn push(&mut self, sample: NullModelSample) {
        self.closeness.push(sample.closeness_mean);
        self.betweenness.push(sample.betweenness_mean);
        self.clustering.push(sample.clustering);
    }

    /// Number of samples recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.closeness.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closeness.is_empty()
    }
}

/// Sample `sample_count` G(n,m) graphs matching `graph` and collect their
/// summary metrics.
///
/// Each random graph is dropped as soon as it has been summarized.
///
/// # Errors
///
/// Propagates [`AnalysisError::InvalidParameter`] from graph generation.
#[instrument(skip(graph, rng), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn null_distributions<R: Rng + ?Sized>(
    graph: &Graph,
    sample_count: usize,
    rng: &mut R,
) -> Result<NullModelDistributions, AnalysisError> {
    let (n, m) = (graph.node_count(), graph.edge_count());
    check_edge_budget(n, m)?;

    let mut distributions = NullModelDistributions {
        closeness: Vec::with_capacity(sample_count),
        betweenness: Vec::with_capacity(sample_count),
        clustering: Vec::with_capacity(sample_count),
    };

    for i in 0..sample_count {
        let random_graph = gnm_random_graph(n, m, &mut *rng)?;
        distributions.push(NullModelSample::summarize(&random_graph));
        debug!(sample = i + 1, total = sample_count, "generated random graph");
    }

    Ok(distributions)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
