//! One graph in, one [`ResultRecord`] out.
//!
//! # Stages
//!
//! ```text
//! text ─ Graph::parse ─┬─ closeness / betweenness / clustering ─┬─ means ────┐
//!                      │                                        └─ top-k ────┤
//!                      └─ null_distributions (G(n,m) × samples) ── z-scores ─┴─ ResultRecord
//! ```
//!
//! Stage order is fixed. Nothing here touches the filesystem; callers hand
//! in the text and take the record.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::graph::{Graph, GraphStats};
use crate::metrics::{betweenness_centrality, closeness_centrality, clustering_coefficients};
use crate::null_model::null_distributions;
use crate::rank::{RankedEntry, top_k};
use crate::stats::ZScore;

// ---------------------------------------------------------------------------
// ResultRecord
// ---------------------------------------------------------------------------

/// Whether a record describes a real analysis or an empty input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Complete,
    /// The graph had no nodes; averages are 0 and no z-scores exist.
    EmptyGraph,
}

/// Analysis result for one input graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub file_name: String,
    pub avg_closeness: f64,
    pub avg_betweenness: f64,
    pub global_clustering: f64,
    pub closeness_z: ZScore,
    pub betweenness_z: ZScore,
    pub clustering_z: ZScore,
    pub top_closeness: Vec<RankedEntry>,
    pub top_betweenness: Vec<RankedEntry>,
    pub status: RecordStatus,
}

impl ResultRecord {
    fn empty(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            avg_closeness: 0.0,
            avg_betweenness: 0.0,
            global_clustering: 0.0,
            closeness_z: ZScore::NotComputed,
            betweenness_z: ZScore::NotComputed,
            clustering_z: ZScore::NotComputed,
            top_closeness: Vec::new(),
            top_betweenness: Vec::new(),
            status: RecordStatus::EmptyGraph,
        }
    }

    /// `(metric name, z-score)` for each z-score that could not be computed.
    #[must_use]
    pub fn undefined_z_scores(&self) -> Vec<(&'static str, ZScore)> {
        [
            ("closeness", self.closeness_z),
            ("betweenness", self.betweenness_z),
            ("clustering", self.clustering_z),
        ]
        .into_iter()
        .filter(|(_, z)| z.value().is_none())
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Parse `graph_text` and analyze it with a null model seeded from `seed`.
///
/// The same text, config, and seed always yield the same record.
///
/// # Errors
///
/// [`AnalysisError::Parse`] for malformed input; other stage errors as in
/// [`analyze_graph`].
#[instrument(skip(graph_text, config))]
pub fn analyze(
    file_name: &str,
    graph_text: &str,
    config: &AnalysisConfig,
    seed: u64,
) -> Result<ResultRecord, AnalysisError> {
    let graph = Graph::parse(graph_text)?;
    let mut rng = StdRng::seed_from_u64(seed);
    analyze_graph(file_name, &graph, config, &mut rng)
}

/// Analyze an already-built graph, drawing null-model graphs from `rng`.
///
/// An empty graph produces a record with status
/// [`RecordStatus::EmptyGraph`]. A zero-variance null distribution only
/// marks that metric's z-score [`ZScore::Degenerate`].
///
/// # Errors
///
/// [`AnalysisError::InvalidParameter`] if null-model generation rejects the
/// graph's node/edge counts.
pub fn analyze_graph<R: Rng + ?Sized>(
    file_name: &str,
    graph: &Graph,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<ResultRecord, AnalysisError> {
    if graph.is_empty() {
        warn!(file = file_name, "graph has no nodes; skipping metrics");
        return Ok(ResultRecord::empty(file_name));
    }

    let stats = GraphStats::from_graph(graph);
    debug!(
        nodes = stats.node_count,
        edges = stats.edge_count,
        density = stats.density,
        components = stats.component_count,
        "graph loaded"
    );

    let started = Instant::now();
    let closeness = closeness_centrality(graph);
    let betweenness = betweenness_centrality(graph);
    let clustering = clustering_coefficients(graph);
    debug!(elapsed_ms = elapsed_ms(started), "observed metrics computed");

    let avg_closeness = closeness.mean();
    let avg_betweenness = betweenness.mean();
    let global_clustering = clustering.global;

    let started = Instant::now();
    let null = null_distributions(graph, config.sample_count, rng)?;
    debug!(
        samples = null.len(),
        elapsed_ms = elapsed_ms(started),
        "null model sampled"
    );

    let record = ResultRecord {
        file_name: file_name.to_string(),
        avg_closeness,
        avg_betweenness,
        global_clustering,
        closeness_z: ZScore::against(avg_closeness, &null.closeness),
        betweenness_z: ZScore::against(avg_betweenness, &null.betweenness),
        clustering_z: ZScore::against(global_clustering, &null.clustering),
        top_closeness: top_k(&closeness, config.top_k),
        top_betweenness: top_k(&betweenness, config.top_k),
        status: RecordStatus::Complete,
    };

    for (metric, _) in record.undefined_z_scores() {
        warn!(file = file_name, metric, "null distribution has zero variance");
    }

    Ok(record)
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
