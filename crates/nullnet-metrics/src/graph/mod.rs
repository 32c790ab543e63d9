//! Graph storage for the analysis pipeline.
//!
//! # Overview
//!
//! This module turns edge-list text into an immutable undirected graph and
//! summarizes its structure. The graph feeds every centrality, clustering,
//! and null-model computation.
//!
//! ## Pipeline
//!
//! ```text
//! edge-list text
//!        ↓  build::Graph::parse()
//! Graph (petgraph UnGraph + cached sorted adjacency)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, component count, max degree, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use nullnet_metrics::graph::{Graph, GraphStats};
//!
//! let g = Graph::parse("A B\nB C\n")?;
//! let stats = GraphStats::from_graph(&g);
//! assert_eq!(stats.node_count, 3);
//! # Ok::<(), nullnet_metrics::AnalysisError>(())
//! ```

pub mod build;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use build::{Graph, max_edge_count};
pub use stats::GraphStats;
