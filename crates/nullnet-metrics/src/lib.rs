#![forbid(unsafe_code)]
//! nullnet-metrics library.
//!
//! Structural metrics for undirected, unweighted graphs, contextualized
//! against G(n,m) random graphs with the same node and edge counts.
//!
//! # Conventions
//!
//! - **Errors**: Fallible operations return `Result<_, AnalysisError>`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//! - **Randomness**: Every function that samples takes an explicit `&mut impl Rng`.
//!
//! # Example
//!
//! ```rust
//! use nullnet_metrics::{AnalysisConfig, RecordStatus, analyze};
//!
//! let record = analyze("tri.txt", "A B\nB C\nC A\n", &AnalysisConfig::default(), 7)?;
//! assert_eq!(record.status, RecordStatus::Complete);
//! assert_eq!(record.global_clustering, 1.0);
//! # Ok::<(), nullnet_metrics::AnalysisError>(())
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod null_model;
pub mod pipeline;
pub mod rank;
pub mod stats;

pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use graph::{Graph, GraphStats};
pub use pipeline::{RecordStatus, ResultRecord, analyze, analyze_graph};
pub use rank::{RankedEntry, top_k};
pub use stats::{ZScore, z_score};
