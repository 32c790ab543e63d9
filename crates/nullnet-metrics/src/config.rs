use serde::{Deserialize, Serialize};

/// Number of null-model graphs drawn per input when not configured.
pub const DEFAULT_SAMPLE_COUNT: usize = 10;
/// Length of the reported top lists when not configured.
pub const DEFAULT_TOP_K: usize = 5;

/// Knobs the analysis pipeline reads. The RNG seed is passed separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Null-model graphs generated per input graph.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Entries kept in each top list.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_count: default_sample_count(),
            top_k: default_top_k(),
        }
    }
}

const fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

const fn default_top_k() -> usize {
    DEFAULT_TOP_K
}
