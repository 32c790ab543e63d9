//! `nullnet.toml` loading and flag/file/default merging.
//!
//! ```toml
//! [analysis]
//! sample_count = 20
//! top_k = 10
//! seed = 1234
//!
//! [runner]
//! jobs = 4
//! ```
//!
//! Every key is optional. A flag on the command line beats the file, and
//! the file beats the built-in default.

use anyhow::{Context, Result};
use nullnet_metrics::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File consulted when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "nullnet.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub runner: RunnerSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSection {
    #[serde(default)]
    pub sample_count: Option<usize>,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSection {
    #[serde(default)]
    pub jobs: Option<usize>,
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagOverrides {
    pub sample_count: Option<usize>,
    pub top_k: Option<usize>,
    pub seed: Option<u64>,
    pub jobs: Option<usize>,
}

/// Fully resolved settings for one `nullnet analyze` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSettings {
    pub analysis: AnalysisConfig,
    /// Base seed; `None` means draw one at random.
    pub seed: Option<u64>,
    pub jobs: usize,
}

/// Load the config file.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
/// `cwd` is read when present and defaults are used otherwise.
pub fn load_file_config(explicit: Option<&Path>, cwd: &Path) -> Result<FileConfig> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(FileConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<FileConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Merge flags over file values over defaults.
pub fn resolve_settings(
    flags: &FlagOverrides,
    file: &FileConfig,
    default_jobs: usize,
) -> Result<RunSettings> {
    let defaults = AnalysisConfig::default();
    let analysis = AnalysisConfig {
        sample_count: flags
            .sample_count
            .or(file.analysis.sample_count)
            .unwrap_or(defaults.sample_count),
        top_k: flags.top_k.or(file.analysis.top_k).unwrap_or(defaults.top_k),
    };

    let jobs = flags.jobs.or(file.runner.jobs).unwrap_or(default_jobs);
    if jobs == 0 {
        anyhow::bail!("jobs must be at least 1");
    }

    Ok(RunSettings {
        analysis,
        seed: flags.seed.or(file.analysis.seed),
        jobs,
    })
}

/// Worker count when neither flag nor file sets one.
pub fn available_jobs() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}
