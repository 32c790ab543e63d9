//! Per-file report writing.
//!
//! Text layout:
//!
//! ```text
//! File name: ppi.txt
//! Avg Closeness: 0.4211
//! Avg Betweenness: 0.0833
//! Global Clustering: 0.5
//! Z-scores - Closeness: 1.7320508075688772
//! Z-scores - Betweenness: undefined (zero variance)
//! Z-scores - Clustering: -0.25
//! Top 5 Closeness:
//!     (B, 0.75)
//! Top 5 Betweenness:
//!     (B, 0.5)
//! ```
//!
//! Top-list entries are indented with a single tab. JSON reports serialize the
//! [`ResultRecord`] as-is.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use nullnet_metrics::{RankedEntry, ResultRecord, ZScore};

/// On-disk report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    /// Report file name for an input named `file_name`.
    pub fn report_name(self, file_name: &str) -> String {
        match self {
            Self::Text => file_name.to_string(),
            Self::Json => format!("{file_name}.json"),
        }
    }
}

/// Shortest round-trip rendering that always keeps a decimal point.
pub fn fmt_float(value: f64) -> String {
    format!("{value:?}")
}

/// Display form of a z-score.
pub fn fmt_z(z: ZScore) -> String {
    match z {
        ZScore::Defined(value) => fmt_float(value),
        ZScore::Degenerate => "undefined (zero variance)".to_string(),
        ZScore::NotComputed => "not computed".to_string(),
    }
}

fn write_top_list(
    w: &mut dyn Write,
    metric: &str,
    k: usize,
    entries: &[RankedEntry],
) -> io::Result<()> {
    writeln!(w, "Top {k} {metric}:")?;
    for entry in entries {
        writeln!(w, "\t({}, {})", entry.id, fmt_float(entry.value))?;
    }
    Ok(())
}

/// Write the text report for `record`. `top_k` is the configured list length.
pub fn write_text_report(w: &mut dyn Write, record: &ResultRecord, top_k: usize) -> io::Result<()> {
    writeln!(w, "File name: {}", record.file_name)?;
    writeln!(w, "Avg Closeness: {}", fmt_float(record.avg_closeness))?;
    writeln!(w, "Avg Betweenness: {}", fmt_float(record.avg_betweenness))?;
    writeln!(w, "Global Clustering: {}", fmt_float(record.global_clustering))?;
    writeln!(w, "Z-scores - Closeness: {}", fmt_z(record.closeness_z))?;
    writeln!(w, "Z-scores - Betweenness: {}", fmt_z(record.betweenness_z))?;
    writeln!(w, "Z-scores - Clustering: {}", fmt_z(record.clustering_z))?;
    write_top_list(w, "Closeness", top_k, &record.top_closeness)?;
    write_top_list(w, "Betweenness", top_k, &record.top_betweenness)
}

/// Write `record` into `output_dir` and return the path written.
pub fn write_report(
    output_dir: &Path,
    record: &ResultRecord,
    format: ReportFormat,
    top_k: usize,
) -> Result<PathBuf> {
    let path = output_dir.join(format.report_name(&record.file_name));
    let mut buf = Vec::new();
    match format {
        ReportFormat::Text => write_text_report(&mut buf, record, top_k)?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut buf, record)?;
            buf.push(b'\n');
        }
    }
    fs::write(&path, buf).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
