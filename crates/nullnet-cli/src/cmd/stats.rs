//! `nullnet stats`: structural summary of one edge-list file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use nullnet_metrics::{Graph, GraphStats};
use serde::Serialize;

use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `nullnet stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Edge-list file to summarize.
    pub file: PathBuf,
}

/// Report payload for `nullnet stats`.
#[derive(Debug, Serialize)]
pub struct FileStats {
    pub file: String,
    #[serde(flatten)]
    pub stats: GraphStats,
}

/// Execute `nullnet stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let graph = match Graph::parse(&text) {
        Ok(graph) => graph,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            anyhow::bail!("{} is not a valid edge list", args.file.display());
        }
    };

    let payload = FileStats {
        file: args.file.display().to_string(),
        stats: GraphStats::from_graph(&graph),
    };

    render_mode(output, &payload, render_stats_text, render_stats_pretty)
}

fn render_stats_text(payload: &FileStats, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &payload.stats;
    writeln!(
        w,
        "{}\tnodes={}\tedges={}\tdensity={:.6}\tcomponents={}\tisolated={}\tmax_degree={}\tmean_degree={:.4}",
        payload.file,
        s.node_count,
        s.edge_count,
        s.density,
        s.component_count,
        s.isolated_node_count,
        s.max_degree,
        s.mean_degree
    )
}

fn render_stats_pretty(payload: &FileStats, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &payload.stats;
    pretty_section(w, &payload.file)?;
    pretty_kv(w, "Nodes", s.node_count.to_string())?;
    pretty_kv(w, "Edges", s.edge_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.6}", s.density))?;
    pretty_kv(w, "Components", s.component_count.to_string())?;
    pretty_kv(w, "Isolated nodes", s.isolated_node_count.to_string())?;
    pretty_kv(w, "Max degree", s.max_degree.to_string())?;
    pretty_kv(w, "Mean degree", format!("{:.4}", s.mean_degree))
}
