//! `nullnet analyze`: batch analysis of a directory of edge lists.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{FlagOverrides, available_jobs, load_file_config, resolve_settings};
use crate::output::{
    CliError, OutputMode, pretty_kv, pretty_rule, pretty_section, render_error, render_mode,
};
use crate::report::{ReportFormat, fmt_z};
use crate::runner::{BatchSettings, FileOutcome, Job, OutcomeResult, derive_seed, list_inputs, run_batch};

/// Arguments for `nullnet analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Directory holding one edge-list file per graph.
    #[arg(required_unless_present = "folder", conflicts_with = "folder")]
    pub input_dir: Option<PathBuf>,

    /// Input directory given as a flag instead of positionally.
    #[arg(short = 'f', long = "folder", value_name = "DIR")]
    pub folder: Option<PathBuf>,

    /// Directory receiving one report per input (created if missing).
    #[arg(short = 'o', long = "output")]
    pub output_dir: PathBuf,

    /// Null-model graphs generated per input.
    #[arg(long = "samples")]
    pub sample_count: Option<usize>,

    /// Entries kept in each top list.
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Base seed for reproducible null models.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (default: available parallelism).
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Config file (default: ./nullnet.toml if present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report file format.
    #[arg(long = "report", value_enum, default_value_t = ReportFormat::Text)]
    pub report_format: ReportFormat,
}

impl AnalyzeArgs {
    /// The input directory, whichever way it was given.
    pub fn input(&self) -> Option<&Path> {
        self.input_dir.as_deref().or(self.folder.as_deref())
    }

    fn overrides(&self) -> FlagOverrides {
        FlagOverrides {
            sample_count: self.sample_count,
            top_k: self.top_k,
            seed: self.seed,
            jobs: self.jobs,
        }
    }
}

/// Summary printed to stdout after a batch.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub input_dir: String,
    pub output_dir: String,
    pub base_seed: u64,
    pub sample_count: usize,
    pub top_k: usize,
    pub jobs: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub files: Vec<FileOutcome>,
}

/// Execute `nullnet analyze`.
pub fn run_analyze(args: &AnalyzeArgs, output: OutputMode, cwd: &Path) -> anyhow::Result<()> {
    let Some(input_dir) = args.input().filter(|dir| dir.is_dir()) else {
        let shown = args.input().map_or_else(String::new, |dir| dir.display().to_string());
        render_error(
            output,
            &CliError::with_details(
                format!("input directory not found: {shown}"),
                "pass a directory containing one edge-list file per graph",
                "input_dir_missing",
            ),
        )?;
        anyhow::bail!("input directory not found");
    };

    let file_config = load_file_config(args.config.as_deref(), cwd)?;
    let settings = resolve_settings(&args.overrides(), &file_config, available_jobs())?;

    let base_seed = settings.seed.unwrap_or_else(|| {
        let seed = rand::random::<u64>();
        info!(seed, "no seed given; drew a random base seed");
        seed
    });

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    let inputs = list_inputs(input_dir)?;
    if inputs.is_empty() {
        warn!(dir = %input_dir.display(), "no input files found");
    }

    let jobs: Vec<Job> = inputs
        .into_iter()
        .map(|(file_name, input)| Job {
            seed: derive_seed(base_seed, &file_name),
            file_name,
            input,
        })
        .collect();

    info!(
        files = jobs.len(),
        jobs = settings.jobs,
        samples = settings.analysis.sample_count,
        top_k = settings.analysis.top_k,
        base_seed,
        "analyzing batch"
    );

    let batch = BatchSettings {
        analysis: settings.analysis.clone(),
        output_dir: args.output_dir.clone(),
        report_format: args.report_format,
    };
    let files = run_batch(jobs, &batch, settings.jobs);

    let failed = files.iter().filter(|f| f.is_failure()).count();
    let summary = BatchSummary {
        input_dir: input_dir.display().to_string(),
        output_dir: args.output_dir.display().to_string(),
        base_seed,
        sample_count: settings.analysis.sample_count,
        top_k: settings.analysis.top_k,
        jobs: settings.jobs,
        succeeded: files.len() - failed,
        failed,
        files,
    };

    render_mode(output, &summary, render_summary_text, render_summary_pretty)?;

    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) failed", summary.files.len());
    }
    Ok(())
}

fn render_summary_text(summary: &BatchSummary, w: &mut dyn Write) -> std::io::Result<()> {
    for file in &summary.files {
        match &file.result {
            OutcomeResult::Written { report, .. } => {
                writeln!(w, "ok\t{}\t{}", file.file_name, report.display())?;
            }
            OutcomeResult::Failed { message, .. } => {
                writeln!(w, "failed\t{}\t{message}", file.file_name)?;
            }
        }
    }
    writeln!(
        w,
        "{} succeeded, {} failed (seed {})",
        summary.succeeded, summary.failed, summary.base_seed
    )
}

fn render_summary_pretty(summary: &BatchSummary, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("nullnet analyze: {}", summary.input_dir))?;
    pretty_kv(w, "Output", &summary.output_dir)?;
    pretty_kv(w, "Base seed", summary.base_seed.to_string())?;
    pretty_kv(w, "Samples", summary.sample_count.to_string())?;
    pretty_kv(w, "Workers", summary.jobs.to_string())?;
    pretty_rule(w)?;

    for file in &summary.files {
        match &file.result {
            OutcomeResult::Written { record, .. } => {
                writeln!(
                    w,
                    "✓ {:<28} closeness z {:<26} clustering z {}",
                    file.file_name,
                    fmt_z(record.closeness_z),
                    fmt_z(record.clustering_z)
                )?;
            }
            OutcomeResult::Failed { message, code } => {
                let code = code.map(|c| format!("[{c}] ")).unwrap_or_default();
                writeln!(w, "✗ {:<28} {code}{message}", file.file_name)?;
            }
        }
    }

    pretty_rule(w)?;
    writeln!(w, "{} succeeded, {} failed", summary.succeeded, summary.failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nullnet_metrics::{AnalysisConfig, analyze};

    fn summary() -> BatchSummary {
        let record = analyze("tri.txt", "A B\nB C\nC A\n", &AnalysisConfig::default(), 3)
            .expect("record");
        BatchSummary {
            input_dir: "in".to_string(),
            output_dir: "out".to_string(),
            base_seed: 5,
            sample_count: 10,
            top_k: 5,
            jobs: 2,
            succeeded: 1,
            failed: 1,
            files: vec![
                FileOutcome {
                    file_name: "bad.txt".to_string(),
                    seed: 1,
                    elapsed_ms: 0,
                    result: OutcomeResult::Failed {
                        message: "parse error on line 1: expected 2 node ids, found 3".to_string(),
                        code: Some("E1001"),
                    },
                },
                FileOutcome {
                    file_name: "tri.txt".to_string(),
                    seed: 2,
                    elapsed_ms: 0,
                    result: OutcomeResult::Written {
                        report: PathBuf::from("out/tri.txt"),
                        record,
                    },
                },
            ],
        }
    }

    #[test]
    fn text_summary_has_one_row_per_file() {
        let mut buf = Vec::new();
        render_summary_text(&summary(), &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("failed\tbad.txt\t"));
        assert_eq!(lines[1], "ok\ttri.txt\tout/tri.txt");
        assert_eq!(lines[2], "1 succeeded, 1 failed (seed 5)");
    }

    #[test]
    fn pretty_summary_shows_codes_and_z_scores() {
        let mut buf = Vec::new();
        render_summary_pretty(&summary(), &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("[E1001] parse error"));
        assert!(text.contains("undefined (zero variance)"));
    }

    #[test]
    fn json_summary_tags_outcomes() {
        let value = serde_json::to_value(summary()).expect("json");
        assert_eq!(value["files"][0]["outcome"], "failed");
        assert_eq!(value["files"][0]["code"], "E1001");
        assert_eq!(value["files"][1]["outcome"], "written");
        assert_eq!(value["files"][1]["record"]["status"], "complete");
    }
}
