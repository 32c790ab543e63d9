#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;
mod report;
mod runner;

use clap::{Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use std::env;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "nullnet: graph centrality and clustering against G(n,m) null models",
    long_about = None
)]
struct Cli {
    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Stdout format: pretty, text, or json. Defaults to pretty on a TTY.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Analyze every graph in a directory",
        long_about = "Compute closeness, betweenness, and clustering for every edge-list file in \
                      INPUT_DIR, compare them against G(n,m) random graphs, and write one report \
                      per file into the output directory.",
        after_help = "EXAMPLES:\n    # Analyze a folder with a fixed seed\n    nullnet analyze graphs/ -o results/ --seed 42\n\n    # 50 null-model samples, JSON reports, 4 workers\n    nullnet analyze graphs/ -o results/ --samples 50 --report json -j 4"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Show structural statistics for one graph",
        after_help = "EXAMPLES:\n    # Summarize one edge list\n    nullnet stats graphs/ppi.txt\n\n    # Emit machine-readable output\n    nullnet stats graphs/ppi.txt --format json"
    )]
    Stats(cmd::stats::StatsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("NULLNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "nullnet=debug,nullnet_metrics=debug,info"
        } else {
            "nullnet=info,nullnet_metrics=warn,warn"
        })
    });

    let format = env::var("NULLNET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = resolve_output_mode(cli.format);
    debug!(?output, "resolved output mode");

    let cwd = env::current_dir()?;

    match cli.command {
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, output, &cwd),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output),
    }
}
