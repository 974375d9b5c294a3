use std::path::PathBuf;

use clap::{Parser, Subcommand};
use distrib_core::OutputFormat;
use tracing_subscriber::EnvFilter;

mod commands;

/// Crates whose events are shown at the chosen level.
const LOG_TARGETS: &[&str] = &["distrib", "distrib_core", "distrib_placement", "distrib_report"];

#[derive(Parser)]
#[command(
    name = "distrib",
    about = "distrib — distribute files over capacity-limited nodes",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the tables, allocate, and report the result.
    ///
    /// Flags override values from distrib.toml. Without --format the
    /// report is a text table on stdout, or CSV when --out is given.
    Run {
        /// Files table: `<file_id> <size>` per line
        #[arg(short, long)]
        files: Option<PathBuf>,
        /// Nodes table: `<node_id> <capacity>` per line
        #[arg(short, long)]
        nodes: Option<PathBuf>,
        /// Config file (default: ./distrib.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the report here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Report format: text, csv or json
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Also write an SVG bar chart of node usage
        #[arg(long)]
        chart: Option<PathBuf>,
        /// Label written for files that fit on no node
        #[arg(long)]
        sentinel: Option<String>,
    },
    /// Generate a distrib.toml scaffold
    Init {
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let mut filter = EnvFilter::from_default_env();
    for target in LOG_TARGETS {
        filter = filter.add_directive(format!("{target}={level}").parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            files,
            nodes,
            config,
            out,
            format,
            chart,
            sentinel,
        } => commands::run::run(commands::run::RunArgs {
            files,
            nodes,
            config,
            out,
            format,
            chart,
            sentinel,
        }),
        Commands::Init { path } => commands::init::init(&path),
    }
}
