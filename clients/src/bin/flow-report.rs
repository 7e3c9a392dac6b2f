//! `flow-report` — Scans `logs/` and `reports/` for errors and warnings.
//!
//! **Outputs:**
//! - `reports/<platform>/<design>/<variant>/report.log` — Per-design report
//! - `reports/report.log` — All non-empty per-design reports combined
//! - `reports/report-summary.log` — Passing/failing summary (`--summary`)
//! - `reports/report-summary.json` — Machine-readable design set (`--json`)
//!
//! **Usage:**
//! ```
//! flow-report [-v...] [--quiet] [--summary] [--json] [--flow-dir <path>] [--config <path>]
//! ```
//!
//! Missing inputs are reported as diagnostics and never fail the run.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use flow_report::{run, FlowLayout, FlowPaths, ReportOptions, Verbosity};
use tracing_subscriber::EnvFilter;

/// Scans "./logs" and "./reports" folders for errors and warnings.
#[derive(Parser)]
#[command(
    name = "flow-report",
    about = "Scan flow logs and reports for errors and warnings"
)]
struct Args {
    /// Level 0: only report fail/pass (default).
    /// Level 1: report count per file.
    /// Level 2: report full messages.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Do not print report to stdout.
    #[arg(short, long)]
    quiet: bool,

    /// Only write summary file.
    #[arg(short, long)]
    summary: bool,

    /// Also write the design set as JSON.
    #[arg(long)]
    json: bool,

    /// Flow directory containing logs/ and reports/.
    #[arg(long, default_value = ".")]
    flow_dir: PathBuf,

    /// TOML file overriding report and log file names.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let layout = match &args.config {
        Some(path) => FlowLayout::load(path)?,
        None => FlowLayout::default(),
    };
    let options = ReportOptions {
        verbosity: Verbosity(args.verbose),
        quiet: args.quiet,
        summary: args.summary,
        json: args.json,
    };

    let mut stdout = io::stdout().lock();
    run(&FlowPaths::new(args.flow_dir), &layout, &options, &mut stdout)?;

    Ok(())
}
