//! Flow report generator.
//!
//! Scans the `logs/` and `reports/` trees of an EDA flow checkout, classifies
//! `[ERROR ...]` and `[WARNING ...]` lines, tallies DRC violations and writes
//! per-design and aggregate pass/fail reports.
//!
//! # Inputs
//!
//! | Source | Path |
//! |--------|------|
//! | Stage logs | `logs/<platform>/<design>/<variant>/*` |
//! | Metrics generation log | `reports/<platform>/<design>/<variant>/gen-metrics-<variant>-check.log` |
//! | Metrics check log | `reports/<platform>/<design>/<variant>/metadata-<variant>-check.log` |
//! | DRC tool log | `logs/<platform>/<design>/<variant>/calibre/save-to-drc-db.log` |
//! | DRC report | `reports/<platform>/<design>/<variant>/5_route_drc.rpt` |
//!
//! # Entry Point
//!
//! ```no_run
//! use flow_report::{run, FlowLayout, FlowPaths, ReportOptions};
//!
//! let paths = FlowPaths::new("flow");
//! let mut stdout = std::io::stdout();
//! let designs = run(&paths, &FlowLayout::default(), &ReportOptions::default(), &mut stdout)
//!     .expect("Failed to generate reports");
//! println!("{} failing design(s)", designs.failure_count());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod classify;
pub mod config;
pub mod design;
pub mod drc;
pub mod error;
pub mod render;
pub mod report;
#[cfg(test)]
mod testing;
pub mod walker;
pub mod writer;

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

pub use classify::{MessageClassifier, Messages};
pub use config::{FlowLayout, FlowPaths, ReportOptions, Verbosity};
pub use design::{DesignKey, DesignRecord, Status, ViolationTally};
pub use error::{ConfigError, ScanError};
pub use report::DesignSet;

/// Scans the flow directory and writes every report.
///
/// Steps, in order:
/// 1. Remove the previous combined report and summary.
/// 2. Walk `logs/` and build one record per variant.
/// 3. Write per-design reports, or the summary in summary mode.
/// 4. Write the JSON export if requested.
///
/// Missing or unreadable inputs never fail the run; they are logged and
/// treated as empty.
///
/// # Errors
///
/// Returns an error if `reports/` cannot be prepared, the summary or JSON
/// file cannot be written, or echoing to `console` fails.
pub fn run(
    paths: &FlowPaths,
    layout: &FlowLayout,
    options: &ReportOptions,
    console: &mut dyn Write,
) -> Result<DesignSet> {
    writer::reset_outputs(paths, layout)?;

    let classifier = MessageClassifier::new().context("Failed to compile message patterns")?;
    let designs = walker::collect_designs(paths, layout, &classifier);
    info!(
        "Scanned {} design(s), {} failing",
        designs.len(),
        designs.failure_count()
    );

    if options.summary {
        writer::write_summary(&designs, paths, layout, options, console)?;
    } else {
        writer::write_design_reports(&designs, paths, layout, options, console)?;
    }

    if options.json {
        writer::write_json(&designs, paths, layout)?;
    }

    Ok(designs)
}
