//! Writes per-design reports, the combined report, the summary and the JSON export.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::{FlowLayout, FlowPaths, ReportOptions};
use crate::render::{render_design, render_summary};
use crate::report::DesignSet;

/// Creates `reports/` and deletes any combined report or summary left by a
/// previous run, so appends start from an empty file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a stale file
/// cannot be removed.
pub fn reset_outputs(paths: &FlowPaths, layout: &FlowLayout) -> Result<()> {
    let reports = paths.reports();
    fs::create_dir_all(&reports)
        .with_context(|| format!("Failed to create directory: {}", reports.display()))?;

    for path in [paths.single_report(layout), paths.summary_file(layout)] {
        if path.is_file() {
            info!("Overwriting report {}.", path.display());
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stale report: {}", path.display()))?;
        }
    }
    Ok(())
}

/// Writes `content` to `path`, replacing the file and creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

/// Appends `content` to `path`, creating the file if needed.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn append_text(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open for append: {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to append to file: {}", path.display()))?;
    Ok(())
}

/// Writes every design's block to its own report file and appends the
/// non-empty ones to the combined report, echoing them to `console` unless
/// quiet.
///
/// A design whose report cannot be written is logged and skipped.
///
/// # Errors
///
/// Returns an error only if echoing to `console` fails.
pub fn write_design_reports(
    designs: &DesignSet,
    paths: &FlowPaths,
    layout: &FlowLayout,
    options: &ReportOptions,
    console: &mut dyn Write,
) -> Result<usize> {
    let single_report = paths.single_report(layout);
    let mut written = 0usize;

    for (key, record) in designs.iter() {
        let block = render_design(key, record, options.verbosity);
        let file_content = if block.is_empty() {
            String::new()
        } else {
            format!("{block}\n")
        };
        if let Err(e) = write_text(&record.output_path, &file_content) {
            warn!("{e:#}");
            continue;
        }
        written += 1;

        if block.is_empty() {
            continue;
        }
        let mut combined = block;
        if options.verbosity.counts() {
            combined.push_str(&format!(
                "\n  Generated report file: {}",
                record.output_path.display()
            ));
        }
        if let Err(e) = append_text(&single_report, &format!("{combined}\n")) {
            warn!("{e:#}");
        }
        if !options.quiet {
            writeln!(console, "{combined}").context("Failed to write to console")?;
        }
    }

    Ok(written)
}

/// Renders the aggregate summary, appends it to the summary file and the
/// combined report, and echoes it to `console` unless quiet.
///
/// # Errors
///
/// Returns an error if the summary file cannot be written or echoing fails.
pub fn write_summary(
    designs: &DesignSet,
    paths: &FlowPaths,
    layout: &FlowLayout,
    options: &ReportOptions,
    console: &mut dyn Write,
) -> Result<()> {
    let summary = render_summary(designs, options.verbosity);
    let summary_file = paths.summary_file(layout);
    let single_report = paths.single_report(layout);

    if !options.quiet {
        writeln!(console, "{summary}").context("Failed to write to console")?;
    }
    append_text(&summary_file, &summary)?;
    if let Err(e) = append_text(&single_report, &summary) {
        warn!("{e:#}");
    }

    if options.verbosity.counts() {
        info!("Generated report file: {}", single_report.display());
        info!("Generated report summary file: {}", summary_file.display());
    }
    Ok(())
}

/// Writes the design set as JSON under `reports/`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json(designs: &DesignSet, paths: &FlowPaths, layout: &FlowLayout) -> Result<()> {
    let path = paths.json_file(layout);
    let json = designs.to_json().context("Failed to serialize design set")?;
    write_text(&path, &format!("{json}\n"))?;
    info!("Generated JSON report: {}", path.display());
    Ok(())
}
