//! Text rendering of design blocks and the aggregate summary.

use std::fmt::Write;

use crate::config::Verbosity;
use crate::design::{DesignKey, DesignRecord, Status};
use crate::report::DesignSet;

const MESSAGE_INDENT: &str = "      ";

/// Renders one design's block.
///
/// A passing design with no DRC violations renders to an empty string
/// at verbosity 0. Flow errors and metrics check errors are listed at
/// every verbosity; everything else needs level 1 (counts) or level 2
/// (warning messages). Metrics generation errors are only ever counted.
/// The result is trimmed.
pub fn render_design(key: &DesignKey, record: &DesignRecord, verbosity: Verbosity) -> String {
    let status = record.status();
    let mut out = String::new();

    if verbosity.counts() || !record.violations.is_empty() || status != Status::Passing {
        let _ = writeln!(out, "{key}");
    }

    if verbosity.counts() {
        match (&record.last_log, record.reached_final_stage) {
            (_, true) => out.push_str("  Flow reached last stage.\n"),
            (Some(last), false) => {
                let _ = writeln!(out, "  Last log file {last}");
            }
            (None, false) => out.push_str("  No log files found.\n"),
        }
    }

    section(
        &mut out,
        verbosity,
        &record.flow.errors,
        "errors in the logs",
        true,
    );
    section(
        &mut out,
        verbosity,
        &record.flow.warnings,
        "warnings in the logs",
        verbosity.messages(),
    );
    section(
        &mut out,
        verbosity,
        &record.metrics_gen.errors,
        "errors in the metrics logs",
        false,
    );
    section(
        &mut out,
        verbosity,
        &record.metrics_gen.warnings,
        "warnings in the metrics logs",
        verbosity.messages(),
    );
    section(
        &mut out,
        verbosity,
        &record.metrics_check.errors,
        "metrics failures",
        true,
    );
    section(
        &mut out,
        verbosity,
        &record.metrics_check.warnings,
        "metrics warnings",
        verbosity.messages(),
    );

    if !record.violations.is_empty() {
        match status {
            Status::Passing => {
                out.push_str("  Design has the violations under the allowed limit: ")
            }
            Status::Failing => {
                out.push_str("  Design has the violations over the allowed limit: ")
            }
        }
        for (kind, count) in record.violations.iter() {
            let _ = write!(out, "{kind} ({count}) ");
        }
        out.push('\n');
    }

    out.trim().to_string()
}

/// Appends `  Found N <what>.` (level 1+) and, when `list` is set, every message.
fn section(out: &mut String, verbosity: Verbosity, messages: &[String], what: &str, list: bool) {
    if messages.is_empty() {
        return;
    }
    if verbosity.counts() {
        let _ = writeln!(out, "  Found {} {what}.", messages.len());
    }
    if list {
        for message in messages {
            let _ = writeln!(out, "{MESSAGE_INDENT}{message}");
        }
    }
}

/// Renders the aggregate summary: a title block, the design count, then
/// the non-empty blocks of passing designs followed by failing designs.
pub fn render_summary(designs: &DesignSet, verbosity: Verbosity) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "{}SUMMARY", " ".repeat(26));
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "\nNumber of designs: {}\n", designs.len());

    for status in Status::ALL {
        let _ = writeln!(out, "{}", "-".repeat(30));
        let _ = writeln!(out, "{}{status} designs", " ".repeat(7));
        let _ = writeln!(out, "{}", "-".repeat(30));
        for (key, record) in designs.with_status(status) {
            let block = render_design(key, record, verbosity);
            if block.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{block}");
            if verbosity.counts() {
                out.push('\n');
            }
        }
    }

    out
}
