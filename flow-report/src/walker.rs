//! Walks `logs/<platform>/<design>/<variant>/` and builds one record per variant.

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::classify::{MessageClassifier, Messages};
use crate::config::{FlowLayout, FlowPaths};
use crate::design::{DesignKey, DesignRecord, ViolationTally};
use crate::drc;
use crate::report::DesignSet;

/// Scans every variant directory under `logs/` exactly three levels deep.
///
/// Entries at any other depth are ignored. Unreadable entries are logged
/// and skipped; the walk never fails as a whole.
pub fn collect_designs(
    paths: &FlowPaths,
    layout: &FlowLayout,
    classifier: &MessageClassifier,
) -> DesignSet {
    let mut designs = DesignSet::new();
    let logs_root = paths.logs();
    if !logs_root.is_dir() {
        warn!("No logs directory at {}", logs_root.display());
        return designs;
    }

    for entry in WalkDir::new(&logs_root)
        .min_depth(3)
        .max_depth(3)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable log entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(&logs_root) else {
            continue;
        };
        let Some(key) = design_key(rel) else {
            continue;
        };
        let record = build_record(paths, layout, classifier, &key, rel);
        debug!(design = %key, status = %record.status(), "scanned");
        designs.insert(key, record);
    }

    designs
}

/// Splits `<platform>/<design>/<variant>` (relative to `logs/`) into a key.
fn design_key(rel: &Path) -> Option<DesignKey> {
    let parts: Vec<String> = rel
        .components()
        .map(|c| {
            let name = c.as_os_str();
            if name.to_str().is_none() {
                warn!("Directory name is not valid UTF-8: {}", rel.display());
            }
            name.to_string_lossy().into_owned()
        })
        .collect();
    match parts.as_slice() {
        [platform, design, variant] => Some(DesignKey::new(platform, design, variant)),
        _ => None,
    }
}

/// Gathers every source for one variant.
///
/// `rel` is the variant directory relative to `logs/`; the same relative
/// path locates its report directory under `reports/`.
pub fn build_record(
    paths: &FlowPaths,
    layout: &FlowLayout,
    classifier: &MessageClassifier,
    key: &DesignKey,
    rel: &Path,
) -> DesignRecord {
    let log_dir = paths.logs().join(rel);
    let report_dir = paths.reports().join(rel);

    let (flow, last_log) = scan_stage_logs(&log_dir, classifier);
    let reached_final_stage = last_log.as_deref() == Some(layout.last_expected_log.as_str());

    // Metrics are only produced by a completed flow; absence is noise otherwise.
    let metrics_gen = classifier.load(
        &report_dir.join(layout.metrics_log_name(&key.variant)),
        reached_final_stage,
    );
    let metrics_check = classifier.load(
        &report_dir.join(layout.metrics_check_name(&key.variant)),
        reached_final_stage,
    );
    let drc_tool = classifier.load(&log_dir.join(&layout.drc_tool_log), false);

    let violations = load_violations(
        &report_dir.join(&layout.drc_filename),
        &layout.violation_marker,
        reached_final_stage,
    );

    DesignRecord {
        output_path: report_dir.join(&layout.report_filename),
        last_log,
        reached_final_stage,
        flow,
        metrics_gen,
        metrics_check,
        drc_tool,
        violations,
    }
}

/// Classifies every file directly inside `log_dir`, in name order, and
/// returns the accumulated messages with the name of the last `.log` file.
fn scan_stage_logs(log_dir: &Path, classifier: &MessageClassifier) -> (Messages, Option<String>) {
    let mut messages = Messages::default();
    let mut last_log = None;

    for entry in WalkDir::new(log_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable log entry: {e}");
                continue;
            }
        };
        // Follows symlinks: a linked stage log is still a stage log.
        if !entry.path().is_file() {
            continue;
        }
        messages.extend(classifier.load(entry.path(), true));
        let name = entry.file_name().to_string_lossy();
        if name.ends_with(".log") {
            last_log = Some(name.into_owned());
        }
    }

    (messages, last_log)
}

/// Tallies the DRC report, degrading any failure to no violations.
///
/// A missing report is only logged for a flow that reached its final stage.
fn load_violations(path: &Path, marker: &str, reached_final_stage: bool) -> ViolationTally {
    match drc::read_report(path, marker) {
        Ok(tally) => tally,
        Err(e) if e.is_not_found() => {
            if reached_final_stage {
                warn!("{e}");
            }
            ViolationTally::new()
        }
        Err(e) => {
            warn!("{e}");
            ViolationTally::new()
        }
    }
}
