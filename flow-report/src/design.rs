//! Per-design records: identity, gathered messages, DRC tallies and status.

use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::classify::Messages;

/// Identifies one report unit: `platform/design/variant`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DesignKey {
    /// Target platform (technology), e.g. `nangate45`.
    pub platform: String,
    /// Design name, e.g. `gcd`.
    pub design: String,
    /// Flow variant, e.g. `base`.
    pub variant: String,
}

impl DesignKey {
    /// Creates a key.
    pub fn new(
        platform: impl Into<String>,
        design: impl Into<String>,
        variant: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            design: design.into(),
            variant: variant.into(),
        }
    }
}

/// Renders as `platform design (variant)`.
impl fmt::Display for DesignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.platform, self.design, self.variant)
    }
}

/// Pass/fail state of a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    /// No blocking errors.
    Passing,
    /// At least one flow, metrics-check or DRC tool error.
    Failing,
}

impl Status {
    /// Both statuses, in summary order.
    pub const ALL: [Status; 2] = [Status::Passing, Status::Failing];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Passing => "Passing",
            Status::Failing => "Failing",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// DRC violation counts by type, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationTally {
    entries: Vec<(String, usize)>,
}

impl ViolationTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `kind`.
    pub fn record(&mut self, kind: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == kind) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((kind.to_string(), 1)),
        }
    }

    /// Count for `kind`, zero if never seen.
    pub fn count(&self, kind: &str) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Iterates `(type, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Number of distinct violation types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serializes as a `{type: count}` map in first-seen order.
impl Serialize for ViolationTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Everything gathered for one design variant.
///
/// Built once by the walker and read-only afterwards; [`DesignRecord::status`]
/// is derived from the message sources and cannot be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignRecord {
    /// Where this design's individual report is written.
    pub output_path: PathBuf,
    /// Last `.log` file in the variant's log directory, if any.
    pub last_log: Option<String>,
    /// Whether the last log is the final stage's log.
    pub reached_final_stage: bool,
    /// Messages from the flow's stage logs.
    pub flow: Messages,
    /// Messages from the metrics generation log.
    pub metrics_gen: Messages,
    /// Messages from the metrics check log.
    pub metrics_check: Messages,
    /// Messages from the legacy DRC tool log.
    pub drc_tool: Messages,
    /// DRC violations by type.
    pub violations: ViolationTally,
}

impl DesignRecord {
    /// Failing iff the flow logs, the metrics check or the DRC tool log
    /// contain an error. Metrics generation errors and DRC violation counts
    /// do not affect status.
    pub fn status(&self) -> Status {
        let blocking = [&self.flow, &self.metrics_check, &self.drc_tool];
        if blocking.iter().any(|m| m.has_errors()) {
            Status::Failing
        } else {
            Status::Passing
        }
    }
}
