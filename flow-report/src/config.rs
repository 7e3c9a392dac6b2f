//! Run options and the on-disk layout of a flow directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Placeholder substituted with the variant name in file name templates.
const VARIANT_PLACEHOLDER: &str = "{variant}";

/// Report detail level.
///
/// Level 0 reports only pass/fail, level 1 adds per-source counts,
/// level 2 and above add every message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Verbosity(pub u8);

impl Verbosity {
    /// True at level 1 and above.
    pub fn counts(self) -> bool {
        self.0 >= 1
    }

    /// True at level 2 and above.
    pub fn messages(self) -> bool {
        self.0 >= 2
    }
}

/// Options controlling what gets written and echoed.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Detail level of rendered blocks.
    pub verbosity: Verbosity,
    /// Suppress echoing reports to the console.
    pub quiet: bool,
    /// Write one aggregate summary instead of per-design reports.
    pub summary: bool,
    /// Also write the design set as JSON.
    pub json: bool,
}

/// File names used inside `logs/` and `reports/`.
///
/// Every field can be overridden from a TOML file; absent keys keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowLayout {
    /// Per-design report written in each variant's report directory.
    pub report_filename: String,
    /// Combined report written directly under `reports/`.
    pub single_report_filename: String,
    /// Summary written directly under `reports/`.
    pub summary_filename: String,
    /// JSON export written directly under `reports/`.
    pub json_filename: String,
    /// DRC violation report in each variant's report directory.
    pub drc_filename: String,
    /// Name of the log written by the final flow stage.
    pub last_expected_log: String,
    /// Metrics generation log template (report directory).
    pub metrics_log_template: String,
    /// Metrics check log template (report directory).
    pub metrics_check_template: String,
    /// Legacy DRC tool log, relative to the variant's log directory.
    pub drc_tool_log: String,
    /// Marker preceding the violation type in the DRC report.
    pub violation_marker: String,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self {
            report_filename: "report.log".to_string(),
            single_report_filename: "report.log".to_string(),
            summary_filename: "report-summary.log".to_string(),
            json_filename: "report-summary.json".to_string(),
            drc_filename: "5_route_drc.rpt".to_string(),
            last_expected_log: "6_report.log".to_string(),
            metrics_log_template: "gen-metrics-{variant}-check.log".to_string(),
            metrics_check_template: "metadata-{variant}-check.log".to_string(),
            drc_tool_log: "calibre/save-to-drc-db.log".to_string(),
            violation_marker: "violation type:".to_string(),
        }
    }
}

impl FlowLayout {
    /// Loads a layout from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid layout.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a layout from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is not a valid layout.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Metrics generation log name for `variant`.
    pub fn metrics_log_name(&self, variant: &str) -> String {
        self.metrics_log_template.replace(VARIANT_PLACEHOLDER, variant)
    }

    /// Metrics check log name for `variant`.
    pub fn metrics_check_name(&self, variant: &str) -> String {
        self.metrics_check_template.replace(VARIANT_PLACEHOLDER, variant)
    }
}

/// Root of a flow checkout: the directory holding `logs/` and `reports/`.
#[derive(Debug, Clone)]
pub struct FlowPaths {
    /// Flow directory.
    pub flow_dir: PathBuf,
}

impl FlowPaths {
    /// Creates paths rooted at `flow_dir`.
    pub fn new(flow_dir: impl Into<PathBuf>) -> Self {
        Self {
            flow_dir: flow_dir.into(),
        }
    }

    /// The `logs/` root.
    pub fn logs(&self) -> PathBuf {
        self.flow_dir.join("logs")
    }

    /// The `reports/` root.
    pub fn reports(&self) -> PathBuf {
        self.flow_dir.join("reports")
    }

    /// The combined single-file report.
    pub fn single_report(&self, layout: &FlowLayout) -> PathBuf {
        self.reports().join(&layout.single_report_filename)
    }

    /// The aggregate summary file.
    pub fn summary_file(&self, layout: &FlowLayout) -> PathBuf {
        self.reports().join(&layout.summary_filename)
    }

    /// The JSON export.
    pub fn json_file(&self, layout: &FlowLayout) -> PathBuf {
        self.reports().join(&layout.json_filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_substitute_variant() {
        let layout = FlowLayout::default();
        assert_eq!(layout.metrics_log_name("base"), "gen-metrics-base-check.log");
        assert_eq!(layout.metrics_check_name("base"), "metadata-base-check.log");
    }

    #[test]
    fn partial_toml_keeps_defaults() -> anyhow::Result<()> {
        let layout = FlowLayout::from_toml("last_expected_log = \"7_final.log\"\n")?;
        assert_eq!(layout.last_expected_log, "7_final.log");
        assert_eq!(layout.drc_filename, "5_route_drc.rpt");
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FlowLayout::from_toml("drc_file = \"x.rpt\"\n").is_err());
    }

    #[test]
    fn verbosity_levels() {
        assert!(!Verbosity(0).counts());
        assert!(Verbosity(1).counts() && !Verbosity(1).messages());
        assert!(Verbosity(3).messages());
    }

    #[test]
    fn output_files_live_under_reports() {
        let paths = FlowPaths::new("/flow");
        let layout = FlowLayout::default();
        assert_eq!(paths.single_report(&layout), PathBuf::from("/flow/reports/report.log"));
        assert_eq!(
            paths.summary_file(&layout),
            PathBuf::from("/flow/reports/report-summary.log")
        );
    }
}
