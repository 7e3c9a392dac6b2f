//! Error/warning message classifier.
//!
//! A line is an error if it starts with `[error]` or `[error TOOL-123]`
//! (case-insensitive, leading whitespace allowed), otherwise a warning if it
//! starts with the same form of `[warning ...]`. Anything else is ignored.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ScanError;

const ERROR_PATTERN: &str = r"(?i)^\s*\[error(?:\s*\w+-\d+)?\]";
const WARNING_PATTERN: &str = r"(?i)^\s*\[warning(?:\s*\w+-\d+)?\]";

/// Error and warning lines found in one or more files, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Messages {
    /// Trimmed error lines.
    pub errors: Vec<String>,
    /// Trimmed warning lines.
    pub warnings: Vec<String>,
}

impl Messages {
    /// Appends the messages of `other`, keeping order.
    pub fn extend(&mut self, other: Messages) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// True if at least one error line was found.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Class of a tagged line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Starts with an `[error ...]` tag.
    Error,
    /// Starts with a `[warning ...]` tag and not an error tag.
    Warning,
}

/// Compiled error and warning patterns.
#[derive(Debug, Clone)]
pub struct MessageClassifier {
    error: Regex,
    warning: Regex,
}

impl MessageClassifier {
    /// Compiles the error and warning patterns.
    ///
    /// # Errors
    ///
    /// Returns the regex error if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            error: Regex::new(ERROR_PATTERN)?,
            warning: Regex::new(WARNING_PATTERN)?,
        })
    }

    /// Classifies a single line. Errors take precedence over warnings.
    pub fn classify_line(&self, line: &str) -> Option<LineClass> {
        if self.error.is_match(line) {
            Some(LineClass::Error)
        } else if self.warning.is_match(line) {
            Some(LineClass::Warning)
        } else {
            None
        }
    }

    /// Classifies every line of `text`.
    pub fn classify_text(&self, text: &str) -> Messages {
        let mut messages = Messages::default();
        for line in text.lines() {
            match self.classify_line(line) {
                Some(LineClass::Error) => messages.errors.push(line.trim().to_string()),
                Some(LineClass::Warning) => messages.warnings.push(line.trim().to_string()),
                None => {}
            }
        }
        messages
    }

    /// Reads and classifies a file. Invalid UTF-8 is replaced, not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NotFound`] if the file does not exist and
    /// [`ScanError::Read`] for any other read failure.
    pub fn read(&self, path: &Path) -> Result<Messages, ScanError> {
        let bytes = fs::read(path).map_err(|e| ScanError::from_io(path, e))?;
        Ok(self.classify_text(&String::from_utf8_lossy(&bytes)))
    }

    /// Reads and classifies a file, degrading any failure to no messages.
    ///
    /// A missing file is only logged when `report_missing` is set; other
    /// read failures are always logged.
    pub fn load(&self, path: &Path, report_missing: bool) -> Messages {
        match self.read(path) {
            Ok(messages) => {
                debug!(
                    path = %path.display(),
                    errors = messages.errors.len(),
                    warnings = messages.warnings.len(),
                    "classified"
                );
                messages
            }
            Err(e) if e.is_not_found() => {
                if report_missing {
                    warn!("{e}");
                }
                Messages::default()
            }
            Err(e) => {
                warn!("{e}");
                Messages::default()
            }
        }
    }
}
