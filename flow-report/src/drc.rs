//! DRC violation report parser.

use std::fs;
use std::path::Path;

use crate::design::ViolationTally;
use crate::error::ScanError;

/// Tallies every line containing `marker`, using the trimmed text after the
/// marker as the violation type.
pub fn tally_violations(text: &str, marker: &str) -> ViolationTally {
    let mut tally = ViolationTally::new();
    for line in text.lines() {
        if let Some(idx) = line.find(marker) {
            tally.record(line[idx + marker.len()..].trim());
        }
    }
    tally
}

/// Reads a DRC report and tallies its violations.
///
/// # Errors
///
/// Returns [`ScanError::NotFound`] if the report does not exist and
/// [`ScanError::Read`] for any other read failure.
pub fn read_report(path: &Path, marker: &str) -> Result<ViolationTally, ScanError> {
    let bytes = fs::read(path).map_err(|e| ScanError::from_io(path, e))?;
    Ok(tally_violations(&String::from_utf8_lossy(&bytes), marker))
}
