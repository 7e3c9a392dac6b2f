//! Error types for input scanning and layout configuration.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to read one of the flow's input files.
///
/// Absence is kept apart from every other I/O failure: a missing metrics or
/// DRC file is often expected (the flow stopped early), an unreadable one is not.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The file does not exist.
    #[error("Failed to open {}.", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// The file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classifies an I/O error raised while reading `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Returns true if the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failure to load a flow layout file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The layout file could not be read.
    #[error("Failed to read layout file {}: {source}", path.display())]
    Read {
        /// Path of the layout file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The layout file is not valid TOML for a [`crate::config::FlowLayout`].
    #[error("Invalid layout file {}: {source}", path.display())]
    Parse {
        /// Path of the layout file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguished_from_other_io_errors() {
        let path = Path::new("reports/x/5_route_drc.rpt");
        let missing = ScanError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        let denied = ScanError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(missing.is_not_found());
        assert!(!denied.is_not_found());
        assert_eq!(
            missing.to_string(),
            "Failed to open reports/x/5_route_drc.rpt."
        );
    }
}
