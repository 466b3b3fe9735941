//! Error types for configuration, registry checks and processing.
//!
//! Status normalization has no error type: unrecognized statuses resolve
//! through the fallback chain instead of failing.

use std::path::PathBuf;
use std::time::Duration;

/// Invalid or unreadable configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A supplied option has the wrong shape or is not a recognized option.
    #[error("Invalid configuration: {0}")]
    InvalidArgument(String),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure raised by a registry checker.
///
/// The processor never lets these escape: they are logged and turned into
/// an error status on the affected registration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CheckError {
    #[error("Timed out after {0:?} waiting for the registry")]
    Timeout(Duration),

    #[error("Registry unavailable: {0}")]
    Unavailable(String),

    #[error("Check failed: {0}")]
    Failed(String),
}

/// Failure while reading input or writing results.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Required column '{0}' not found in input")]
    MissingColumn(String),

    #[error("Row {row} has {found} fields, expected {expected} from configured column names")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("No output file configured")]
    NoOutputFile,
}
