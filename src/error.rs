//! Error types for trace loading, analysis, and predictor replay.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading or analyzing a branch trace.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The trace file could not be opened or read.
    #[error("Failed to read trace file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record's branch identifier is not an unsigned integer.
    #[error("Line {line}: invalid branch identifier '{value}'")]
    InvalidBranchId { line: usize, value: String },

    /// A record's outcome is not `0` or `1` (strict mode only).
    #[error("Line {line}: invalid outcome '{value}' (expected 0 or 1)")]
    InvalidOutcome { line: usize, value: String },

    /// The trace contains no records.
    #[error("Trace contains no branch records")]
    EmptyTrace,

    /// A statistic needs more data points than were supplied.
    #[error("Need at least {needed} data points, found {found}")]
    InsufficientData { needed: usize, found: usize },

    /// A predictor description could not be understood.
    #[error("Invalid predictor '{spec}': {reason}")]
    InvalidPredictor { spec: String, reason: String },
}

/// Convenience alias for results carrying a [`TraceError`].
pub type Result<T> = std::result::Result<T, TraceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = TraceError::FileRead {
            path: PathBuf::from("/traces/fft.txt"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read trace file"));
        assert!(msg.contains("/traces/fft.txt"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_invalid_branch_id() {
        let err = TraceError::InvalidBranchId {
            line: 7,
            value: "0xzz".to_string(),
        };
        assert_eq!(err.to_string(), "Line 7: invalid branch identifier '0xzz'");
    }

    #[test]
    fn test_error_display_insufficient_data() {
        let err = TraceError::InsufficientData { needed: 2, found: 1 };
        assert_eq!(err.to_string(), "Need at least 2 data points, found 1");
    }
}
