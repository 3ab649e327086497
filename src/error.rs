//! Error types and handling infrastructure for datecut.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! library error types. The binary wraps these in `anyhow` to attach context.
//!
//! ## Error classes
//!
//! - **I/O**: opening, statting or mapping the log file, and creating the output
//!   file. Never retried; the extraction is aborted.
//! - **Defects**: [`DatecutError::Bounds`] means an internal offset escaped the
//!   file. Correct search logic never produces it.
//! - **Input**: malformed target dates, bad arguments, unsorted input when
//!   verification was requested.
//!
//! A target date that is simply absent from the file is not an error; see
//! [`crate::extract::ExtractOutcome::NotFound`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for datecut operations.
#[derive(Error, Debug)]
pub enum DatecutError {
    /// File system related errors (open, metadata, mmap, output creation)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// An offset or range fell outside the mapped file
    #[error("Offset range {start}..{end} out of bounds for file of {size} bytes")]
    Bounds { start: u64, end: u64, size: u64 },

    /// Target date does not match `YYYY-MM-DD`
    #[error("Invalid date format '{input}'. Use YYYY-MM-DD")]
    InvalidDate { input: String },

    /// Invalid command line or configuration argument
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Sortedness verification failed
    #[error("Log file is not sorted by date: line {line} (byte {offset}) is earlier than its predecessor")]
    Unsorted { line: u64, offset: u64 },

    /// Configuration file errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

/// Standard Result type for datecut operations.
pub type Result<T> = std::result::Result<T, DatecutError>;

impl DatecutError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a Bounds error for the half-open range `start..end`
    pub fn bounds(start: u64, end: u64, size: u64) -> Self {
        Self::Bounds { start, end, size }
    }

    /// Create an InvalidDate error for a rejected target string
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// True for internal invariant violations, which indicate a bug rather
    /// than a user-facing condition.
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Bounds { .. })
    }
}

// Automatic conversion from io::Error to DatecutError
impl From<std::io::Error> for DatecutError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "File not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            _ => "IO operation failed",
        };
        Self::FileError {
            message: message.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_messages() {
        let path = PathBuf::from("/test/file.log");

        let file_not_found = DatecutError::FileNotFound { path: path.clone() };
        assert_eq!(file_not_found.to_string(), "File not found: /test/file.log");

        let not_a_file = DatecutError::NotAFile { path };
        assert_eq!(
            not_a_file.to_string(),
            "Path is not a regular file: /test/file.log"
        );

        let bounds = DatecutError::bounds(10, 20, 15);
        assert_eq!(
            bounds.to_string(),
            "Offset range 10..20 out of bounds for file of 15 bytes"
        );

        let date = DatecutError::invalid_date("2024-1-01");
        assert_eq!(
            date.to_string(),
            "Invalid date format '2024-1-01'. Use YYYY-MM-DD"
        );
    }

    #[test]
    fn test_only_bounds_is_defect() {
        assert!(DatecutError::bounds(0, 1, 0).is_defect());
        assert!(!DatecutError::invalid_date("x").is_defect());
        assert!(!DatecutError::invalid_argument("chunk size").is_defect());
        assert!(!DatecutError::Unsorted { line: 2, offset: 5 }.is_defect());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: DatecutError = io_err.into();

        match err {
            DatecutError::FileError { message, .. } => {
                assert_eq!(message, "File not found");
            }
            _ => panic!("Expected FileError variant"),
        }

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        match DatecutError::from(io_err) {
            DatecutError::FileError { message, .. } => assert_eq!(message, "Permission denied"),
            _ => panic!("Expected FileError variant"),
        }
    }
}
