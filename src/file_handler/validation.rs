//! File validation utilities run before the log file is mapped.
//!
//! These checks turn the common user mistakes (typo in the path, pointing at a
//! directory) into specific errors instead of a generic open failure.

use crate::error::{DatecutError, Result};
use std::path::Path;

/// Validate that a file path is accessible and suitable for mapping
///
/// # Validations Performed
/// - Path exists
/// - Path is a regular file (not a directory)
///
/// Empty files pass: a zero-length log simply has no matches.
pub fn validate_file_path(path: &Path) -> Result<()> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DatecutError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(DatecutError::file_error("Failed to read file metadata", e)),
    };

    if !metadata.is_file() {
        return Err(DatecutError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}
