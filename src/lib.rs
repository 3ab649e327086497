//! # datecut - Date Slice Extractor for Sorted Logs
//!
//! Pulls every line of one day out of a large, date-sorted log file without
//! scanning the whole file.
//!
//! ## Features
//!
//! - **Memory-mapped access**: the log is never copied into process memory
//! - **Logarithmic search**: a binary search over byte offsets finds the first
//!   line of the target date in O(log n) probes
//! - **Lazy collection**: matching lines are streamed straight from the mapping
//!   to the output file
//!
//! ## Input format
//!
//! One record per line, each starting with a `YYYY-MM-DD` field, lines sorted
//! ascending by that field. Ordering is assumed, not checked, unless
//! [`ExtractConfig::verify_sorted`] is set.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`file_handler`] - Read-only memory-mapped file view
//! - [`locator`] - Date keys, binary search and run collection
//! - [`extract`] - One extraction run from log file to output file
//! - [`config`] - Extraction settings

// Core modules
pub mod error;
pub mod file_handler;

// Core components
pub mod config;
pub mod extract;
pub mod locator;

// Re-export commonly used types for convenience
pub use error::{DatecutError, Result};

// Public API surface for external usage
pub use config::ExtractConfig;
pub use extract::{extract_to_writer, ExtractOutcome, Extractor};
pub use file_handler::FileView;
pub use locator::{Location, RangeLocator, TargetDate};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
