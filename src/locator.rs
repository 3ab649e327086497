//! Date-range location over a sorted log file.
//!
//! - [`date_key`] - target validation and fixed-width key extraction
//! - [`range`] - binary search, backward correction and run collection
//! - [`verify`] - optional linear check that the file is sorted

pub mod date_key;
pub mod range;
pub mod verify;

pub use date_key::{TargetDate, DATE_KEY_LEN};
pub use range::{
    LineSpan, LocateStats, Location, MatchingLines, RangeLocator, DEFAULT_CHUNK_SIZE,
};
pub use verify::verify_sorted;
