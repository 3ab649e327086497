//! File handling: read-only, zero-copy access to the log file.
//!
//! - [`view`] - the memory-mapped [`FileView`] and its bounds-checked accessors
//! - [`validation`] - cheap path checks performed before mapping

pub mod validation;
pub mod view;

pub use validation::validate_file_path;
pub use view::FileView;
