//! Fixed-width date keys.
//!
//! Every record starts with a `YYYY-MM-DD` field. Because the format is fixed
//! width and zero padded, byte-wise lexicographic order equals chronological
//! order, so keys are compared as plain byte slices.

use crate::error::{DatecutError, Result};
use memchr::memchr;
use std::fmt;
use std::str::FromStr;

/// Width of the leading date field in bytes
pub const DATE_KEY_LEN: usize = 10;

/// A target date that has passed format validation.
///
/// Only constructible through [`TargetDate::parse`], so the locator never sees
/// a malformed key. No calendar validation is done: `2024-02-30` is a valid key
/// that will simply match nothing in a sane log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetDate([u8; DATE_KEY_LEN]);

impl TargetDate {
    /// Validate `input` against `^\d{4}-\d{2}-\d{2}$`
    pub fn parse(input: &str) -> Result<Self> {
        let bytes = input.as_bytes();
        if bytes.len() != DATE_KEY_LEN {
            return Err(DatecutError::invalid_date(input));
        }

        let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
        if !well_formed {
            return Err(DatecutError::invalid_date(input));
        }

        let mut key = [0u8; DATE_KEY_LEN];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Validated as ASCII in `parse`
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for TargetDate {
    type Err = DatecutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<[u8]> for TargetDate {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date key of the line starting at `start`.
///
/// Up to [`DATE_KEY_LEN`] bytes, cut short at the line's newline or at the end
/// of `data`. A short key never equals a valid target.
#[inline]
pub fn key_at(data: &[u8], start: usize) -> &[u8] {
    if start >= data.len() {
        return &[];
    }
    let end = (start + DATE_KEY_LEN).min(data.len());
    let window = &data[start..end];
    match memchr(b'\n', window) {
        Some(newline) => &window[..newline],
        None => window,
    }
}
