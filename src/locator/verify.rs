//! Optional check of the sort precondition.
//!
//! The locator assumes ascending date keys and never checks them. This linear
//! pass exists for users who want a hard error instead of silently missing
//! matches on a corrupted or concatenated log.

use crate::error::{DatecutError, Result};
use crate::file_handler::FileView;
use crate::locator::date_key::key_at;
use memchr::memchr_iter;

/// Fail with [`DatecutError::Unsorted`] at the first line whose date key is
/// smaller than the previous line's.
pub fn verify_sorted(view: &FileView) -> Result<()> {
    let data = view.as_bytes();
    let mut previous = key_at(data, 0);
    let mut line = 1u64;

    for newline in memchr_iter(b'\n', data) {
        let start = newline + 1;
        if start >= data.len() {
            break;
        }
        line += 1;
        let key = key_at(data, start);
        if key < previous {
            return Err(DatecutError::Unsorted {
                line,
                offset: start as u64,
            });
        }
        previous = key;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_log_passes() {
        let view =
            FileView::from_bytes(b"2024-01-01 a\n2024-01-01 b\n2024-01-02 c\n2024-01-03 d").unwrap();
        assert!(verify_sorted(&view).is_ok());
    }

    #[test]
    fn test_empty_log_passes() {
        let view = FileView::from_bytes(b"").unwrap();
        assert!(verify_sorted(&view).is_ok());
    }

    #[test]
    fn test_reports_first_out_of_order_line() {
        let view =
            FileView::from_bytes(b"2024-01-02 a\n2024-01-03 b\n2024-01-01 c\n2024-01-04 d\n").unwrap();

        match verify_sorted(&view) {
            Err(DatecutError::Unsorted { line, offset }) => {
                assert_eq!(line, 3);
                assert_eq!(offset, 26);
            }
            other => panic!("Expected Unsorted, got {other:?}"),
        }
    }
}
