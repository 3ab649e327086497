//! Date-range locator over a sorted log
//!
//! [`RangeLocator`] finds the first line of a target date with a binary search
//! over raw byte offsets, then [`MatchingLines`] walks forward over the
//! contiguous run of that date. Only probed lines and the run itself are read.
//!
//! # Search outline
//!
//! 1. Probe the midpoint of `left..right`, snapped back to a line start.
//! 2. Equal key: walk backward line by line to the first line of the run.
//! 3. Key too early: skip ahead by a whole chunk (`left = mid + chunk_size`).
//! 4. Key too late: `right = mid`.
//! 5. No equal probe: sweep forward over the lines skipped by the last chunk
//!    stride, which is the only unprobed region that can still hold the run.
//!
//! The input must be sorted ascending by date key. With unsorted input the
//! result may miss matches, but every offset stays inside the buffer.

use crate::file_handler::FileView;
use crate::locator::date_key::{key_at, TargetDate};
use memchr::{memchr, memrchr};
use std::cmp::Ordering;
use std::iter::FusedIterator;

/// Default stride in bytes skipped past a too-early probe
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Half-open byte range of one record, excluding its newline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: u64,
    pub end: u64,
}

impl LineSpan {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Result of [`RangeLocator::locate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Byte offset of the first line of the target date
    Found(u64),
    NotFound,
}

impl Location {
    pub fn start(self) -> Option<u64> {
        match self {
            Location::Found(start) => Some(start),
            Location::NotFound => None,
        }
    }

    /// Offset encoding where `NotFound` is the one-past-end sentinel `size`
    pub fn offset_or(self, size: u64) -> u64 {
        self.start().unwrap_or(size)
    }
}

/// Work done by one [`RangeLocator::locate_with_stats`] call
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LocateStats {
    /// Binary search iterations
    pub probes: u32,
    /// Lines stepped backward to reach the first line of the run
    pub corrections: u64,
    /// Lines examined by the post-search forward sweep
    pub swept_lines: u64,
}

/// Binary search plus run collection over a borrowed [`FileView`]
#[derive(Debug, Clone, Copy)]
pub struct RangeLocator<'a> {
    data: &'a [u8],
    chunk_size: usize,
}

impl<'a> RangeLocator<'a> {
    pub fn new(view: &'a FileView) -> Self {
        Self {
            data: view.as_bytes(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Use a custom chunk stride. A stride of 0 is treated as 1.
    pub fn with_chunk_size(view: &'a FileView, chunk_size: usize) -> Self {
        Self {
            data: view.as_bytes(),
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Offset of the first line whose date key equals `target`
    pub fn locate(&self, target: &TargetDate) -> Location {
        self.locate_with_stats(target).0
    }

    /// [`locate`](Self::locate) plus probe accounting
    pub fn locate_with_stats(&self, target: &TargetDate) -> (Location, LocateStats) {
        let size = self.data.len();
        let target = target.as_bytes();
        let mut stats = LocateStats::default();

        let mut left = 0usize;
        let mut right = size;
        // Start of the last line found to be earlier than the target
        let mut last_early: Option<usize> = None;

        while left < right {
            let mid = self.find_line_start(left + (right - left) / 2);
            stats.probes += 1;

            if mid >= size {
                right = mid;
                continue;
            }

            match key_at(self.data, mid).cmp(target) {
                Ordering::Equal => {
                    let (first, corrections) = self.first_of_run(mid, target);
                    stats.corrections = corrections;
                    return (Location::Found(first as u64), stats);
                }
                Ordering::Less => {
                    last_early = Some(mid);
                    // The snap can land before `left` on long lines
                    left = mid.saturating_add(self.chunk_size).max(left + 1);
                }
                Ordering::Greater => right = mid,
            }
        }

        // Every line at or after `right` is later than the target and every line
        // up to `last_early` is earlier, so only the gap between them is left.
        let mut pos = match last_early {
            Some(early) => self.next_line_start(early),
            None => 0,
        };
        while pos < right.min(size) {
            stats.swept_lines += 1;
            match key_at(self.data, pos).cmp(target) {
                Ordering::Equal => return (Location::Found(pos as u64), stats),
                Ordering::Greater => break,
                Ordering::Less => pos = self.next_line_start(pos),
            }
        }

        (Location::NotFound, stats)
    }

    /// Lazily yield the run of lines dated `target` starting at `start`.
    ///
    /// `start` should come from [`locate`](Self::locate). The sequence stops at
    /// the first line with a different date or at end of file.
    pub fn collect(&self, target: &TargetDate, start: u64) -> MatchingLines<'a> {
        let pos = usize::try_from(start).unwrap_or(usize::MAX);
        MatchingLines {
            data: self.data,
            target: *target,
            pos: pos.min(self.data.len()),
        }
    }

    /// Locate then collect; empty when the date is absent
    pub fn matching_lines(&self, target: &TargetDate) -> MatchingLines<'a> {
        let start = self.locate(target).offset_or(self.data.len() as u64);
        self.collect(target, start)
    }

    /// Span of the line starting at `start`
    pub fn line_span(&self, start: u64) -> LineSpan {
        let start = usize::try_from(start)
            .unwrap_or(usize::MAX)
            .min(self.data.len());
        LineSpan {
            start: start as u64,
            end: self.line_end(start) as u64,
        }
    }

    /// Snap `pos` back to the start of the line containing it
    fn find_line_start(&self, pos: usize) -> usize {
        let pos = pos.min(self.data.len());
        memrchr(b'\n', &self.data[..pos]).map_or(0, |newline| newline + 1)
    }

    /// Offset of the newline ending the line at `start`, or end of buffer
    fn line_end(&self, start: usize) -> usize {
        memchr(b'\n', &self.data[start..]).map_or(self.data.len(), |i| start + i)
    }

    fn next_line_start(&self, start: usize) -> usize {
        (self.line_end(start) + 1).min(self.data.len())
    }

    /// Walk backward from a matching line to the first line of its run.
    ///
    /// Returns the run start and the number of lines stepped over.
    fn first_of_run(&self, mut mid: usize, target: &[u8]) -> (usize, u64) {
        let mut steps = 0;
        while mid > 0 {
            let prev = self.find_line_start(mid - 1);
            if key_at(self.data, prev) != target {
                break;
            }
            mid = prev;
            steps += 1;
        }
        (mid, steps)
    }
}

/// Forward-only iterator over the lines of one date run.
///
/// Each line is yielded once, without its newline, in file order.
#[derive(Debug, Clone)]
pub struct MatchingLines<'a> {
    data: &'a [u8],
    target: TargetDate,
    pos: usize,
}

impl<'a> Iterator for MatchingLines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }

        let start = self.pos;
        let end = memchr(b'\n', &self.data[start..]).map_or(self.data.len(), |i| start + i);
        let line = &self.data[start..end];

        if key_at(line, 0) != self.target.as_bytes() {
            self.pos = self.data.len();
            return None;
        }

        self.pos = end.saturating_add(1);
        Some(line)
    }
}

impl FusedIterator for MatchingLines<'_> {}
