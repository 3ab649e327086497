//! Memory-mapped view over the log file
//!
//! This module provides [`FileView`], a read-only byte view of the whole log file.
//! The OS pages content in on demand, so only the regions probed by the search
//! and the collected run are ever touched.

use crate::error::{DatecutError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Internal byte source for [`FileView`]
#[derive(Debug)]
enum ByteSource {
    /// Zero-length file; mapping an empty file is an error on some platforms
    Empty,
    /// Content accessed via memory mapping
    MemoryMapped(Mmap),
}

impl ByteSource {
    fn as_bytes(&self) -> &[u8] {
        match self {
            ByteSource::Empty => &[],
            ByteSource::MemoryMapped(mmap) => &mmap[..],
        }
    }
}

/// Read-only, zero-copy view of a log file.
///
/// The mapping is released when the view is dropped. The file handle used to
/// create the mapping is closed as soon as `open` returns, on success and on
/// every error path.
#[derive(Debug)]
pub struct FileView {
    source: ByteSource,
    file_path: PathBuf,
}

impl FileView {
    /// Map `path` read-only.
    ///
    /// # Errors
    /// * `FileError` if the file cannot be opened, its size cannot be read,
    ///   or the mapping fails
    ///
    /// A zero-length file is not an error: it opens with `size() == 0`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            DatecutError::file_error(format!("Failed to open file: {}", path.display()), e)
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| DatecutError::file_error("Failed to get file metadata", e))?
            .len();

        if file_size == 0 {
            return Ok(Self {
                source: ByteSource::Empty,
                file_path: path.to_path_buf(),
            });
        }

        // SAFETY: the mapping is read-only. Truncating the file while it is
        // mapped is outside what this tool supports.
        let mmap = unsafe {
            Mmap::map(&file).map_err(|e| {
                DatecutError::file_error(
                    format!("Failed to memory map file: {}", path.display()),
                    e,
                )
            })?
        };

        // Binary search probes are scattered; readahead would mostly be wasted
        #[cfg(unix)]
        {
            if let Err(e) = mmap.advise(memmap2::Advice::Random) {
                log::warn!("Failed to set mmap advice: {}", e);
            }
        }

        Ok(Self {
            source: ByteSource::MemoryMapped(mmap),
            file_path: path.to_path_buf(),
        })
    }

    /// Build a view over an in-memory buffer.
    ///
    /// Used by tests and benchmarks that do not want to touch the filesystem.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(Self {
                source: ByteSource::Empty,
                file_path: PathBuf::new(),
            });
        }
        let mut anon = memmap2::MmapMut::map_anon(bytes.len())
            .map_err(|e| DatecutError::file_error("Failed to create anonymous mapping", e))?;
        anon.copy_from_slice(bytes);
        let mmap = anon
            .make_read_only()
            .map_err(|e| DatecutError::file_error("Failed to seal anonymous mapping", e))?;
        Ok(Self {
            source: ByteSource::MemoryMapped(mmap),
            file_path: PathBuf::new(),
        })
    }

    /// Total size in bytes
    #[inline]
    pub fn size(&self) -> u64 {
        self.as_bytes().len() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// The whole file as one slice
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    /// Path the view was opened from (empty for in-memory views)
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Byte at `offset`
    pub fn byte_at(&self, offset: u64) -> Result<u8> {
        usize::try_from(offset)
            .ok()
            .and_then(|i| self.as_bytes().get(i).copied())
            .ok_or_else(|| DatecutError::bounds(offset, offset.saturating_add(1), self.size()))
    }

    /// Bytes in the half-open range `start..end`
    pub fn slice(&self, start: u64, end: u64) -> Result<&[u8]> {
        let out_of_bounds = || DatecutError::bounds(start, end, self.size());
        if start > end || end > self.size() {
            return Err(out_of_bounds());
        }
        let start = usize::try_from(start).map_err(|_| out_of_bounds())?;
        let end = usize::try_from(end).map_err(|_| out_of_bounds())?;
        Ok(&self.as_bytes()[start..end])
    }
}
