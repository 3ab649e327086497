//! Extraction orchestration
//!
//! Wires the pieces together for one run: validate and map the log, optionally
//! verify ordering, create the output file, locate the date run and stream it
//! out. The mapping lives exactly as long as [`Extractor::run`].

use crate::config::ExtractConfig;
use crate::error::{DatecutError, Result};
use crate::file_handler::{validate_file_path, FileView};
use crate::locator::{verify_sorted, Location, RangeLocator, TargetDate};
use bstr::ByteSlice;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome of a successful extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// `lines` matching lines were written to `output_path`
    Found { lines: u64, output_path: PathBuf },
    /// No line carries the target date; `output_path` exists and is empty
    NotFound { output_path: PathBuf },
}

impl ExtractOutcome {
    pub fn lines(&self) -> u64 {
        match self {
            ExtractOutcome::Found { lines, .. } => *lines,
            ExtractOutcome::NotFound { .. } => 0,
        }
    }

    pub fn output_path(&self) -> &Path {
        match self {
            ExtractOutcome::Found { output_path, .. } | ExtractOutcome::NotFound { output_path } => {
                output_path
            }
        }
    }
}

/// Runs extractions with a fixed configuration
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// Create an extractor, rejecting unusable settings up front
    pub fn new(config: ExtractConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract every line dated `target` into the per-date output file.
    ///
    /// The output file is created (and truncated) before searching, so a
    /// date with no lines leaves an empty file behind.
    pub fn run(&self, target: &TargetDate) -> Result<ExtractOutcome> {
        let started = Instant::now();

        validate_file_path(&self.config.input)?;
        let view = FileView::open(&self.config.input)?;
        debug!(
            "Mapped {} ({} bytes)",
            view.path().display(),
            view.size()
        );

        if self.config.verify_sorted {
            verify_sorted(&view)?;
        }

        let output_path = self.config.output_path(target.as_str());
        let writer = create_output(&output_path)?;

        let lines = extract_to_writer(&view, target, self.config.chunk_size, writer)?;

        info!(
            "Extracted {} lines for {} in {:.6} seconds",
            lines.unwrap_or(0),
            target,
            started.elapsed().as_secs_f64()
        );

        Ok(match lines {
            Some(lines) => ExtractOutcome::Found { lines, output_path },
            None => ExtractOutcome::NotFound { output_path },
        })
    }
}

/// Create the output directory and file
fn create_output(output_path: &Path) -> Result<BufWriter<File>> {
    if let Some(dir) = output_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            DatecutError::file_error(
                format!("Failed to create output directory: {}", dir.display()),
                e,
            )
        })?;
    }

    let file = File::create(output_path).map_err(|e| {
        DatecutError::file_error(
            format!("Error creating output file: {}", output_path.display()),
            e,
        )
    })?;
    Ok(BufWriter::new(file))
}

/// Write every line dated `target` to `writer`, each followed by `\n`.
///
/// Returns `None` when the date is absent (nothing is written), otherwise the
/// number of lines written. The writer is flushed in both cases.
pub fn extract_to_writer<W: Write>(
    view: &FileView,
    target: &TargetDate,
    chunk_size: usize,
    mut writer: W,
) -> Result<Option<u64>> {
    let locator = RangeLocator::with_chunk_size(view, chunk_size);
    let (location, stats) = locator.locate_with_stats(target);
    debug!(
        "Search for {}: {:?} after {} probes, {} corrections, {} swept lines",
        target, location, stats.probes, stats.corrections, stats.swept_lines
    );

    let start = match location {
        Location::Found(start) => start,
        Location::NotFound => {
            writer
                .flush()
                .map_err(|e| DatecutError::file_error("Failed to flush output", e))?;
            return Ok(None);
        }
    };

    let mut written = 0u64;
    for line in locator.collect(target, start) {
        if written == 0 {
            debug!("First match: {}", line.as_bstr());
        }
        writer
            .write_all(line)
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|e| DatecutError::file_error("Failed to write output", e))?;
        written += 1;
    }

    writer
        .flush()
        .map_err(|e| DatecutError::file_error("Failed to flush output", e))?;
    Ok(Some(written))
}
