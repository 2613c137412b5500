//! Output sink: rotating CSV files, one row per newly-seen email.
//!
//! Files are named `<prefix>_<n>.csv` with `n` starting at 1. When the
//! current file reaches the configured row ceiling it is flushed, closed
//! and never reopened; the next indexed file takes over. Rows are flushed
//! as they are written so an interrupted run keeps everything already
//! recorded.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

/// Header row written at the top of every output file.
const HEADER: [&str; 3] = ["Email", "Source", "PostLink"];

/// Destination for harvested email rows.
///
/// The scan loop only ever appends; rotation and layout are the sink's
/// business.
pub trait EmailSink {
    /// Record one `{email, source, link}` row.
    fn record(&mut self, email: &str, source: &str, link: &str) -> Result<()>;
}

/// CSV sink that rotates output files at a fixed row ceiling.
pub struct RotatingCsvSink {
    prefix: PathBuf,
    max_rows_per_file: usize,
    file_index: u32,
    rows_in_file: usize,
    rows_total: u64,
    writer: csv::Writer<File>,
}

impl RotatingCsvSink {
    /// Default per-file row ceiling.
    pub const DEFAULT_ROWS_PER_FILE: usize = 1000;

    /// Create a sink writing to `<prefix>_1.csv`.
    ///
    /// The first file (with its header row) is created eagerly so a
    /// launch failure surfaces before any scanning happens.
    pub fn create(prefix: impl Into<PathBuf>, max_rows_per_file: usize) -> Result<Self> {
        let prefix = prefix.into();
        let writer = Self::open_indexed(&prefix, 1)?;
        Ok(Self {
            prefix,
            max_rows_per_file: max_rows_per_file.max(1),
            file_index: 1,
            rows_in_file: 0,
            rows_total: 0,
            writer,
        })
    }

    /// Create a sink with the default row ceiling.
    pub fn with_default_ceiling(prefix: impl Into<PathBuf>) -> Result<Self> {
        Self::create(prefix, Self::DEFAULT_ROWS_PER_FILE)
    }

    /// Path of the file currently being written.
    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        indexed_path(&self.prefix, self.file_index)
    }

    /// Number of files opened so far.
    #[must_use]
    pub fn files_written(&self) -> u32 {
        self.file_index
    }

    /// Total data rows written across all files.
    #[must_use]
    pub fn rows_written(&self) -> u64 {
        self.rows_total
    }

    /// Flush and close the sink, returning `(files_written, rows_written)`.
    pub fn finish(mut self) -> Result<(u32, u64)> {
        self.writer.flush()?;
        info!(files = self.file_index, rows = self.rows_total, "output complete");
        Ok((self.file_index, self.rows_total))
    }

    fn open_indexed(prefix: &Path, index: u32) -> Result<csv::Writer<File>> {
        let path = indexed_path(prefix, index);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(HEADER)?;
        writer.flush()?;
        info!(path = %path.display(), "writing output file");
        Ok(writer)
    }
}

impl EmailSink for RotatingCsvSink {
    fn record(&mut self, email: &str, source: &str, link: &str) -> Result<()> {
        if self.rows_in_file >= self.max_rows_per_file {
            self.writer.flush()?;
            self.file_index += 1;
            self.writer = Self::open_indexed(&self.prefix, self.file_index)?;
            self.rows_in_file = 0;
        }
        self.writer.write_record([email, source, link])?;
        self.writer.flush()?;
        self.rows_in_file += 1;
        self.rows_total += 1;
        Ok(())
    }
}

fn indexed_path(prefix: &Path, index: u32) -> PathBuf {
    PathBuf::from(format!("{}_{index}.csv", prefix.display()))
}

/// In-memory sink collecting rows as tuples. Useful for tests and dry
/// runs.
#[derive(Debug, Default)]
pub struct VecSink {
    /// Recorded `(email, source, link)` rows, in emission order.
    pub rows: Vec<(String, String, String)>,
}

impl VecSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmailSink for VecSink {
    fn record(&mut self, email: &str, source: &str, link: &str) -> Result<()> {
        self.rows.push((email.to_string(), source.to_string(), link.to_string()));
        Ok(())
    }
}
