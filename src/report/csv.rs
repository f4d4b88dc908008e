//! CSV serialization of the per-file rows.

use crate::core::error::ConfigError;
use crate::core::model::FileStatistics;
use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 5] = ["File Name", "Total Length", "GC Percentage", "N50", "L50"];

#[derive(Serialize)]
struct CsvRow<'a> {
    file_name: &'a str,
    total_length: u64,
    gc_percentage: String,
    n50: u64,
    l50: u64,
}

impl<'a> From<&'a FileStatistics> for CsvRow<'a> {
    fn from(stats: &'a FileStatistics) -> Self {
        Self {
            file_name: &stats.file_name,
            total_length: stats.total_length,
            gc_percentage: stats.gc_percentage_str(),
            n50: stats.n50,
            l50: stats.l50,
        }
    }
}

/// Output table. Opened before any work is dispatched so an unwritable destination fails the
/// run early; written once after all rows are collected.
pub struct CsvSink<W: Write = File> {
    writer: csv::Writer<W>,
    path: PathBuf,
}

impl CsvSink<File> {
    pub fn create(path: &Path) -> Result<Self, ConfigError> {
        let file = File::create(path).map_err(|source| ConfigError::OutputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_writer(file, path))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W, path: &Path) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        Self {
            writer,
            path: path.to_path_buf(),
        }
    }

    pub fn write_rows(mut self, rows: &[FileStatistics]) -> Result<W> {
        let path = self.path.display().to_string();
        self.writer
            .write_record(HEADER)
            .with_context(|| format!("failed to write header to {path}"))?;
        for stats in rows {
            self.writer
                .serialize(CsvRow::from(stats))
                .with_context(|| format!("failed to write row for {}", stats.file_name))?;
        }
        self.writer
            .flush()
            .with_context(|| format!("failed to flush {path}"))?;
        self.writer
            .into_inner()
            .map_err(|e| anyhow!("failed to flush {path}: {}", e.error()))
    }
}
