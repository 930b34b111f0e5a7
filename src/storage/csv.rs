//! CSV medal table reader.
//!
//! Reads the source layout (one row per medal, header row first). Columns are
//! matched by header name, so extra columns and column order don't matter.

use std::path::PathBuf;

use tracing::debug;

use crate::ingest::{Normalizer, RawMedalRow};
use crate::models::MedalRecord;

use super::StorageError;

/// Reads raw medal rows from a CSV file.
pub struct CsvMedalReader {
    path: PathBuf,
}

impl CsvMedalReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read rows without normalization.
    pub fn read_raw(&self) -> Result<Vec<RawMedalRow>, StorageError> {
        Ok(self
            .read_lines()?
            .into_iter()
            .map(|(_, row)| row)
            .collect())
    }

    /// Read and normalize every row. An unknown medal type or event gender
    /// fails the whole read with the line its row starts on (header is line 1).
    pub fn read_all(&self, normalizer: &Normalizer) -> Result<Vec<MedalRecord>, StorageError> {
        self.read_lines()?
            .into_iter()
            .map(|(line, raw)| {
                normalizer
                    .normalize_row(raw)
                    .map_err(|source| StorageError::InvalidRecord { line, source })
            })
            .collect()
    }

    /// Raw rows paired with their starting line. Quoted fields may span
    /// several lines, so the line comes from the reader's position.
    fn read_lines(&self) -> Result<Vec<(usize, RawMedalRow)>, StorageError> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(::csv::Trim::All)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map_or(idx + 2, |pos| pos.line() as usize);
            let row: RawMedalRow = record.deserialize(Some(&headers))?;
            rows.push((line, row));
        }

        debug!("Read {} raw rows from {:?}", rows.len(), self.path);
        Ok(rows)
    }
}
