//! Dataset loading.
//!
//! Reads the medal table from disk once per session:
//! - CSV in the source layout (normalized on read)
//! - JSONL of already normalized `MedalRecord`s

pub mod csv;
pub mod jsonl;

pub use self::csv::CsvMedalReader;
pub use self::jsonl::{JsonlReader, JsonlWriter};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::ingest::Normalizer;
use crate::models::{MedalRecord, ParseCategoryError};
use crate::store::{GameOrder, RecordStore};

/// Errors that can occur while loading or writing datasets.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid record on line {line}: {source}")]
    InvalidRecord {
        line: usize,
        #[source]
        source: ParseCategoryError,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Cannot infer dataset format from {0}")]
    UnknownFormat(PathBuf),
}

/// On-disk dataset format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    Csv,
    Jsonl,
}

impl DatasetFormat {
    /// Infer the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(DatasetFormat::Csv),
            "jsonl" | "ndjson" => Some(DatasetFormat::Jsonl),
            _ => None,
        }
    }
}

/// Read and normalize every record of a dataset file.
pub fn load_records(
    path: &Path,
    format: Option<DatasetFormat>,
    normalizer: &Normalizer,
) -> Result<Vec<MedalRecord>, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }

    let format = format
        .or_else(|| DatasetFormat::from_path(path))
        .ok_or_else(|| StorageError::UnknownFormat(path.to_path_buf()))?;

    let records = match format {
        DatasetFormat::Csv => CsvMedalReader::new(path.to_path_buf()).read_all(normalizer)?,
        DatasetFormat::Jsonl => JsonlReader::<MedalRecord>::new(path.to_path_buf())
            .read_all()?
            .into_iter()
            .map(|r| normalizer.normalize_record(r))
            .collect(),
    };

    if records.is_empty() {
        warn!("Dataset {:?} contains no medal records", path);
    } else {
        info!("Loaded {} medal records from {:?}", records.len(), path);
    }
    Ok(records)
}

/// Load a dataset file into an immutable store.
pub fn load_store(
    path: &Path,
    format: Option<DatasetFormat>,
    order: GameOrder,
    normalizer: &Normalizer,
) -> Result<RecordStore, StorageError> {
    let records = load_records(path, format, normalizer)?;
    let store = RecordStore::with_game_order(records, order);
    info!(
        "Record store ready: {} records, {} games, {} countries",
        store.len(),
        store.games().len(),
        store.countries().len()
    );
    Ok(store)
}
