//! # Medal Insights
//!
//! Analytics over the historical Olympic medal table.
//!
//! ## Architecture
//!
//! - **models**: Medal records, categorical columns and derived row types
//! - **store**: Immutable in-memory record store and the chronological game axis
//! - **calculate**: Country, athlete, gender and map analytics
//! - **ingest**: Normalization of raw rows (country aliases, strict categories)
//! - **storage**: CSV and JSONL dataset loading
//! - **api**: Read-only REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod ingest;
pub mod models;
pub mod storage;
pub mod store;

pub use models::*;
pub use store::RecordStore;
