//! Core data models for medal analytics.

mod record;
mod stats;

pub use record::*;
pub use stats::*;
