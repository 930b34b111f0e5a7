//! Statistics calculation engine.
//!
//! Computes derived tables from the medal record store:
//! - Country participation, leading disciplines and per-game trajectories
//! - Athlete medal tallies
//! - Gender orientation per discipline
//! - Per-country totals for map rendering
//!
//! Every analytic is a pure function of `(&RecordStore, parameters)`.

pub mod athlete;
pub mod country;
pub mod gender;
pub mod geo;
pub mod grouping;

pub use athlete::{athlete_tally, compare_athletes, medal_tally};
pub use country::{
    best_medal_disciplines, compare, country_profile, most_participated_discipline, reindex,
    trajectory, trajectory_by_medal_type,
};
pub use gender::gender_orientation;
pub use geo::{
    medals_by_type_and_country, top_disciplines_by_country, total_medals_by_country,
    DisciplineSet, TOP_DISCIPLINES,
};
pub use grouping::{aggregate, Aggregate, Aggregation, Category, GroupKey, GroupedTable};

use thiserror::Error;

use crate::models::ParseCategoryError;

/// Errors raised by analytics queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// A filter matched zero rows; callers treat this as "no data to display".
    #[error("No data for {what}")]
    EmptyResult { what: String },

    #[error(transparent)]
    InvalidCategory(#[from] ParseCategoryError),
}

impl AnalyticsError {
    pub fn empty(what: impl Into<String>) -> Self {
        AnalyticsError::EmptyResult { what: what.into() }
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self, AnalyticsError::EmptyResult { .. })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{MedalRecord, MedalType};
    use crate::store::RecordStore;

    pub fn medal(country: &str, discipline: &str, medal: MedalType, game: &str) -> MedalRecord {
        MedalRecord::new(country, discipline, format!("{discipline} event"), medal, game)
    }

    /// USA: Swimming x3, Athletics x1; CHN: Swimming x1.
    pub fn five_row_store() -> RecordStore {
        RecordStore::new(vec![
            medal("USA", "Swimming", MedalType::Gold, "game1"),
            medal("USA", "Swimming", MedalType::Silver, "game1"),
            medal("USA", "Athletics", MedalType::Gold, "game2"),
            medal("CHN", "Swimming", MedalType::Bronze, "game1"),
            medal("USA", "Swimming", MedalType::Gold, "game2"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_message() {
        let err = AnalyticsError::empty("country 'Atlantis'");
        assert!(err.is_empty_result());
        assert_eq!(err.to_string(), "No data for country 'Atlantis'");
    }

    #[test]
    fn test_invalid_category_from_parse_error() {
        let err: AnalyticsError = "TIN".parse::<crate::models::MedalType>().unwrap_err().into();
        assert!(!err.is_empty_result());
        assert_eq!(err.to_string(), "Invalid medal_type value: \"TIN\"");
    }
}
