//! Dataset normalization.
//!
//! Turns raw medal rows into `MedalRecord`s: keeps the analytics columns,
//! merges historical country names under one canonical spelling, and parses
//! categorical columns strictly.

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::{EventGender, MedalRecord, MedalType, ParseCategoryError};

/// Historical or alias country names and their canonical spelling.
pub const COUNTRY_ALIASES: [(&str, &str); 4] = [
    ("Soviet Union", "Russian Federation"),
    ("German Democratic Republic (Germany)", "Germany"),
    ("Olympic Athletes from Russia", "Russian Federation"),
    ("ROC", "Russian Federation"),
];

/// A row of the source medal table before normalization.
///
/// Columns not listed here (country codes, athlete URL, participant title)
/// are dropped on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawMedalRow {
    pub discipline_title: String,
    pub event_title: String,
    pub slug_game: String,
    #[serde(default)]
    pub event_gender: Option<String>,
    pub medal_type: String,
    #[serde(default)]
    pub athlete_full_name: Option<String>,
    pub country_name: String,
}

/// Applies the country alias table and strict category parsing.
#[derive(Debug, Clone)]
pub struct Normalizer {
    aliases: HashMap<String, String>,
}

impl Normalizer {
    pub fn new<I, K, V>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            aliases: aliases
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Canonical spelling of a country name (exact, case-sensitive match).
    pub fn canonical_country<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// Normalize one raw row.
    pub fn normalize_row(&self, raw: RawMedalRow) -> Result<MedalRecord, ParseCategoryError> {
        let medal_type: MedalType = raw.medal_type.parse()?;
        let event_gender = match non_empty(raw.event_gender) {
            Some(g) => Some(g.parse::<EventGender>()?),
            None => None,
        };

        Ok(MedalRecord {
            country_name: self.canonical_country(raw.country_name.trim()).to_string(),
            discipline_title: raw.discipline_title,
            event_title: raw.event_title,
            event_gender,
            athlete_full_name: non_empty(raw.athlete_full_name),
            medal_type,
            slug_game: raw.slug_game,
        })
    }

    /// Re-apply the alias table to an already typed record.
    pub fn normalize_record(&self, mut record: MedalRecord) -> MedalRecord {
        if let Some(canonical) = self.aliases.get(&record.country_name) {
            record.country_name = canonical.clone();
        }
        record.athlete_full_name = non_empty(record.athlete_full_name);
        record
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(COUNTRY_ALIASES)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
