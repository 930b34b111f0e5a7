//! Geospatial analytics: per-country tables keyed for map rendering.
//!
//! All outputs are sorted by country name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    CountryDisciplineTotal, CountryMedals, CountryTotal, DisciplineTally, MedalRecord,
};
use crate::store::RecordStore;

use super::grouping::{aggregate, Aggregation, Category, GroupKey};
use super::AnalyticsError;

/// Default disciplines for the top-disciplines map.
pub const TOP_DISCIPLINES: [&str; 5] = ["Athletics", "Swimming", "Wrestling", "Rowing", "Boxing"];

/// Ordered, de-duplicated set of discipline titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct DisciplineSet {
    disciplines: Vec<String>,
}

impl DisciplineSet {
    pub fn new<I, S>(disciplines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for discipline in disciplines {
            let discipline = discipline.into();
            if !unique.contains(&discipline) {
                unique.push(discipline);
            }
        }
        Self { disciplines: unique }
    }

    pub fn contains(&self, discipline: &str) -> bool {
        self.disciplines.iter().any(|d| d == discipline)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.disciplines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.disciplines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disciplines.is_empty()
    }
}

impl Default for DisciplineSet {
    fn default() -> Self {
        Self::new(TOP_DISCIPLINES)
    }
}

impl From<Vec<String>> for DisciplineSet {
    fn from(disciplines: Vec<String>) -> Self {
        Self::new(disciplines)
    }
}

impl From<DisciplineSet> for Vec<String> {
    fn from(set: DisciplineSet) -> Self {
        set.disciplines
    }
}

/// Total medal rows per country.
pub fn total_medals_by_country(store: &RecordStore) -> Result<Vec<CountryTotal>, AnalyticsError> {
    if store.is_empty() {
        return Err(AnalyticsError::empty("medal records"));
    }

    let table = aggregate(store.records(), &[GroupKey::Country], Aggregation::Count)?;
    let mut totals: Vec<CountryTotal> = table
        .iter()
        .filter_map(|row| {
            row.key_at(0).map(|country| CountryTotal {
                country_name: country.to_string(),
                total_medals: row.value.value(),
            })
        })
        .collect();
    totals.sort_by(|a, b| a.country_name.cmp(&b.country_name));

    debug!(countries = totals.len(), "total medals by country");
    Ok(totals)
}

/// Gold/silver/bronze rows per country, zero-filled, with a row total.
pub fn medals_by_type_and_country(
    store: &RecordStore,
) -> Result<Vec<CountryMedals>, AnalyticsError> {
    if store.is_empty() {
        return Err(AnalyticsError::empty("medal records"));
    }

    let table = aggregate(
        store.records(),
        &[GroupKey::Country],
        Aggregation::ValueCounts(Category::MedalType),
    )?;
    let mut medals: Vec<CountryMedals> = table
        .iter()
        .filter_map(|row| {
            let country = row.key_at(0)?;
            let counts = row.value.medals().copied().unwrap_or_default();
            Some(CountryMedals {
                country_name: country.to_string(),
                medals: counts,
                total_medals: counts.total(),
            })
        })
        .collect();
    medals.sort_by(|a, b| a.country_name.cmp(&b.country_name));

    Ok(medals)
}

/// Medal rows per country across `disciplines` only.
///
/// Each row lists every discipline of the set (zero-filled) in set order.
/// Countries with no medal in the set are absent.
pub fn top_disciplines_by_country(
    store: &RecordStore,
    disciplines: &DisciplineSet,
) -> Result<Vec<CountryDisciplineTotal>, AnalyticsError> {
    let rows: Vec<&MedalRecord> = store
        .records()
        .iter()
        .filter(|r| disciplines.contains(&r.discipline_title))
        .collect();
    if rows.is_empty() {
        return Err(AnalyticsError::empty(format!(
            "disciplines {:?}",
            disciplines.iter().collect::<Vec<_>>()
        )));
    }

    let table = aggregate(
        rows,
        &[GroupKey::Country, GroupKey::Discipline],
        Aggregation::Count,
    )?;

    let mut by_country: BTreeMap<&str, BTreeMap<&str, u32>> = BTreeMap::new();
    for row in table.iter() {
        if let (Some(country), Some(discipline)) = (row.key_at(0), row.key_at(1)) {
            by_country
                .entry(country)
                .or_default()
                .insert(discipline, row.value.value());
        }
    }

    let totals: Vec<CountryDisciplineTotal> = by_country
        .into_iter()
        .map(|(country, counts)| {
            let per_discipline: Vec<DisciplineTally> = disciplines
                .iter()
                .map(|d| DisciplineTally {
                    discipline_title: d.to_string(),
                    medal_count: counts.get(d).copied().unwrap_or(0),
                })
                .collect();
            let total_medals = per_discipline.iter().map(|t| t.medal_count).sum();
            CountryDisciplineTotal {
                country_name: country.to_string(),
                per_discipline,
                total_medals,
            }
        })
        .collect();

    debug!(
        countries = totals.len(),
        disciplines = disciplines.len(),
        "top disciplines by country"
    );
    Ok(totals)
}
