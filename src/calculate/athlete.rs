//! Athlete analytics.
//!
//! Names are matched exactly and case-sensitively. Two athletes sharing a full
//! name are not told apart: their rows are tallied together.

use tracing::debug;

use crate::models::{AthleteComparison, AthleteTally, AthleteTallyRow, MedalCounts, MedalRecord};
use crate::store::RecordStore;

use super::grouping::{aggregate, Aggregation, Category, GroupKey};

/// Per-game medal split for an athlete, chronological and zero-filled.
///
/// No matching rows yields an empty vector rather than an error.
pub fn medal_tally(store: &RecordStore, athlete: &str) -> Vec<AthleteTallyRow> {
    let rows: Vec<&MedalRecord> = store
        .records()
        .iter()
        .filter(|r| r.athlete_full_name.as_deref() == Some(athlete))
        .collect();
    if rows.is_empty() {
        debug!(athlete, "no medal rows for athlete");
        return Vec::new();
    }

    let Ok(table) = aggregate(
        rows,
        &[GroupKey::Game],
        Aggregation::ValueCounts(Category::MedalType),
    ) else {
        return Vec::new();
    };

    let mut tally: Vec<AthleteTallyRow> = table
        .iter()
        .filter_map(|row| {
            let game = row.key_at(0)?;
            let medals = row.value.medals().copied().unwrap_or_default();
            Some(AthleteTallyRow::new(game, medals))
        })
        .collect();
    store.sort_by_game(&mut tally, |row| row.slug_game.as_str());

    tally
}

/// Tally with totals across all games.
pub fn athlete_tally(store: &RecordStore, athlete: &str) -> AthleteTally {
    let games = medal_tally(store, athlete);
    let totals = games
        .iter()
        .fold(MedalCounts::default(), |acc, row| acc.merged(&row.medals));

    AthleteTally {
        athlete_full_name: athlete.to_string(),
        games,
        totals,
    }
}

/// Two athletes side by side. Names are trimmed before lookup.
pub fn compare_athletes(store: &RecordStore, athlete1: &str, athlete2: &str) -> AthleteComparison {
    AthleteComparison {
        athlete1: athlete_tally(store, athlete1.trim()),
        athlete2: athlete_tally(store, athlete2.trim()),
    }
}
