//! Country analytics.
//!
//! Medals are counted per participant row: a team gold with four members
//! contributes four. Trajectories are sparse, so games without a medal for
//! the pair are absent; use [`reindex`] for a dense axis.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::models::{
    ComparisonRow, CountryProfile, DisciplineCount, DisciplineLeader, MedalRecord,
    MedalTypeTrajectoryPoint, TrajectoryPoint,
};
use crate::store::RecordStore;

use super::grouping::{aggregate, max_by_count, Aggregation, Category, GroupKey};
use super::AnalyticsError;

/// Discipline with the most rows for `country`.
///
/// Ties go to the lexically smallest discipline title.
pub fn most_participated_discipline(
    store: &RecordStore,
    country: &str,
) -> Result<DisciplineCount, AnalyticsError> {
    let rows: Vec<&MedalRecord> = store
        .records()
        .iter()
        .filter(|r| r.country_name == country)
        .collect();
    if rows.is_empty() {
        return Err(AnalyticsError::empty(format!("country '{country}'")));
    }

    let table = aggregate(rows, &[GroupKey::Discipline], Aggregation::Count)?;
    let (discipline, count) = max_by_count(
        table
            .iter()
            .filter_map(|row| row.key_at(0).map(|d| (d, row.value.value()))),
    )
    .ok_or_else(|| AnalyticsError::empty(format!("country '{country}'")))?;

    debug!(country, discipline, count, "most participated discipline");

    Ok(DisciplineCount {
        country_name: country.to_string(),
        discipline_title: discipline.to_string(),
        participation_count: count,
    })
}

/// Disciplines in which `country` has the highest medal total of all countries.
///
/// The leader of each discipline is the country with the maximum total, ties
/// going to the lexically smallest country name. An empty result means the
/// country leads nowhere, which is not an error.
pub fn best_medal_disciplines(
    store: &RecordStore,
    country: &str,
) -> Result<Vec<DisciplineLeader>, AnalyticsError> {
    if store.is_empty() {
        return Err(AnalyticsError::empty("medal records"));
    }

    let table = aggregate(
        store.records(),
        &[GroupKey::Discipline, GroupKey::Country],
        Aggregation::Count,
    )?;

    let mut by_discipline: BTreeMap<&str, Vec<(&str, u32)>> = BTreeMap::new();
    for row in table.iter() {
        if let (Some(discipline), Some(leader)) = (row.key_at(0), row.key_at(1)) {
            by_discipline
                .entry(discipline)
                .or_default()
                .push((leader, row.value.value()));
        }
    }

    let leaders: Vec<DisciplineLeader> = by_discipline
        .into_iter()
        .filter_map(|(discipline, totals)| {
            let (leader, count) = max_by_count(totals)?;
            (leader == country).then(|| DisciplineLeader {
                country_name: leader.to_string(),
                discipline_title: discipline.to_string(),
                medal_count: count,
            })
        })
        .collect();

    debug!(country, disciplines = leaders.len(), "best medal disciplines");
    Ok(leaders)
}

/// Rows of one country in one discipline, or `EmptyResult`.
fn country_discipline_rows<'a>(
    store: &'a RecordStore,
    country: &str,
    discipline: &str,
) -> Result<Vec<&'a MedalRecord>, AnalyticsError> {
    let rows: Vec<&MedalRecord> = store
        .records()
        .iter()
        .filter(|r| r.country_name == country && r.discipline_title == discipline)
        .collect();
    if rows.is_empty() {
        return Err(AnalyticsError::empty(format!(
            "country '{country}' in discipline '{discipline}'"
        )));
    }
    Ok(rows)
}

/// Medal totals per game for a country in a discipline, in chronological order.
pub fn trajectory(
    store: &RecordStore,
    country: &str,
    discipline: &str,
) -> Result<Vec<TrajectoryPoint>, AnalyticsError> {
    let rows = country_discipline_rows(store, country, discipline)?;
    let table = aggregate(rows, &[GroupKey::Game], Aggregation::Count)?;

    let mut points: Vec<TrajectoryPoint> = table
        .iter()
        .filter_map(|row| {
            row.key_at(0).map(|game| TrajectoryPoint {
                slug_game: game.to_string(),
                total_medals: row.value.value(),
            })
        })
        .collect();
    store.sort_by_game(&mut points, |p| p.slug_game.as_str());

    debug!(country, discipline, games = points.len(), "trajectory");
    Ok(points)
}

/// Per-game medal split for a country in a discipline, zero-filled.
pub fn trajectory_by_medal_type(
    store: &RecordStore,
    country: &str,
    discipline: &str,
) -> Result<Vec<MedalTypeTrajectoryPoint>, AnalyticsError> {
    let rows = country_discipline_rows(store, country, discipline)?;
    let table = aggregate(
        rows,
        &[GroupKey::Game],
        Aggregation::ValueCounts(Category::MedalType),
    )?;

    let mut points: Vec<MedalTypeTrajectoryPoint> = table
        .iter()
        .filter_map(|row| {
            let game = row.key_at(0)?;
            let medals = row.value.medals().copied().unwrap_or_default();
            Some(MedalTypeTrajectoryPoint::new(game, medals))
        })
        .collect();
    store.sort_by_game(&mut points, |p| p.slug_game.as_str());

    Ok(points)
}

/// Expand a sparse trajectory over `games`, filling absent games with zero.
///
/// Points whose game is not in `games` are dropped.
pub fn reindex(points: &[TrajectoryPoint], games: &[String]) -> Vec<TrajectoryPoint> {
    let totals: HashMap<&str, u32> = points
        .iter()
        .map(|p| (p.slug_game.as_str(), p.total_medals))
        .collect();

    games
        .iter()
        .map(|game| TrajectoryPoint {
            slug_game: game.clone(),
            total_medals: totals.get(game.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

/// Align two countries' trajectories in a discipline.
///
/// Inner join on the game: a game where only one of the two countries
/// medaled is left out.
pub fn compare(
    store: &RecordStore,
    country1: &str,
    country2: &str,
    discipline: &str,
) -> Result<Vec<ComparisonRow>, AnalyticsError> {
    let first = trajectory(store, country1, discipline)?;
    let second = trajectory(store, country2, discipline)?;

    let second_totals: HashMap<&str, u32> = second
        .iter()
        .map(|p| (p.slug_game.as_str(), p.total_medals))
        .collect();

    let rows: Vec<ComparisonRow> = first
        .iter()
        .filter_map(|p| {
            second_totals
                .get(p.slug_game.as_str())
                .map(|&total| ComparisonRow {
                    slug_game: p.slug_game.clone(),
                    total_medals_country1: p.total_medals,
                    total_medals_country2: total,
                })
        })
        .collect();

    debug!(
        country1,
        country2,
        discipline,
        shared_games = rows.len(),
        "compare"
    );
    Ok(rows)
}

/// Most participated discipline plus the disciplines the country leads.
pub fn country_profile(
    store: &RecordStore,
    country: &str,
) -> Result<CountryProfile, AnalyticsError> {
    let most_participated = most_participated_discipline(store, country)?;
    let best_disciplines = best_medal_disciplines(store, country)?;

    Ok(CountryProfile {
        country_name: country.to_string(),
        most_participated,
        best_disciplines,
    })
}
