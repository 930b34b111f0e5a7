//! Immutable in-memory record store.
//!
//! Built once per session and shared read-only by every analytic. Also owns
//! the chronological game axis, since slugs do not sort chronologically.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{MedalRecord, ParseCategoryError};

/// How the chronological order of Games editions is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOrder {
    /// Order of first appearance in the loaded data.
    #[default]
    Insertion,
    /// Trailing year of the slug (e.g. "tokyo-2020"), insertion order within a year.
    SlugYear,
}

/// Exact-match row filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub country: Option<String>,
    pub discipline: Option<String>,
    pub athlete: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, record: &MedalRecord) -> bool {
        self.country
            .as_deref()
            .map_or(true, |c| record.country_name == c)
            && self
                .discipline
                .as_deref()
                .map_or(true, |d| record.discipline_title == d)
            && self
                .athlete
                .as_deref()
                .map_or(true, |a| record.athlete_full_name.as_deref() == Some(a))
    }
}

/// The medal-record table.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MedalRecord>,
    games: Vec<String>,
    game_positions: HashMap<String, usize>,
}

impl RecordStore {
    /// Build a store using insertion order for the game axis.
    pub fn new(records: Vec<MedalRecord>) -> Self {
        Self::with_game_order(records, GameOrder::Insertion)
    }

    pub fn with_game_order(records: Vec<MedalRecord>, order: GameOrder) -> Self {
        let mut games: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for record in &records {
            if seen.insert(record.slug_game.as_str()) {
                games.push(record.slug_game.clone());
            }
        }

        if order == GameOrder::SlugYear {
            // Stable: equal years keep insertion order, unknown years go last.
            games.sort_by_key(|slug| slug_year(slug).unwrap_or(u32::MAX));
        }

        let game_positions = games
            .iter()
            .enumerate()
            .map(|(i, g)| (g.clone(), i))
            .collect();

        Self {
            records,
            games,
            game_positions,
        }
    }

    pub fn records(&self) -> &[MedalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Games editions in chronological order.
    pub fn games(&self) -> &[String] {
        &self.games
    }

    /// Position of a game on the chronological axis.
    pub fn game_position(&self, slug_game: &str) -> Option<usize> {
        self.game_positions.get(slug_game).copied()
    }

    /// Sort items chronologically by their game slug.
    pub fn sort_by_game<T>(&self, items: &mut [T], slug: impl Fn(&T) -> &str) {
        items.sort_by_key(|item| self.game_position(slug(item)).unwrap_or(usize::MAX));
    }

    /// Distinct country names, sorted.
    pub fn countries(&self) -> Vec<&str> {
        self.distinct(|r| Some(r.country_name.as_str()))
    }

    /// Distinct discipline titles, sorted.
    pub fn disciplines(&self) -> Vec<&str> {
        self.distinct(|r| Some(r.discipline_title.as_str()))
    }

    /// Distinct non-null athlete names, sorted.
    pub fn athletes(&self) -> Vec<&str> {
        self.distinct(|r| r.athlete_full_name.as_deref())
    }

    /// Rows matching a filter, in store order.
    pub fn filter(&self, filter: &RecordFilter) -> Vec<&MedalRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Distinct values of one listing. Games come back chronologically,
    /// everything else sorted.
    pub fn catalog(&self, kind: Catalog) -> Vec<&str> {
        match kind {
            Catalog::Countries => self.countries(),
            Catalog::Disciplines => self.disciplines(),
            Catalog::Athletes => self.athletes(),
            Catalog::Games => self.games.iter().map(String::as_str).collect(),
        }
    }

    fn distinct<'a>(&'a self, column: impl Fn(&'a MedalRecord) -> Option<&'a str>) -> Vec<&'a str> {
        self.records
            .iter()
            .filter_map(column)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl From<Vec<MedalRecord>> for RecordStore {
    fn from(records: Vec<MedalRecord>) -> Self {
        Self::new(records)
    }
}

/// Listings offered by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    Countries,
    Disciplines,
    Athletes,
    Games,
}

impl FromStr for Catalog {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "countries" => Ok(Catalog::Countries),
            "disciplines" => Ok(Catalog::Disciplines),
            "athletes" => Ok(Catalog::Athletes),
            "games" => Ok(Catalog::Games),
            other => Err(ParseCategoryError::new("catalog", other)),
        }
    }
}

/// Trailing four-digit year of a slug such as "rio-2016".
fn slug_year(slug: &str) -> Option<u32> {
    let tail = slug.rsplit('-').next()?;
    if tail.len() == 4 && tail.bytes().all(|b| b.is_ascii_digit()) {
        tail.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MedalType;

    fn record(country: &str, discipline: &str, game: &str) -> MedalRecord {
        MedalRecord::new(country, discipline, "event", MedalType::Gold, game)
    }

    #[test]
    fn test_games_in_insertion_order() {
        let store = RecordStore::new(vec![
            record("USA", "Swimming", "tokyo-2020"),
            record("USA", "Swimming", "rio-2016"),
            record("CHN", "Diving", "tokyo-2020"),
            record("CHN", "Diving", "beijing-2008"),
        ]);

        assert_eq!(store.games(), ["tokyo-2020", "rio-2016", "beijing-2008"]);
        assert_eq!(store.game_position("rio-2016"), Some(1));
        assert_eq!(store.game_position("paris-1900"), None);
    }

    #[test]
    fn test_games_by_slug_year() {
        let store = RecordStore::with_game_order(
            vec![
                record("USA", "Swimming", "tokyo-2020"),
                record("USA", "Swimming", "paris-1924"),
                record("USA", "Swimming", "special-games"),
                record("USA", "Swimming", "chamonix-1924"),
                record("USA", "Swimming", "athens-1896"),
            ],
            GameOrder::SlugYear,
        );

        assert_eq!(
            store.games(),
            ["athens-1896", "paris-1924", "chamonix-1924", "tokyo-2020", "special-games"]
        );
    }

    #[test]
    fn test_slug_year() {
        assert_eq!(slug_year("tokyo-2020"), Some(2020));
        assert_eq!(slug_year("st-louis-1904"), Some(1904));
        assert_eq!(slug_year("2020"), Some(2020));
        assert_eq!(slug_year("games-20"), None);
        assert_eq!(slug_year("tokyo"), None);
    }

    #[test]
    fn test_sort_by_game() {
        let store = RecordStore::new(vec![
            record("USA", "Swimming", "game1"),
            record("USA", "Swimming", "game2"),
        ]);
        let mut slugs = vec!["game2", "unknown", "game1"];
        store.sort_by_game(&mut slugs, |s| *s);
        assert_eq!(slugs, ["game1", "game2", "unknown"]);
    }

    #[test]
    fn test_distinct_columns() {
        let store = RecordStore::new(vec![
            record("USA", "Swimming", "g1").with_athlete("Katie Ledecky"),
            record("CHN", "Diving", "g1"),
            record("USA", "Athletics", "g1").with_athlete("Allyson Felix"),
            record("USA", "Swimming", "g2").with_athlete("Katie Ledecky"),
        ]);

        assert_eq!(store.countries(), ["CHN", "USA"]);
        assert_eq!(store.disciplines(), ["Athletics", "Diving", "Swimming"]);
        assert_eq!(store.athletes(), ["Allyson Felix", "Katie Ledecky"]);
    }

    #[test]
    fn test_filter() {
        let store = RecordStore::new(vec![
            record("USA", "Swimming", "g1").with_athlete("Katie Ledecky"),
            record("CHN", "Swimming", "g1"),
            record("USA", "Athletics", "g1"),
        ]);

        let filter = RecordFilter {
            country: Some("USA".to_string()),
            ..Default::default()
        };
        assert_eq!(store.filter(&filter).len(), 2);

        let filter = RecordFilter {
            discipline: Some("Swimming".to_string()),
            athlete: Some("Katie Ledecky".to_string()),
            ..Default::default()
        };
        assert_eq!(store.filter(&filter).len(), 1);

        // Exact match only
        let filter = RecordFilter {
            country: Some("usa".to_string()),
            ..Default::default()
        };
        assert!(store.filter(&filter).is_empty());

        assert_eq!(store.filter(&RecordFilter::default()).len(), 3);
    }

    #[test]
    fn test_catalog() {
        let store = RecordStore::new(vec![
            record("USA", "Swimming", "tokyo-2020").with_athlete("Katie Ledecky"),
            record("CHN", "Diving", "rio-2016"),
        ]);

        assert_eq!(store.catalog(Catalog::Countries), ["CHN", "USA"]);
        assert_eq!(store.catalog(Catalog::Athletes), ["Katie Ledecky"]);
        // Games keep chronological order, not alphabetical
        assert_eq!(store.catalog(Catalog::Games), ["tokyo-2020", "rio-2016"]);

        assert_eq!("disciplines".parse::<Catalog>(), Ok(Catalog::Disciplines));
        assert!("medals".parse::<Catalog>().is_err());
    }
}
