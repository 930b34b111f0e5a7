//! Derived statistics models.
//!
//! Field names are the column names consumed by renderers; renaming one is a
//! breaking change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{MedalCounts, ParseCategoryError};

/// Gender orientation of a discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "Balanced")]
    Balanced,
    #[serde(rename = "Male-Oriented")]
    MaleOriented,
    #[serde(rename = "Female-Oriented")]
    FemaleOriented,
}

impl Orientation {
    /// Classify from men/women row counts.
    ///
    /// Returns `None` when both counts are zero. Rules apply in order:
    /// men only, women only, equal counts, then majority.
    pub fn classify(men: u32, women: u32) -> Option<Self> {
        if men == 0 && women == 0 {
            None
        } else if women == 0 {
            Some(Orientation::MaleOriented)
        } else if men == 0 {
            Some(Orientation::FemaleOriented)
        } else if men == women {
            Some(Orientation::Balanced)
        } else if men as f64 / (men + women) as f64 > 0.5 {
            Some(Orientation::MaleOriented)
        } else {
            Some(Orientation::FemaleOriented)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Balanced => "Balanced",
            Orientation::MaleOriented => "Male-Oriented",
            Orientation::FemaleOriented => "Female-Oriented",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Balanced" => Ok(Orientation::Balanced),
            "Male-Oriented" => Ok(Orientation::MaleOriented),
            "Female-Oriented" => Ok(Orientation::FemaleOriented),
            other => Err(ParseCategoryError::new("orientation", other)),
        }
    }
}

/// Participation (row count) of a country in one discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineCount {
    pub country_name: String,
    pub discipline_title: String,
    pub participation_count: u32,
}

/// A discipline in which a country leads all countries by medal count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineLeader {
    pub country_name: String,
    pub discipline_title: String,
    pub medal_count: u32,
}

/// Country overview: where it competes most and where it leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryProfile {
    pub country_name: String,
    pub most_participated: DisciplineCount,
    pub best_disciplines: Vec<DisciplineLeader>,
}

/// Medal total at one Games edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub slug_game: String,
    pub total_medals: u32,
}

/// Medal split at one Games edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMedalCounts {
    pub slug_game: String,
    #[serde(flatten)]
    pub medals: MedalCounts,
    pub total_medals: u32,
}

impl GameMedalCounts {
    pub fn new(slug_game: impl Into<String>, medals: MedalCounts) -> Self {
        Self {
            slug_game: slug_game.into(),
            total_medals: medals.total(),
            medals,
        }
    }
}

/// Country/discipline trajectory row split by medal type.
pub type MedalTypeTrajectoryPoint = GameMedalCounts;

/// Athlete tally row for one Games edition.
pub type AthleteTallyRow = GameMedalCounts;

/// Two countries' totals at a Games edition both medaled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub slug_game: String,
    pub total_medals_country1: u32,
    pub total_medals_country2: u32,
}

/// An athlete's tally across Games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteTally {
    pub athlete_full_name: String,
    pub games: Vec<AthleteTallyRow>,
    pub totals: MedalCounts,
}

impl AthleteTally {
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Two athletes side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteComparison {
    pub athlete1: AthleteTally,
    pub athlete2: AthleteTally,
}

/// Men/women split of a discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderSplit {
    pub discipline_title: String,
    pub men_count: u32,
    pub women_count: u32,
    pub total_competitors: u32,
    pub male_proportion: f64,
    pub female_proportion: f64,
    pub orientation: Orientation,
}

/// Disciplines partitioned by orientation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationReport {
    pub balanced: Vec<GenderSplit>,
    pub male_oriented: Vec<GenderSplit>,
    pub female_oriented: Vec<GenderSplit>,
}

impl OrientationReport {
    /// Disciplines in one partition.
    pub fn partition(&self, orientation: Orientation) -> &[GenderSplit] {
        match orientation {
            Orientation::Balanced => &self.balanced,
            Orientation::MaleOriented => &self.male_oriented,
            Orientation::FemaleOriented => &self.female_oriented,
        }
    }

    /// Look up a discipline across all partitions.
    pub fn get(&self, discipline: &str) -> Option<&GenderSplit> {
        self.balanced
            .iter()
            .chain(&self.male_oriented)
            .chain(&self.female_oriented)
            .find(|s| s.discipline_title == discipline)
    }

    pub fn len(&self) -> usize {
        self.balanced.len() + self.male_oriented.len() + self.female_oriented.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Total medal rows of a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryTotal {
    pub country_name: String,
    pub total_medals: u32,
}

/// Medal rows of a country split by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryMedals {
    pub country_name: String,
    #[serde(flatten)]
    pub medals: MedalCounts,
    pub total_medals: u32,
}

/// Medal rows in one discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineTally {
    pub discipline_title: String,
    pub medal_count: u32,
}

/// Medal rows of a country across a discipline set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDisciplineTotal {
    pub country_name: String,
    /// One entry per discipline of the set, in set order
    pub per_discipline: Vec<DisciplineTally>,
    pub total_medals: u32,
}
