//! Medal-award record model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A categorical value outside its fixed enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {column} value: {value:?}")]
pub struct ParseCategoryError {
    pub column: &'static str,
    pub value: String,
}

impl ParseCategoryError {
    pub fn new(column: &'static str, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

/// Medal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MedalType {
    Gold,
    Silver,
    Bronze,
}

impl MedalType {
    /// All medal types, in podium order.
    pub const ALL: [MedalType; 3] = [MedalType::Gold, MedalType::Silver, MedalType::Bronze];

    pub fn as_str(&self) -> &'static str {
        match self {
            MedalType::Gold => "GOLD",
            MedalType::Silver => "SILVER",
            MedalType::Bronze => "BRONZE",
        }
    }
}

impl fmt::Display for MedalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MedalType {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "GOLD" => Ok(MedalType::Gold),
            "SILVER" => Ok(MedalType::Silver),
            "BRONZE" => Ok(MedalType::Bronze),
            other => Err(ParseCategoryError::new("medal_type", other)),
        }
    }
}

/// Gender category of an event.
///
/// Only `Men` and `Women` take part in the gender split; `Mixed` and `Open`
/// events are kept so the dataset loads unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventGender {
    Men,
    Women,
    Mixed,
    Open,
}

impl EventGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventGender::Men => "Men",
            EventGender::Women => "Women",
            EventGender::Mixed => "Mixed",
            EventGender::Open => "Open",
        }
    }
}

impl fmt::Display for EventGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventGender {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Men" => Ok(EventGender::Men),
            "Women" => Ok(EventGender::Women),
            "Mixed" => Ok(EventGender::Mixed),
            "Open" => Ok(EventGender::Open),
            other => Err(ParseCategoryError::new("event_gender", other)),
        }
    }
}

/// One medal awarded to one participant in one event at one Games edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalRecord {
    /// Canonical country name (aliases already merged)
    pub country_name: String,

    /// Sport/discipline (e.g., "Swimming")
    pub discipline_title: String,

    /// Event (e.g., "100m freestyle men")
    pub event_title: String,

    /// Event gender, absent for some historical rows
    pub event_gender: Option<EventGender>,

    /// Athlete, absent for team rows
    pub athlete_full_name: Option<String>,

    /// Medal awarded
    pub medal_type: MedalType,

    /// Games edition (e.g., "tokyo-2020")
    pub slug_game: String,
}

impl MedalRecord {
    /// Create a record with no gender and no athlete.
    pub fn new(
        country_name: impl Into<String>,
        discipline_title: impl Into<String>,
        event_title: impl Into<String>,
        medal_type: MedalType,
        slug_game: impl Into<String>,
    ) -> Self {
        Self {
            country_name: country_name.into(),
            discipline_title: discipline_title.into(),
            event_title: event_title.into(),
            event_gender: None,
            athlete_full_name: None,
            medal_type,
            slug_game: slug_game.into(),
        }
    }

    pub fn with_gender(mut self, gender: EventGender) -> Self {
        self.event_gender = Some(gender);
        self
    }

    pub fn with_athlete(mut self, athlete: impl Into<String>) -> Self {
        self.athlete_full_name = Some(athlete.into());
        self
    }
}

/// Zero-filled medal counts by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalCounts {
    #[serde(rename = "GOLD")]
    pub gold: u32,
    #[serde(rename = "SILVER")]
    pub silver: u32,
    #[serde(rename = "BRONZE")]
    pub bronze: u32,
}

impl MedalCounts {
    pub fn new(gold: u32, silver: u32, bronze: u32) -> Self {
        Self {
            gold,
            silver,
            bronze,
        }
    }

    /// Count one medal.
    pub fn add(&mut self, medal: MedalType) {
        match medal {
            MedalType::Gold => self.gold += 1,
            MedalType::Silver => self.silver += 1,
            MedalType::Bronze => self.bronze += 1,
        }
    }

    pub fn get(&self, medal: MedalType) -> u32 {
        match medal {
            MedalType::Gold => self.gold,
            MedalType::Silver => self.silver,
            MedalType::Bronze => self.bronze,
        }
    }

    pub fn total(&self) -> u32 {
        self.gold + self.silver + self.bronze
    }

    /// Element-wise sum.
    pub fn merged(&self, other: &MedalCounts) -> MedalCounts {
        MedalCounts::new(
            self.gold + other.gold,
            self.silver + other.silver,
            self.bronze + other.bronze,
        )
    }
}

/// Zero-filled row counts by event gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    pub men: u32,
    pub women: u32,
    pub mixed: u32,
    pub open: u32,
}

impl GenderCounts {
    pub fn add(&mut self, gender: EventGender) {
        match gender {
            EventGender::Men => self.men += 1,
            EventGender::Women => self.women += 1,
            EventGender::Mixed => self.mixed += 1,
            EventGender::Open => self.open += 1,
        }
    }
}
