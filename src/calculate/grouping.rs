//! Group-by-and-aggregate primitive shared by every analytic.
//!
//! Keys are compared as exact strings. Groups come out in order of first
//! appearance of their key tuple, which keeps results reproducible without
//! depending on hash iteration order.

use std::collections::{HashMap, HashSet};

use crate::models::{GenderCounts, MedalCounts, MedalRecord};

use super::AnalyticsError;

/// A column of `MedalRecord` usable as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Country,
    Discipline,
    Event,
    Gender,
    Athlete,
    Game,
}

impl GroupKey {
    /// Value of this column for a record; `None` for null optional columns.
    pub fn extract<'a>(&self, record: &'a MedalRecord) -> Option<&'a str> {
        match self {
            GroupKey::Country => Some(record.country_name.as_str()),
            GroupKey::Discipline => Some(record.discipline_title.as_str()),
            GroupKey::Event => Some(record.event_title.as_str()),
            GroupKey::Gender => record.event_gender.map(|g| g.as_str()),
            GroupKey::Athlete => record.athlete_full_name.as_deref(),
            GroupKey::Game => Some(record.slug_game.as_str()),
        }
    }
}

/// Categorical column broken down by `Aggregation::ValueCounts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    MedalType,
    Gender,
}

/// Aggregation applied per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Rows per group.
    Count,
    /// Distinct non-null values of a column per group.
    CountDistinct(GroupKey),
    /// Rows per category value, zero-filled.
    ValueCounts(Category),
}

/// Aggregated value of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregate {
    Count(u32),
    Distinct(u32),
    Medals(MedalCounts),
    Genders(GenderCounts),
}

impl Aggregate {
    /// Scalar value: rows for `Count`, distinct values for `Distinct`, and
    /// the total across categories for breakdowns.
    pub fn value(&self) -> u32 {
        match self {
            Aggregate::Count(n) | Aggregate::Distinct(n) => *n,
            Aggregate::Medals(m) => m.total(),
            Aggregate::Genders(g) => g.men + g.women + g.mixed + g.open,
        }
    }

    pub fn medals(&self) -> Option<&MedalCounts> {
        match self {
            Aggregate::Medals(m) => Some(m),
            _ => None,
        }
    }

    pub fn genders(&self) -> Option<&GenderCounts> {
        match self {
            Aggregate::Genders(g) => Some(g),
            _ => None,
        }
    }
}

/// One output group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedRow {
    /// Key values, one per grouping column
    pub key: Vec<Option<String>>,
    pub value: Aggregate,
}

impl GroupedRow {
    /// Key value at `index`, `None` when null or out of range.
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.key.get(index).and_then(|k| k.as_deref())
    }
}

/// Result of `aggregate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedTable {
    pub keys: Vec<GroupKey>,
    pub rows: Vec<GroupedRow>,
}

impl GroupedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupedRow> {
        self.rows.iter()
    }

    /// Find the group with exactly these (non-null) key values.
    pub fn get(&self, key: &[&str]) -> Option<&Aggregate> {
        self.rows
            .iter()
            .find(|row| {
                row.key.len() == key.len()
                    && row
                        .key
                        .iter()
                        .zip(key)
                        .all(|(have, want)| have.as_deref() == Some(*want))
            })
            .map(|row| &row.value)
    }
}

enum Accumulator<'a> {
    Count(u32),
    Distinct(HashSet<&'a str>),
    Medals(MedalCounts),
    Genders(GenderCounts),
}

impl<'a> Accumulator<'a> {
    fn new(op: Aggregation) -> Self {
        match op {
            Aggregation::Count => Accumulator::Count(0),
            Aggregation::CountDistinct(_) => Accumulator::Distinct(HashSet::new()),
            Aggregation::ValueCounts(Category::MedalType) => {
                Accumulator::Medals(MedalCounts::default())
            }
            Aggregation::ValueCounts(Category::Gender) => {
                Accumulator::Genders(GenderCounts::default())
            }
        }
    }

    fn push(&mut self, record: &'a MedalRecord, op: Aggregation) {
        match (self, op) {
            (Accumulator::Count(n), _) => *n += 1,
            (Accumulator::Distinct(set), Aggregation::CountDistinct(column)) => {
                if let Some(value) = column.extract(record) {
                    set.insert(value);
                }
            }
            (Accumulator::Medals(counts), _) => counts.add(record.medal_type),
            (Accumulator::Genders(counts), _) => {
                if let Some(gender) = record.event_gender {
                    counts.add(gender);
                }
            }
            (Accumulator::Distinct(_), _) => {}
        }
    }

    fn finish(self) -> Aggregate {
        match self {
            Accumulator::Count(n) => Aggregate::Count(n),
            Accumulator::Distinct(set) => Aggregate::Distinct(set.len() as u32),
            Accumulator::Medals(m) => Aggregate::Medals(m),
            Accumulator::Genders(g) => Aggregate::Genders(g),
        }
    }
}

/// Group `records` by `keys` and aggregate each group with `op`.
///
/// Fails with `EmptyResult` when `records` yields nothing.
pub fn aggregate<'a, I>(
    records: I,
    keys: &[GroupKey],
    op: Aggregation,
) -> Result<GroupedTable, AnalyticsError>
where
    I: IntoIterator<Item = &'a MedalRecord>,
{
    let mut index: HashMap<Vec<Option<&'a str>>, usize> = HashMap::new();
    let mut groups: Vec<(Vec<Option<&'a str>>, Accumulator<'a>)> = Vec::new();

    for record in records {
        let key: Vec<Option<&'a str>> = keys.iter().map(|k| k.extract(record)).collect();
        let next = groups.len();
        let slot = *index.entry(key.clone()).or_insert(next);
        if slot == next {
            groups.push((key, Accumulator::new(op)));
        }
        groups[slot].1.push(record, op);
    }

    if groups.is_empty() {
        return Err(AnalyticsError::empty("the requested records"));
    }

    let rows = groups
        .into_iter()
        .map(|(key, acc)| GroupedRow {
            key: key.into_iter().map(|k| k.map(str::to_string)).collect(),
            value: acc.finish(),
        })
        .collect();

    Ok(GroupedTable {
        keys: keys.to_vec(),
        rows,
    })
}

/// Pick the label with the highest count; ties go to the lexically smallest label.
pub fn max_by_count<'a, I>(items: I) -> Option<(&'a str, u32)>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    items.into_iter().fold(None, |best, (label, count)| match best {
        Some((best_label, best_count))
            if best_count > count || (best_count == count && best_label <= label) =>
        {
            Some((best_label, best_count))
        }
        _ => Some((label, count)),
    })
}
