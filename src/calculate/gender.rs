//! Discipline gender orientation.

use tracing::debug;

use crate::models::{GenderSplit, MedalRecord, Orientation, OrientationReport};
use crate::store::RecordStore;

use super::grouping::{aggregate, Aggregation, Category, GroupKey};
use super::AnalyticsError;

/// Men/women split for one discipline, or `None` when it has neither.
fn split(discipline: &str, men: u32, women: u32) -> Option<GenderSplit> {
    let orientation = Orientation::classify(men, women)?;
    let total = men + women;

    Some(GenderSplit {
        discipline_title: discipline.to_string(),
        men_count: men,
        women_count: women,
        total_competitors: total,
        male_proportion: men as f64 / total as f64,
        female_proportion: women as f64 / total as f64,
        orientation,
    })
}

/// Classify every discipline by the gender of its medal rows.
///
/// Rows without an event gender are ignored. Mixed and Open rows count for
/// neither side; a discipline with only those is left out.
pub fn gender_orientation(store: &RecordStore) -> Result<OrientationReport, AnalyticsError> {
    let rows: Vec<&MedalRecord> = store
        .records()
        .iter()
        .filter(|r| r.event_gender.is_some())
        .collect();
    if rows.is_empty() {
        return Err(AnalyticsError::empty("gendered events"));
    }

    let table = aggregate(
        rows,
        &[GroupKey::Discipline],
        Aggregation::ValueCounts(Category::Gender),
    )?;

    let mut splits: Vec<GenderSplit> = table
        .iter()
        .filter_map(|row| {
            let discipline = row.key_at(0)?;
            let counts = row.value.genders()?;
            split(discipline, counts.men, counts.women)
        })
        .collect();
    if splits.is_empty() {
        return Err(AnalyticsError::empty("men's or women's events"));
    }
    splits.sort_by(|a, b| a.discipline_title.cmp(&b.discipline_title));

    let mut report = OrientationReport::default();
    for s in splits {
        match s.orientation {
            Orientation::Balanced => report.balanced.push(s),
            Orientation::MaleOriented => report.male_oriented.push(s),
            Orientation::FemaleOriented => report.female_oriented.push(s),
        }
    }

    debug!(
        balanced = report.balanced.len(),
        male_oriented = report.male_oriented.len(),
        female_oriented = report.female_oriented.len(),
        "gender orientation"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventGender, MedalType};
    use std::collections::HashSet;

    fn rows(discipline: &str, gender: Option<EventGender>, n: usize) -> Vec<MedalRecord> {
        (0..n)
            .map(|i| {
                let record = MedalRecord::new(
                    "USA",
                    discipline,
                    format!("{discipline} {i}"),
                    MedalType::Gold,
                    "g1",
                );
                match gender {
                    Some(g) => record.with_gender(g),
                    None => record,
                }
            })
            .collect()
    }

    fn store(parts: Vec<Vec<MedalRecord>>) -> RecordStore {
        RecordStore::new(parts.into_iter().flatten().collect())
    }

    #[test]
    fn test_men_only_is_male_oriented() {
        let store = store(vec![rows("Wrestling", Some(EventGender::Men), 10)]);
        let report = gender_orientation(&store).unwrap();

        let wrestling = report.get("Wrestling").unwrap();
        assert_eq!(wrestling.orientation, Orientation::MaleOriented);
        assert_eq!(wrestling.women_count, 0);
        assert_eq!(wrestling.male_proportion, 1.0);
        assert_eq!(wrestling.female_proportion, 0.0);
        assert_eq!(report.male_oriented.len(), 1);
    }

    #[test]
    fn test_women_only_is_female_oriented() {
        let store = store(vec![rows("Softball", Some(EventGender::Women), 4)]);
        let report = gender_orientation(&store).unwrap();
        assert_eq!(report.female_oriented[0].discipline_title, "Softball");
    }

    #[test]
    fn test_equal_counts_are_balanced_only() {
        let store = store(vec![
            rows("Tennis", Some(EventGender::Men), 3),
            rows("Tennis", Some(EventGender::Women), 3),
        ]);
        let report = gender_orientation(&store).unwrap();

        assert_eq!(report.balanced.len(), 1);
        assert_eq!(report.balanced[0].male_proportion, 0.5);
        assert!(report.male_oriented.is_empty());
        assert!(report.female_oriented.is_empty());
    }

    #[test]
    fn test_majority_rules() {
        let store = store(vec![
            rows("Boxing", Some(EventGender::Men), 7),
            rows("Boxing", Some(EventGender::Women), 3),
            rows("Gymnastics", Some(EventGender::Men), 2),
            rows("Gymnastics", Some(EventGender::Women), 5),
        ]);
        let report = gender_orientation(&store).unwrap();

        assert_eq!(
            report.get("Boxing").unwrap().orientation,
            Orientation::MaleOriented
        );
        assert!((report.get("Boxing").unwrap().male_proportion - 0.7).abs() < 1e-9);
        assert_eq!(
            report.get("Gymnastics").unwrap().orientation,
            Orientation::FemaleOriented
        );
    }

    #[test]
    fn test_null_and_mixed_rows_are_ignored() {
        let store = store(vec![
            rows("Sailing", None, 20),
            rows("Sailing", Some(EventGender::Men), 1),
            rows("Equestrian", Some(EventGender::Mixed), 6),
            rows("Equestrian", Some(EventGender::Open), 2),
        ]);
        let report = gender_orientation(&store).unwrap();

        let sailing = report.get("Sailing").unwrap();
        assert_eq!(sailing.total_competitors, 1);
        assert_eq!(sailing.orientation, Orientation::MaleOriented);
        assert!(report.get("Equestrian").is_none());
    }

    #[test]
    fn test_partitions_are_disjoint_and_exhaustive() {
        let store = store(vec![
            rows("Archery", Some(EventGender::Men), 2),
            rows("Archery", Some(EventGender::Women), 2),
            rows("Boxing", Some(EventGender::Men), 9),
            rows("Diving", Some(EventGender::Women), 5),
            rows("Diving", Some(EventGender::Men), 4),
            rows("Fencing", Some(EventGender::Men), 6),
            rows("Fencing", Some(EventGender::Women), 1),
        ]);
        let report = gender_orientation(&store).unwrap();

        let mut seen = HashSet::new();
        for split in report
            .balanced
            .iter()
            .chain(&report.male_oriented)
            .chain(&report.female_oriented)
        {
            assert!(seen.insert(split.discipline_title.clone()));
        }
        assert_eq!(seen.len(), 4);
        assert_eq!(report.balanced[0].discipline_title, "Archery");
        assert_eq!(report.female_oriented[0].discipline_title, "Diving");
        assert_eq!(report.male_oriented.len(), 2);
    }

    #[test]
    fn test_no_gendered_rows() {
        let untagged = store(vec![rows("Sailing", None, 3)]);
        assert!(gender_orientation(&untagged).unwrap_err().is_empty_result());

        let mixed = store(vec![rows("Equestrian", Some(EventGender::Mixed), 3)]);
        assert!(gender_orientation(&mixed).unwrap_err().is_empty_result());
    }
}
