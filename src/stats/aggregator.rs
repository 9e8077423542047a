//! Aggregation Module
//! Derives the two chart series from the film records:
//! mean popularity per year and film count per subject.

use crate::data::Record;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, HashMap};

/// Mean popularity of all films released in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyAverage {
    pub year: i32,
    pub popularity: f64,
}

/// Number of films sharing one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectCount {
    pub subject: String,
    pub count: usize,
}

/// Both derived series plus the record count they were built from.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_records: usize,
    pub yearly: Vec<YearlyAverage>,
    pub subjects: Vec<SubjectCount>,
}

/// Grouping reductions over a slice of records.
pub struct Aggregator;

impl Aggregator {
    /// Mean `Popularity` grouped by `Year`, ascending by year.
    pub fn yearly_mean(records: &[Record]) -> Vec<YearlyAverage> {
        let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
        for record in records {
            by_year.entry(record.year).or_default().push(record.popularity);
        }

        by_year
            .into_iter()
            .map(|(year, values)| YearlyAverage {
                year,
                popularity: values.iter().mean(),
            })
            .collect()
    }

    /// Row count grouped by `Subject`, descending by count.
    ///
    /// Ties keep the order in which each subject first appeared.
    pub fn subject_count(records: &[Record]) -> Vec<SubjectCount> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<SubjectCount> = Vec::new();

        for record in records {
            match index.get(record.subject.as_str()) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(&record.subject, counts.len());
                    counts.push(SubjectCount {
                        subject: record.subject.clone(),
                        count: 1,
                    });
                }
            }
        }

        // sort_by is stable
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    pub fn summarize(records: &[Record]) -> Summary {
        Summary {
            total_records: records.len(),
            yearly: Self::yearly_mean(records),
            subjects: Self::subject_count(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AwardStatus;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn film(year: i32, popularity: f64, subject: &str) -> Record {
        Record::new(year, 100.0, popularity, subject, AwardStatus::No)
    }

    #[test]
    fn yearly_mean_averages_each_year() {
        let records = vec![
            film(2000, 50.0, "Drama"),
            film(2000, 70.0, "Drama"),
            film(2001, 40.0, "Drama"),
        ];
        let yearly = Aggregator::yearly_mean(&records);
        assert_eq!(
            yearly,
            vec![
                YearlyAverage {
                    year: 2000,
                    popularity: 60.0
                },
                YearlyAverage {
                    year: 2001,
                    popularity: 40.0
                },
            ]
        );
    }

    #[test]
    fn yearly_mean_sorts_unordered_input() {
        let records = vec![
            film(1995, 10.0, "War"),
            film(1980, 20.0, "War"),
            film(1995, 11.0, "War"),
            film(1987, 30.0, "War"),
        ];
        let years: Vec<i32> = Aggregator::yearly_mean(&records)
            .iter()
            .map(|y| y.year)
            .collect();
        assert_eq!(years, vec![1980, 1987, 1995]);
        assert_relative_eq!(Aggregator::yearly_mean(&records)[2].popularity, 10.5);
    }

    #[test]
    fn subject_count_orders_by_count() {
        let records = vec![
            film(2000, 1.0, "Comedy"),
            film(2000, 1.0, "Drama"),
            film(2000, 1.0, "Comedy"),
        ];
        assert_eq!(
            Aggregator::subject_count(&records),
            vec![
                SubjectCount {
                    subject: "Comedy".to_string(),
                    count: 2
                },
                SubjectCount {
                    subject: "Drama".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn subject_count_ties_keep_first_seen_order() {
        let records = vec![
            film(2000, 1.0, "Western"),
            film(2000, 1.0, "Horror"),
            film(2000, 1.0, "Action"),
            film(2000, 1.0, "Horror"),
            film(2000, 1.0, "Action"),
            film(2000, 1.0, "Western"),
            film(2000, 1.0, "Music"),
        ];
        let subjects: Vec<String> = Aggregator::subject_count(&records)
            .into_iter()
            .map(|s| s.subject)
            .collect();
        assert_eq!(subjects, vec!["Western", "Horror", "Action", "Music"]);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let summary = Aggregator::summarize(&[]);
        assert_eq!(summary.total_records, 0);
        assert!(summary.yearly.is_empty());
        assert!(summary.subjects.is_empty());
    }

    fn arb_records() -> impl Strategy<Value = Vec<Record>> {
        let subjects = prop::sample::select(vec!["Comedy", "Drama", "War", "Horror", "Music"]);
        prop::collection::vec((1950i32..2000, 0.0f64..100.0, subjects), 0..80).prop_map(|rows| {
            rows.into_iter()
                .map(|(year, popularity, subject)| film(year, popularity, subject))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn yearly_mean_has_one_sorted_entry_per_year(records in arb_records()) {
            let yearly = Aggregator::yearly_mean(&records);
            let distinct: HashSet<i32> = records.iter().map(|r| r.year).collect();
            prop_assert_eq!(yearly.len(), distinct.len());
            prop_assert!(yearly.windows(2).all(|w| w[0].year < w[1].year));
        }

        #[test]
        fn subject_counts_sum_to_record_count(records in arb_records()) {
            let subjects = Aggregator::subject_count(&records);
            let total: usize = subjects.iter().map(|s| s.count).sum();
            prop_assert_eq!(total, records.len());
            prop_assert!(subjects.iter().all(|s| s.count >= 1));
            prop_assert!(subjects.windows(2).all(|w| w[0].count >= w[1].count));
        }
    }
}
