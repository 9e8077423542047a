//! Stats module - grouping reductions behind the charts

mod aggregator;

pub use aggregator::{Aggregator, SubjectCount, Summary, YearlyAverage};
