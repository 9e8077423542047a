//! Chart Model
//! Panel identifiers and the series each panel draws.

use crate::data::Record;
use crate::stats::{Aggregator, SubjectCount, YearlyAverage};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// One chart panel, addressed by its task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelId {
    Line,
    Bar,
    Scatter,
}

impl PanelId {
    pub const ALL: [PanelId; 3] = [PanelId::Line, PanelId::Bar, PanelId::Scatter];

    /// Task identifier used by buttons and output file names.
    pub fn task_id(&self) -> &'static str {
        match self {
            PanelId::Line => "line",
            PanelId::Bar => "bar",
            PanelId::Scatter => "scatter",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelId::Line => "Average Film Popularity Over Years",
            PanelId::Bar => "Number of Films per Genre",
            PanelId::Scatter => "Film Length vs Popularity (Green = Awards)",
        }
    }

    /// Short label for tab buttons.
    pub fn tab_label(&self) -> &'static str {
        match self {
            PanelId::Line => "Popularity by Year",
            PanelId::Bar => "Films per Genre",
            PanelId::Scatter => "Length vs Popularity",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            PanelId::Line => 0,
            PanelId::Bar => 1,
            PanelId::Scatter => 2,
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.task_id())
    }
}

impl FromStr for PanelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelId::ALL
            .into_iter()
            .find(|p| p.task_id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown panel {s:?}, expected line, bar or scatter"))
    }
}

/// Series behind one panel.
#[derive(Debug, Clone)]
pub enum ChartData {
    Line(Vec<YearlyAverage>),
    Bar(Vec<SubjectCount>),
    Scatter(Arc<[Record]>),
}

impl ChartData {
    /// Derive the series a panel needs from the loaded records.
    pub fn build(panel: PanelId, records: &Arc<[Record]>) -> Self {
        match panel {
            PanelId::Line => ChartData::Line(Aggregator::yearly_mean(records)),
            PanelId::Bar => ChartData::Bar(Aggregator::subject_count(records)),
            PanelId::Scatter => ChartData::Scatter(Arc::clone(records)),
        }
    }

    pub fn panel(&self) -> PanelId {
        match self {
            ChartData::Line(_) => PanelId::Line,
            ChartData::Bar(_) => PanelId::Bar,
            ChartData::Scatter(_) => PanelId::Scatter,
        }
    }

    /// Number of data marks (points or bars) the panel draws.
    pub fn len(&self) -> usize {
        match self {
            ChartData::Line(points) => points.len(),
            ChartData::Bar(bars) => bars.len(),
            ChartData::Scatter(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AwardStatus;

    #[test]
    fn task_ids_round_trip_through_from_str() {
        for panel in PanelId::ALL {
            assert_eq!(panel.task_id().parse::<PanelId>(), Ok(panel));
        }
        assert_eq!("SCATTER".parse::<PanelId>(), Ok(PanelId::Scatter));
        assert!("pie".parse::<PanelId>().is_err());
    }

    #[test]
    fn build_picks_series_per_panel() {
        let records: Arc<[Record]> = vec![
            Record::new(2000, 90.0, 50.0, "Drama", AwardStatus::Yes),
            Record::new(2000, 95.0, 70.0, "Drama", AwardStatus::No),
            Record::new(2001, 80.0, 40.0, "Comedy", AwardStatus::No),
        ]
        .into();

        let line = ChartData::build(PanelId::Line, &records);
        assert_eq!(line.panel(), PanelId::Line);
        assert_eq!(line.len(), 2);

        let bar = ChartData::build(PanelId::Bar, &records);
        assert_eq!(bar.len(), 2);

        let scatter = ChartData::build(PanelId::Scatter, &records);
        assert_eq!(scatter.len(), 3);
    }
}
