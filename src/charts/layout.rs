//! Chart Layout
//! Turns chart series into pixel geometry: plot area, axes with ticks,
//! the line path and one mark per data point or bar.

use crate::charts::model::{ChartData, PanelId};
use crate::charts::scale::{extent, zero_based, BandScale, LinearScale};
use crate::config::{ChartConfig, Margin, Rgb};
use crate::data::{AwardStatus, Record};
use crate::stats::{SubjectCount, YearlyAverage};
use tracing::debug;

/// Inner rectangle the marks are drawn in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(width: u32, height: u32, margin: Margin) -> Self {
        Self {
            left: margin.left as f64,
            top: margin.top as f64,
            width: width
                .saturating_sub(margin.left)
                .saturating_sub(margin.right) as f64,
            height: height
                .saturating_sub(margin.top)
                .saturating_sub(margin.bottom) as f64,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Pixel-space shape, used both for marks and for tooltip hit targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { cx: f64, cy: f64, r: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
}

/// One drawn data element with its hover text.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub shape: Shape,
    pub color: Rgb,
    pub opacity: f64,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis.
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axis {
    pub ticks: Vec<Tick>,
    pub rotate_labels: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePath {
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    pub stroke_width: u32,
}

/// Everything needed to draw one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub panel: PanelId,
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub plot: PlotArea,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub line: Option<LinePath>,
    pub marks: Vec<Mark>,
}

impl ChartLayout {
    pub fn build(data: &ChartData, config: &ChartConfig) -> Self {
        match data {
            ChartData::Line(points) => Self::line(points, config),
            ChartData::Bar(bars) => Self::bar(bars, config),
            ChartData::Scatter(records) => Self::scatter(records, config),
        }
    }

    fn empty(panel: PanelId, config: &ChartConfig, margin: Margin) -> Self {
        Self {
            panel,
            title: panel.title(),
            width: config.width,
            height: config.height,
            plot: PlotArea::new(config.width, config.height, margin),
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            line: None,
            marks: Vec::new(),
        }
    }

    fn line(points: &[YearlyAverage], config: &ChartConfig) -> Self {
        let mut layout = Self::empty(PanelId::Line, config, config.line_margin);
        let plot = layout.plot;

        let x_domain = extent(points.iter().map(|p| p.year as f64)).unwrap_or((0.0, 1.0));
        let x = LinearScale::new(x_domain, (plot.left, plot.right()));
        let y = LinearScale::new(
            zero_based(points.iter().map(|p| p.popularity)),
            (plot.bottom(), plot.top),
        );
        debug!(x = ?x.domain(), y = ?y.domain(), "line chart domains");

        // Whole years only, short spans would otherwise get fractional ticks
        layout.x_axis = Axis {
            ticks: x
                .ticks(config.tick_count)
                .into_iter()
                .filter(|v| (v - v.round()).abs() < 1e-6)
                .map(|v| Tick {
                    position: x.map(v),
                    label: format!("{:.0}", v.round()),
                })
                .collect(),
            rotate_labels: false,
        };
        layout.y_axis = linear_axis(&y, config.tick_count, format_tick);

        let coords: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (x.map(p.year as f64), y.map(p.popularity)))
            .collect();

        layout.marks = points
            .iter()
            .zip(&coords)
            .map(|(p, &(cx, cy))| Mark {
                shape: Shape::Circle {
                    cx,
                    cy,
                    r: config.line_point_radius as f64,
                },
                color: config.line_color,
                opacity: 1.0,
                tooltip: Tooltips::yearly(p.year, p.popularity),
            })
            .collect();

        layout.line = Some(LinePath {
            points: coords,
            color: config.line_color,
            stroke_width: 2,
        });
        layout
    }

    fn bar(bars: &[SubjectCount], config: &ChartConfig) -> Self {
        let mut layout = Self::empty(PanelId::Bar, config, config.bar_margin);
        let plot = layout.plot;

        let band = BandScale::new(
            bars.iter().map(|b| b.subject.clone()).collect(),
            (plot.left, plot.right()),
            config.band_padding,
        );
        let y = LinearScale::new(
            zero_based(bars.iter().map(|b| b.count as f64)),
            (plot.bottom(), plot.top),
        );
        debug!(bands = bars.len(), y = ?y.domain(), "bar chart domains");

        layout.x_axis = Axis {
            ticks: bars
                .iter()
                .filter_map(|b| {
                    band.position(&b.subject).map(|left| Tick {
                        position: left + band.bandwidth() / 2.0,
                        label: b.subject.clone(),
                    })
                })
                .collect(),
            rotate_labels: true,
        };
        layout.y_axis = linear_axis(&y, config.tick_count, format_tick);

        layout.marks = bars
            .iter()
            .filter_map(|b| {
                let left = band.position(&b.subject)?;
                let top = y.map(b.count as f64);
                Some(Mark {
                    shape: Shape::Rect {
                        x: left,
                        y: top,
                        width: band.bandwidth(),
                        height: plot.bottom() - top,
                    },
                    color: config.bar_color,
                    opacity: 1.0,
                    tooltip: Tooltips::subject(&b.subject, b.count),
                })
            })
            .collect();
        layout
    }

    fn scatter(records: &[Record], config: &ChartConfig) -> Self {
        let mut layout = Self::empty(PanelId::Scatter, config, config.scatter_margin);
        let plot = layout.plot;

        let x = LinearScale::new(
            zero_based(records.iter().map(|r| r.length)),
            (plot.left, plot.right()),
        );
        let y = LinearScale::new(
            zero_based(records.iter().map(|r| r.popularity)),
            (plot.bottom(), plot.top),
        );
        debug!(x = ?x.domain(), y = ?y.domain(), "scatter plot domains");

        layout.x_axis = linear_axis(&x, config.tick_count, format_tick);
        layout.y_axis = linear_axis(&y, config.tick_count, format_tick);

        layout.marks = records
            .iter()
            .map(|r| Mark {
                shape: Shape::Circle {
                    cx: x.map(r.length),
                    cy: y.map(r.popularity),
                    r: config.scatter_point_radius as f64,
                },
                color: award_color(r.awards, config),
                opacity: config.scatter_opacity,
                tooltip: Tooltips::film(r),
            })
            .collect();
        layout
    }
}

/// Colour of a scatter point for the award flag.
pub fn award_color(awards: AwardStatus, config: &ChartConfig) -> Rgb {
    match awards {
        AwardStatus::Yes => config.award_yes_color,
        AwardStatus::No => config.award_no_color,
        AwardStatus::Unknown => config.award_unknown_color,
    }
}

fn linear_axis(scale: &LinearScale, count: usize, format: impl Fn(f64) -> String) -> Axis {
    Axis {
        ticks: scale
            .ticks(count)
            .into_iter()
            .map(|v| Tick {
                position: scale.map(v),
                label: format(v),
            })
            .collect(),
        rotate_labels: false,
    }
}

/// Integer ticks print without decimals, others with at most two.
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Hover text for each kind of mark.
pub struct Tooltips;

impl Tooltips {
    pub fn yearly(year: i32, popularity: f64) -> String {
        format!("Year: {year}\nAverage popularity: {popularity:.2}")
    }

    pub fn subject(subject: &str, count: usize) -> String {
        format!("Genre: {subject}\nFilms: {count}")
    }

    pub fn film(record: &Record) -> String {
        let body = format!(
            "Length: {}\nPopularity: {}\nAwards: {}",
            format_tick(record.length),
            format_tick(record.popularity),
            record.awards
        );
        match &record.title {
            Some(title) => format!("{title}\n{body}"),
            None => body,
        }
    }
}
