//! Chart Plotter Module
//! Interactive versions of the three panels using egui_plot.
//! Hovering a point or bar shows the same text as the static tooltips.

use crate::charts::layout::{award_color, Tooltips};
use crate::charts::ChartData;
use crate::config::{ChartConfig, Rgb};
use crate::data::{AwardStatus, Record};
use crate::stats::{SubjectCount, YearlyAverage};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use std::sync::Arc;

const PLOT_HEIGHT: f32 = 420.0;

pub fn color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}

/// Draws chart panels with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn show(ui: &mut egui::Ui, data: &ChartData, config: &ChartConfig) {
        ui.heading(data.panel().title());
        ui.add_space(6.0);

        match data {
            ChartData::Line(points) => Self::draw_line_chart(ui, points, config),
            ChartData::Bar(bars) => Self::draw_bar_chart(ui, bars, config),
            ChartData::Scatter(records) => Self::draw_scatter_plot(ui, records, config),
        }
    }

    /// Yearly average popularity: connected line plus point marks.
    fn draw_line_chart(ui: &mut egui::Ui, points: &[YearlyAverage], config: &ChartConfig) {
        let color = color32(config.line_color);
        let coords: Vec<[f64; 2]> = points
            .iter()
            .map(|p| [p.year as f64, p.popularity])
            .collect();

        Plot::new("line_chart")
            .height(PLOT_HEIGHT)
            .include_y(0.0)
            .x_axis_label("Year")
            .y_axis_label("Average popularity")
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .label_formatter(|name, value| {
                if name.is_empty() {
                    String::new()
                } else {
                    Tooltips::yearly(value.x.round() as i32, value.y)
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(coords.iter().copied()))
                        .color(color)
                        .width(2.0)
                        .name("Average popularity"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(coords.iter().copied()))
                        .radius(config.line_point_radius as f32)
                        .color(color)
                        .name("Year"),
                );
            });
    }

    /// Films per subject, bars in count order.
    fn draw_bar_chart(ui: &mut egui::Ui, bars: &[SubjectCount], config: &ChartConfig) {
        let color = color32(config.bar_color);
        let labels: Vec<String> = bars.iter().map(|b| b.subject.clone()).collect();

        let elements: Vec<Bar> = bars
            .iter()
            .enumerate()
            .map(|(i, b)| {
                Bar::new(i as f64, b.count as f64)
                    .width(1.0 - config.band_padding)
                    .name(&b.subject)
                    .fill(color)
            })
            .collect();

        Plot::new("bar_chart")
            .height(PLOT_HEIGHT)
            .include_y(0.0)
            .allow_zoom(false)
            .allow_drag(false)
            .y_axis_label("Films")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(elements)
                        .color(color)
                        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
                            Tooltips::subject(&bar.name, bar.value.round() as usize)
                        })),
                );
            });
    }

    /// Length vs popularity, one series per award flag.
    fn draw_scatter_plot(ui: &mut egui::Ui, records: &Arc<[Record]>, config: &ChartConfig) {
        let hovered = Arc::clone(records);

        Plot::new("scatter_plot")
            .height(PLOT_HEIGHT)
            .include_x(0.0)
            .include_y(0.0)
            .legend(Legend::default())
            .x_axis_label("Length")
            .y_axis_label("Popularity")
            .label_formatter(move |name, value| {
                if name.is_empty() {
                    return String::new();
                }
                hovered
                    .iter()
                    .find(|r| r.length == value.x && r.popularity == value.y)
                    .map(Tooltips::film)
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for awards in [AwardStatus::Yes, AwardStatus::No, AwardStatus::Unknown] {
                    let coords: Vec<[f64; 2]> = records
                        .iter()
                        .filter(|r| r.awards == awards)
                        .map(|r| [r.length, r.popularity])
                        .collect();
                    if coords.is_empty() {
                        continue;
                    }

                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(coords))
                            .radius(config.scatter_point_radius as f32)
                            .color(
                                color32(award_color(awards, config))
                                    .gamma_multiply(config.scatter_opacity as f32),
                            )
                            .name(format!("Awards: {awards}")),
                    );
                }
            });
    }
}
