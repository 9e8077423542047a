//! Control Panel Widget
//! Left side panel: data source, dataset summary, report export and status.

use crate::data::{LoadReport, RejectedRow};
use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

/// Rejected rows listed before the rest is summarised as a count.
const MAX_REJECTED_SHOWN: usize = 50;

/// Dataset facts shown after a load.
#[derive(Default, Clone)]
pub struct DatasetSummary {
    pub records: usize,
    pub subjects: usize,
    pub years: Option<(i32, i32)>,
    pub rejected: Vec<RejectedRow>,
}

impl DatasetSummary {
    pub fn from_report(report: &LoadReport) -> Self {
        let mut subjects: Vec<&str> = report.records.iter().map(|r| r.subject.as_str()).collect();
        subjects.sort_unstable();
        subjects.dedup();

        let years = report.records.iter().map(|r| r.year).fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        });

        Self {
            records: report.records.len(),
            subjects: subjects.len(),
            years,
            rejected: report.rejected.clone(),
        }
    }
}

/// Left side control panel with file selection and export controls.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub summary: Option<DatasetSummary>,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            summary: None,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update dataset facts after a load
    pub fn update_summary(&mut self, summary: DatasetSummary) {
        self.export_enabled = summary.records > 0;
        self.summary = Some(summary);
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🎬 Film Charts")
                    .size(22.0)
                    .color(Color32::from_rgb(70, 130, 180)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            ui.visuals().text_color()
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📋 Dataset").size(14.0).strong());
        ui.add_space(5.0);

        match &self.summary {
            None => {
                ui.label(RichText::new("No data loaded").color(Color32::GRAY));
            }
            Some(summary) => {
                egui::Grid::new("dataset_summary")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Films:");
                        ui.label(summary.records.to_string());
                        ui.end_row();

                        ui.label("Genres:");
                        ui.label(summary.subjects.to_string());
                        ui.end_row();

                        ui.label("Years:");
                        ui.label(
                            summary
                                .years
                                .map(|(lo, hi)| format!("{lo} – {hi}"))
                                .unwrap_or_else(|| "-".to_string()),
                        );
                        ui.end_row();

                        ui.label("Rejected rows:");
                        ui.label(summary.rejected.len().to_string());
                        ui.end_row();
                    });

                if !summary.rejected.is_empty() {
                    ui.add_space(5.0);
                    ui.collapsing("Rejected rows", |ui| {
                        ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                            for rejected in summary.rejected.iter().take(MAX_REJECTED_SHOWN) {
                                ui.label(
                                    RichText::new(format!("Row {}: {}", rejected.row, rejected.reason))
                                        .size(11.0)
                                        .color(Color32::from_rgb(220, 53, 69)),
                                );
                            }
                            let hidden = summary.rejected.len().saturating_sub(MAX_REJECTED_SHOWN);
                            if hidden > 0 {
                                ui.label(RichText::new(format!("… and {hidden} more")).size(11.0));
                            }
                        });
                    });
                }
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export Report").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportReport;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") || self.status.starts_with("Report") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    ExportReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AwardStatus, Record, RejectReason};

    #[test]
    fn summary_counts_distinct_subjects_and_year_span() {
        let report = LoadReport {
            records: vec![
                Record::new(1995, 90.0, 10.0, "War", AwardStatus::No),
                Record::new(1982, 90.0, 10.0, "Drama", AwardStatus::No),
                Record::new(1990, 90.0, 10.0, "War", AwardStatus::Yes),
            ],
            rejected: vec![RejectedRow {
                row: 4,
                reason: RejectReason::MissingField("Year"),
            }],
        };

        let summary = DatasetSummary::from_report(&report);
        assert_eq!(summary.records, 3);
        assert_eq!(summary.subjects, 2);
        assert_eq!(summary.years, Some((1982, 1995)));
        assert_eq!(summary.rejected.len(), 1);
    }
}
