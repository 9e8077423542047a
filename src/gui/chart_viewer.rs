//! Chart Viewer Widget
//! Central panel with one tab per chart. Only the selected panel is drawn;
//! rendering state lives in the `Dashboard`.

use crate::charts::{ChartPlotter, PanelId};
use crate::dashboard::Dashboard;
use egui::{Color32, RichText, ScrollArea};

const CARD_WIDTH: f32 = 780.0;

/// Tab bar plus the visible chart card.
#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the viewer. Returns the tab clicked this frame, if any.
    pub fn show(&mut self, ui: &mut egui::Ui, dashboard: Option<&Dashboard>) -> Option<PanelId> {
        let Some(dashboard) = dashboard else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return None;
        };

        let mut clicked = None;
        ui.horizontal(|ui| {
            for panel in PanelId::ALL {
                let label = RichText::new(panel.tab_label()).size(14.0);
                if ui
                    .selectable_label(dashboard.is_visible(panel), label)
                    .clicked()
                {
                    clicked = Some(panel);
                }
            }
        });
        ui.separator();
        ui.add_space(8.0);

        let active = dashboard.active();
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match dashboard.panel(active) {
                Some(rendered) => {
                    egui::Frame::none()
                        .rounding(8.0)
                        .stroke(egui::Stroke::new(1.0, Color32::from_rgb(70, 130, 180)))
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ui.set_max_width(CARD_WIDTH);
                            if rendered.chart.is_empty() {
                                ui.heading(active.title());
                                ui.label(RichText::new("No rows to plot").color(Color32::GRAY));
                            } else {
                                ChartPlotter::show(ui, &rendered.chart, dashboard.config());
                            }
                        });
                }
                None => {
                    ui.label(RichText::new("Rendering…").color(Color32::GRAY));
                }
            });

        clicked
    }
}
