//! Film Charts Viewer Application
//! Main window with control panel and tabbed chart viewer.

use crate::charts::PanelId;
use crate::config::ChartConfig;
use crate::dashboard::{Dashboard, OutputFormat, ReportWriter, INDEX_FILE};
use crate::data::{DataLoader, LoadReport};
use crate::gui::control_panel::DatasetSummary;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(LoadReport),
    Error(String),
}

/// Main application window.
pub struct FilmChartsApp {
    config: ChartConfig,
    dashboard: Option<Dashboard>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl FilmChartsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ChartConfig, csv: Option<PathBuf>) -> Self {
        let mut app = Self {
            config,
            dashboard: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        if let Some(path) = csv {
            app.start_loading(path);
        }
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Read and validate the CSV in a background thread
    fn start_loading(&mut self, path: PathBuf) {
        self.dashboard = None;
        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Validating rows...".to_string()));

            let result = match DataLoader::read_csv(&path) {
                Ok(report) => LoadResult::Complete(report),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };
        let mut should_keep_receiver = true;

        while let Ok(result) = rx.try_recv() {
            match result {
                LoadResult::Progress(status) => {
                    self.control_panel.set_status(&status);
                }
                LoadResult::Complete(report) => {
                    self.finish_loading(report);
                    self.is_loading = false;
                    should_keep_receiver = false;
                }
                LoadResult::Error(e) => {
                    error!(error = %e, "CSV load failed");
                    self.control_panel.set_status(&format!("Error: {}", e));
                    self.is_loading = false;
                    should_keep_receiver = false;
                }
            }
        }

        if should_keep_receiver {
            self.load_rx = Some(rx);
        }
    }

    fn finish_loading(&mut self, report: LoadReport) {
        let summary = DatasetSummary::from_report(&report);
        let mut dashboard = Dashboard::new(report.records, self.config.clone());
        let status = match dashboard.select(PanelId::Line) {
            Ok(_) => format!(
                "Loaded {} films ({} rows rejected)",
                summary.records,
                summary.rejected.len()
            ),
            Err(e) => format!("Error: {}", e),
        };

        self.control_panel.update_summary(summary);
        self.control_panel.set_status(&status);
        self.dashboard = Some(dashboard);
    }

    fn handle_select_panel(&mut self, panel: PanelId) {
        let Some(dashboard) = self.dashboard.as_mut() else {
            return;
        };
        if let Err(e) = dashboard.select(panel) {
            error!(%panel, error = %e, "panel render failed");
            self.control_panel.set_status(&format!("Error: {}", e));
        }
    }

    /// Render every panel and write the HTML report into a chosen folder
    fn handle_export_report(&mut self) {
        let Some(dashboard) = self.dashboard.as_mut() else {
            self.control_panel.set_status("No data loaded");
            return;
        };

        let Some(out_dir) = rfd::FileDialog::new()
            .set_title("Choose report folder")
            .pick_folder()
        else {
            return;
        };

        let result = dashboard
            .render_all()
            .and_then(|_| ReportWriter::new(&out_dir).write(dashboard, OutputFormat::Svg));

        match result {
            Ok(written) => {
                self.control_panel
                    .set_status(&format!("Report written: {} files", written.len()));
                open_report(&out_dir.join(INDEX_FILE));
            }
            Err(e) => {
                error!(error = %e, "report export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

fn open_report(index: &Path) {
    info!(path = %index.display(), "opening report");
    if let Err(e) = open::that(index) {
        warn!(error = %e, "could not open report in browser");
    }
}

impl eframe::App for FilmChartsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::ExportReport => self.handle_export_report(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        let mut selected = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            selected = self.chart_viewer.show(ui, self.dashboard.as_ref());
        });
        if let Some(panel) = selected {
            self.handle_select_panel(panel);
        }
    }
}
