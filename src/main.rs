//! Film Charts - CLI entry point
//!
//! Subcommands render the three chart panels to disk, print the aggregated
//! summary of a film CSV, or open the interactive desktop viewer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use eframe::egui;
use film_charts::charts::PanelId;
use film_charts::config::ChartConfig;
use film_charts::dashboard::{Dashboard, OutputFormat, ReportWriter, INDEX_FILE};
use film_charts::data::{DataLoader, LoadReport};
use film_charts::gui::FilmChartsApp;
use film_charts::stats::Aggregator;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser)]
#[command(name = "film_charts")]
#[command(about = "Charts for film CSV data: popularity by year, films per genre, length vs popularity", long_about = None)]
struct Cli {
    /// JSON chart configuration
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render chart panels to files
    Render {
        /// Film CSV file
        #[arg(value_name = "CSV")]
        csv: PathBuf,

        /// Directory to write charts into
        #[arg(short, long, default_value = "charts")]
        out_dir: PathBuf,

        /// Image format of the panel files
        #[arg(short, long, value_enum, default_value_t = FormatArg::Svg)]
        format: FormatArg,

        /// Panel to render
        #[arg(short, long, value_enum, default_value_t = PanelArg::All)]
        panel: PanelArg,

        /// Open the result when done
        #[arg(long, default_value_t = false)]
        open: bool,
    },
    /// Print yearly averages, genre counts and rejected rows
    Summary {
        /// Film CSV file
        #[arg(value_name = "CSV")]
        csv: PathBuf,

        /// Print JSON instead of tables
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Open the desktop viewer
    View {
        /// Film CSV file to load on start
        #[arg(value_name = "CSV")]
        csv: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Svg,
    Png,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Svg => OutputFormat::Svg,
            FormatArg::Png => OutputFormat::Png,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PanelArg {
    Line,
    Bar,
    Scatter,
    All,
}

impl PanelArg {
    fn panel(self) -> Option<PanelId> {
        match self {
            PanelArg::Line => Some(PanelId::Line),
            PanelArg::Bar => Some(PanelId::Bar),
            PanelArg::Scatter => Some(PanelId::Scatter),
            PanelArg::All => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => ChartConfig::from_file(path)
            .with_context(|| format!("failed to read chart config {}", path.display()))?,
        None => ChartConfig::default(),
    };
    debug!(width = config.width, height = config.height, "chart config");

    match cli.command {
        Commands::Render {
            csv,
            out_dir,
            format,
            panel,
            open: open_output,
        } => render(&csv, &out_dir, format.into(), panel, open_output, config),
        Commands::Summary { csv, json } => summary(&csv, json),
        Commands::View { csv } => view(csv, config),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).init();
    Ok(())
}

fn load(csv: &Path) -> Result<LoadReport> {
    let report = DataLoader::read_csv(csv)
        .with_context(|| format!("failed to load {}", csv.display()))?;
    if !report.rejected.is_empty() {
        warn!(
            rejected = report.rejected.len(),
            total = report.total_rows(),
            "some rows were rejected"
        );
    }
    Ok(report)
}

fn render(
    csv: &Path,
    out_dir: &Path,
    format: OutputFormat,
    panel: PanelArg,
    open_output: bool,
    config: ChartConfig,
) -> Result<()> {
    let report = load(csv)?;
    let mut dashboard = Dashboard::new(report.records, config);

    match panel.panel() {
        Some(panel) => {
            dashboard
                .select(panel)
                .with_context(|| format!("failed to render {panel} chart"))?;
        }
        None => {
            dashboard.render_all().context("failed to render charts")?;
        }
    }

    let written = ReportWriter::new(out_dir)
        .write(&dashboard, format)
        .with_context(|| format!("failed to write charts to {}", out_dir.display()))?;

    for path in &written {
        println!("{}", path.display());
    }

    if open_output {
        let target = match format {
            OutputFormat::Svg => out_dir.join(INDEX_FILE),
            OutputFormat::Png => out_dir.to_path_buf(),
        };
        info!(path = %target.display(), "opening output");
        open::that(&target).with_context(|| format!("failed to open {}", target.display()))?;
    }
    Ok(())
}

fn summary(csv: &Path, json: bool) -> Result<()> {
    let report = load(csv)?;
    let summary = Aggregator::summarize(&report.records);

    if json {
        let value = serde_json::json!({
            "summary": summary,
            "rejected": report.rejected,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Films: {} ({} rows rejected)", summary.total_records, report.rejected.len());

    println!("\n{:<8} {:>18}", "Year", "Avg popularity");
    for point in &summary.yearly {
        println!("{:<8} {:>18.2}", point.year, point.popularity);
    }

    println!("\n{:<24} {:>6}", "Genre", "Films");
    for bar in &summary.subjects {
        println!("{:<24} {:>6}", bar.subject, bar.count);
    }

    if !report.rejected.is_empty() {
        println!("\nRejected rows:");
        for rejected in &report.rejected {
            println!("  row {}: {}", rejected.row, rejected.reason);
        }
    }
    Ok(())
}

fn view(csv: Option<PathBuf>, config: ChartConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Film Charts"),
        ..Default::default()
    };

    eframe::run_native(
        "Film Charts",
        options,
        Box::new(move |cc| Ok(Box::new(FilmChartsApp::new(cc, config, csv)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
