//! Report Writer
//! Writes rendered panels to disk: one SVG (or PNG) per panel and an
//! `index.html` with one tab button per panel, exactly one panel visible.

use crate::charts::{escape_xml, PanelId, RenderContext, RenderError, StaticChartRenderer};
use crate::dashboard::Dashboard;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const INDEX_FILE: &str = "index.html";

/// Image format of the per-panel files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

pub struct ReportWriter {
    out_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(out_dir: &Path) -> Self {
        Self {
            out_dir: out_dir.to_path_buf(),
        }
    }

    /// Write every rendered panel, plus `index.html` for SVG output.
    /// Returns the paths written.
    pub fn write(&self, dashboard: &Dashboard, format: OutputFormat) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(&self.out_dir)?;
        let mut written = Vec::new();

        for panel in PanelId::ALL {
            let Some(rendered) = dashboard.panel(panel) else {
                continue;
            };
            let path = self
                .out_dir
                .join(format!("{}.{}", panel.task_id(), format.extension()));

            match format {
                OutputFormat::Svg => fs::write(&path, &rendered.svg)?,
                OutputFormat::Png => {
                    let mut ctx = RenderContext::new(dashboard.config());
                    StaticChartRenderer::render_png(&rendered.chart, &mut ctx, &path)?;
                }
            }
            written.push(path);
        }

        if format == OutputFormat::Svg && !written.is_empty() {
            let index = self.out_dir.join(INDEX_FILE);
            fs::write(&index, render_page(dashboard))?;
            written.push(index);
        }

        info!(dir = %self.out_dir.display(), files = written.len(), "report written");
        Ok(written)
    }
}

/// HTML page with tab buttons and the rendered panels inlined.
pub fn render_page(dashboard: &Dashboard) -> String {
    let mut buttons = String::new();
    let mut panels = String::new();

    for panel in PanelId::ALL {
        let Some(rendered) = dashboard.panel(panel) else {
            continue;
        };
        let visible = dashboard.is_visible(panel);
        let _ = writeln!(
            buttons,
            "    <button data-task=\"{id}\"{class}>{label}</button>",
            id = panel.task_id(),
            class = if visible { " class=\"active\"" } else { "" },
            label = escape_xml(panel.tab_label()),
        );
        let _ = writeln!(
            panels,
            "  <section class=\"panel\" id=\"{id}\"{hidden}>\n{svg}  </section>",
            id = panel.task_id(),
            hidden = if visible { "" } else { " hidden" },
            svg = rendered.svg,
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Film Charts</title>
  <style>
    body {{ font-family: sans-serif; margin: 24px; }}
    nav button {{ padding: 6px 14px; margin-right: 6px; cursor: pointer; }}
    nav button.active {{ font-weight: bold; }}
  </style>
</head>
<body>
  <nav>
{buttons}  </nav>
{panels}  <script>
    document.querySelectorAll("button[data-task]").forEach((button) => {{
      button.addEventListener("click", () => {{
        document.querySelectorAll(".panel").forEach((p) => {{ p.hidden = p.id !== button.dataset.task; }});
        document.querySelectorAll("button[data-task]").forEach((b) => b.classList.toggle("active", b === button));
      }});
    }});
  </script>
</body>
</html>
"#
    )
}
