//! Dashboard Controller
//! Owns the loaded dataset, the visible panel and each panel's rendered state.
//! A panel is rendered the first time it is selected and reused afterwards.

use crate::charts::{ChartData, PanelId, RenderContext, RenderError, StaticChartRenderer, Tooltip};
use crate::config::ChartConfig;
use crate::data::Record;
use std::sync::Arc;
use tracing::{debug, info};

/// Output of rendering one panel.
#[derive(Debug, Clone)]
pub struct RenderedPanel {
    pub chart: ChartData,
    pub svg: String,
    pub tooltips: Vec<Tooltip>,
    pub marks: usize,
}

pub struct Dashboard {
    records: Arc<[Record]>,
    config: ChartConfig,
    active: PanelId,
    panels: [Option<RenderedPanel>; 3],
}

impl Dashboard {
    /// New dashboard with the line panel visible and nothing rendered yet.
    pub fn new(records: impl Into<Arc<[Record]>>, config: ChartConfig) -> Self {
        Self {
            records: records.into(),
            config,
            active: PanelId::Line,
            panels: [None, None, None],
        }
    }

    pub fn records(&self) -> &Arc<[Record]> {
        &self.records
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The one visible panel.
    pub fn active(&self) -> PanelId {
        self.active
    }

    pub fn is_visible(&self, panel: PanelId) -> bool {
        self.active == panel
    }

    pub fn is_rendered(&self, panel: PanelId) -> bool {
        self.panels[panel.index()].is_some()
    }

    pub fn panel(&self, panel: PanelId) -> Option<&RenderedPanel> {
        self.panels[panel.index()].as_ref()
    }

    /// Make `panel` the visible one, rendering it on first use.
    ///
    /// Returns `true` if the panel was drawn by this call.
    pub fn select(&mut self, panel: PanelId) -> Result<bool, RenderError> {
        if self.active != panel {
            debug!(from = %self.active, to = %panel, "switching panel");
        }
        self.active = panel;
        self.ensure_rendered(panel)
    }

    /// Render every panel not rendered yet. The visible panel is unchanged.
    pub fn render_all(&mut self) -> Result<usize, RenderError> {
        let mut rendered = 0;
        for panel in PanelId::ALL {
            if self.ensure_rendered(panel)? {
                rendered += 1;
            }
        }
        Ok(rendered)
    }

    /// Marks drawn so far across all rendered panels.
    pub fn marks_drawn(&self) -> usize {
        self.panels.iter().flatten().map(|p| p.marks).sum()
    }

    fn ensure_rendered(&mut self, panel: PanelId) -> Result<bool, RenderError> {
        if self.is_rendered(panel) {
            debug!(%panel, "panel already rendered");
            return Ok(false);
        }

        let chart = ChartData::build(panel, &self.records);
        let mut ctx = RenderContext::new(&self.config);
        let svg = StaticChartRenderer::render_svg(&chart, &mut ctx)?;
        let marks = ctx.marks_drawn();

        info!(%panel, marks, "panel rendered");
        self.panels[panel.index()] = Some(RenderedPanel {
            chart,
            svg,
            tooltips: ctx.into_tooltips(),
            marks,
        });
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AwardStatus;

    fn dashboard() -> Dashboard {
        let records = vec![
            Record::new(2000, 90.0, 50.0, "Comedy", AwardStatus::Yes),
            Record::new(2000, 95.0, 70.0, "Drama", AwardStatus::No),
            Record::new(2001, 80.0, 40.0, "Comedy", AwardStatus::No),
        ];
        Dashboard::new(records, ChartConfig::default())
    }

    #[test]
    fn starts_on_line_panel_unrendered() {
        let dashboard = dashboard();
        assert_eq!(dashboard.active(), PanelId::Line);
        assert!(PanelId::ALL.iter().all(|p| !dashboard.is_rendered(*p)));
        assert_eq!(dashboard.marks_drawn(), 0);
    }

    #[test]
    fn second_select_draws_nothing_new() {
        let mut dashboard = dashboard();

        assert!(dashboard.select(PanelId::Scatter).unwrap());
        let marks = dashboard.marks_drawn();
        let svg = dashboard.panel(PanelId::Scatter).unwrap().svg.clone();
        assert_eq!(marks, 3);

        assert!(!dashboard.select(PanelId::Scatter).unwrap());
        assert_eq!(dashboard.marks_drawn(), marks);
        assert_eq!(dashboard.panel(PanelId::Scatter).unwrap().svg, svg);
    }

    #[test]
    fn exactly_one_panel_visible() {
        let mut dashboard = dashboard();
        dashboard.select(PanelId::Bar).unwrap();
        dashboard.select(PanelId::Line).unwrap();

        let visible: Vec<PanelId> = PanelId::ALL
            .into_iter()
            .filter(|p| dashboard.is_visible(*p))
            .collect();
        assert_eq!(visible, vec![PanelId::Line]);
        assert!(dashboard.is_rendered(PanelId::Bar));
        assert!(!dashboard.is_rendered(PanelId::Scatter));
    }

    #[test]
    fn render_all_skips_rendered_panels() {
        let mut dashboard = dashboard();
        dashboard.select(PanelId::Bar).unwrap();

        assert_eq!(dashboard.render_all().unwrap(), 2);
        assert_eq!(dashboard.active(), PanelId::Bar);
        // 2 yearly points + 2 bars + 3 films
        assert_eq!(dashboard.marks_drawn(), 7);
        assert_eq!(dashboard.render_all().unwrap(), 0);
        assert_eq!(dashboard.marks_drawn(), 7);
    }
}
