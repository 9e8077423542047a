//! Static Chart Renderer
//! Draws a `ChartLayout` with plotters, in pixel space.
//!
//! Layout of every panel:
//! 1. Title centered above the plot area
//! 2. Bottom and left axes with ticks and labels
//! 3. Line path (line chart only)
//! 4. Marks: points or bars, each registering a tooltip in the render context

use crate::charts::context::{embed_tooltips, RenderContext};
use crate::charts::layout::{ChartLayout, Shape};
use crate::charts::ChartData;
use crate::config::Rgb;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const FONT: &str = "sans-serif";
const TITLE_SIZE: u32 = 16;
const LABEL_SIZE: u32 = 11;
const TICK_SIZE: i32 = 6;
const TICK_PADDING: i32 = 3;
const AXIS_COLOR: RGBColor = BLACK;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a panel to an SVG document with hover tooltips embedded.
    pub fn render_svg(data: &ChartData, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
        let layout = ChartLayout::build(data, ctx.config);
        let first_tooltip = ctx.tooltips().len();

        let mut buffer = String::new();
        {
            let root =
                SVGBackend::with_string(&mut buffer, (layout.width, layout.height)).into_drawing_area();
            Self::draw(&root, &layout, ctx).map_err(|e| RenderError::Drawing(e.to_string()))?;
            root.present()
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
        }

        debug!(panel = %layout.panel, marks = layout.marks.len(), "rendered svg");
        Ok(embed_tooltips(&buffer, &ctx.tooltips()[first_tooltip..]))
    }

    /// Render a panel to a PNG file.
    pub fn render_png(
        data: &ChartData,
        ctx: &mut RenderContext<'_>,
        path: &Path,
    ) -> Result<(), RenderError> {
        let layout = ChartLayout::build(data, ctx.config);

        let root = BitMapBackend::new(path, (layout.width, layout.height)).into_drawing_area();
        Self::draw(&root, &layout, ctx).map_err(|e| RenderError::Drawing(e.to_string()))?;
        root.present()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        debug!(panel = %layout.panel, path = %path.display(), "rendered png");
        Ok(())
    }

    /// Draw a full panel onto any plotters backend.
    pub fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        layout: &ChartLayout,
        ctx: &mut RenderContext<'_>,
    ) -> DrawResult<DB> {
        root.fill(&WHITE)?;

        Self::draw_title(root, layout)?;
        Self::draw_x_axis(root, layout)?;
        Self::draw_y_axis(root, layout)?;

        if let Some(line) = &layout.line {
            let points: Vec<(i32, i32)> = line.points.iter().copied().map(px).collect();
            root.draw(&PathElement::new(
                points,
                rgb(line.color).stroke_width(line.stroke_width),
            ))?;
        }

        for mark in &layout.marks {
            let style = rgb(mark.color).mix(mark.opacity).filled();
            match mark.shape {
                Shape::Circle { cx, cy, r } => {
                    root.draw(&Circle::new(px((cx, cy)), r.round() as u32, style))?;
                }
                Shape::Rect {
                    x,
                    y,
                    width,
                    height,
                } => {
                    root.draw(&Rectangle::new(
                        [px((x, y)), px((x + width, y + height))],
                        style,
                    ))?;
                }
            }
            ctx.mark_drawn(mark.shape, &mark.tooltip);
        }

        Ok(())
    }

    fn draw_title<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, layout: &ChartLayout) -> DrawResult<DB> {
        let style = TextStyle::from((FONT, TITLE_SIZE).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        let x = (layout.plot.left + layout.plot.width / 2.0).round() as i32;
        let y = (layout.plot.top - 10.0).round() as i32;
        root.draw(&Text::new(layout.title.to_string(), (x, y), style))
    }

    fn draw_x_axis<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, layout: &ChartLayout) -> DrawResult<DB> {
        let plot = layout.plot;
        let y = plot.bottom().round() as i32;

        root.draw(&PathElement::new(
            vec![px((plot.left, plot.bottom())), px((plot.right(), plot.bottom()))],
            AXIS_COLOR,
        ))?;

        let font = (FONT, LABEL_SIZE).into_font();
        let style = if layout.x_axis.rotate_labels {
            TextStyle::from(font.transform(FontTransform::Rotate270))
                .color(&BLACK)
                .pos(Pos::new(HPos::Right, VPos::Center))
        } else {
            TextStyle::from(font)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top))
        };

        for tick in &layout.x_axis.ticks {
            let x = tick.position.round() as i32;
            root.draw(&PathElement::new(vec![(x, y), (x, y + TICK_SIZE)], AXIS_COLOR))?;
            root.draw(&Text::new(
                tick.label.clone(),
                (x, y + TICK_SIZE + TICK_PADDING),
                style.clone(),
            ))?;
        }
        Ok(())
    }

    fn draw_y_axis<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, layout: &ChartLayout) -> DrawResult<DB> {
        let plot = layout.plot;
        let x = plot.left.round() as i32;

        root.draw(&PathElement::new(
            vec![px((plot.left, plot.top)), px((plot.left, plot.bottom()))],
            AXIS_COLOR,
        ))?;

        let style = TextStyle::from((FONT, LABEL_SIZE).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));

        for tick in &layout.y_axis.ticks {
            let y = tick.position.round() as i32;
            root.draw(&PathElement::new(vec![(x - TICK_SIZE, y), (x, y)], AXIS_COLOR))?;
            root.draw(&Text::new(
                tick.label.clone(),
                (x - TICK_SIZE - TICK_PADDING, y),
                style.clone(),
            ))?;
        }
        Ok(())
    }
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn px((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::data::{AwardStatus, Record};
    use crate::stats::Aggregator;
    use std::sync::Arc;

    fn records() -> Arc<[Record]> {
        vec![
            Record::new(1990, 111.0, 68.0, "Drama", AwardStatus::No),
            Record::new(1991, 94.0, 79.0, "Comedy", AwardStatus::Yes),
            Record::new(1991, 100.0, 20.0, "Drama", AwardStatus::No),
        ]
        .into()
    }

    #[test]
    fn svg_has_title_and_one_tooltip_per_mark() {
        let config = ChartConfig::default();
        let mut ctx = RenderContext::new(&config);
        let data = ChartData::Scatter(records());

        let svg = StaticChartRenderer::render_svg(&data, &mut ctx).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Film Length vs Popularity"));
        assert_eq!(svg.matches("<title>").count(), 3);
        assert_eq!(ctx.marks_drawn(), 3);
    }

    #[test]
    fn bar_svg_labels_every_subject() {
        let config = ChartConfig::default();
        let mut ctx = RenderContext::new(&config);
        let data = ChartData::Bar(Aggregator::subject_count(&records()));

        let svg = StaticChartRenderer::render_svg(&data, &mut ctx).unwrap();

        // background, two bars, two tooltip targets
        assert!(svg.matches("<rect").count() >= 4);
        assert!(svg.contains("Genre: Drama\nFilms: 2"));
        // genre labels stand vertical under their bars
        assert!(svg.contains("rotate(270"));
        assert_eq!(ctx.marks_drawn(), 2);
    }

    #[test]
    fn shared_context_only_embeds_own_tooltips() {
        let config = ChartConfig::default();
        let mut ctx = RenderContext::new(&config);
        let records = records();

        StaticChartRenderer::render_svg(&ChartData::Scatter(Arc::clone(&records)), &mut ctx).unwrap();
        let line = StaticChartRenderer::render_svg(
            &ChartData::Line(Aggregator::yearly_mean(&records)),
            &mut ctx,
        )
        .unwrap();

        assert_eq!(line.matches("<title>").count(), 2);
        assert_eq!(ctx.marks_drawn(), 5);
    }
}
