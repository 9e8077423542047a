//! Render Context
//! Per-render state handed to every chart function: the configuration,
//! the tooltips collected from drawn marks and a running mark count.

use crate::charts::layout::Shape;
use crate::config::ChartConfig;

/// Hover text attached to a region of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub target: Shape,
    pub text: String,
}

pub struct RenderContext<'a> {
    pub config: &'a ChartConfig,
    tooltips: Vec<Tooltip>,
    marks_drawn: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a ChartConfig) -> Self {
        Self {
            config,
            tooltips: Vec::new(),
            marks_drawn: 0,
        }
    }

    /// Record one drawn mark and its tooltip.
    pub fn mark_drawn(&mut self, target: Shape, text: &str) {
        self.marks_drawn += 1;
        self.tooltips.push(Tooltip {
            target,
            text: text.to_string(),
        });
    }

    pub fn marks_drawn(&self) -> usize {
        self.marks_drawn
    }

    pub fn tooltips(&self) -> &[Tooltip] {
        &self.tooltips
    }

    pub fn into_tooltips(self) -> Vec<Tooltip> {
        self.tooltips
    }
}

/// Append invisible hover targets carrying `<title>` text to an SVG document.
pub fn embed_tooltips(svg: &str, tooltips: &[Tooltip]) -> String {
    let mut overlay = String::from("<g class=\"tooltips\">\n");
    for tip in tooltips {
        let title = format!("<title>{}</title>", escape_xml(&tip.text));
        let element = match tip.target {
            Shape::Circle { cx, cy, r } => format!(
                "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"transparent\" pointer-events=\"all\">{title}</circle>\n"
            ),
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => format!(
                "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"transparent\" pointer-events=\"all\">{title}</rect>\n"
            ),
        };
        overlay.push_str(&element);
    }
    overlay.push_str("</g>\n");

    match svg.rfind("</svg>") {
        Some(end) => format!("{}{}{}", &svg[..end], overlay, &svg[end..]),
        None => format!("{svg}{overlay}"),
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_counts_marks() {
        let config = ChartConfig::default();
        let mut ctx = RenderContext::new(&config);
        ctx.mark_drawn(Shape::Circle { cx: 1.0, cy: 2.0, r: 3.0 }, "a");
        ctx.mark_drawn(
            Shape::Rect {
                x: 0.0,
                y: 0.0,
                width: 4.0,
                height: 5.0,
            },
            "b",
        );
        assert_eq!(ctx.marks_drawn(), 2);
        assert_eq!(ctx.tooltips()[1].text, "b");
    }

    #[test]
    fn tooltips_are_inserted_before_closing_tag() {
        let svg = "<svg width=\"10\" height=\"10\">\n</svg>\n";
        let tips = vec![Tooltip {
            target: Shape::Circle { cx: 5.0, cy: 5.0, r: 2.0 },
            text: "Fish & <Chips>".to_string(),
        }];
        let out = embed_tooltips(svg, &tips);
        assert!(out.ends_with("</g>\n</svg>\n"));
        assert!(out.contains("<title>Fish &amp; &lt;Chips&gt;</title>"));
        assert!(out.contains("cx=\"5.00\""));
    }
}
