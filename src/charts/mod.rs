//! Charts module - Chart layout and rendering

mod context;
mod layout;
mod model;
mod plotter;
mod renderer;
mod scale;

pub use context::{embed_tooltips, escape_xml, RenderContext, Tooltip};
pub use layout::{award_color, format_tick, Axis, ChartLayout, Mark, PlotArea, Shape, Tick, Tooltips};
pub use model::{ChartData, PanelId};
pub use plotter::{color32, ChartPlotter};
pub use renderer::{RenderError, StaticChartRenderer};
pub use scale::{extent, nice_step, zero_based, BandScale, LinearScale};
