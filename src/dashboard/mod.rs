//! Dashboard module - panel selection and report output

mod controller;
mod page;

pub use controller::{Dashboard, RenderedPanel};
pub use page::{render_page, OutputFormat, ReportWriter, INDEX_FILE};
