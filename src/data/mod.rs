//! Data module - CSV loading and row validation

mod loader;
mod record;

pub use loader::{
    DataLoader, LoadReport, LoaderError, RejectReason, RejectedRow, REQUIRED_COLUMNS, TITLE_COLUMN,
};
pub use record::{AwardStatus, Record};
