//! Film Charts - CSV film data to line, bar and scatter charts
//!
//! Loads a film CSV, aggregates it by year and by subject, and renders
//! three chart panels as SVG/PNG files, an HTML tab page or an egui viewer.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod gui;
pub mod stats;
