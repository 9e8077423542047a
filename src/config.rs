//! Chart Configuration
//! Canvas size, margins, palette and mark sizes, loadable from JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Space around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margin {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// RGB colour, written as `[r, g, b]` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

// CSS named colours
pub const STEEL_BLUE: Rgb = Rgb(70, 130, 180);
pub const DARK_ORANGE: Rgb = Rgb(255, 140, 0);
pub const GREEN: Rgb = Rgb(0, 128, 0);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const GRAY: Rgb = Rgb(128, 128, 128);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Canvas width including margins.
    pub width: u32,
    /// Canvas height including margins.
    pub height: u32,
    pub line_margin: Margin,
    pub bar_margin: Margin,
    pub scatter_margin: Margin,
    /// Inner and outer padding of the bar bands, as a fraction of the step.
    pub band_padding: f64,
    pub line_point_radius: u32,
    pub scatter_point_radius: u32,
    pub scatter_opacity: f64,
    /// Approximate number of ticks per linear axis.
    pub tick_count: usize,
    pub line_color: Rgb,
    pub bar_color: Rgb,
    pub award_yes_color: Rgb,
    pub award_no_color: Rgb,
    pub award_unknown_color: Rgb,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 400,
            line_margin: Margin::new(40, 30, 40, 60),
            bar_margin: Margin::new(40, 30, 100, 60),
            scatter_margin: Margin::new(40, 30, 50, 60),
            band_padding: 0.2,
            line_point_radius: 4,
            scatter_point_radius: 5,
            scatter_opacity: 0.7,
            tick_count: 10,
            line_color: STEEL_BLUE,
            bar_color: DARK_ORANGE,
            award_yes_color: GREEN,
            award_no_color: RED,
            award_unknown_color: GRAY,
        }
    }
}

impl ChartConfig {
    /// Load a JSON config; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: ChartConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, m) in [
            ("line_margin", self.line_margin),
            ("bar_margin", self.bar_margin),
            ("scatter_margin", self.scatter_margin),
        ] {
            // saturating_add: huge margins must fail here, not wrap
            if m.left.saturating_add(m.right) >= self.width
                || m.top.saturating_add(m.bottom) >= self.height
            {
                return Err(ConfigError::Invalid(format!(
                    "{name} leaves no plot area in a {}x{} canvas",
                    self.width, self.height
                )));
            }
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(ConfigError::Invalid(format!(
                "band_padding must be in [0, 1), got {}",
                self.band_padding
            )));
        }
        if !(0.0..=1.0).contains(&self.scatter_opacity) {
            return Err(ConfigError::Invalid(format!(
                "scatter_opacity must be in [0, 1], got {}",
                self.scatter_opacity
            )));
        }
        if self.tick_count == 0 {
            return Err(ConfigError::Invalid("tick_count must be positive".into()));
        }
        Ok(())
    }
}
