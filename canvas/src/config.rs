//! Engine configuration parsed from a host-supplied JSON document.
//!
//! Every field has a default, so an empty object (or no document at all)
//! yields the stock whiteboard. Values are validated once at load time; the
//! engine assumes a validated config afterwards.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts;

/// Error returned by [`CanvasConfig::from_json`] and [`CanvasConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid JSON or has the wrong shape.
    #[error("failed to parse canvas config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the engine can't work with.
    #[error("invalid canvas config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub visible: bool,
    /// Distance between lines in world units.
    pub spacing: f64,
    /// Lines span `[-extent, extent]` on both axes.
    pub extent: f64,
    pub color: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            visible: true,
            spacing: consts::GRID_SPACING,
            extent: consts::GRID_EXTENT,
            color: consts::GRID_COLOR.to_string(),
        }
    }
}

/// Default element styles and selection chrome.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub rect_color: String,
    pub pencil_color: String,
    pub pencil_width: f64,
    pub text_color: String,
    pub font_size: f64,
    pub font_family: String,
    pub selection_color: String,
    /// Selection outline width in screen pixels.
    pub selection_width: f64,
    pub min_stroke_width: f64,
    pub max_stroke_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            rect_color: consts::RECT_COLOR.to_string(),
            pencil_color: consts::PENCIL_COLOR.to_string(),
            pencil_width: consts::PENCIL_WIDTH,
            text_color: consts::TEXT_COLOR.to_string(),
            font_size: consts::FONT_SIZE,
            font_family: consts::FONT_FAMILY.to_string(),
            selection_color: consts::SELECTION_COLOR.to_string(),
            selection_width: consts::SELECTION_WIDTH_PX,
            min_stroke_width: consts::MIN_STROKE_WIDTH,
            max_stroke_width: consts::MAX_STROKE_WIDTH,
        }
    }
}

impl StyleConfig {
    /// CSS font shorthand for a text element of `size` pixels.
    #[must_use]
    pub fn font(&self, size: f64) -> String {
        format!("{size}px {}", self.font_family)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// `localStorage` key holding the element list.
    pub storage_key: String,
    /// Zoom exponent per wheel event.
    pub zoom_intensity: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Plain wheel pans instead of zooming; ctrl/meta+wheel still zooms.
    pub wheel_pans: bool,
    /// New rectangles get a random hue instead of `style.rect_color`.
    pub random_rect_colors: bool,
    /// Draw rectangle outlines in a hand-drawn style.
    pub sketchy: bool,
    /// `log` level name used when the wasm entry point installs the console logger.
    pub log_level: String,
    pub grid: GridConfig,
    pub style: StyleConfig,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            storage_key: consts::DEFAULT_STORAGE_KEY.to_string(),
            zoom_intensity: consts::DEFAULT_ZOOM_INTENSITY,
            min_scale: consts::DEFAULT_MIN_SCALE,
            max_scale: consts::DEFAULT_MAX_SCALE,
            wheel_pans: false,
            random_rect_colors: true,
            sketchy: false,
            log_level: "info".to_string(),
            grid: GridConfig::default(),
            style: StyleConfig::default(),
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(invalid("storage_key", "must not be empty"));
        }
        if !(self.zoom_intensity.is_finite() && self.zoom_intensity > 0.0) {
            return Err(invalid("zoom_intensity", format!("must be positive, got {}", self.zoom_intensity)));
        }
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(invalid("min_scale", format!("must be positive, got {}", self.min_scale)));
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return Err(invalid("max_scale", format!("must be >= min_scale, got {}", self.max_scale)));
        }
        if !(self.grid.spacing.is_finite() && self.grid.spacing > 0.0) {
            return Err(invalid("grid.spacing", format!("must be positive, got {}", self.grid.spacing)));
        }
        if !(self.grid.extent.is_finite() && self.grid.extent >= 0.0) {
            return Err(invalid("grid.extent", format!("must not be negative, got {}", self.grid.extent)));
        }
        let lines = crate::path::grid_line_count(self.grid.spacing, self.grid.extent);
        if lines > consts::MAX_GRID_LINES as f64 {
            return Err(invalid(
                "grid.spacing",
                format!("grid would draw {lines} lines per axis, max {}", consts::MAX_GRID_LINES),
            ));
        }
        let style = &self.style;
        if !(style.min_stroke_width > 0.0 && style.min_stroke_width <= style.max_stroke_width) {
            return Err(invalid(
                "style.min_stroke_width",
                format!("must be positive and <= max_stroke_width, got {}", style.min_stroke_width),
            ));
        }
        if !(style.font_size.is_finite() && style.font_size > 0.0) {
            return Err(invalid("style.font_size", format!("must be positive, got {}", style.font_size)));
        }
        if !(style.pencil_width.is_finite() && style.pencil_width > 0.0) {
            return Err(invalid("style.pencil_width", format!("must be positive, got {}", style.pencil_width)));
        }
        Ok(())
    }

    /// The configured log level, falling back to `Info` for unknown names.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}
