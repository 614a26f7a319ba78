//! Widget configuration and style attributes.

use crate::color::TrackColor;
use crate::error::{CoverError, CoverResult};
use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Degrees in one full revolution.
pub const FULL_ANGLE: f64 = 360.0;
/// Half a revolution; the settle direction flips past this angle.
pub const HALF_ANGLE: f64 = FULL_ANGLE / 2.0;

/// Immutable widget configuration, injected at construction.
///
/// Sizes are in density-independent units and multiplied by `density`
/// to get pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    /// Display density (pixels per dp).
    pub density: f64,
    /// Spacing between record rings, in dp.
    pub track_size: f64,
    /// Stroke width of each ring, in dp.
    pub track_width: f64,
    /// Ring color used when no style attribute sets one.
    pub track_color: TrackColor,
    /// Time for one full revolution while spinning, in milliseconds.
    pub rotation_period_ms: u64,
    /// Duration of a shape morph, in milliseconds.
    pub morph_duration_ms: u64,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            track_size: 10.0,
            track_width: 1.0,
            track_color: TrackColor::DEFAULT,
            rotation_period_ms: 2500,
            morph_duration_ms: 300,
        }
    }
}

impl CoverConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display density.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Set the default ring color.
    pub fn with_track_color(mut self, color: TrackColor) -> Self {
        self.track_color = color;
        self
    }

    /// Set the morph duration.
    pub fn with_morph_duration(mut self, duration: Duration) -> Self {
        self.morph_duration_ms = duration.as_millis() as u64;
        self
    }

    /// Ring spacing in pixels.
    pub fn track_size_px(&self) -> f64 {
        self.track_size * self.density
    }

    /// Ring stroke width in pixels.
    pub fn track_width_px(&self) -> f64 {
        self.track_width * self.density
    }

    /// Time for one full revolution.
    pub fn rotation_period(&self) -> Duration {
        Duration::from_millis(self.rotation_period_ms)
    }

    /// Duration of a shape morph.
    pub fn morph_duration(&self) -> Duration {
        Duration::from_millis(self.morph_duration_ms)
    }

    /// Check the values that would make geometry or rotation degenerate.
    pub fn validate(&self) -> CoverResult<()> {
        if !(self.density > 0.0) {
            return Err(CoverError::Config(format!("density must be positive, got {}", self.density)));
        }
        if !(self.track_size > 0.0) {
            return Err(CoverError::Config(format!(
                "track_size must be positive, got {}",
                self.track_size
            )));
        }
        if self.rotation_period_ms == 0 {
            return Err(CoverError::Config("rotation_period_ms must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> CoverResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CoverError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> CoverResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoverError::Config(e.to_string()))
    }
}

/// Style attributes as written in a layout or theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleAttributes {
    /// `"rectangle"` (default) or `"circle"`.
    pub shape: Option<String>,
    /// `#RRGGBB` or `#AARRGGBB`.
    pub track_color: Option<String>,
}

impl StyleAttributes {
    /// Resolve the initial shape. Unknown names fall back to rectangle.
    pub fn shape(&self) -> Shape {
        self.shape.as_deref().map(Shape::from_name).unwrap_or_default()
    }

    /// Resolve the initial ring color, falling back to the configured default.
    pub fn track_color(&self, config: &CoverConfig) -> CoverResult<TrackColor> {
        match self.track_color.as_deref() {
            Some(s) => TrackColor::parse(s),
            None => Ok(config.track_color),
        }
    }
}
