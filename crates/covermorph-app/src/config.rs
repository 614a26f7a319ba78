//! Application configuration loaded from an optional JSON file.

use std::path::{Path, PathBuf};

use covermorph_core::{CoverConfig, StyleAttributes};
use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::scenario::Step;
use crate::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cover engine settings.
    pub config: CoverConfig,
    /// Initial shape and ring color.
    pub style: StyleAttributes,
    /// Cover bounds in pixels.
    pub width: f64,
    pub height: f64,
    /// Frame clock rate.
    pub fps: u32,
    /// Optional cover image to decode and place.
    pub image: Option<PathBuf>,
    /// Script to run; empty runs the default scenario.
    pub script: Vec<Step>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: CoverConfig::default(),
            style: StyleAttributes::default(),
            width: 320.0,
            height: 320.0,
            fps: 60,
            image: None,
            script: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file path.
    pub fn load(path: &Path) -> AppResult<Self> {
        log::info!("Loading configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.config.validate()?;
        if self.fps == 0 {
            return Err(AppError::Config("fps must be positive".to_string()));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(AppError::Config(format!("invalid bounds {}x{}", self.width, self.height)));
        }
        Ok(())
    }

    pub fn bounds(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
