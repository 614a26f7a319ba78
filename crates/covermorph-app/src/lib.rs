//! Covermorph headless demo.
//!
//! Loads an optional configuration, runs a scripted morph and spin scenario
//! on a fixed frame clock through the recording renderer and reports the
//! callbacks it observed plus the final saved state.

pub mod config;
pub mod scenario;

pub use config::AppConfig;
pub use scenario::{default_script, CoverEvent, Report, Runner, Step};

use covermorph_core::CoverError;
use covermorph_render::RendererError;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Cover(#[from] CoverError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Load the configuration (if any), run its script and return the report.
pub fn run(config_path: Option<&std::path::Path>) -> AppResult<Report> {
    let app = match config_path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let script = if app.script.is_empty() {
        default_script()
    } else {
        app.script.clone()
    };
    let mut runner = Runner::new(&app)?;
    log::info!("Running {} steps at {} fps", script.len(), app.fps);
    Ok(runner.run(&script))
}
