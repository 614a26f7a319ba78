//! Covermorph Render Library
//!
//! Renderer abstraction and implementations for Covermorph.
//! The default implementation uses Vello for GPU-accelerated rendering;
//! [`RecordingRenderer`] records draw commands for headless use.

mod cover_image;
mod recording;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use cover_image::CoverImage;
pub use recording::{DrawCommand, RecordingRenderer};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
