//! Cover image decoding.

use crate::renderer::{RenderResult, RendererError};
use kurbo::Size;
use std::path::Path;
use std::sync::Arc;

/// A decoded cover image in straight-alpha RGBA8.
#[derive(Debug, Clone)]
pub struct CoverImage {
    width: u32,
    height: u32,
    rgba: Arc<Vec<u8>>,
}

impl CoverImage {
    /// Decode PNG, JPEG or WebP bytes.
    pub fn decode(bytes: &[u8]) -> RenderResult<Self> {
        let decoded = ::image::load_from_memory(bytes).map_err(|e| RendererError::ImageDecode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("Decoded cover image {}x{}", width, height);
        Ok(Self {
            width,
            height,
            rgba: Arc::new(rgba.into_vec()),
        })
    }

    /// Read and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| RendererError::ImageDecode(format!("{}: {}", path.display(), e)))?;
        Self::decode(&bytes)
    }

    /// A single-color image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self {
            width,
            height,
            rgba: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size in pixels.
    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Raw RGBA pixel data (4 bytes per pixel).
    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }

    /// Image data for a peniko image brush.
    pub fn to_image_data(&self) -> peniko::ImageData {
        peniko::ImageData {
            data: peniko::Blob::new(self.rgba.clone()),
            format: peniko::ImageFormat::Rgba8,
            width: self.width,
            height: self.height,
            alpha_type: peniko::ImageAlphaType::Alpha,
        }
    }
}
