//! Renderer trait abstraction.

use crate::cover_image::CoverImage;
use covermorph_core::{CoverFrame, ImageTransform};
use kurbo::{Affine, Rect};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Image decode failed: {0}")]
    ImageDecode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Snapshot of the cover to draw.
    pub frame: &'a CoverFrame,
    /// Cover image; `None` draws only the clip background and rings.
    pub image: Option<&'a CoverImage>,
    /// Animated image placement supplied by the transition host.
    pub image_transform: Option<&'a ImageTransform>,
    /// Fill drawn inside the clip under the image.
    pub background_color: Color,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(frame: &'a CoverFrame) -> Self {
        Self {
            frame,
            image: None,
            image_transform: None,
            background_color: Color::from_rgba8(24, 24, 24, 255),
            scale_factor: 1.0,
        }
    }

    /// Set the cover image.
    pub fn with_image(mut self, image: &'a CoverImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Read image placement from a running image transition.
    pub fn with_image_transform(mut self, transform: &'a ImageTransform) -> Self {
        self.image_transform = Some(transform);
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// View-to-device transform: HiDPI scale applied after the cover rotation.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor) * self.frame.transform()
    }

    /// Where the image lands in view coordinates this frame.
    pub fn image_rect(&self) -> Option<Rect> {
        let image = self.image?;
        let bounds = self.frame.bounds;
        Some(match self.image_transform {
            Some(transform) => transform.image_rect(image.size(), bounds, self.frame.scale_mode),
            None => self.frame.scale_mode.image_rect(image.size(), bounds),
        })
    }
}

/// Trait for rendering backends.
///
/// A backend clips to the frame's circle, draws the image at its scale-mode
/// placement and strokes the rings on top, all rotated with the view.
pub trait Renderer: Send + Sync {
    /// Build the drawing commands for one cover frame.
    fn render_cover(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
