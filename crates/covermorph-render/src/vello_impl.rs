//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, Stroke};
use peniko::Fill;
use vello::Scene;

/// Vello-based renderer for GPU-accelerated cover drawing.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    pub fn new() -> Self {
        Self { scene: Scene::new() }
    }

    /// Get the built scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take the built scene, leaving an empty one behind.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn render_image(&mut self, ctx: &RenderContext, transform: Affine) {
        let (Some(image), Some(rect)) = (ctx.image, ctx.image_rect()) else {
            return;
        };
        if image.width() == 0 || image.height() == 0 {
            return;
        }
        let scale_x = rect.width() / image.width() as f64;
        let scale_y = rect.height() / image.height() as f64;
        let image_transform =
            transform * Affine::translate((rect.x0, rect.y0)) * Affine::scale_non_uniform(scale_x, scale_y);

        self.scene.draw_image(&image.to_image_data().into(), image_transform);
    }
}

impl Renderer for VelloRenderer {
    fn render_cover(&mut self, ctx: &RenderContext) {
        self.scene.reset();

        let frame = ctx.frame;
        let transform = ctx.transform();

        self.scene.push_clip_layer(transform, &frame.clip);
        self.scene.fill(
            Fill::NonZero,
            transform,
            self.background_color(ctx),
            None,
            &frame.clip_path,
        );
        self.render_image(ctx, transform);
        if frame.rings_visible() {
            self.scene.stroke(
                &Stroke::new(frame.ring_width * ctx.scale_factor),
                transform,
                frame.ring_color,
                None,
                &frame.ring_path,
            );
        }
        self.scene.pop_layer();
    }
}
