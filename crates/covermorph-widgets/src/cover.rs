//! The egui music cover widget.

use std::time::Duration;

use covermorph_core::{
    CoverConfig, CoverFrame, CoverResult, CoverView, ImageTransform, ImageTransitionHost, StyleAttributes,
};
use covermorph_render::CoverImage;
use egui::{Color32, ColorImage, Rect, Response, Sense, Stroke, TextureHandle, TextureOptions, Ui, Vec2};
use kurbo::{Affine, Size};

use crate::mesh::{self, CIRCLE_SEGMENTS};
use crate::{sizing, theme};

/// Longest frame step fed to the animators; longer stalls are clamped.
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// An image clipped to a rectangle or a circle that can morph and spin.
///
/// The widget advances its [`CoverView`] from egui's frame clock and keeps
/// requesting repaints while anything is animating.
pub struct CoverWidget {
    view: CoverView,
    image_transform: ImageTransform,
    image: Option<CoverImage>,
    texture: Option<TextureHandle>,
    size: Vec2,
}

impl CoverWidget {
    /// Create a rectangular cover.
    pub fn new(config: CoverConfig) -> Self {
        Self::with_view(CoverView::new(config))
    }

    /// Create a cover from style attributes.
    pub fn from_style(config: CoverConfig, style: &StyleAttributes) -> CoverResult<Self> {
        Ok(Self::with_view(CoverView::from_style(config, style)?))
    }

    fn with_view(mut view: CoverView) -> Self {
        let host = ImageTransitionHost::new();
        let image_transform = host.transform();
        view.set_transition_host(host);
        Self {
            view,
            image_transform,
            image: None,
            texture: None,
            size: Vec2::splat(sizing::COVER),
        }
    }

    /// Set the widget size in points.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Replace the cover image. The texture is uploaded on the next paint.
    pub fn set_image(&mut self, image: CoverImage) {
        self.image = Some(image);
        self.texture = None;
    }

    pub fn view(&self) -> &CoverView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CoverView {
        &mut self.view
    }

    /// Advance, lay out and paint the cover. Clicks are reported on the response.
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());

        let dt = ui.ctx().input(|i| i.stable_dt);
        self.view.set_bounds(Size::new(rect.width() as f64, rect.height() as f64));
        self.view.advance(frame_step(dt));
        if self.view.needs_frame() {
            ui.ctx().request_repaint();
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect);
        }
        self.view.take_invalidated();
        response
    }

    fn paint(&mut self, ui: &Ui, rect: Rect) {
        let frame = self.view.frame();
        let painter = ui.painter_at(rect);
        let to_screen = Affine::translate((rect.left() as f64, rect.top() as f64)) * frame.transform();
        let bounds = kurbo::Rect::from_origin_size(kurbo::Point::ORIGIN, frame.bounds);

        let polygon = mesh::clip_polygon(frame.clip, bounds, CIRCLE_SEGMENTS);
        if polygon.len() < 3 {
            return;
        }
        let screen: Vec<_> = polygon.iter().map(|&p| mesh::to_pos2(to_screen * p)).collect();
        painter.add(egui::Shape::convex_polygon(screen, theme::COVER_BG, Stroke::NONE));

        if let Some(texture) = self.texture(ui) {
            let image_rect = self.image_rect(&frame);
            let inner = image_rect.intersect(bounds);
            let clipped = mesh::clip_polygon(frame.clip, inner, CIRCLE_SEGMENTS);
            painter.add(egui::Shape::mesh(mesh::textured_fan(&clipped, image_rect, to_screen, texture)));
        }

        if frame.rings_visible() {
            let stroke = Stroke::new(frame.ring_width as f32, mesh::to_color32(frame.ring_color));
            let center = mesh::to_pos2(to_screen * frame.clip.center);
            for ring in self.view.geometry().rings() {
                if ring.radius <= frame.clip.radius {
                    painter.circle_stroke(center, ring.radius as f32, stroke);
                }
            }
        }
    }

    fn image_rect(&self, frame: &CoverFrame) -> kurbo::Rect {
        match &self.image {
            Some(image) => self.image_transform.image_rect(image.size(), frame.bounds, frame.scale_mode),
            None => kurbo::Rect::ZERO,
        }
    }

    fn texture(&mut self, ui: &Ui) -> Option<egui::TextureId> {
        let image = self.image.as_ref()?;
        if self.texture.is_none() {
            let pixels = ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.pixels(),
            );
            log::debug!("Uploading cover texture {}x{}", image.width(), image.height());
            self.texture = Some(ui.ctx().load_texture("covermorph-cover", pixels, TextureOptions::LINEAR));
        }
        self.texture.as_ref().map(TextureHandle::id)
    }
}

/// Frame step from egui's stable dt, clamped to a sane range.
fn frame_step(dt: f32) -> Duration {
    if !dt.is_finite() || dt <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f32(dt).min(MAX_FRAME_STEP)
}

/// Ring stroke color in egui terms, for hosts drawing their own legend.
pub fn ring_color32(frame: &CoverFrame) -> Color32 {
    mesh::to_color32(frame.ring_color)
}
