//! A renderer that records draw commands instead of rasterizing.
//!
//! Used by the headless demo and by tests to check what a frame would draw.

use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, Circle, Rect};
use peniko::Color;

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Begin clipping to a circle.
    PushClip { clip: Circle, transform: Affine },
    /// Fill the clip with the background color.
    Fill { color: Color },
    /// Draw the cover image into `rect` (view coordinates).
    DrawImage { rect: Rect, transform: Affine },
    /// Stroke `count` rings.
    StrokeRings {
        count: usize,
        color: Color,
        width: f64,
        transform: Affine,
    },
    /// End the current clip.
    PopClip,
}

/// Renderer that keeps the commands of the last frame.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the most recent frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Renderer for RecordingRenderer {
    fn render_cover(&mut self, ctx: &RenderContext) {
        self.commands.clear();
        self.frames += 1;

        let frame = ctx.frame;
        let transform = ctx.transform();

        self.commands.push(DrawCommand::PushClip {
            clip: frame.clip,
            transform,
        });
        self.commands.push(DrawCommand::Fill {
            color: self.background_color(ctx),
        });
        if let Some(rect) = ctx.image_rect() {
            self.commands.push(DrawCommand::DrawImage { rect, transform });
        }
        if frame.rings_visible() {
            let count = frame
                .ring_path
                .elements()
                .iter()
                .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
                .count();
            self.commands.push(DrawCommand::StrokeRings {
                count,
                color: frame.ring_color,
                width: frame.ring_width * ctx.scale_factor,
                transform,
            });
        }
        self.commands.push(DrawCommand::PopClip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover_image::CoverImage;
    use covermorph_core::{CoverConfig, CoverView, ImageTransitionHost, Shape, TrackColor};
    use kurbo::Size;
    use std::time::Duration;

    fn view(shape: Shape) -> CoverView {
        let mut view = CoverView::new(CoverConfig::default());
        view.set_bounds(Size::new(200.0, 200.0));
        view.set_shape(shape);
        view
    }

    #[test]
    fn test_rectangle_draws_no_rings() {
        let view = view(Shape::Rectangle);
        let frame = view.frame();
        let image = CoverImage::solid(10, 10, [0, 0, 0, 255]);
        let mut renderer = RecordingRenderer::new();
        renderer.render_cover(&RenderContext::new(&frame).with_image(&image));

        let commands = renderer.commands();
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], DrawCommand::PushClip { .. }));
        assert!(matches!(commands[2], DrawCommand::DrawImage { .. }));
        assert_eq!(commands[3], DrawCommand::PopClip);
        if let DrawCommand::PushClip { clip, .. } = commands[0] {
            assert!((clip.radius - 100.0f64.hypot(100.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_circle_strokes_rings_inside_clip() {
        let mut view = view(Shape::Circle);
        view.set_track_color(TrackColor::from_argb(0xFFFF_FFFF));
        let frame = view.frame();
        let mut renderer = RecordingRenderer::new();
        renderer.render_cover(&RenderContext::new(&frame));

        let commands = renderer.commands();
        assert_eq!(commands.len(), 4);
        match &commands[2] {
            DrawCommand::StrokeRings { count, color, width, .. } => {
                // floor(200 / 10) = 20 slots, first three skipped.
                assert_eq!(*count, 17);
                assert_eq!(TrackColor::from(*color).to_argb(), 0xFFFF_FFFF);
                assert!((width - 1.0).abs() < f64::EPSILON);
            }
            other => panic!("expected rings, got {:?}", other),
        }
        assert_eq!(commands[3], DrawCommand::PopClip);
    }

    #[test]
    fn test_rotation_reaches_transform() {
        let mut view = view(Shape::Circle);
        view.start();
        view.advance(Duration::from_millis(625));
        let frame = view.frame();
        let mut renderer = RecordingRenderer::new();
        renderer.render_cover(&RenderContext::new(&frame));

        let DrawCommand::PushClip { transform, .. } = renderer.commands()[0] else {
            panic!("expected clip first");
        };
        // 90° about (100, 100) maps (200, 100) to (100, 200).
        let p = transform * kurbo::Point::new(200.0, 100.0);
        assert!((p.x - 100.0).abs() < 1e-9 && (p.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_image_follows_transition() {
        let host = ImageTransitionHost::new();
        let transform = host.transform();
        let mut view = CoverView::new(CoverConfig::default());
        view.set_bounds(Size::new(200.0, 100.0));
        view.set_transition_host(host);
        let image = CoverImage::solid(400, 400, [0, 0, 0, 255]);

        view.morph();
        view.advance(Duration::ZERO);
        let frame = view.frame();
        let mut renderer = RecordingRenderer::new();
        renderer.render_cover(&RenderContext::new(&frame).with_image(&image).with_image_transform(&transform));
        let DrawCommand::DrawImage { rect, .. } = renderer.commands()[2] else {
            panic!("expected image");
        };
        // Still at the crop placement on the first frame.
        assert!((rect.width() - 200.0).abs() < 1e-9);

        view.advance(Duration::from_millis(300));
        let frame = view.frame();
        renderer.render_cover(&RenderContext::new(&frame).with_image(&image).with_image_transform(&transform));
        let DrawCommand::DrawImage { rect, .. } = renderer.commands()[2] else {
            panic!("expected image");
        };
        assert!((rect.width() - 100.0).abs() < 1e-9);
        assert_eq!(renderer.frames(), 2);
    }
}
