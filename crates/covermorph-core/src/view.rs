//! The cover widget shell.
//!
//! [`CoverView`] owns the shape, the transition model, the morph and rotation
//! state machines and the owner's callbacks. The host drives it with
//! [`CoverView::advance`] once per frame and draws [`CoverView::frame`].

use crate::color::TrackColor;
use crate::config::{CoverConfig, StyleAttributes};
use crate::error::CoverResult;
use crate::geometry::{self, CoverGeometry};
use crate::model::TransitionModel;
use crate::morph::{MorphController, NoopHost, TransitionHost};
use crate::rotation::{RotationController, RotationEvent, RotationState};
use crate::shape::{ScaleMode, Shape};
use crate::state::SavedState;
use kurbo::{Affine, BezPath, Circle, Point, Size};
use peniko::Color;
use std::collections::VecDeque;
use std::time::Duration;

/// Owner notifications. Both handlers default to doing nothing.
///
/// Handlers get the view mutably and may call `start`, `stop` or `morph`
/// on it directly.
pub trait CoverCallbacks {
    /// A morph finished; `view.shape()` is already the new shape.
    fn on_morph_end(&mut self, _view: &mut CoverView) {}

    /// The rotation settled at 0°. Delivered on the frame after it settles,
    /// so `view.is_running()` already reports the stopped state and a
    /// `view.start()` from here begins a fresh spin.
    fn on_rotate_end(&mut self, _view: &mut CoverView) {}
}

/// Work posted to the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Posted {
    RotateEnd,
}

/// Everything a renderer needs to draw one frame of the cover.
#[derive(Debug, Clone)]
pub struct CoverFrame {
    pub bounds: Size,
    pub shape: Shape,
    pub scale_mode: ScaleMode,
    /// Circle the image and rings are clipped to.
    pub clip: Circle,
    pub clip_path: BezPath,
    pub ring_path: BezPath,
    pub ring_color: Color,
    pub ring_width: f64,
    /// Rotation in degrees about the view center.
    pub rotation: f64,
    /// Morph time fraction, if a morph is running.
    pub morph_progress: Option<f64>,
}

impl CoverFrame {
    /// View-space transform for the rotated cover.
    pub fn transform(&self) -> Affine {
        let center = Point::new(self.bounds.width / 2.0, self.bounds.height / 2.0);
        Affine::rotate_about(self.rotation.to_radians(), center)
    }

    /// Whether the rings are visible at all this frame.
    pub fn rings_visible(&self) -> bool {
        self.ring_color.components[3] > 0.0 && !self.ring_path.elements().is_empty()
    }
}

/// A music cover: an image clipped to a rectangle or a circle.
pub struct CoverView {
    config: CoverConfig,
    shape: Shape,
    scale_mode: ScaleMode,
    model: TransitionModel,
    morph: MorphController,
    rotation: RotationController,
    callbacks: Option<Box<dyn CoverCallbacks>>,
    host: Box<dyn TransitionHost>,
    posted: VecDeque<Posted>,
}

impl std::fmt::Debug for CoverView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverView")
            .field("shape", &self.shape)
            .field("scale_mode", &self.scale_mode)
            .field("radius", &self.model.transition_radius())
            .field("alpha", &self.model.transition_alpha())
            .field("morph", &self.morph.phase())
            .field("rotation", &self.rotation.state())
            .finish()
    }
}

impl CoverView {
    /// Create a rectangular cover with the configured ring color.
    pub fn new(config: CoverConfig) -> Self {
        let shape = Shape::default();
        Self {
            model: TransitionModel::new(config.track_size_px(), config.track_color, shape),
            morph: MorphController::new(config.morph_duration()),
            rotation: RotationController::new(config.rotation_period()),
            shape,
            scale_mode: shape.scale_mode(),
            callbacks: None,
            host: Box::new(NoopHost),
            posted: VecDeque::new(),
            config,
        }
    }

    /// Create a cover from style attributes.
    pub fn from_style(config: CoverConfig, style: &StyleAttributes) -> CoverResult<Self> {
        let track_color = style.track_color(&config)?;
        let mut view = Self::new(config);
        view.set_shape(style.shape());
        view.set_track_color(track_color);
        Ok(view)
    }

    pub fn config(&self) -> &CoverConfig {
        &self.config
    }

    /// Set the owner's callbacks.
    pub fn set_callbacks(&mut self, callbacks: impl CoverCallbacks + 'static) {
        self.callbacks = Some(Box::new(callbacks));
    }

    /// Remove the owner's callbacks.
    pub fn clear_callbacks(&mut self) {
        self.callbacks = None;
    }

    /// Set the layout/transition system this cover morphs inside.
    pub fn set_transition_host(&mut self, host: impl TransitionHost + 'static) {
        self.host = Box::new(host);
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Set the shape without animating. Ignored while a morph is running.
    pub fn set_shape(&mut self, shape: Shape) {
        if shape == self.shape {
            return;
        }
        if self.morph.is_morphing() {
            log::debug!("Ignoring set_shape({:?}) during a morph", shape);
            return;
        }
        self.shape = shape;
        self.scale_mode = shape.scale_mode();
        self.model.reset_to_rest(shape);
    }

    pub fn track_color(&self) -> TrackColor {
        self.model.track_color()
    }

    /// Set the ring color, alpha channel included.
    pub fn set_track_color(&mut self, color: TrackColor) {
        self.model.set_track_color(color, self.shape);
    }

    pub fn scale_mode(&self) -> ScaleMode {
        self.scale_mode
    }

    /// Current view bounds.
    pub fn bounds(&self) -> Size {
        self.model.size()
    }

    /// The host laid the view out at a new size.
    pub fn set_bounds(&mut self, size: Size) {
        if size == self.model.size() {
            return;
        }
        self.model.set_bounds(size);
        if self.morph.is_morphing() {
            self.morph.on_bounds_changed(size);
        } else {
            self.model.set_transition_radius(geometry::rest_radius(self.shape, size));
        }
    }

    pub fn geometry(&self) -> &CoverGeometry {
        self.model.geometry()
    }

    pub fn transition_radius(&self) -> f64 {
        self.model.transition_radius()
    }

    pub fn set_transition_radius(&mut self, radius: f64) {
        self.model.set_transition_radius(radius);
    }

    pub fn transition_alpha(&self) -> u8 {
        self.model.transition_alpha()
    }

    pub fn set_transition_alpha(&mut self, alpha: u8) {
        self.model.set_transition_alpha(alpha);
    }

    pub fn is_morphing(&self) -> bool {
        self.morph.is_morphing()
    }

    /// Time fraction of the running morph.
    pub fn morph_progress(&self) -> Option<f64> {
        self.morph.progress()
    }

    pub fn rotation_state(&self) -> RotationState {
        self.rotation.state()
    }

    /// Rotation angle in degrees.
    pub fn rotation_angle(&self) -> f64 {
        self.rotation.angle()
    }

    /// Morph to the other shape. Ignored while a morph is already running.
    pub fn morph(&mut self) {
        if !self
            .morph
            .begin(self.shape, &mut self.scale_mode, &mut self.model, self.host.as_mut())
        {
            log::debug!("Ignoring morph request: already morphing");
        }
    }

    /// Start spinning. Only circles spin, and only when nothing is running.
    pub fn start(&mut self) {
        if self.shape == Shape::Rectangle {
            log::debug!("Ignoring start: rectangle covers do not rotate");
            return;
        }
        if self.is_running() {
            log::debug!("Ignoring start: already running");
            return;
        }
        self.rotation.start();
        self.model.invalidate();
    }

    /// Stop spinning, finishing the turn to 0° at spin speed.
    pub fn stop(&mut self) {
        if self.rotation.stop().is_none() {
            log::debug!("Ignoring stop: not spinning");
        }
    }

    /// Whether the cover is rotating, settling or morphing.
    pub fn is_running(&self) -> bool {
        self.rotation.is_active() || self.morph.is_morphing()
    }

    /// Advance all animations by one frame of `dt`.
    ///
    /// Work posted by the previous frame runs first.
    pub fn advance(&mut self, dt: Duration) {
        self.run_pending();

        if let Some(shape) = self.morph.advance(dt, &mut self.model) {
            self.shape = shape;
            self.notify(|callbacks, view| callbacks.on_morph_end(view));
        }

        let was_active = self.rotation.is_active();
        if let Some(RotationEvent::Settled) = self.rotation.advance(dt) {
            self.posted.push_back(Posted::RotateEnd);
        }
        if was_active {
            self.model.invalidate();
        }
    }

    /// Deliver posted callbacks now instead of on the next frame.
    pub fn run_pending(&mut self) {
        while let Some(posted) = self.posted.pop_front() {
            match posted {
                Posted::RotateEnd => self.notify(|callbacks, view| callbacks.on_rotate_end(view)),
            }
        }
    }

    /// Whether callbacks are waiting for the next frame.
    pub fn has_pending(&self) -> bool {
        !self.posted.is_empty()
    }

    /// Whether the cover needs another frame: animating or callbacks pending.
    pub fn needs_frame(&self) -> bool {
        self.is_running() || self.has_pending()
    }

    /// Consume the pending redraw request.
    pub fn take_invalidated(&mut self) -> bool {
        self.model.take_invalidated()
    }

    fn notify(&mut self, f: impl FnOnce(&mut dyn CoverCallbacks, &mut CoverView)) {
        if let Some(mut callbacks) = self.callbacks.take() {
            f(callbacks.as_mut(), self);
            // A handler that installed new callbacks keeps them.
            if self.callbacks.is_none() {
                self.callbacks = Some(callbacks);
            }
        }
    }

    /// Snapshot of what to draw this frame.
    pub fn frame(&self) -> CoverFrame {
        let geometry = self.model.geometry();
        CoverFrame {
            bounds: geometry.size(),
            shape: self.shape,
            scale_mode: self.scale_mode,
            clip: geometry.clip(),
            clip_path: geometry.clip_path(),
            ring_path: geometry.ring_path(),
            ring_color: self.model.ring_color(),
            ring_width: self.config.track_width_px(),
            rotation: self.rotation.angle(),
            morph_progress: self.morph.progress(),
        }
    }

    /// Capture shape, ring color and whether the cover is spinning.
    pub fn save_state(&self) -> SavedState {
        SavedState {
            shape: self.shape,
            track_color: self.track_color(),
            is_rotating: self.rotation.is_spinning(),
        }
    }

    /// Re-apply a saved snapshot, resuming rotation if it was spinning.
    pub fn restore_state(&mut self, state: &SavedState) {
        log::info!("Restoring {}", state);
        self.set_shape(state.shape);
        self.set_track_color(state.track_color);
        if state.is_rotating {
            self.start();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Animator, ValueAnimator};
    use crate::morph::MorphDescriptor;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn view() -> CoverView {
        let mut view = CoverView::new(CoverConfig::default());
        view.set_bounds(Size::new(200.0, 300.0));
        view
    }

    #[derive(Clone, Default)]
    struct Counter {
        morph_ends: Rc<Cell<u32>>,
        rotate_ends: Rc<Cell<u32>>,
        running_at_rotate_end: Rc<RefCell<Vec<bool>>>,
        shape_at_morph_end: Rc<RefCell<Vec<Shape>>>,
    }

    impl CoverCallbacks for Counter {
        fn on_morph_end(&mut self, view: &mut CoverView) {
            self.morph_ends.set(self.morph_ends.get() + 1);
            self.shape_at_morph_end.borrow_mut().push(view.shape());
        }

        fn on_rotate_end(&mut self, view: &mut CoverView) {
            self.rotate_ends.set(self.rotate_ends.get() + 1);
            self.running_at_rotate_end.borrow_mut().push(view.is_running());
        }
    }

    #[test]
    fn test_defaults() {
        let view = view();
        assert_eq!(view.shape(), Shape::Rectangle);
        assert_eq!(view.scale_mode(), ScaleMode::CenterCrop);
        assert_eq!(view.track_color(), TrackColor::DEFAULT);
        assert!((view.transition_radius() - 100.0f64.hypot(150.0)).abs() < 1e-9);
        assert_eq!(view.transition_alpha(), 0);
        assert!(!view.is_running());
    }

    #[test]
    fn test_morph_rect_to_circle() {
        let mut view = view();
        let counter = Counter::default();
        view.set_callbacks(counter.clone());

        view.morph();
        assert!(view.is_running());
        assert!(view.is_morphing());
        assert_eq!(view.scale_mode(), ScaleMode::CenterInside);
        assert_eq!(view.shape(), Shape::Rectangle);

        for _ in 0..30 {
            view.advance(ms(16));
        }
        assert_eq!(counter.morph_ends.get(), 1);
        assert_eq!(*counter.shape_at_morph_end.borrow(), vec![Shape::Circle]);
        assert_eq!(view.shape(), Shape::Circle);
        assert_eq!(view.scale_mode(), ScaleMode::CenterInside);
        assert!((view.transition_radius() - 100.0).abs() < f64::EPSILON);
        assert_eq!(view.transition_alpha(), 255);
        assert!(!view.is_running());
    }

    #[test]
    fn test_morph_circle_to_rect() {
        let mut view = view();
        view.set_shape(Shape::Circle);
        view.morph();
        assert_eq!(view.scale_mode(), ScaleMode::CenterCrop);
        view.advance(ms(300));
        assert_eq!(view.shape(), Shape::Rectangle);
        assert_eq!(view.transition_alpha(), 0);
        assert!((view.transition_radius() - 100.0f64.hypot(150.0)).abs() < 1e-9);
    }

    #[test]
    fn test_second_morph_is_ignored() {
        let mut view = view();
        let counter = Counter::default();
        view.set_callbacks(counter.clone());

        view.morph();
        view.advance(ms(100));
        let radius = view.transition_radius();
        view.morph();
        assert_eq!(view.transition_radius(), radius);
        assert_eq!(view.scale_mode(), ScaleMode::CenterInside);

        view.advance(ms(200));
        view.advance(ms(16));
        assert_eq!(counter.morph_ends.get(), 1);
        assert_eq!(view.shape(), Shape::Circle);
    }

    #[test]
    fn test_radius_stays_in_range_during_morph() {
        let mut view = view();
        let (min, max) = (view.geometry().min_radius(), view.geometry().max_radius());
        view.morph();
        for _ in 0..25 {
            view.advance(ms(16));
            let r = view.transition_radius();
            assert!(r >= min - 1e-9 && r <= max + 1e-9);
        }
    }

    #[test]
    fn test_start_on_rectangle_is_ignored() {
        let mut view = view();
        view.start();
        assert!(!view.is_running());
        assert_eq!(view.rotation_state(), RotationState::Stopped);
    }

    #[test]
    fn test_start_while_morphing_is_ignored() {
        let mut view = view();
        view.set_shape(Shape::Circle);
        view.morph();
        view.start();
        assert_eq!(view.rotation_state(), RotationState::Stopped);
    }

    #[test]
    fn test_morph_while_spinning_runs_alongside() {
        let mut view = view();
        view.set_shape(Shape::Circle);
        view.start();
        view.advance(ms(100));
        view.morph();
        assert!(view.is_morphing());
        view.advance(ms(300));
        assert_eq!(view.shape(), Shape::Rectangle);
        assert_eq!(view.rotation_state(), RotationState::Spinning);
    }

    #[test]
    fn test_stop_settles_and_posts_callback() {
        let mut view = view();
        let counter = Counter::default();
        view.set_callbacks(counter.clone());
        view.set_shape(Shape::Circle);

        view.start();
        assert!(view.is_running());
        view.advance(ms(625));
        assert!((view.rotation_angle() - 90.0).abs() < 1e-9);

        view.stop();
        assert_eq!(view.rotation_state(), RotationState::Decelerating);
        assert!(view.is_running());

        view.advance(ms(625));
        assert_eq!(view.rotation_angle(), 0.0);
        assert!(!view.is_running());
        // Posted to the next frame.
        assert_eq!(counter.rotate_ends.get(), 0);
        assert!(view.has_pending());

        view.advance(ms(16));
        assert_eq!(counter.rotate_ends.get(), 1);
        assert_eq!(*counter.running_at_rotate_end.borrow(), vec![false]);

        for _ in 0..10 {
            view.advance(ms(16));
        }
        assert_eq!(counter.rotate_ends.get(), 1);
    }

    #[test]
    fn test_run_pending_delivers_now() {
        let mut view = view();
        let counter = Counter::default();
        view.set_callbacks(counter.clone());
        view.set_shape(Shape::Circle);
        view.start();
        view.stop();
        view.advance(Duration::ZERO);
        assert!(view.needs_frame());
        view.run_pending();
        assert_eq!(counter.rotate_ends.get(), 1);
        assert!(!view.needs_frame());
    }

    #[test]
    fn test_bounds_change_while_idle_recomputes() {
        let mut view = view();
        view.set_shape(Shape::Circle);
        view.set_bounds(Size::new(400.0, 100.0));
        assert!((view.transition_radius() - 50.0).abs() < f64::EPSILON);
        assert_eq!(view.geometry().rings().len(), 7);
        assert_eq!(view.geometry().center(), kurbo::Point::new(200.0, 50.0));
    }

    #[test]
    fn test_set_shape_updates_rest_state() {
        let mut view = view();
        view.set_shape(Shape::Circle);
        assert_eq!(view.scale_mode(), ScaleMode::CenterInside);
        assert!((view.transition_radius() - 100.0).abs() < f64::EPSILON);
        assert_eq!(view.transition_alpha(), 255);
    }

    #[test]
    fn test_frame_reflects_state() {
        let mut view = view();
        view.set_shape(Shape::Circle);
        view.set_track_color(TrackColor::from_argb(0x80FF_FFFF));
        let frame = view.frame();
        assert_eq!(frame.clip.center, kurbo::Point::new(100.0, 150.0));
        assert!((frame.clip.radius - 100.0).abs() < f64::EPSILON);
        assert!(frame.rings_visible());
        assert_eq!(TrackColor::from(frame.ring_color).alpha(), 0x80);
        assert_eq!(frame.rotation, 0.0);
        let center = frame.transform() * kurbo::Point::new(100.0, 150.0);
        assert!((center - kurbo::Point::new(100.0, 150.0)).hypot() < 1e-9);

        view.set_shape(Shape::Rectangle);
        assert!(!view.frame().rings_visible());
    }

    #[test]
    fn test_save_and_restore() {
        let mut view = view();
        view.set_shape(Shape::Circle);
        view.start();
        let saved = view.save_state();
        assert!(saved.is_rotating);

        let mut restored = CoverView::new(CoverConfig::default());
        restored.restore_state(&SavedState {
            shape: Shape::Circle,
            track_color: TrackColor::from_argb(0x80FF_FFFF),
            is_rotating: true,
        });
        assert_eq!(restored.shape(), Shape::Circle);
        assert_eq!(restored.track_color().to_argb(), 0x80FF_FFFF);
        assert!(restored.is_running());
    }

    #[test]
    fn test_settling_is_not_saved_as_rotating() {
        let mut view = view();
        view.set_shape(Shape::Circle);
        view.start();
        view.advance(ms(100));
        view.stop();
        assert!(!view.save_state().is_rotating);
    }

    #[test]
    fn test_from_style() {
        let style = StyleAttributes {
            shape: Some("circle".to_string()),
            track_color: Some("#40000000".to_string()),
        };
        let view = CoverView::from_style(CoverConfig::default(), &style).unwrap();
        assert_eq!(view.shape(), Shape::Circle);
        assert_eq!(view.scale_mode(), ScaleMode::CenterInside);
        assert_eq!(view.track_color().to_argb(), 0x4000_0000);
        assert_eq!(view.transition_alpha(), 255);
    }

    #[test]
    fn test_frame_transform_rotates_about_center() {
        let mut view = view();
        view.set_shape(Shape::Circle);
        view.start();
        view.advance(ms(625));
        let frame = view.frame();
        // 90° about (100, 150) maps (200, 150) to (100, 250).
        let p = frame.transform() * kurbo::Point::new(200.0, 150.0);
        assert!((p - kurbo::Point::new(100.0, 250.0)).hypot() < 1e-9);
        let c = frame.transform() * kurbo::Point::new(100.0, 150.0);
        assert!((c - kurbo::Point::new(100.0, 150.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_restart_from_rotate_end() {
        struct Restart(Rc<Cell<u32>>);

        impl CoverCallbacks for Restart {
            fn on_rotate_end(&mut self, view: &mut CoverView) {
                self.0.set(self.0.get() + 1);
                assert!(!view.is_running());
                view.start();
            }
        }

        let ends = Rc::new(Cell::new(0));
        let mut view = view();
        view.set_shape(Shape::Circle);
        view.set_callbacks(Restart(ends.clone()));
        view.start();
        view.advance(ms(100));
        view.stop();
        view.advance(ms(100));
        assert_eq!(view.rotation_state(), RotationState::Stopped);

        view.advance(ms(16));
        assert_eq!(ends.get(), 1);
        assert_eq!(view.rotation_state(), RotationState::Spinning);
        assert!(view.is_running());
    }

    #[test]
    fn test_morph_back_from_morph_end() {
        struct Bounce(Rc<Cell<u32>>);

        impl CoverCallbacks for Bounce {
            fn on_morph_end(&mut self, view: &mut CoverView) {
                self.0.set(self.0.get() + 1);
                if view.shape() == Shape::Circle {
                    view.morph();
                }
            }
        }

        let ends = Rc::new(Cell::new(0));
        let mut view = view();
        view.set_callbacks(Bounce(ends.clone()));
        view.morph();
        view.advance(ms(300));
        assert_eq!(view.shape(), Shape::Circle);
        assert!(view.is_morphing());
        view.advance(ms(300));
        assert_eq!(view.shape(), Shape::Rectangle);
        assert_eq!(ends.get(), 2);
        assert!(!view.is_morphing());
    }

    #[test]
    fn test_host_companions_extend_morph() {
        struct SlowHost(Rc<Cell<u32>>);

        impl TransitionHost for SlowHost {
            fn begin_delayed_transition(&mut self, _descriptor: &MorphDescriptor) {
                self.0.set(self.0.get() + 1);
            }

            fn companion_animators(&mut self, descriptor: &MorphDescriptor) -> Vec<Box<dyn Animator>> {
                vec![Box::new(ValueAnimator::new(0.0, 1.0, descriptor.duration + ms(200)))]
            }
        }

        let begun = Rc::new(Cell::new(0));
        let mut view = view();
        view.set_transition_host(SlowHost(begun.clone()));
        view.morph();
        assert_eq!(begun.get(), 1);
        view.advance(ms(300));
        assert!(view.is_morphing());
        assert_eq!(view.shape(), Shape::Rectangle);
        view.advance(ms(200));
        assert!(!view.is_morphing());
        assert_eq!(view.shape(), Shape::Circle);
    }
}
