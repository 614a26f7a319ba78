//! Image placement animation between scale modes.
//!
//! A stock companion for hosts that draw the image themselves: while a morph
//! runs, the image rect slides from the old scale mode's placement to the new
//! one in step with the clip.

use crate::animation::{Animator, AnimatorStatus, ValueAnimator};
use crate::morph::{MorphDescriptor, TransitionHost};
use crate::shape::ScaleMode;
use kurbo::{Rect, Size};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct Placement {
    from: ScaleMode,
    to: ScaleMode,
    fraction: f64,
    active: bool,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            from: ScaleMode::default(),
            to: ScaleMode::default(),
            fraction: 1.0,
            active: false,
        }
    }
}

/// Shared handle to the image placement written by [`ImageTransformAnimator`].
#[derive(Debug, Clone, Default)]
pub struct ImageTransform {
    placement: Rc<Cell<Placement>>,
}

impl ImageTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an image transition is running.
    pub fn is_active(&self) -> bool {
        self.placement.get().active
    }

    /// Where to draw an image of `image` size this frame. Outside a transition
    /// this is simply `current`'s placement.
    pub fn image_rect(&self, image: Size, bounds: Size, current: ScaleMode) -> Rect {
        let p = self.placement.get();
        if !p.active {
            return current.image_rect(image, bounds);
        }
        let a = p.from.image_rect(image, bounds);
        let b = p.to.image_rect(image, bounds);
        let t = p.fraction;
        Rect::new(
            a.x0 + (b.x0 - a.x0) * t,
            a.y0 + (b.y0 - a.y0) * t,
            a.x1 + (b.x1 - a.x1) * t,
            a.y1 + (b.y1 - a.y1) * t,
        )
    }

    fn update(&self, f: impl FnOnce(&mut Placement)) {
        let mut p = self.placement.get();
        f(&mut p);
        self.placement.set(p);
    }
}

/// Animates an [`ImageTransform`] from one scale mode to another.
#[derive(Debug)]
pub struct ImageTransformAnimator {
    transform: ImageTransform,
    from: ScaleMode,
    to: ScaleMode,
    progress: ValueAnimator,
}

impl ImageTransformAnimator {
    pub fn new(transform: ImageTransform, descriptor: &MorphDescriptor) -> Self {
        Self {
            transform,
            from: descriptor.from_scale,
            to: descriptor.to_scale,
            progress: ValueAnimator::new(0.0, 1.0, descriptor.duration)
                .with_interpolator(descriptor.interpolator),
        }
    }
}

impl Animator for ImageTransformAnimator {
    fn start(&mut self) {
        self.progress.start();
        let (from, to) = (self.from, self.to);
        self.transform.update(|p| {
            *p = Placement {
                from,
                to,
                fraction: 0.0,
                active: true,
            }
        });
    }

    fn advance(&mut self, dt: Duration) -> AnimatorStatus {
        let status = self.progress.advance(dt);
        let fraction = self.progress.value();
        let done = status != AnimatorStatus::Running;
        self.transform.update(|p| {
            p.fraction = fraction;
            if done {
                p.active = false;
            }
        });
        status
    }

    fn cancel(&mut self) {
        self.progress.cancel();
        self.transform.update(|p| p.active = false);
    }

    fn is_running(&self) -> bool {
        self.progress.is_running()
    }

    fn duration(&self) -> Option<Duration> {
        self.progress.duration()
    }
}

/// Host that animates image placement alongside every morph.
#[derive(Debug, Clone, Default)]
pub struct ImageTransitionHost {
    transform: ImageTransform,
}

impl ImageTransitionHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to read the animated placement from when drawing.
    pub fn transform(&self) -> ImageTransform {
        self.transform.clone()
    }
}

impl TransitionHost for ImageTransitionHost {
    fn begin_delayed_transition(&mut self, descriptor: &MorphDescriptor) {
        log::debug!(
            "Image transition {:?} -> {:?} over {:?}",
            descriptor.from_scale,
            descriptor.to_scale,
            descriptor.duration
        );
    }

    fn companion_animators(&mut self, descriptor: &MorphDescriptor) -> Vec<Box<dyn Animator>> {
        vec![Box::new(ImageTransformAnimator::new(self.transform.clone(), descriptor))]
    }
}
