//! Rectangle/circle morph transition.
//!
//! A morph is built in two phases: snapshot the view before the change,
//! apply the change (scale mode switches to the target immediately), snapshot
//! again, then build one animator group from the pair. The group plays the
//! clip radius, the ring alpha and whatever companion animations the host
//! supplies for the image itself, all together.

use crate::animation::{Animator, AnimatorSet, AnimatorStatus, Interpolator, ValueAnimator};
use crate::geometry;
use crate::model::TransitionModel;
use crate::shape::{ScaleMode, Shape};
use kurbo::Size;
use std::time::Duration;

/// Whether a morph is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphPhase {
    #[default]
    Idle,
    /// Between transition start and transition end.
    Started,
}

/// What the host is told about a morph that is about to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphDescriptor {
    pub from: Shape,
    pub to: Shape,
    pub from_scale: ScaleMode,
    pub to_scale: ScaleMode,
    pub bounds: Size,
    pub duration: Duration,
    pub interpolator: Interpolator,
}

/// The host layout/transition system a cover lives in.
///
/// Both hooks are optional; a host that animates nothing but the cover's own
/// clip and rings can use [`NoopHost`].
pub trait TransitionHost {
    /// A scene-level delayed transition is beginning for this cover.
    fn begin_delayed_transition(&mut self, _descriptor: &MorphDescriptor) {}

    /// Image transform/bounds animations to play alongside the morph.
    fn companion_animators(&mut self, _descriptor: &MorphDescriptor) -> Vec<Box<dyn Animator>> {
        Vec::new()
    }
}

/// Host with no companion animations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl TransitionHost for NoopHost {}

/// Snapshot of the values a morph animates between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionValues {
    pub shape: Shape,
    pub scale_mode: ScaleMode,
    pub bounds: Size,
    pub min_radius: f64,
    pub max_radius: f64,
}

/// Builds morph animators from before/after snapshots.
#[derive(Debug, Clone, Copy)]
pub struct MorphTransition {
    duration: Duration,
    interpolator: Interpolator,
}

impl MorphTransition {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            interpolator: Interpolator::AccelerateDecelerate,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Snapshot the view for one side of the transition.
    pub fn capture_values(&self, model: &TransitionModel, shape: Shape, scale_mode: ScaleMode) -> TransitionValues {
        let bounds = model.size();
        TransitionValues {
            shape,
            scale_mode,
            bounds,
            min_radius: geometry::min_radius(bounds),
            max_radius: geometry::max_radius(bounds),
        }
    }

    /// Snapshot before the change.
    pub fn capture_start(&self, model: &TransitionModel, shape: Shape, scale_mode: ScaleMode) -> TransitionValues {
        self.capture_values(model, shape, scale_mode)
    }

    /// Snapshot after the change: the target shape in its own scale mode.
    pub fn capture_end(&self, model: &TransitionModel, start: &TransitionValues) -> TransitionValues {
        let target = start.shape.toggled();
        self.capture_values(model, target, target.scale_mode())
    }

    /// Describe the morph starting from `start` for the host.
    pub fn descriptor(&self, start: &TransitionValues) -> MorphDescriptor {
        let to = start.shape.toggled();
        MorphDescriptor {
            from: start.shape,
            to,
            from_scale: start.scale_mode,
            to_scale: to.scale_mode(),
            bounds: start.bounds,
            duration: self.duration,
            interpolator: self.interpolator,
        }
    }

    /// Build the animator group and put `model` at its start values.
    ///
    /// Direction comes from the start shape; the radius range comes from the
    /// end snapshot so the morph lands on the final bounds.
    pub fn create_animator(
        &self,
        start: &TransitionValues,
        end: &TransitionValues,
        model: &mut TransitionModel,
        companions: Vec<Box<dyn Animator>>,
    ) -> MorphAnimator {
        let target = start.shape.toggled();
        let (start_radius, end_radius) = radius_range(target, end.min_radius, end.max_radius);
        let (start_alpha, end_alpha) = (start.shape.rest_alpha(), target.rest_alpha());

        model.set_transition_radius(start_radius);
        model.set_transition_alpha(start_alpha);

        let radius = ValueAnimator::new(start_radius, end_radius, self.duration)
            .with_interpolator(self.interpolator);
        let alpha = ValueAnimator::new(start_alpha as f64, end_alpha as f64, self.duration)
            .with_interpolator(self.interpolator);
        let mut set = AnimatorSet::new();
        set.play_together(companions);

        MorphAnimator {
            target,
            radius,
            alpha,
            companions: set,
        }
    }
}

/// Radius endpoints for a morph toward `target`.
fn radius_range(target: Shape, min_radius: f64, max_radius: f64) -> (f64, f64) {
    match target {
        Shape::Circle => (max_radius, min_radius),
        Shape::Rectangle => (min_radius, max_radius),
    }
}

/// Radius, ring alpha and host companions played together.
#[derive(Debug)]
pub struct MorphAnimator {
    target: Shape,
    radius: ValueAnimator,
    alpha: ValueAnimator,
    companions: AnimatorSet,
}

impl MorphAnimator {
    /// Shape the cover will have once this finishes.
    pub fn target(&self) -> Shape {
        self.target
    }

    /// Number of host companion animators in the group.
    pub fn companion_count(&self) -> usize {
        self.companions.len()
    }

    pub fn start(&mut self) {
        self.radius.start();
        self.alpha.start();
        self.companions.start();
    }

    /// Advance every member and push the radius and alpha into `model`.
    pub fn advance(&mut self, dt: Duration, model: &mut TransitionModel) -> AnimatorStatus {
        self.radius.advance(dt);
        self.alpha.advance(dt);
        self.companions.advance(dt);

        model.set_transition_radius(self.radius.value());
        model.set_transition_alpha(self.alpha.value().round().clamp(0.0, 255.0) as u8);

        if self.radius.is_running() || self.alpha.is_running() || self.companions.is_running() {
            AnimatorStatus::Running
        } else {
            AnimatorStatus::Finished
        }
    }

    /// Re-derive the radius range after the bounds changed mid-morph.
    pub fn retarget(&mut self, size: Size) {
        let (from, to) = radius_range(self.target, geometry::min_radius(size), geometry::max_radius(size));
        self.radius.set_values(from, to);
    }

    pub fn cancel(&mut self) {
        self.radius.cancel();
        self.alpha.cancel();
        self.companions.cancel();
    }

    /// Linear time fraction of the morph.
    pub fn progress(&self) -> f64 {
        self.radius.fraction()
    }
}

/// Morph state machine: Idle → Started → (end) → Idle.
#[derive(Debug)]
pub struct MorphController {
    phase: MorphPhase,
    transition: MorphTransition,
    animator: Option<MorphAnimator>,
}

impl MorphController {
    pub fn new(duration: Duration) -> Self {
        Self {
            phase: MorphPhase::Idle,
            transition: MorphTransition::new(duration),
            animator: None,
        }
    }

    pub fn phase(&self) -> MorphPhase {
        self.phase
    }

    pub fn is_morphing(&self) -> bool {
        self.phase == MorphPhase::Started
    }

    /// Time fraction of the morph in flight.
    pub fn progress(&self) -> Option<f64> {
        self.animator.as_ref().map(MorphAnimator::progress)
    }

    /// Start a morph away from `shape`. Returns `false` if one is already running.
    ///
    /// `scale_mode` switches to the target's mode before the end snapshot so the
    /// host's image transition animates toward it.
    pub fn begin(
        &mut self,
        shape: Shape,
        scale_mode: &mut ScaleMode,
        model: &mut TransitionModel,
        host: &mut dyn TransitionHost,
    ) -> bool {
        if self.is_morphing() {
            return false;
        }

        let start = self.transition.capture_start(model, shape, *scale_mode);
        let descriptor = self.transition.descriptor(&start);
        host.begin_delayed_transition(&descriptor);

        *scale_mode = descriptor.to_scale;
        let end = self.transition.capture_end(model, &start);

        let companions = host.companion_animators(&descriptor);
        let mut animator = self.transition.create_animator(&start, &end, model, companions);
        animator.start();

        log::info!(
            "Morph {:?} -> {:?} started ({} companion animators)",
            descriptor.from,
            descriptor.to,
            animator.companion_count()
        );
        self.animator = Some(animator);
        self.phase = MorphPhase::Started;
        true
    }

    /// Advance the morph. Returns the new shape on the frame it ends.
    pub fn advance(&mut self, dt: Duration, model: &mut TransitionModel) -> Option<Shape> {
        let animator = self.animator.as_mut()?;
        if animator.advance(dt, model) != AnimatorStatus::Finished {
            return None;
        }
        let target = animator.target();
        self.animator = None;
        self.phase = MorphPhase::Idle;
        log::info!("Morph to {:?} ended", target);
        Some(target)
    }

    /// Bounds changed while a morph may be running.
    pub fn on_bounds_changed(&mut self, size: Size) {
        if let Some(animator) = self.animator.as_mut() {
            animator.retarget(size);
        }
    }
}
