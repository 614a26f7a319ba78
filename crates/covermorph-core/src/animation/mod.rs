//! Frame-driven animators.
//!
//! Animators hold no clock of their own: the host advances them with the
//! time elapsed since the previous frame and reads back the current value.

pub mod easing;
mod set;
mod value;

pub use set::AnimatorSet;
pub use value::{Interpolator, Repeat, ValueAnimator};

use std::time::Duration;

/// Outcome of advancing an animator by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorStatus {
    /// Not started, already finished, or cancelled.
    Idle,
    /// Still running after this frame.
    Running,
    /// Reached its end on this frame.
    Finished,
}

/// A property animation driven by the host's frame clock.
pub trait Animator: std::fmt::Debug {
    /// Start (or restart) from the beginning.
    fn start(&mut self);

    /// Advance by `dt` of frame time.
    fn advance(&mut self, dt: Duration) -> AnimatorStatus;

    /// Stop where it is without reaching the end.
    fn cancel(&mut self);

    /// Whether the animator is between start and finish/cancel.
    fn is_running(&self) -> bool;

    /// Total duration, `None` if it repeats forever.
    fn duration(&self) -> Option<Duration>;
}
