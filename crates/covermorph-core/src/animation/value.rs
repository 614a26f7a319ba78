//! Scalar value animator.

use super::{easing, Animator, AnimatorStatus};
use std::time::Duration;

/// Timing curve applied to the linear time fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolator {
    /// Constant speed.
    Linear,
    /// Slow start and end.
    #[default]
    AccelerateDecelerate,
}

impl Interpolator {
    /// Map a time fraction in [0, 1] to a value fraction.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Interpolator::Linear => easing::linear(t),
            Interpolator::AccelerateDecelerate => easing::accelerate_decelerate(t),
        }
    }
}

/// How many times an animator plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Once,
    /// Restart from `from` every time `to` is reached, until cancelled.
    Infinite,
}

/// Interpolates a single `f64` from `from` to `to` over `duration`.
#[derive(Debug, Clone)]
pub struct ValueAnimator {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    interpolator: Interpolator,
    repeat: Repeat,
    running: bool,
    value: f64,
}

impl ValueAnimator {
    /// Create a one-shot animator with accelerate/decelerate timing.
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            interpolator: Interpolator::default(),
            repeat: Repeat::Once,
            running: false,
            value: from,
        }
    }

    /// Set the timing curve.
    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Set the repeat mode.
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Replace the endpoints, keeping the elapsed time.
    pub fn set_values(&mut self, from: f64, to: f64) {
        self.from = from;
        self.to = to;
        if self.running {
            self.value = self.value_at(self.fraction());
        }
    }

    /// Replace the duration. Takes effect from the next start.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Current animated value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Start value.
    pub fn from(&self) -> f64 {
        self.from
    }

    /// End value.
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Linear time fraction of the current iteration, in [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_nanos() as f64 / self.duration.as_nanos() as f64).min(1.0)
    }

    fn value_at(&self, fraction: f64) -> f64 {
        self.from + (self.to - self.from) * self.interpolator.apply(fraction)
    }
}

impl Animator for ValueAnimator {
    fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.value = self.from;
        self.running = true;
    }

    fn advance(&mut self, dt: Duration) -> AnimatorStatus {
        if !self.running {
            return AnimatorStatus::Idle;
        }
        self.elapsed += dt;

        match self.repeat {
            Repeat::Once => {
                if self.elapsed >= self.duration {
                    self.elapsed = self.duration;
                    self.value = self.to;
                    self.running = false;
                    return AnimatorStatus::Finished;
                }
                self.value = self.value_at(self.fraction());
            }
            Repeat::Infinite => {
                let period = self.duration.as_nanos();
                if period == 0 {
                    self.value = self.to;
                    return AnimatorStatus::Running;
                }
                let wrapped = self.elapsed.as_nanos() % period;
                self.elapsed = Duration::from_nanos(wrapped as u64);
                self.value = self.value_at(self.fraction());
            }
        }
        AnimatorStatus::Running
    }

    fn cancel(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn duration(&self) -> Option<Duration> {
        match self.repeat {
            Repeat::Once => Some(self.duration),
            Repeat::Infinite => None,
        }
    }
}
