//! Vinyl-style rotation: spin forever, then settle to zero at the same speed.

use crate::animation::{Animator, AnimatorStatus, Interpolator, Repeat, ValueAnimator};
use crate::config::{FULL_ANGLE, HALF_ANGLE};
use std::time::Duration;

/// Which rotation animator is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationState {
    #[default]
    Stopped,
    /// Looping 0° → 360° at constant speed.
    Spinning,
    /// Finishing the turn toward the nearest multiple of 360°.
    Decelerating,
}

/// Emitted by [`RotationController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationEvent {
    /// The settle animation reached zero; the angle is exactly 0°.
    Settled,
}

/// Drives the cover's rotation angle (degrees) from the frame clock.
#[derive(Debug, Clone)]
pub struct RotationController {
    state: RotationState,
    angle: f64,
    period: Duration,
    spin: ValueAnimator,
    settle: ValueAnimator,
}

impl RotationController {
    /// Create a stopped controller turning once per `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            state: RotationState::Stopped,
            angle: 0.0,
            period,
            spin: ValueAnimator::new(0.0, FULL_ANGLE, period)
                .with_interpolator(Interpolator::Linear)
                .with_repeat(Repeat::Infinite),
            settle: ValueAnimator::new(0.0, 0.0, Duration::ZERO).with_interpolator(Interpolator::Linear),
        }
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Current angle in degrees, in [0, 360].
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Spinning or settling.
    pub fn is_active(&self) -> bool {
        self.state != RotationState::Stopped
    }

    /// Spinning only; a settling cover is already stopping.
    pub fn is_spinning(&self) -> bool {
        self.state == RotationState::Spinning
    }

    /// Time to turn from `angle` to the nearest multiple of 360° at spin speed.
    pub fn settle_duration(&self, angle: f64) -> Duration {
        let remaining = if angle > HALF_ANGLE { FULL_ANGLE - angle } else { angle };
        Duration::from_secs_f64(remaining * self.period.as_secs_f64() / FULL_ANGLE)
    }

    /// Begin spinning from 0°. Returns `false` unless currently stopped.
    pub fn start(&mut self) -> bool {
        if self.state != RotationState::Stopped {
            return false;
        }
        self.spin.start();
        self.angle = 0.0;
        self.state = RotationState::Spinning;
        log::info!("Rotation started ({:?} per turn)", self.period);
        true
    }

    /// Cancel the spin and settle at constant speed. Returns the settle
    /// duration, or `None` if not spinning.
    pub fn stop(&mut self) -> Option<Duration> {
        if self.state != RotationState::Spinning {
            return None;
        }
        self.spin.cancel();

        let current = self.angle;
        let target = if current > HALF_ANGLE { FULL_ANGLE } else { 0.0 };
        let duration = self.settle_duration(current);
        self.settle.set_values(current, target);
        self.settle.set_duration(duration);
        self.settle.start();
        self.state = RotationState::Decelerating;
        log::info!("Rotation settling from {:.1}° to {}° over {:?}", current, target, duration);
        Some(duration)
    }

    /// Advance the active animator by one frame.
    pub fn advance(&mut self, dt: Duration) -> Option<RotationEvent> {
        match self.state {
            RotationState::Stopped => None,
            RotationState::Spinning => {
                self.spin.advance(dt);
                self.angle = self.spin.value();
                None
            }
            RotationState::Decelerating => {
                let status = self.settle.advance(dt);
                self.angle = self.settle.value();
                if status != AnimatorStatus::Finished {
                    return None;
                }
                self.angle = 0.0;
                self.state = RotationState::Stopped;
                log::info!("Rotation settled");
                Some(RotationEvent::Settled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD_MS: f64 = 2500.0;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn controller() -> RotationController {
        RotationController::new(ms(2500))
    }

    fn expected_settle(angle: f64) -> f64 {
        let remaining = if angle > 180.0 { 360.0 - angle } else { angle };
        remaining * (PERIOD_MS / 360.0) / 1000.0
    }

    #[test]
    fn test_start_spins_linearly() {
        let mut rotation = controller();
        assert!(rotation.start());
        assert_eq!(rotation.state(), RotationState::Spinning);
        rotation.advance(ms(625));
        assert!((rotation.angle() - 90.0).abs() < 1e-9);
        rotation.advance(ms(2500));
        assert!((rotation.angle() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_start_while_active_is_noop() {
        let mut rotation = controller();
        rotation.start();
        rotation.advance(ms(100));
        assert!(!rotation.start());
        rotation.stop();
        assert!(!rotation.start());
        assert_eq!(rotation.state(), RotationState::Decelerating);
    }

    #[test]
    fn test_stop_when_not_spinning_is_noop() {
        let mut rotation = controller();
        assert_eq!(rotation.stop(), None);
        assert_eq!(rotation.state(), RotationState::Stopped);
    }

    #[test]
    fn test_stop_before_half_turns_back_to_zero() {
        let mut rotation = controller();
        rotation.start();
        rotation.advance(ms(625));

        let duration = rotation.stop().unwrap();
        assert!((duration.as_secs_f64() - expected_settle(90.0)).abs() < 1e-9);
        assert_eq!(rotation.state(), RotationState::Decelerating);

        rotation.advance(ms(300));
        assert!(rotation.angle() < 90.0 && rotation.angle() > 0.0);
        assert_eq!(rotation.advance(ms(325)), Some(RotationEvent::Settled));
        assert_eq!(rotation.angle(), 0.0);
        assert_eq!(rotation.state(), RotationState::Stopped);
    }

    #[test]
    fn test_stop_past_half_finishes_the_turn() {
        let mut rotation = controller();
        rotation.start();
        rotation.advance(ms(1875));
        assert!((rotation.angle() - 270.0).abs() < 1e-9);

        let duration = rotation.stop().unwrap();
        assert!((duration.as_secs_f64() - expected_settle(270.0)).abs() < 1e-9);

        rotation.advance(ms(300));
        assert!(rotation.angle() > 270.0 && rotation.angle() < 360.0);
        assert_eq!(rotation.advance(ms(400)), Some(RotationEvent::Settled));
        assert_eq!(rotation.angle(), 0.0);
    }

    #[test]
    fn test_settle_keeps_angular_speed() {
        let mut rotation = controller();
        rotation.start();
        rotation.advance(ms(500));
        let before = rotation.angle();
        rotation.stop();
        rotation.advance(ms(100));
        // 100 ms at 360°/2500 ms is 14.4°, now heading back toward zero.
        assert!((before - rotation.angle() - 14.4).abs() < 1e-6);
    }

    #[test]
    fn test_stop_at_zero_settles_next_frame() {
        let mut rotation = controller();
        rotation.start();
        assert_eq!(rotation.stop(), Some(Duration::ZERO));
        assert_eq!(rotation.advance(Duration::ZERO), Some(RotationEvent::Settled));
    }

    #[test]
    fn test_settled_fires_once() {
        let mut rotation = controller();
        rotation.start();
        rotation.advance(ms(100));
        rotation.stop();
        let events: Vec<_> = (0..20).filter_map(|_| rotation.advance(ms(16))).collect();
        assert_eq!(events, vec![RotationEvent::Settled]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Settle time is the remaining arc at spin speed.
        #[test]
        fn settle_duration_matches_arc(elapsed_ms in 0u64..10_000) {
            let mut rotation = RotationController::new(Duration::from_millis(2500));
            rotation.start();
            rotation.advance(Duration::from_millis(elapsed_ms));
            let angle = rotation.angle();
            let remaining = if angle > 180.0 { 360.0 - angle } else { angle };
            let duration = rotation.stop().unwrap();
            prop_assert!((duration.as_secs_f64() - remaining * (2500.0 / 360.0) / 1000.0).abs() < 1e-6);

            rotation.advance(duration);
            prop_assert_eq!(rotation.angle(), 0.0);
            prop_assert_eq!(rotation.state(), RotationState::Stopped);
        }
    }
}
