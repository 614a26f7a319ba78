//! Easing functions for animations

use std::f64::consts::PI;

/// Linear interpolation (no easing)
#[inline]
pub fn linear(t: f64) -> f64 {
    t
}

/// Cosine ease: slow start, fast middle, slow end
#[inline]
pub fn accelerate_decelerate(t: f64) -> f64 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}
