//! Radius and ring-alpha properties animated by the morph transition.

use crate::color::TrackColor;
use crate::geometry::{self, CoverGeometry};
use crate::shape::Shape;
use crate::ALPHA_OPAQUE;
use kurbo::Size;
use peniko::Color;

/// The two animatable properties of a cover plus the geometry they drive.
///
/// Every setter is a no-op when the value does not change, so a host
/// animating at frame rate does not trigger redundant path rebuilds.
#[derive(Debug, Clone)]
pub struct TransitionModel {
    geometry: CoverGeometry,
    track_color: TrackColor,
    /// Unscaled ring level in [0, 255].
    alpha: u8,
    invalidated: bool,
}

impl TransitionModel {
    /// Create a model with the given ring spacing (px) and ring color.
    pub fn new(track_size: f64, track_color: TrackColor, shape: Shape) -> Self {
        Self {
            geometry: CoverGeometry::new(track_size),
            track_color,
            alpha: shape.rest_alpha(),
            invalidated: true,
        }
    }

    /// Derived clip and ring geometry.
    pub fn geometry(&self) -> &CoverGeometry {
        &self.geometry
    }

    /// Current view bounds.
    pub fn size(&self) -> Size {
        self.geometry.size()
    }

    /// Update the view bounds, rebuilding paths around the current radius.
    pub fn set_bounds(&mut self, size: Size) {
        if size != self.geometry.size() {
            self.geometry.reset(size, self.geometry.radius());
            self.invalidated = true;
        }
    }

    pub fn transition_radius(&self) -> f64 {
        self.geometry.radius()
    }

    /// Set the clip radius. Returns whether anything changed.
    pub fn set_transition_radius(&mut self, radius: f64) -> bool {
        if radius == self.geometry.radius() {
            return false;
        }
        self.geometry.reset(self.geometry.size(), radius);
        self.invalidated = true;
        true
    }

    /// Ring level as last set, in [0, 255].
    pub fn transition_alpha(&self) -> u8 {
        self.alpha
    }

    /// Set the ring level. Returns whether anything changed.
    pub fn set_transition_alpha(&mut self, alpha: u8) -> bool {
        if alpha == self.alpha {
            return false;
        }
        self.alpha = alpha;
        self.invalidated = true;
        true
    }

    /// Alpha actually painted: the ring level scaled by the track color's own alpha.
    pub fn effective_alpha(&self) -> u8 {
        (self.alpha as u32 * self.track_color.alpha() as u32 / ALPHA_OPAQUE as u32) as u8
    }

    pub fn track_color(&self) -> TrackColor {
        self.track_color
    }

    /// Replace the ring color. The ring level resets to the shape's rest level.
    pub fn set_track_color(&mut self, color: TrackColor, shape: Shape) -> bool {
        if color == self.track_color {
            return false;
        }
        self.track_color = color;
        self.alpha = shape.rest_alpha();
        self.invalidated = true;
        true
    }

    /// Color to stroke the rings with this frame.
    pub fn ring_color(&self) -> Color {
        self.track_color.with_alpha(self.effective_alpha()).into()
    }

    /// Snap radius and ring level to where `shape` rests for the current bounds.
    pub fn reset_to_rest(&mut self, shape: Shape) {
        self.set_transition_radius(geometry::rest_radius(shape, self.size()));
        self.set_transition_alpha(shape.rest_alpha());
    }

    /// Request a redraw.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Consume the pending redraw request.
    pub fn take_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Reading the ring level returns exactly what was written, whatever the base alpha.
        #[test]
        fn alpha_roundtrip(level in 0u8..=255, base in 0u8..=255) {
            let mut model = TransitionModel::new(10.0, TrackColor::DEFAULT.with_alpha(base), Shape::Rectangle);
            model.set_transition_alpha(level);
            prop_assert_eq!(model.transition_alpha(), level);
            prop_assert!(model.effective_alpha() <= base);
        }
    }
}
