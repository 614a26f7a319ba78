//! Covermorph Core Library
//!
//! Platform-agnostic engine for a music cover widget: an image clipped to a
//! rectangle or a circle, a morph transition between the two shapes and a
//! vinyl-style rotation that settles back to zero.

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod image_transition;
pub mod model;
pub mod morph;
pub mod rotation;
pub mod shape;
pub mod state;
pub mod view;

pub use animation::{Animator, AnimatorSet, AnimatorStatus, Interpolator, Repeat, ValueAnimator};
pub use color::TrackColor;
pub use config::{CoverConfig, StyleAttributes};
pub use error::{CoverError, CoverResult};
pub use geometry::CoverGeometry;
pub use image_transition::{ImageTransform, ImageTransformAnimator, ImageTransitionHost};
pub use model::TransitionModel;
pub use morph::{
    MorphAnimator, MorphController, MorphDescriptor, MorphPhase, MorphTransition, NoopHost, TransitionHost,
    TransitionValues,
};
pub use rotation::{RotationController, RotationEvent, RotationState};
pub use shape::{ScaleMode, Shape};
pub use state::{SavedState, SavedStateEnvelope};
pub use view::{CoverCallbacks, CoverFrame, CoverView};

/// Alpha level for fully transparent rings.
pub const ALPHA_TRANSPARENT: u8 = 0;
/// Alpha level for fully opaque rings.
pub const ALPHA_OPAQUE: u8 = 255;
