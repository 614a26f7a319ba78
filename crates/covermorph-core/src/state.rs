//! Instance state saved across host save/restore cycles.

use crate::color::TrackColor;
use crate::error::{CoverError, CoverResult};
use crate::shape::Shape;
use serde::{Deserialize, Serialize};

/// Snapshot of the cover: shape, ring color and whether it was spinning.
///
/// Serializes as the ordered triple `[shape, track_color, is_rotating]`, the
/// color written as a signed 32-bit ARGB int. Unsigned colors are accepted
/// on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(i32, i64, bool)", into = "(i32, i32, bool)")]
pub struct SavedState {
    pub shape: Shape,
    pub track_color: TrackColor,
    pub is_rotating: bool,
}

impl TryFrom<(i32, i64, bool)> for SavedState {
    type Error = String;

    fn try_from((shape, track_color, is_rotating): (i32, i64, bool)) -> Result<Self, Self::Error> {
        if !(i32::MIN as i64..=u32::MAX as i64).contains(&track_color) {
            return Err(format!("track color {} is not a 32-bit ARGB value", track_color));
        }
        Ok(Self {
            shape: Shape::from_raw(shape),
            track_color: TrackColor::from_argb(track_color as u32),
            is_rotating,
        })
    }
}

impl From<SavedState> for (i32, i32, bool) {
    fn from(state: SavedState) -> Self {
        (state.shape.as_raw(), state.track_color.to_argb() as i32, state.is_rotating)
    }
}

impl SavedState {
    pub fn to_json(&self) -> CoverResult<String> {
        serde_json::to_string(self).map_err(|e| CoverError::State(e.to_string()))
    }

    /// Decode a saved triple. A malformed blob is an error for the host to handle.
    pub fn from_json(json: &str) -> CoverResult<Self> {
        serde_json::from_str(json).map_err(|e| CoverError::State(e.to_string()))
    }
}

impl std::fmt::Display for SavedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SavedState{{shape={:?}, trackColor={}, isRotating={}}}",
            self.shape, self.track_color, self.is_rotating
        )
    }
}

/// Host save envelope: the parent's opaque state plus the cover's own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedStateEnvelope {
    #[serde(default)]
    pub parent: Option<serde_json::Value>,
    pub cover: SavedState,
}

impl SavedStateEnvelope {
    pub fn new(cover: SavedState) -> Self {
        Self { parent: None, cover }
    }

    /// Attach the parent's opaque state.
    pub fn with_parent(mut self, parent: serde_json::Value) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn to_json(&self) -> CoverResult<String> {
        serde_json::to_string(self).map_err(|e| CoverError::State(e.to_string()))
    }

    pub fn from_json(json: &str) -> CoverResult<Self> {
        serde_json::from_str(json).map_err(|e| CoverError::State(e.to_string()))
    }
}
