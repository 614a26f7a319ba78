//! Cover shapes and image scale modes.

use crate::{ALPHA_OPAQUE, ALPHA_TRANSPARENT};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Clip shape of the cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Full-bounds rectangle, image cropped to fill.
    #[default]
    Rectangle = 0,
    /// Centered circle with record rings, image fit inside.
    Circle = 1,
}

impl Shape {
    /// Decode a raw shape int. Unknown values fall back to the default shape.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Shape::Circle,
            0 => Shape::Rectangle,
            other => {
                log::warn!("Unknown shape value {}, using rectangle", other);
                Shape::default()
            }
        }
    }

    /// Raw shape int as stored in saved state.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Decode a style attribute name (`"rectangle"` or `"circle"`).
    /// Unknown names fall back to the default shape.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "circle" => Shape::Circle,
            "rectangle" => Shape::Rectangle,
            other => {
                log::warn!("Unknown shape attribute {:?}, using rectangle", other);
                Shape::default()
            }
        }
    }

    /// The other shape.
    pub fn toggled(self) -> Self {
        match self {
            Shape::Rectangle => Shape::Circle,
            Shape::Circle => Shape::Rectangle,
        }
    }

    /// Scale mode the image uses while this shape is shown.
    pub fn scale_mode(self) -> ScaleMode {
        match self {
            Shape::Rectangle => ScaleMode::CenterCrop,
            Shape::Circle => ScaleMode::CenterInside,
        }
    }

    /// Ring alpha level at rest.
    pub fn rest_alpha(self) -> u8 {
        match self {
            Shape::Rectangle => ALPHA_TRANSPARENT,
            Shape::Circle => ALPHA_OPAQUE,
        }
    }
}

/// How the image is placed inside the view bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Scale uniformly so the image covers the bounds, centered.
    #[default]
    CenterCrop,
    /// Scale uniformly so the image fits inside the bounds (never enlarged), centered.
    CenterInside,
}

impl ScaleMode {
    /// Destination rect for an image of `image` size drawn inside `bounds`.
    pub fn image_rect(self, image: Size, bounds: Size) -> Rect {
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        if image.width <= 0.0 || image.height <= 0.0 {
            return Rect::from_center_size(center, Size::ZERO);
        }
        let sx = bounds.width / image.width;
        let sy = bounds.height / image.height;
        let scale = match self {
            ScaleMode::CenterCrop => sx.max(sy),
            ScaleMode::CenterInside => sx.min(sy).min(1.0),
        };
        Rect::from_center_size(center, Size::new(image.width * scale, image.height * scale))
    }
}
