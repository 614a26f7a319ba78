//! Track (ring) color representation.

use crate::error::{CoverError, CoverResult};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Ring color as straight RGBA8, convertible to and from packed ARGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TrackColor {
    /// Translucent white (`#56FFFFFF`).
    pub const DEFAULT: TrackColor = TrackColor::from_argb(0x56FF_FFFF);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack a `0xAARRGGBB` color int.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack into a `0xAARRGGBB` color int.
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// The color's own alpha channel.
    pub const fn alpha(self) -> u8 {
        self.a
    }

    /// Same color with its alpha channel replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`.
    pub fn parse(s: &str) -> CoverResult<Self> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| CoverError::InvalidColor(s.to_string()))?;
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| CoverError::InvalidColor(s.to_string()))?;
        match hex.len() {
            6 => Ok(Self::from_argb(0xFF00_0000 | value)),
            8 => Ok(Self::from_argb(value)),
            _ => Err(CoverError::InvalidColor(s.to_string())),
        }
    }
}

impl Default for TrackColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for TrackColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08X}", self.to_argb())
    }
}

impl From<Color> for TrackColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<TrackColor> for Color {
    fn from(color: TrackColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}
