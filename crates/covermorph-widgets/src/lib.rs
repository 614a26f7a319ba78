//! egui widgets for Covermorph music covers.
//!
//! - **Cover**: the clipped, morphing, spinning cover image
//! - **Controls**: morph / play / stop buttons
//! - **Mesh**: clip-polygon tessellation for the egui painter

pub mod controls;
pub mod cover;
pub mod mesh;

pub use controls::{apply, cover_controls, ControlAction, ControlState, ToggleButton};
pub use cover::{ring_color32, CoverWidget};
pub use mesh::{clip_polygon, textured_fan, to_color32};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Default cover edge length
    pub const COVER: f32 = 240.0;
    /// Control button height
    pub const BUTTON_HEIGHT: f32 = 24.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(160, 160, 160);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(235, 235, 235);
    /// Idle button background
    pub const BUTTON_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Fill under the cover image
    pub const COVER_BG: Color32 = Color32::from_rgb(24, 24, 24);
}
