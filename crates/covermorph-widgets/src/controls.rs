//! Transport controls for a cover: morph, play and stop.

use egui::{vec2, Align2, Color32, CornerRadius, CursorIcon, Sense, Ui};

use covermorph_core::{CoverView, Shape};

use crate::{sizing, theme};

/// A toggle button with text label.
/// Uses solid accent background when selected.
pub struct ToggleButton<'a> {
    label: &'a str,
    selected: bool,
    enabled: bool,
    min_width: Option<f32>,
    height: f32,
    font_size: f32,
}

impl<'a> ToggleButton<'a> {
    /// Create a new toggle button.
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            enabled: true,
            min_width: None,
            height: sizing::BUTTON_HEIGHT,
            font_size: 11.0,
        }
    }

    /// Set minimum width.
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Grey the button out and ignore clicks.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(self.font_size);
        let galley = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font_id.clone(), Color32::PLACEHOLDER);
        let text_width = galley.size().x;
        let width = self.min_width.unwrap_or(text_width + 16.0).max(text_width + 16.0);

        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(vec2(width, self.height), sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                theme::ACCENT
            } else if self.enabled && response.hovered() {
                theme::HOVER_BG
            } else {
                theme::BUTTON_BG
            };
            let text_color = match (self.selected, self.enabled) {
                (true, _) => Color32::WHITE,
                (false, true) => theme::TEXT,
                (false, false) => theme::TEXT_MUTED,
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font_id, text_color);
        }

        let clicked = self.enabled && response.clicked();
        if self.enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        }
        clicked
    }
}

/// What a control row asked the cover to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Morph,
    Start,
    Stop,
}

/// Which actions the cover currently accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub can_morph: bool,
    pub can_start: bool,
    pub can_stop: bool,
}

impl ControlState {
    pub fn of(view: &CoverView) -> Self {
        Self {
            can_morph: !view.is_morphing(),
            can_start: view.shape() == Shape::Circle && !view.is_running(),
            can_stop: view.save_state().is_rotating,
        }
    }
}

/// Apply an action to the cover.
pub fn apply(view: &mut CoverView, action: ControlAction) {
    log::debug!("Control action {:?}", action);
    match action {
        ControlAction::Morph => view.morph(),
        ControlAction::Start => view.start(),
        ControlAction::Stop => view.stop(),
    }
}

/// Draw a morph / play / stop row and apply whatever was clicked.
pub fn cover_controls(ui: &mut Ui, view: &mut CoverView) -> Option<ControlAction> {
    let state = ControlState::of(view);
    let mut action = None;
    ui.horizontal(|ui| {
        let label = match view.shape() {
            Shape::Rectangle => "Circle",
            Shape::Circle => "Square",
        };
        if ToggleButton::new(label, view.is_morphing())
            .min_width(64.0)
            .enabled(state.can_morph)
            .show(ui)
        {
            action = Some(ControlAction::Morph);
        }
        if ToggleButton::new("Play", state.can_stop)
            .min_width(48.0)
            .enabled(state.can_start)
            .show(ui)
        {
            action = Some(ControlAction::Start);
        }
        if ToggleButton::new("Stop", false)
            .min_width(48.0)
            .enabled(state.can_stop)
            .show(ui)
        {
            action = Some(ControlAction::Stop);
        }
    });
    if let Some(action) = action {
        apply(view, action);
    }
    action
}
