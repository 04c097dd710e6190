//! Small themed widgets shared by the panels.
//!
//! Each helper wraps one egui pattern with the sizes and colors from
//! [`crate::theme`].

use bevy_egui::egui;
use demand::FunctionColor;

use crate::theme;

// =============================================================================
// Text
// =============================================================================

/// Panel title.
pub fn heading(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(theme::FONT_HEADING)
            .color(theme::TEXT_HEADING)
            .strong(),
    );
}

/// Normal body text.
pub fn body(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.label(egui::RichText::new(text).size(theme::FONT_BODY))
}

/// Muted small text.
pub fn caption(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(theme::FONT_SMALL)
            .color(theme::TEXT_MUTED),
    );
}

pub fn error_text(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(theme::FONT_SMALL)
            .color(theme::ERROR),
    );
}

// =============================================================================
// Buttons
// =============================================================================

pub fn primary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    let button = egui::Button::new(
        egui::RichText::new(text)
            .size(theme::FONT_BODY)
            .color(egui::Color32::WHITE),
    )
    .fill(theme::PRIMARY)
    .corner_radius(egui::CornerRadius::same(theme::WIDGET_CORNER_RADIUS));
    ui.add(button)
}

// =============================================================================
// Function color swatch
// =============================================================================

/// egui color for a host color token. Unparseable tokens render grey.
pub fn swatch_color(color: &FunctionColor) -> egui::Color32 {
    match color.to_rgb() {
        Some([r, g, b]) => egui::Color32::from_rgb(r, g, b),
        None => theme::TEXT_MUTED,
    }
}

/// A small filled square in the function's color.
pub fn color_swatch(ui: &mut egui::Ui, color: &FunctionColor) -> egui::Response {
    let size = egui::vec2(theme::SWATCH_SIZE, theme::SWATCH_SIZE);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
    let rounding = egui::CornerRadius::same(theme::WIDGET_CORNER_RADIUS);
    ui.painter().rect_filled(rect, rounding, swatch_color(color));
    ui.painter().rect_stroke(
        rect,
        rounding,
        egui::Stroke::new(1.0, theme::SWATCH_OUTLINE),
        egui::StrokeKind::Inside,
    );
    response
}

// =============================================================================
// Progress bar
// =============================================================================

/// Thin fixed-width bar: `fraction` of the track filled with the accent color.
pub fn spots_progress_bar(ui: &mut egui::Ui, fraction: f32) -> egui::Response {
    let size = egui::vec2(theme::PROGRESS_WIDTH, theme::PROGRESS_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, egui::CornerRadius::ZERO, theme::PROGRESS_TRACK);

    let filled = filled_width(fraction, rect.width());
    if filled > 0.0 {
        let fill_rect = egui::Rect::from_min_size(rect.min, egui::vec2(filled, rect.height()));
        ui.painter()
            .rect_filled(fill_rect, egui::CornerRadius::ZERO, theme::PRIMARY);
    }
    response
}

/// Width of the filled part; NaN or out-of-range fractions are clamped.
pub fn filled_width(fraction: f32, track_width: f32) -> f32 {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    fraction * track_width
}

// =============================================================================
// Section helpers
// =============================================================================

/// Add a separator with consistent spacing above and below.
pub fn section_separator(ui: &mut egui::Ui) {
    ui.add_space(theme::ITEM_SPACING);
    ui.separator();
    ui.add_space(theme::ITEM_SPACING);
}
