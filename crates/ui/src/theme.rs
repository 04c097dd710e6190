//! Colors, sizes and the egui style used by the parking demand panel.

use bevy_egui::{egui, EguiContexts};

// Palette
pub const PRIMARY: egui::Color32 = egui::Color32::from_rgb(0x06, 0x96, 0xD7);
pub const PROGRESS_TRACK: egui::Color32 = egui::Color32::from_rgb(0xF5, 0xF5, 0xF5);
pub const ERROR: egui::Color32 = egui::Color32::from_rgb(0xD7, 0x3A, 0x2E);
pub const BG_PANEL: egui::Color32 = egui::Color32::from_rgb(0xFF, 0xFF, 0xFF);
pub const BG_INPUT: egui::Color32 = egui::Color32::from_rgb(0xF8, 0xF8, 0xF8);
pub const TEXT: egui::Color32 = egui::Color32::from_rgb(0x3C, 0x3C, 0x3C);
pub const TEXT_HEADING: egui::Color32 = egui::Color32::from_rgb(0x1E, 0x1E, 0x1E);
pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(0x80, 0x80, 0x80);
pub const SWATCH_OUTLINE: egui::Color32 = egui::Color32::from_rgb(0xD0, 0xD0, 0xD0);

// Typography
pub const FONT_HEADING: f32 = 14.0;
pub const FONT_BODY: f32 = 12.0;
pub const FONT_SMALL: f32 = 11.0;

// Layout
pub const PANEL_WIDTH: f32 = 280.0;
pub const ITEM_SPACING: f32 = 6.0;
pub const WIDGET_CORNER_RADIUS: u8 = 2;
pub const SWATCH_SIZE: f32 = 12.0;
pub const RATIO_INPUT_WIDTH: f32 = 56.0;
pub const PROGRESS_WIDTH: f32 = 65.0;
pub const PROGRESS_HEIGHT: f32 = 6.0;

pub fn apply_panel_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();

    let hover = egui::Color32::from_rgb(0xEE, 0xEE, 0xEE);

    style.visuals.window_fill = BG_PANEL;
    style.visuals.panel_fill = BG_PANEL;
    style.visuals.extreme_bg_color = BG_INPUT;
    style.visuals.override_text_color = Some(TEXT);

    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.selection.bg_fill = PRIMARY.gamma_multiply(0.3);
    style.visuals.selection.stroke = egui::Stroke::new(1.0, PRIMARY);

    let widget_rounding = egui::CornerRadius::same(WIDGET_CORNER_RADIUS);
    style.visuals.widgets.noninteractive.corner_radius = widget_rounding;
    style.visuals.widgets.inactive.corner_radius = widget_rounding;
    style.visuals.widgets.hovered.corner_radius = widget_rounding;
    style.visuals.widgets.active.corner_radius = widget_rounding;

    style.spacing.item_spacing = egui::vec2(ITEM_SPACING, ITEM_SPACING);

    ctx.set_style(style);
}
