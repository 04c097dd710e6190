//! Right-hand "Parking demand" panel.
//!
//! Renders a [`DemandPanelView`] each frame: one row per function (swatch,
//! name, "1 p. /", ratio input in m²), then the spots progress bar, the
//! `available / required` summary and the balance line. Edits go out as
//! [`SetRatioEvent`]s; the panel never writes demand state itself.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use demand::panel_view::{format_ratio, parse_ratio_input, DemandPanelView, FunctionRow};
use demand::{FetchPhase, ParkingDemand, RefreshMetricsEvent, SetRatioEvent};

use crate::theme;
use crate::ui_widgets;

pub const PANEL_TITLE: &str = "Parking demand";

// =============================================================================
// Ratio input buffers
// =============================================================================

/// Text currently typed into each ratio input.
///
/// Kept separately from the ratios so that text which does not parse stays
/// on screen while the last valid ratio stays in effect. Rebuilt whenever a
/// new metrics snapshot arrives.
#[derive(Resource, Debug, Default)]
pub struct RatioInputBuffers {
    snapshot: Option<u64>,
    text: HashMap<String, String>,
}

impl RatioInputBuffers {
    /// Align the buffers with `view`: reset on a new snapshot, add rows
    /// that have no buffer yet.
    pub fn sync(&mut self, view: &DemandPanelView) {
        if self.snapshot != Some(view.snapshot) {
            self.text.clear();
            self.snapshot = Some(view.snapshot);
        }
        for row in &view.rows {
            self.text
                .entry(row.function_id.clone())
                .or_insert_with(|| format_ratio(row.sqm_per_spot));
        }
    }

    pub fn text(&self, function_id: &str) -> Option<&str> {
        self.text.get(function_id).map(String::as_str)
    }

    fn text_mut(&mut self, function_id: &str) -> &mut String {
        self.text.entry(function_id.to_string()).or_default()
    }

    /// Record newly typed text for a row and return the edit to send, if
    /// the text is a usable ratio.
    pub fn edit(&mut self, function_id: &str, text: &str) -> Option<SetRatioEvent> {
        *self.text_mut(function_id) = text.to_string();
        ratio_edit(function_id, text)
    }
}

/// The edit typed `text` produces, or `None` when it is not a number.
pub fn ratio_edit(function_id: &str, text: &str) -> Option<SetRatioEvent> {
    parse_ratio_input(text).map(|sqm_per_spot| SetRatioEvent {
        function_id: function_id.to_string(),
        sqm_per_spot,
    })
}

// =============================================================================
// System
// =============================================================================

pub fn parking_panel_ui(
    mut contexts: EguiContexts,
    demand: Res<ParkingDemand>,
    mut buffers: ResMut<RatioInputBuffers>,
    mut ratio_edits: EventWriter<SetRatioEvent>,
    mut refresh: EventWriter<RefreshMetricsEvent>,
) {
    let view = DemandPanelView::from_state(&demand);
    buffers.sync(&view);

    let ctx = contexts.ctx_mut();
    egui::SidePanel::right("parking_demand_panel")
        .exact_width(theme::PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui_widgets::heading(ui, PANEL_TITLE);
            ui.add_space(theme::ITEM_SPACING);

            match &view.phase {
                FetchPhase::Uninitialized | FetchPhase::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui_widgets::caption(ui, "Calculating area metrics…");
                    });
                }
                FetchPhase::Failed(reason) => {
                    ui_widgets::error_text(ui, &format!("Could not load area metrics: {reason}"));
                    if ui_widgets::primary_button(ui, "Retry").clicked() {
                        refresh.send(RefreshMetricsEvent);
                    }
                }
                FetchPhase::Ready => {
                    for row in &view.rows {
                        if let Some(edit) = ratio_row(ui, row, &mut buffers) {
                            ratio_edits.send(edit);
                        }
                    }
                    ui_widgets::section_separator(ui);
                    spots_summary(ui, &view);
                }
            }
        });
}

/// One settings row. Returns the edit to send when the input changed to a
/// valid number.
fn ratio_row(
    ui: &mut egui::Ui,
    row: &FunctionRow,
    buffers: &mut RatioInputBuffers,
) -> Option<SetRatioEvent> {
    let mut edit = None;
    ui.horizontal(|ui| {
        ui_widgets::color_swatch(ui, &row.color);
        ui_widgets::body(ui, &row.function_name);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui_widgets::caption(ui, "m²");
            let mut text = buffers.text(&row.function_id).unwrap_or_default().to_string();
            let response = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .desired_width(theme::RATIO_INPUT_WIDTH)
                    .horizontal_align(egui::Align::RIGHT),
            );
            if response.changed() {
                edit = buffers.edit(&row.function_id, &text);
            }
            ui_widgets::body(ui, "1 p. /");
        });
    })
    .response
    .on_hover_text(format!("{} spot(s) required", row.demand));
    edit
}

fn spots_summary(ui: &mut egui::Ui, view: &DemandPanelView) {
    ui.horizontal(|ui| {
        ui_widgets::caption(ui, "Parking spots");
        ui_widgets::spots_progress_bar(ui, view.progress);
        ui_widgets::caption(ui, &view.spot_summary());
    });
    ui_widgets::caption(ui, &view.status_line());
}
