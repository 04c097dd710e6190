use bevy_egui::{egui, EguiContexts};

use crate::ui_widgets;

/// Secondary entry point; a placeholder with no controls.
pub fn floating_panel_ui(mut contexts: EguiContexts) {
    egui::CentralPanel::default().show(contexts.ctx_mut(), |ui| {
        ui_widgets::body(ui, "The floating panel");
    });
}
