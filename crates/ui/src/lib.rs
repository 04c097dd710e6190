use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod floating_panel;
pub mod parking_panel;
pub mod theme;
pub mod ui_widgets;

/// Which surface the app shows.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelMode {
    /// The parking demand side panel.
    #[default]
    Side,
    /// The floating placeholder panel.
    Floating,
}

pub struct ParkingDemandUiPlugin;

impl Plugin for ParkingDemandUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<PanelMode>()
            .init_resource::<parking_panel::RatioInputBuffers>()
            .add_systems(Startup, theme::apply_panel_theme)
            .add_systems(
                Update,
                (
                    parking_panel::parking_panel_ui
                        .run_if(resource_equals(PanelMode::Side)),
                    floating_panel::floating_panel_ui
                        .run_if(resource_equals(PanelMode::Floating)),
                ),
            );
    }
}
