use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

use demand::{MetricsSource, ParkingDemandPlugin, StaticMetricsProvider};

mod cli;
mod metrics_file;
#[cfg(any(target_arch = "wasm32", test))]
mod web_query;

use cli::LaunchOptions;
use metrics_file::{demo_site, JsonFileMetrics};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    let options = LaunchOptions::parse();
    #[cfg(target_arch = "wasm32")]
    let options = LaunchOptions::for_page(web_query::floating_requested());

    let source = match &options.metrics {
        Some(path) => MetricsSource::new(JsonFileMetrics::new(path)),
        None => MetricsSource::new(StaticMetricsProvider::new(demo_site())),
    };

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Parking demand".to_string(),
            resolution: (360.0, 520.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(options.settings())
    .insert_resource(options.panel_mode())
    .insert_resource(source)
    .add_plugins((
        save::StoragePlugin::new(&options.store),
        ParkingDemandPlugin,
        ui::ParkingDemandUiPlugin,
    ))
    .add_systems(Startup, spawn_camera);

    if options.metrics.is_none() {
        info!("No --metrics file given; showing the demo site");
    }

    app.run();
}

/// egui draws on top of the primary camera.
fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
