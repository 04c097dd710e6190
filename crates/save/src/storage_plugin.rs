use std::path::PathBuf;

use bevy::prelude::*;
use demand::RatioStore;

#[cfg(not(target_arch = "wasm32"))]
use crate::file_store::JsonFileStore;
#[cfg(target_arch = "wasm32")]
use crate::local_storage::LocalStorageStore;

/// Default ratio file, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "parking-demand.json";

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Installs a durable [`RatioStore`]: a JSON file on native targets,
/// `localStorage` in the browser.
///
/// If the file cannot be opened the app keeps the in-memory store that
/// `ParkingDemandPlugin` initializes, so edits still work for the session.
pub struct StoragePlugin {
    pub path: PathBuf,
}

impl Default for StoragePlugin {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

impl StoragePlugin {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Plugin for StoragePlugin {
    #[cfg(not(target_arch = "wasm32"))]
    fn build(&self, app: &mut App) {
        match JsonFileStore::open(&self.path) {
            Ok(store) => {
                info!("Parking ratios persisted to {}", store.path().display());
                app.insert_resource(RatioStore::new(store));
            }
            Err(e) => {
                warn!(
                    "Cannot open ratio store {}: {}; ratios will not outlive this session",
                    self.path.display(),
                    e
                );
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn build(&self, app: &mut App) {
        app.insert_resource(RatioStore::new(LocalStorageStore));
    }
}
