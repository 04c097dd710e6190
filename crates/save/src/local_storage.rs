//! Browser `localStorage` backend for WASM builds.
//!
//! `web_sys::Storage` is not `Send`, so the handle is looked up on every
//! call instead of being held by the store.

use demand::{KeyValueStore, StoreError};
use web_sys::Storage;

/// [`KeyValueStore`] over the page's `localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

fn storage() -> Result<Storage, StoreError> {
    web_sys::window()
        .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
        .local_storage()
        .map_err(|e| StoreError::Unavailable(format!("localStorage error: {:?}", e)))?
        .ok_or_else(|| StoreError::Unavailable("no localStorage".to_string()))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("localStorage write failed: {:?}", e)))
    }
}
