//! Durable backends for the parking ratio store.

#[cfg(not(target_arch = "wasm32"))]
mod atomic_write;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_store;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
mod storage_plugin;

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use storage_plugin::{StoragePlugin, DEFAULT_STORE_FILE};
