//! Key-value persistence seam.
//!
//! The parking pipeline only ever needs `get`/`set` of a serialized string
//! under a fixed key. Backends implement [`KeyValueStore`]; the in-memory one
//! lives here, the durable ones in the `save` crate.

use std::collections::BTreeMap;

use crate::store_error::StoreError;

/// Opaque string store keyed by namespace.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the stored text for `key`, or `None` if nothing was ever set.
    fn get(&self, key: &str) -> Option<String>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store used by default and in tests. Contents die with the process.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that seeds one entry, as if a previous session had written it.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
