//! Per-function area-per-spot ratios and their persistence contract.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RATIO_STORE_KEY;
use crate::kv_store::{KeyValueStore, MemoryStore};
use crate::store_error::StoreError;

// =============================================================================
// RatioMap
// =============================================================================

/// Square metres of floor area per parking spot, keyed by function id.
///
/// Serializes as a flat JSON object `{"office": 50, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatioMap(BTreeMap<String, f64>);

impl RatioMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map giving every listed function the same ratio.
    pub fn uniform<'a>(function_ids: impl IntoIterator<Item = &'a str>, ratio: f64) -> Self {
        function_ids
            .into_iter()
            .map(|id| (id.to_string(), ratio))
            .collect()
    }

    pub fn get(&self, function_id: &str) -> Option<f64> {
        self.0.get(function_id).copied()
    }

    /// Sets the ratio for a function, returning the previous one.
    pub fn insert(&mut self, function_id: impl Into<String>, ratio: f64) -> Option<f64> {
        self.0.insert(function_id.into(), ratio)
    }

    pub fn contains(&self, function_id: &str) -> bool {
        self.0.contains_key(function_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(id, ratio)| (id.as_str(), *ratio))
    }

    /// Serialize to the flat JSON object stored under [`RATIO_STORE_KEY`].
    pub fn to_json(&self) -> Result<String, StoreError> {
        if let Some((id, ratio)) = self.iter().find(|(_, ratio)| !ratio.is_finite()) {
            return Err(StoreError::Encode(format!(
                "ratio for '{id}' is not a finite number ({ratio})"
            )));
        }
        serde_json::to_string(&self.0).map_err(|e| StoreError::Encode(e.to_string()))
    }

    /// Parse a stored map. Entries whose value is `null` (what a browser
    /// writes for a non-finite number) are dropped instead of failing the map.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let raw: BTreeMap<String, Option<f64>> =
            serde_json::from_str(json).map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(raw
            .into_iter()
            .filter_map(|(id, ratio)| ratio.map(|r| (id, r)))
            .collect())
    }
}

impl FromIterator<(String, f64)> for RatioMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// RatioStore
// =============================================================================

/// The persisted ratio overrides for the site, behind an injected
/// [`KeyValueStore`].
///
/// Defaults to a volatile [`MemoryStore`]; the `save` crate swaps in a
/// durable backend.
#[derive(Resource)]
pub struct RatioStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl Default for RatioStore {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl RatioStore {
    /// Store ratios in `backend` under the standard namespace key.
    pub fn new(backend: impl KeyValueStore) -> Self {
        Self::with_key(backend, RATIO_STORE_KEY)
    }

    pub fn with_key(backend: impl KeyValueStore, key: impl Into<String>) -> Self {
        Self {
            backend: Box::new(backend),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted map. Never fails: a missing value is an empty map
    /// (the site is uninitialized), and so is unreadable text, with a warning.
    pub fn load(&self) -> RatioMap {
        let Some(text) = self.backend.get(&self.key) else {
            return RatioMap::new();
        };
        match RatioMap::from_json(&text) {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    "RatioStore '{}': ignoring unreadable stored ratios: {}",
                    self.key, e
                );
                RatioMap::new()
            }
        }
    }

    /// Overwrite the persisted map with `map` in full.
    pub fn save(&mut self, map: &RatioMap) -> Result<(), StoreError> {
        let json = map.to_json()?;
        self.backend.set(&self.key, &json)
    }

    /// Persist and return `defaults` if nothing usable is stored yet,
    /// otherwise return the stored map untouched.
    ///
    /// Defaults are not merged into an existing map: a function first seen
    /// after initialization has no ratio until the user sets one. Stored
    /// text that cannot be decoded is left in place; the defaults are used
    /// for this session only.
    pub fn initialize_if_absent(&mut self, defaults: RatioMap) -> RatioMap {
        if let Some(text) = self.backend.get(&self.key) {
            match RatioMap::from_json(&text) {
                Ok(existing) if !existing.is_empty() => return existing,
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        "RatioStore '{}': stored ratios are unreadable ({}); using defaults without overwriting them",
                        self.key, e
                    );
                    return defaults;
                }
            }
        }
        info!(
            "RatioStore '{}': initializing {} function ratio(s) with defaults",
            self.key,
            defaults.len()
        );
        if let Err(e) = self.save(&defaults) {
            warn!(
                "RatioStore '{}': failed to persist default ratios: {}",
                self.key, e
            );
        }
        defaults
    }
}
