//! Tests for the ratio map and its load/save/initialize contract.

use std::sync::{Arc, Mutex};

use super::*;

use crate::config::RATIO_STORE_KEY;
use crate::kv_store::{KeyValueStore, MemoryStore};
use crate::store_error::StoreError;

/// Store that records every write so tests can see what was persisted.
#[derive(Clone, Default)]
struct RecordingStore {
    value: Arc<Mutex<Option<String>>>,
    writes: Arc<Mutex<Vec<String>>>,
}

impl RecordingStore {
    fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, _key: &str) -> Option<String> {
        self.value.lock().unwrap().clone()
    }

    fn set(&mut self, _key: &str, value: &str) -> Result<(), StoreError> {
        *self.value.lock().unwrap() = Some(value.to_string());
        self.writes.lock().unwrap().push(value.to_string());
        Ok(())
    }
}

/// Store whose writes always fail.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read-only".to_string()))
    }
}

fn sample_map() -> RatioMap {
    let mut map = RatioMap::new();
    map.insert("office", 50.0);
    map.insert("residential", 25.0);
    map.insert("retail", 12.5);
    map
}

// -------------------------------------------------------------------------
// RatioMap
// -------------------------------------------------------------------------

#[test]
fn test_ratio_map_uniform() {
    let map = RatioMap::uniform(["office", "residential"], 50.0);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("office"), Some(50.0));
    assert_eq!(map.get("residential"), Some(50.0));
    assert!(!map.contains("retail"));
}

#[test]
fn test_ratio_map_json_is_flat_object() {
    let json = sample_map().to_json().unwrap();
    assert_eq!(json, r#"{"office":50.0,"residential":25.0,"retail":12.5}"#);
}

#[test]
fn test_ratio_map_reads_integer_numbers() {
    let map = RatioMap::from_json(r#"{"office":50,"residential":25}"#).unwrap();
    assert_eq!(map.get("office"), Some(50.0));
    assert_eq!(map.get("residential"), Some(25.0));
}

#[test]
fn test_ratio_map_drops_null_entries() {
    let map = RatioMap::from_json(r#"{"office":null,"residential":30}"#).unwrap();
    assert!(!map.contains("office"));
    assert_eq!(map.get("residential"), Some(30.0));
}

#[test]
fn test_ratio_map_rejects_non_object() {
    assert!(matches!(
        RatioMap::from_json("[1,2,3]"),
        Err(StoreError::Decode(_))
    ));
}

#[test]
fn test_ratio_map_refuses_to_encode_nan() {
    let mut map = RatioMap::new();
    map.insert("office", f64::NAN);
    assert!(matches!(map.to_json(), Err(StoreError::Encode(_))));
}

// -------------------------------------------------------------------------
// load / save
// -------------------------------------------------------------------------

#[test]
fn test_load_without_stored_value_is_empty() {
    let store = RatioStore::default();
    assert!(store.load().is_empty());
}

#[test]
fn test_save_then_load_round_trip() {
    let mut store = RatioStore::default();
    let map = sample_map();
    store.save(&map).unwrap();
    assert_eq!(store.load(), map);
}

#[test]
fn test_save_overwrites_rather_than_merges() {
    let mut store = RatioStore::default();
    store.save(&sample_map()).unwrap();

    let mut smaller = RatioMap::new();
    smaller.insert("office", 40.0);
    store.save(&smaller).unwrap();

    let loaded = store.load();
    assert_eq!(loaded, smaller);
    assert!(!loaded.contains("residential"));
}

#[test]
fn test_load_corrupt_value_is_empty() {
    let backend = MemoryStore::new().with_entry(RATIO_STORE_KEY, "{not json");
    let store = RatioStore::new(backend);
    assert!(store.load().is_empty());
}

#[test]
fn test_store_uses_namespace_key() {
    let backend = MemoryStore::new().with_entry(RATIO_STORE_KEY, r#"{"office":45}"#);
    let store = RatioStore::new(backend);
    assert_eq!(store.key(), "parking-demand-extension");
    assert_eq!(store.load().get("office"), Some(45.0));
}

#[test]
fn test_custom_key_ignores_default_namespace() {
    let backend = MemoryStore::new().with_entry(RATIO_STORE_KEY, r#"{"office":45}"#);
    let store = RatioStore::with_key(backend, "other-site");
    assert!(store.load().is_empty());
}

#[test]
fn test_save_failure_is_reported() {
    let mut store = RatioStore::new(ReadOnlyStore);
    let err = store.save(&sample_map()).unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}

// -------------------------------------------------------------------------
// initialize_if_absent
// -------------------------------------------------------------------------

#[test]
fn test_initialize_persists_defaults_when_empty() {
    let backend = RecordingStore::default();
    let mut store = RatioStore::new(backend.clone());

    let defaults = RatioMap::uniform(["office", "residential"], 50.0);
    let result = store.initialize_if_absent(defaults.clone());

    assert_eq!(result, defaults);
    assert_eq!(store.load(), defaults);
    assert_eq!(backend.write_count(), 1);
}

#[test]
fn test_initialize_keeps_existing_map() {
    let mut store = RatioStore::default();
    let mut existing = RatioMap::new();
    existing.insert("office", 80.0);
    store.save(&existing).unwrap();

    let result = store.initialize_if_absent(RatioMap::uniform(["office", "residential"], 50.0));

    assert_eq!(result, existing);
    // Functions not yet configured are not merged in.
    assert!(!result.contains("residential"));
}

#[test]
fn test_initialize_twice_is_idempotent() {
    let backend = RecordingStore::default();
    let mut store = RatioStore::new(backend.clone());
    let defaults = RatioMap::uniform(["office"], 50.0);

    let first = store.initialize_if_absent(defaults.clone());
    let second = store.initialize_if_absent(RatioMap::uniform(["office"], 99.0));

    assert_eq!(first, second);
    assert_eq!(backend.write_count(), 1, "second call must not write");
}

#[test]
fn test_initialize_treats_stored_empty_object_as_uninitialized() {
    let backend = MemoryStore::new().with_entry(RATIO_STORE_KEY, "{}");
    let mut store = RatioStore::new(backend);
    let defaults = RatioMap::uniform(["office"], 50.0);
    assert_eq!(store.initialize_if_absent(defaults.clone()), defaults);
    assert_eq!(store.load(), defaults);
}

#[test]
fn test_initialize_returns_defaults_even_if_write_fails() {
    let mut store = RatioStore::new(ReadOnlyStore);
    let defaults = RatioMap::uniform(["office"], 50.0);
    assert_eq!(store.initialize_if_absent(defaults.clone()), defaults);
}

#[test]
fn test_initialize_leaves_unreadable_value_untouched() {
    let corrupt = r#"{"office": 40, "residential": "#;
    let backend = RecordingStore::default();
    *backend.value.lock().unwrap() = Some(corrupt.to_string());
    let mut store = RatioStore::new(backend.clone());

    let defaults = RatioMap::uniform(["office", "residential"], 50.0);
    assert_eq!(store.initialize_if_absent(defaults.clone()), defaults);

    assert_eq!(backend.write_count(), 0);
    assert_eq!(backend.value.lock().unwrap().as_deref(), Some(corrupt));
}
