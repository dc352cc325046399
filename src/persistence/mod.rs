//! Flat key-value preference store
//!
//! Features:
//! - Typed accessors with platform-style defaults (0, false, empty)
//! - In-memory backend for tests and headless runs
//! - JSON file backend on native, LocalStorage on the web (see `platform`)
//!
//! Writes never fail from the caller's point of view: backends log and drop
//! errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod keys;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;

/// A stored preference value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

/// Key-value preferences that survive app launches
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<PrefValue>;

    fn set(&mut self, key: &str, value: PrefValue);

    fn get_int(&self, key: &str) -> i64 {
        match self.get(key) {
            Some(PrefValue::Int(v)) => v,
            _ => 0,
        }
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, PrefValue::Int(value));
    }

    fn get_bool(&self, key: &str) -> bool {
        matches!(self.get(key), Some(PrefValue::Bool(true)))
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, PrefValue::Bool(value));
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(PrefValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.set(key, PrefValue::Str(value.to_string()));
    }

    fn get_string_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(PrefValue::List(list)) => list,
            _ => Vec::new(),
        }
    }

    fn set_string_list(&mut self, key: &str, value: &[String]) {
        self.set(key, PrefValue::List(value.to_vec()));
    }

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Volatile store backed by a sorted map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Serialize all values as a JSON object
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.values)
    }

    /// Rebuild a store from `to_json` output
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            values: serde_json::from_str(json)?,
        })
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: PrefValue) {
        self.values.insert(key.to_string(), value);
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Option<PrefValue> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: PrefValue) {
        (**self).set(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_use_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.get_int("totalCoins"), 0);
        assert!(!store.get_bool("purchasedBalls_3"));
        assert_eq!(store.get_string("playerName"), None);
        assert!(store.get_string_list("completedAchievements").is_empty());
    }

    #[test]
    fn test_typed_round_trip() {
        let mut store = MemoryStore::new();
        store.set_int("totalCoins", 42);
        store.set_bool("soundOn", true);
        store.set_string("playerName", "Kira");
        store.set_string_list("completedAchievements", &["first_coin".to_string()]);

        assert_eq!(store.get_int("totalCoins"), 42);
        assert!(store.get_bool("soundOn"));
        assert_eq!(store.get_string("playerName").as_deref(), Some("Kira"));
        assert_eq!(store.get_string_list("completedAchievements"), vec!["first_coin"]);
    }

    #[test]
    fn test_type_mismatch_reads_default() {
        let mut store = MemoryStore::new();
        store.set_string("totalCoins", "lots");
        assert_eq!(store.get_int("totalCoins"), 0);
        assert!(store.contains("totalCoins"));
    }

    #[test]
    fn test_json_round_trip_preserves_types() {
        let mut store = MemoryStore::new();
        store.set_int("selectedBall", 4);
        store.set_bool("purchasedBalls_4", true);
        store.set_string_list("completedAchievements", &["first_win".to_string()]);

        let json = store.to_json().unwrap();
        let loaded = MemoryStore::from_json(&json).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn PreferenceStore> = Box::new(MemoryStore::new());
        store.set_int("totalCoins", 7);
        assert_eq!(store.get_int("totalCoins"), 7);
    }
}
