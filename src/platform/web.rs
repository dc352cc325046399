//! LocalStorage preference backend

use web_sys::Storage;

use crate::persistence::{PrefValue, PreferenceStore};

/// Key prefix keeping our entries apart from other apps on the origin
const KEY_PREFIX: &str = "bounce_bot_duel.";

/// Preferences stored as one JSON-encoded LocalStorage item per key
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }

    fn item_key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        let json = self.storage.get_item(&Self::item_key(key)).ok()??;
        serde_json::from_str(&json).ok()
    }

    fn set(&mut self, key: &str, value: PrefValue) {
        let Ok(json) = serde_json::to_string(&value) else {
            return;
        };
        if self.storage.set_item(&Self::item_key(key), &json).is_err() {
            log::warn!("Dropped preference write for {}", key);
        }
    }
}
