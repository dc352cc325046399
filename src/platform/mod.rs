//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup (env_logger natively, the browser console on the web)
//! - Preference storage (JSON file natively, LocalStorage on the web)

use crate::persistence::{MemoryStore, PreferenceStore};

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Install the logger for this platform. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the logger for this platform. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Open the preference file at `path`, or fall back to a volatile store
/// when it cannot be read
#[cfg(not(target_arch = "wasm32"))]
pub fn open_store(path: &std::path::Path) -> Box<dyn PreferenceStore> {
    match crate::persistence::JsonFileStore::open(path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!(
                "Cannot open preferences at {}: {}, progress will not be saved",
                path.display(),
                e
            );
            Box::new(MemoryStore::new())
        }
    }
}

/// Browser LocalStorage, or a volatile store when storage is unavailable
/// (private browsing, sandboxed iframes)
#[cfg(target_arch = "wasm32")]
pub fn open_store() -> Box<dyn PreferenceStore> {
    match LocalStorageStore::new() {
        Some(store) => Box::new(store),
        None => {
            log::warn!("LocalStorage unavailable, progress will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}
