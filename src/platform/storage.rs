//! LocalStorage helpers
//!
//! Values are JSON strings under a fixed key. Natively there is no backing
//! store: loads return `None` and saves are dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Load and parse `key`; `None` if missing or unreadable
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = load_raw(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt {key}: {e}");
            None
        }
    }
}

/// Serialize and store `value` under `key`
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => save_raw(key, &json),
        Err(e) => log::warn!("Could not serialize {key}: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn load_raw(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn save_raw(key: &str, json: &str) {
    match local_storage() {
        Some(storage) => {
            if storage.set_item(key, json).is_err() {
                log::warn!("LocalStorage rejected {key} (quota?)");
            }
        }
        None => log::warn!("LocalStorage unavailable, {key} not saved"),
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_raw(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_raw(_key: &str, _json: &str) {
    // No-op for native
}
