//! Browser `localStorage` store. Requires the `web` feature and a window.

use wasm_bindgen::{JsCast, JsValue};

use super::KeyValueStore;
use crate::error::StoreError;

pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    /// Bind to `window.localStorage`.
    ///
    /// Never fails: with no window, or with storage disabled by the browser,
    /// every call reports [`StoreError::Unavailable`] and the bridge starts fresh.
    #[must_use]
    pub fn open() -> Self {
        let storage = match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(storage)) => storage,
            _ => None,
        };
        if storage.is_none() {
            tracing::warn!("localStorage unavailable");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("localStorage not available".into()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| classify_write_error(key, value.len(), &e))
    }
}

fn classify_write_error(key: &str, len: usize, err: &JsValue) -> StoreError {
    match err.dyn_ref::<web_sys::DomException>() {
        Some(exc) if exc.name() == "QuotaExceededError" => StoreError::QuotaExceeded { key: key.to_owned(), len },
        _ => StoreError::Unavailable(describe(err)),
    }
}

fn describe(err: &JsValue) -> String {
    match err.dyn_ref::<web_sys::DomException>() {
        Some(exc) => format!("{}: {}", exc.name(), exc.message()),
        None => format!("{err:?}"),
    }
}
