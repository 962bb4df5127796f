//! A single named entry in a key-value store.

use std::rc::Rc;

use tracing::debug;

use crate::error::{BridgeError, StoreError};
use crate::store::KeyValueStore;

/// One fixed key bound to a shared store. Cloning shares the store.
///
/// The slot is only ever read whole and replaced whole; it has no delete.
pub struct PersistedSlot<S> {
    key: String,
    store: Rc<S>,
}

impl<S> Clone for PersistedSlot<S> {
    fn clone(&self) -> Self {
        Self { key: self.key.clone(), store: Rc::clone(&self.store) }
    }
}

impl<S: KeyValueStore> PersistedSlot<S> {
    pub fn new(key: impl Into<String>, store: S) -> Self {
        Self { key: key.into(), store: Rc::new(store) }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current raw value, if any.
    ///
    /// # Errors
    ///
    /// Passes through the store's read failure.
    pub fn read(&self) -> Result<Option<String>, StoreError> {
        self.store.get(&self.key)
    }

    /// Replace the raw value.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::StorageWrite`] if the store rejects the write.
    pub fn write(&self, raw: &str) -> Result<(), BridgeError> {
        self.store
            .set(&self.key, raw)
            .map_err(|source| BridgeError::StorageWrite { key: self.key.clone(), source })?;
        debug!(key = %self.key, bytes = raw.len(), "slot overwritten");
        Ok(())
    }
}
