//! Key-value stores that hold persisted slots.
//!
//! DESIGN
//! ======
//! The bridge never reaches for ambient global storage. It is handed a
//! `KeyValueStore` at construction, so tests can pass a [`MemoryStore`]
//! and native hosts a [`FileStore`]. Browser builds (`web` feature) use
//! `LocalStorage`, which wraps `window.localStorage`.
//!
//! Both operations take `&self`: the bridge keeps one handle for reads and
//! moves a shared handle into the port listener for writes.

pub mod file;
#[cfg(feature = "web")]
pub mod local;
pub mod memory;

use std::rc::Rc;

use crate::error::StoreError;

pub use file::FileStore;
#[cfg(feature = "web")]
pub use local::LocalStorage;
pub use memory::MemoryStore;

/// String-keyed, string-valued persistent store.
pub trait KeyValueStore {
    /// Read the value under `key`. `Ok(None)` means the key was never written.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
