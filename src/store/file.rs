//! File-backed store for native hosts.
//!
//! DESIGN
//! ======
//! One file per key under a root directory. Keys are escaped into safe
//! filenames: ASCII alphanumerics, `-` and `_` pass through, every other
//! byte becomes `%XX`. Writes land in a sibling temp file and are renamed
//! over the slot, so a reader sees either the old value or the new one,
//! never a prefix of either. A failed rename removes the temp file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::KeyValueStore;
use crate::error::StoreError;

const SLOT_EXTENSION: &str = "slot";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "file store opened");
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    #[must_use]
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{SLOT_EXTENSION}", escape_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.slot_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key);
        let tmp = self.root.join(format!(".{}.tmp", escape_key(key)));
        std::fs::write(&tmp, value)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %cleanup, "temp slot file left behind");
            }
            return Err(StoreError::Io(e));
        }
        debug!(path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }
}

fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
