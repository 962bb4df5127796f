//! JSON pass-through codec for persisted models.
//!
//! The stored string is the compact `serde_json` encoding of whatever the
//! runtime emits. No schema is imposed and no envelope is added, so a slot
//! written by another host that uses plain `JSON.stringify` reads back the same.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::BridgeError;

/// Encode a model for storage.
///
/// # Errors
///
/// Returns [`BridgeError::Serialization`] when the model has no JSON
/// representation (for example a map keyed by non-strings).
pub fn encode<M: Serialize>(model: &M) -> Result<String, BridgeError> {
    serde_json::to_string(model).map_err(BridgeError::Serialization)
}

/// Decode a stored string read from `key`.
///
/// # Errors
///
/// Returns [`BridgeError::Deserialization`] for malformed content.
pub fn decode<M: DeserializeOwned>(key: &str, raw: &str) -> Result<M, BridgeError> {
    serde_json::from_str(raw).map_err(|source| BridgeError::Deserialization { key: key.to_owned(), source })
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
