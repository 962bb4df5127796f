//! Error taxonomy for the bridge, its stores, and its runtimes.
//!
//! DESIGN
//! ======
//! Nothing here is recovered inside the bridge. `BridgeError` values flow
//! back to whoever drove the operation: the host on startup, the emitting
//! runtime on a write. `ErrorCode` gives each variant a grepable code so
//! hosts can log or branch without matching on message text.

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Failures reported by a [`crate::store::KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store cannot be reached (no window, storage disabled, poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected a write because it would exceed its capacity.
    #[error("quota exceeded writing {len} bytes to {key}")]
    QuotaExceeded { key: String, len: usize },

    /// Filesystem failure in a file-backed store.
    #[error("store io failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "E_STORE_UNAVAILABLE",
            Self::QuotaExceeded { .. } => "E_STORE_QUOTA",
            Self::Io(_) => "E_STORE_IO",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Io(_))
    }
}

// =============================================================================
// RUNTIME
// =============================================================================

/// An application runtime failed to start.
#[derive(Debug, thiserror::Error)]
#[error("runtime failed to initialize: {0}")]
pub struct RuntimeError(pub String);

// =============================================================================
// BRIDGE
// =============================================================================

/// Errors produced by [`crate::bridge::StateBridge`] operations and port emissions.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The stored slot holds something that is not valid JSON for the model.
    #[error("stored value under {key} is malformed: {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// An emitted model cannot be represented as JSON.
    #[error("model could not be serialized: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The store rejected the write of an emitted model.
    #[error("write to {key} failed: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: StoreError,
    },

    /// `initialize` was called on a bridge that is already running.
    #[error("bridge is already initialized")]
    AlreadyInitialized,

    /// `subscribe` was called before `initialize`.
    #[error("bridge is not initialized")]
    NotInitialized,

    /// The port already has its single listener.
    #[error("port already has a subscriber")]
    AlreadySubscribed,

    /// A listener emitted on the port it is listening to.
    #[error("re-entrant emit on port {port}")]
    ReentrantEmit { port: String },

    /// The runtime could not be constructed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl ErrorCode for BridgeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Deserialization { .. } => "E_DESERIALIZE",
            Self::Serialization(_) => "E_SERIALIZE",
            Self::StorageWrite { .. } => "E_STORAGE_WRITE",
            Self::AlreadyInitialized => "E_ALREADY_INITIALIZED",
            Self::NotInitialized => "E_NOT_INITIALIZED",
            Self::AlreadySubscribed => "E_ALREADY_SUBSCRIBED",
            Self::ReentrantEmit { .. } => "E_REENTRANT_EMIT",
            Self::Runtime(_) => "E_RUNTIME",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::StorageWrite { source, .. } => source.retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
