//! Persisted-state bridge between a key-value store and an application runtime.
//!
//! On startup the bridge reads one slot from the store, decodes it as JSON,
//! and hands it to the runtime as initialization flags. Afterwards every
//! model the runtime emits on its outbound port is encoded and overwrites
//! that same slot.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`bridge`] | [`bridge::StateBridge`]: load, initialize, subscribe |
//! | [`store`] | [`store::KeyValueStore`] and its memory, file, and browser backends |
//! | [`slot`] | A fixed key bound to a store |
//! | [`codec`] | JSON encode/decode at the slot boundary |
//! | [`port`] | Outbound single-subscriber emission channel |
//! | [`runtime`] | Runtime contract plus scripted and channel-driven runtimes |
//! | [`config`] | Environment-driven configuration |
//! | [`error`] | Error taxonomy and error codes |

pub mod bridge;
pub mod codec;
pub mod config;
pub mod error;
pub mod port;
pub mod runtime;
pub mod slot;
pub mod store;

pub use bridge::{BridgePhase, StateBridge};
pub use config::{BridgeConfig, LoadPolicy};
pub use error::{BridgeError, ErrorCode, RuntimeError, StoreError};
pub use runtime::{AppRuntime, InitialValue, MountTarget, RuntimeHandle};
