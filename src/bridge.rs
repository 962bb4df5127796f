//! StateBridge: persisted slot on one side, application runtime on the other.
//!
//! DESIGN
//! ======
//! Startup reads the slot once and decodes it into the runtime's flags.
//! After that the bridge only reacts to emissions: each value on the
//! runtime's port is encoded and overwrites the slot. The bridge buffers
//! nothing and merges nothing, so the slot always holds the encoding of the
//! latest emitted model.
//!
//! Lifecycle is `NotInitialized -> Initialized`, one way, no teardown.
//!
//! ERROR HANDLING
//! ==============
//! A store that cannot be read counts as "nothing stored". Malformed
//! content is an error from `load`; `start` applies `LoadPolicy` to decide
//! whether to start fresh or give up. Write failures go back to the
//! emitting runtime untouched: no retry, no fallback.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::codec;
use crate::config::{BridgeConfig, LoadPolicy};
use crate::error::{BridgeError, ErrorCode};
use crate::runtime::{AppRuntime, InitialValue, MountTarget, RuntimeHandle};
use crate::slot::PersistedSlot;
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgePhase {
    NotInitialized,
    Initialized,
}

pub struct StateBridge<S, M = Value> {
    slot: PersistedSlot<S>,
    mount: MountTarget,
    load_policy: LoadPolicy,
    phase: BridgePhase,
    model: PhantomData<fn() -> M>,
}

impl<S, M> StateBridge<S, M>
where
    S: KeyValueStore + 'static,
    M: Serialize + DeserializeOwned + 'static,
{
    pub fn new(store: S, config: &BridgeConfig) -> Self {
        Self {
            slot: PersistedSlot::new(config.key.clone(), store),
            mount: config.mount.clone(),
            load_policy: config.load_policy,
            phase: BridgePhase::NotInitialized,
            model: PhantomData,
        }
    }

    #[must_use]
    pub fn phase(&self) -> BridgePhase {
        self.phase
    }

    /// Read and decode the persisted slot. Read-only.
    ///
    /// A missing or empty slot, or a store that cannot be read, yields
    /// [`InitialValue::Absent`].
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Deserialization`] when the stored string is not
    /// valid JSON for the model.
    pub fn load(&self) -> Result<InitialValue<M>, BridgeError> {
        let raw = match self.slot.read() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.slot.key(), error = %e, "store unreadable; treating slot as absent");
                None
            }
        };

        match raw {
            Some(raw) if !raw.is_empty() => {
                let model = codec::decode(self.slot.key(), &raw)?;
                info!(key = %self.slot.key(), bytes = raw.len(), "restored persisted state");
                Ok(InitialValue::Restored(model))
            }
            _ => {
                info!(key = %self.slot.key(), "no persisted state");
                Ok(InitialValue::Absent)
            }
        }
    }

    /// Start the runtime with `initial` at the configured mount target.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::AlreadyInitialized`] on a second call and
    /// [`BridgeError::Runtime`] if the runtime fails to start.
    pub fn initialize<R>(&mut self, runtime: &mut R, initial: InitialValue<M>) -> Result<R::Handle, BridgeError>
    where
        R: AppRuntime<M>,
    {
        if self.phase == BridgePhase::Initialized {
            return Err(BridgeError::AlreadyInitialized);
        }
        let handle = runtime.initialize(&self.mount, initial)?;
        self.phase = BridgePhase::Initialized;
        info!(mount = %self.mount, "runtime initialized");
        Ok(handle)
    }

    /// The listener `subscribe` installs: encode the model, overwrite the slot.
    pub fn on_emit(&self) -> impl FnMut(&M) -> Result<(), BridgeError> + use<S, M> {
        let slot = self.slot.clone();
        move |model: &M| {
            let raw = codec::encode(model)?;
            slot.write(&raw)
        }
    }

    /// Persist every model the runtime emits on its port.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotInitialized`] before `initialize` and
    /// [`BridgeError::AlreadySubscribed`] if the port has a listener.
    pub fn subscribe<H>(&self, handle: &H) -> Result<(), BridgeError>
    where
        H: RuntimeHandle<M>,
    {
        if self.phase == BridgePhase::NotInitialized {
            return Err(BridgeError::NotInitialized);
        }
        handle.port().subscribe(self.on_emit())?;
        info!(key = %self.slot.key(), port = %handle.port().name(), "persisting emissions");
        Ok(())
    }

    /// Load, initialize and subscribe in one step.
    ///
    /// # Errors
    ///
    /// Under [`LoadPolicy::Surface`], a malformed slot is returned without
    /// starting the runtime. Otherwise, errors from `initialize` or
    /// `subscribe`.
    pub fn start<R>(&mut self, runtime: &mut R) -> Result<R::Handle, BridgeError>
    where
        R: AppRuntime<M>,
    {
        let initial = match self.load() {
            Ok(initial) => initial,
            Err(e) if self.load_policy == LoadPolicy::FreshStart => {
                error!(error = %e, code = e.error_code(), "persisted state unreadable; starting fresh");
                InitialValue::Absent
            }
            Err(e) => return Err(e),
        };
        let handle = self.initialize(runtime, initial)?;
        self.subscribe(&handle)?;
        Ok(handle)
    }
}

#[cfg(test)]
#[path = "bridge_test.rs"]
mod tests;
