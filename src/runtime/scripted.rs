//! Scripted runtime: a stand-in application that emits a fixed sequence.
//!
//! Used by tests and by embedders that want to replay recorded models
//! through a bridge. It remembers the mount and flags it was started
//! with so callers can assert on what the bridge handed over.

use tracing::info;

use super::{AppRuntime, InitialValue, MountTarget, RuntimeHandle};
use crate::config::DEFAULT_PORT_NAME;
use crate::error::{BridgeError, RuntimeError};
use crate::port::Port;

pub struct ScriptedRuntime<M> {
    script: Vec<M>,
    failure: Option<String>,
    started: Option<(MountTarget, InitialValue<M>)>,
}

impl<M: Clone> ScriptedRuntime<M> {
    /// Runtime whose handle will emit `script` in order.
    #[must_use]
    pub fn new(script: Vec<M>) -> Self {
        Self { script, failure: None, started: None }
    }

    /// Runtime whose `initialize` always fails with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self { script: Vec::new(), failure: Some(message.into()), started: None }
    }

    /// Mount target passed to `initialize`, if it ran.
    #[must_use]
    pub fn mount(&self) -> Option<&MountTarget> {
        self.started.as_ref().map(|(mount, _)| mount)
    }

    /// Flags passed to `initialize`, if it ran.
    #[must_use]
    pub fn flags(&self) -> Option<&InitialValue<M>> {
        self.started.as_ref().map(|(_, flags)| flags)
    }
}

impl<M: Clone> AppRuntime<M> for ScriptedRuntime<M> {
    type Handle = ScriptedHandle<M>;

    fn initialize(&mut self, mount: &MountTarget, flags: InitialValue<M>) -> Result<Self::Handle, RuntimeError> {
        if let Some(message) = &self.failure {
            return Err(RuntimeError(message.clone()));
        }
        info!(%mount, restored = !flags.is_absent(), steps = self.script.len(), "scripted runtime initialized");
        self.started = Some((mount.clone(), flags));
        Ok(ScriptedHandle { port: Port::new(DEFAULT_PORT_NAME), script: self.script.clone() })
    }
}

pub struct ScriptedHandle<M> {
    port: Port<M>,
    script: Vec<M>,
}

impl<M> ScriptedHandle<M> {
    /// Emit one value outside the script.
    ///
    /// # Errors
    ///
    /// Returns the subscriber's error for this value.
    pub fn emit(&self, value: &M) -> Result<(), BridgeError> {
        self.port.emit(value)
    }

    /// Emit every scripted value in order, stopping at the first failure.
    /// Returns how many values were emitted successfully.
    ///
    /// # Errors
    ///
    /// Returns the subscriber's error for the failing value.
    pub fn play(&self) -> Result<usize, BridgeError> {
        for value in &self.script {
            self.port.emit(value)?;
        }
        Ok(self.script.len())
    }
}

impl<M> RuntimeHandle<M> for ScriptedHandle<M> {
    fn port(&self) -> &Port<M> {
        &self.port
    }
}
