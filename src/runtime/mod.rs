//! Application runtime contract.
//!
//! DESIGN
//! ======
//! The runtime is an opaque collaborator. The bridge only needs two things
//! from it: start it with a mount target and flags, then reach the outbound
//! port on the handle it returns. Everything else (rendering, update logic)
//! stays behind this trait.

pub mod channel;
pub mod scripted;

use std::fmt;

use serde_json::Value;

use crate::error::RuntimeError;
use crate::port::Port;

pub use channel::{ChannelHandle, ChannelRuntime, RunSummary};
pub use scripted::{ScriptedHandle, ScriptedRuntime};

// =============================================================================
// MOUNT TARGET
// =============================================================================

/// Where in its host the runtime attaches (a DOM id in the browser).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MountTarget(String);

impl MountTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MountTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// INITIAL VALUE
// =============================================================================

/// Initialization input handed to the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialValue<M> {
    /// No prior state. Distinct from a stored empty or `null` model.
    Absent,
    /// State decoded from the persisted slot.
    Restored(M),
}

impl<M> InitialValue<M> {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub fn as_restored(&self) -> Option<&M> {
        match self {
            Self::Absent => None,
            Self::Restored(m) => Some(m),
        }
    }

    pub fn into_option(self) -> Option<M> {
        match self {
            Self::Absent => None,
            Self::Restored(m) => Some(m),
        }
    }
}

impl InitialValue<Value> {
    /// Flags as a JSON-only runtime sees them: absence becomes `null`.
    #[must_use]
    pub fn into_flags(self) -> Value {
        self.into_option().unwrap_or(Value::Null)
    }
}

// =============================================================================
// TRAITS
// =============================================================================

/// A running application instance.
pub trait RuntimeHandle<M> {
    /// The outbound channel carrying models to persist.
    fn port(&self) -> &Port<M>;
}

/// Something that can start an application with persisted flags.
pub trait AppRuntime<M> {
    type Handle: RuntimeHandle<M>;

    /// Start the application at `mount` with `flags` as its initial state.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] if the application cannot be constructed.
    fn initialize(&mut self, mount: &MountTarget, flags: InitialValue<M>) -> Result<Self::Handle, RuntimeError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
