//! Bridge configuration parsed from environment variables.

use std::str::FromStr;

use crate::runtime::MountTarget;

pub const DEFAULT_SLOT_KEY: &str = "life-in-weeks-model";
pub const DEFAULT_MOUNT: &str = "app";
pub const DEFAULT_PORT_NAME: &str = "storeModel";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown load policy '{0}' (expected 'fresh-start' or 'surface')")]
    UnknownLoadPolicy(String),

    #[error("slot key must not be empty")]
    EmptyKey,
}

/// What `start` does when the stored slot cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Log the error and start as if nothing was stored.
    #[default]
    FreshStart,
    /// Return the error and leave the runtime uninitialized.
    Surface,
}

impl FromStr for LoadPolicy {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "fresh-start" => Ok(Self::FreshStart),
            "surface" => Ok(Self::Surface),
            other => Err(ConfigError::UnknownLoadPolicy(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Store key of the persisted slot.
    pub key: String,
    /// Where the runtime attaches.
    pub mount: MountTarget,
    pub load_policy: LoadPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self { key: DEFAULT_SLOT_KEY.to_owned(), mount: MountTarget::new(DEFAULT_MOUNT), load_policy: LoadPolicy::default() }
    }
}

impl BridgeConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `STATEBRIDGE_KEY`: default `life-in-weeks-model`
    /// - `STATEBRIDGE_MOUNT`: default `app`
    /// - `STATEBRIDGE_LOAD_POLICY`: `fresh-start` (default) or `surface`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty key or an unknown policy.
    pub fn from_env() -> Result<Self, ConfigError> {
        let key = std::env::var("STATEBRIDGE_KEY").unwrap_or_else(|_| DEFAULT_SLOT_KEY.to_owned());
        let mount = std::env::var("STATEBRIDGE_MOUNT").unwrap_or_else(|_| DEFAULT_MOUNT.to_owned());
        let load_policy = match std::env::var("STATEBRIDGE_LOAD_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => LoadPolicy::default(),
        };

        let config = Self { key, mount: MountTarget::new(mount), load_policy };
        config.validate()?;
        Ok(config)
    }

    /// Check values that every source (env, flags, code) must satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyKey`] for a blank slot key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.trim().is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
