//! Channel runtime: emissions arrive from the host event loop.
//!
//! DESIGN
//! ======
//! The host owns the sending half of an unbounded tokio channel and pushes
//! models as events happen (the CLI feeds it stdin lines). `run` drains the
//! channel in delivery order and emits each value on the port, one at a
//! time, until every sender is dropped.
//!
//! ERROR HANDLING
//! ==============
//! A failed emission is logged and counted but does not stop the loop. The
//! application keeps running even when its latest state failed to persist.

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{error, info};

use super::{AppRuntime, InitialValue, MountTarget, RuntimeHandle};
use crate::config::DEFAULT_PORT_NAME;
use crate::error::{ErrorCode, RuntimeError};
use crate::port::Port;

pub struct ChannelRuntime<M> {
    rx: Option<UnboundedReceiver<M>>,
}

impl<M> ChannelRuntime<M> {
    /// Runtime paired with the sender the host uses to deliver models.
    #[must_use]
    pub fn new() -> (UnboundedSender<M>, Self) {
        let (tx, rx) = unbounded_channel();
        (tx, Self { rx: Some(rx) })
    }
}

impl<M> AppRuntime<M> for ChannelRuntime<M> {
    type Handle = ChannelHandle<M>;

    fn initialize(&mut self, mount: &MountTarget, flags: InitialValue<M>) -> Result<Self::Handle, RuntimeError> {
        let rx = self
            .rx
            .take()
            .ok_or_else(|| RuntimeError("channel runtime already started".into()))?;
        info!(%mount, restored = !flags.is_absent(), "channel runtime initialized");
        Ok(ChannelHandle { port: Port::new(DEFAULT_PORT_NAME), rx, initial: flags })
    }
}

/// Outcome of a drained channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Emissions the subscriber accepted.
    pub persisted: usize,
    /// Emissions the subscriber rejected.
    pub failed: usize,
}

pub struct ChannelHandle<M> {
    port: Port<M>,
    rx: UnboundedReceiver<M>,
    initial: InitialValue<M>,
}

impl<M> ChannelHandle<M> {
    /// Flags the runtime was started with.
    #[must_use]
    pub fn initial(&self) -> &InitialValue<M> {
        &self.initial
    }

    /// Emit every delivered value until all senders are dropped.
    pub async fn run(mut self) -> RunSummary {
        let mut summary = RunSummary::default();
        while let Some(value) = self.rx.recv().await {
            match self.port.emit(&value) {
                Ok(()) => summary.persisted += 1,
                Err(e) => {
                    summary.failed += 1;
                    error!(error = %e, code = e.error_code(), port = %self.port.name(), "emission failed");
                }
            }
        }
        info!(persisted = summary.persisted, failed = summary.failed, "channel closed");
        summary
    }
}

impl<M> RuntimeHandle<M> for ChannelHandle<M> {
    fn port(&self) -> &Port<M> {
        &self.port
    }
}

#[cfg(test)]
#[path = "channel_test.rs"]
mod tests;
