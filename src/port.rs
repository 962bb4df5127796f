//! Outbound single-subscriber port.
//!
//! DESIGN
//! ======
//! A runtime owns a `Port` and calls `emit` whenever it has a new model.
//! Emission is fire-and-forget from the runtime's side: with no listener
//! the value is dropped. With a listener, it runs synchronously inside
//! `emit` and its result is returned to the runtime, which is where write
//! failures surface. A listener that emits on its own port gets an error
//! back instead of a silently dropped value.
//!
//! Handles are `Rc`-shared. Ports live on the host's single event loop and
//! are never sent across threads.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::error::BridgeError;

type Listener<M> = Rc<RefCell<dyn FnMut(&M) -> Result<(), BridgeError>>>;

struct PortState<M> {
    name: String,
    listener: Option<Listener<M>>,
    /// Values handed to a listener.
    delivered: u64,
}

pub struct Port<M> {
    inner: Rc<RefCell<PortState<M>>>,
}

impl<M> Clone for Port<M> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<M> Port<M> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { inner: Rc::new(RefCell::new(PortState { name: name.into(), listener: None, delivered: 0 })) }
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.inner.borrow().listener.is_some()
    }

    /// Number of emitted values that reached a listener.
    #[must_use]
    pub fn delivered(&self) -> u64 {
        self.inner.borrow().delivered
    }

    /// Install the port's only listener.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::AlreadySubscribed`] if a listener is present,
    /// including while that listener is running.
    pub fn subscribe<F>(&self, listener: F) -> Result<(), BridgeError>
    where
        F: FnMut(&M) -> Result<(), BridgeError> + 'static,
    {
        let mut state = self.inner.borrow_mut();
        if state.listener.is_some() {
            return Err(BridgeError::AlreadySubscribed);
        }
        let listener: Listener<M> = Rc::new(RefCell::new(listener));
        state.listener = Some(listener);
        debug!(port = %state.name, "port subscribed");
        Ok(())
    }

    /// Deliver `value` to the listener, if any.
    ///
    /// The listener stays installed while it runs. An `emit` from inside the
    /// listener cannot be delivered and fails with
    /// [`BridgeError::ReentrantEmit`].
    ///
    /// # Errors
    ///
    /// Returns whatever the listener returns, or `ReentrantEmit`.
    pub fn emit(&self, value: &M) -> Result<(), BridgeError> {
        let listener = self.inner.borrow().listener.clone();
        let Some(listener) = listener else {
            debug!(port = %self.inner.borrow().name, "emit with no subscriber; value dropped");
            return Ok(());
        };

        let result = match listener.try_borrow_mut() {
            Ok(mut call) => (*call)(value),
            Err(_) => return Err(BridgeError::ReentrantEmit { port: self.name() }),
        };

        self.inner.borrow_mut().delivered += 1;
        result
    }
}

#[cfg(test)]
#[path = "port_test.rs"]
mod tests;
