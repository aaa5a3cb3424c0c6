//! Listener registration and synthetic events.
//!
//! Components register handlers through [`EventBus`] and receive a
//! [`DomEvent`], a browser-neutral view of the fired event carrying only what
//! the handlers read: the kind, the element the event was dispatched to, and
//! whether a handler asked to suppress the default action. The browser bus
//! forwards that request to the real event after the handler returns.

use std::cell::Cell;
use std::fmt;

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

/// The event kinds the page listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    Scroll,
}

impl EventKind {
    /// The DOM event type string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::Scroll => "scroll",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone)]
pub enum ListenTarget<E> {
    Element(E),
    Document,
    Window,
}

/// A fired event as seen by a handler.
#[derive(Debug)]
pub struct DomEvent<E> {
    kind: EventKind,
    target: Option<E>,
    default_prevented: Cell<bool>,
}

impl<E> DomEvent<E> {
    #[must_use]
    pub fn new(kind: EventKind, target: Option<E>) -> Self {
        Self { kind, target, default_prevented: Cell::new(false) }
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The element the event was originally dispatched to, if it was an element.
    #[must_use]
    pub fn target(&self) -> Option<&E> {
        self.target.as_ref()
    }

    /// Suppress the browser's default action (e.g. native form submission).
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// A registered event handler.
pub type Handler<E> = Box<dyn FnMut(&DomEvent<E>)>;

/// Registration of event listeners.
pub trait EventBus<E> {
    /// Attach `handler` for `kind` events on `target`.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or cancelled.
    fn listen(&self, target: ListenTarget<E>, kind: EventKind, handler: Handler<E>) -> Subscription;
}

/// Owns the cleanup of one registered listener.
///
/// Dropping the subscription removes the listener.
#[must_use = "dropping a Subscription removes its listener immediately"]
pub struct Subscription {
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cleanup: impl FnOnce() + 'static) -> Self {
        Self { cleanup: Some(Box::new(cleanup)) }
    }

    /// A subscription with nothing to clean up, for registrations that failed.
    pub fn empty() -> Self {
        Self { cleanup: None }
    }

    /// Remove the listener now.
    pub fn cancel(mut self) {
        self.run_cleanup();
    }

    fn run_cleanup(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cleanup();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.cleanup.is_some()).finish()
    }
}
