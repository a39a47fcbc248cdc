//! Event abstraction for the switchyard router.
//!
//! The router owns no event model. Whatever the transport produces is
//! routed through the [`Event`] trait, which captures the three
//! capabilities dispatch relies on:
//!
//! - a validation check ([`Event::validate`])
//! - the named string attributes (type, source, subject)
//! - a mapping of named extension values ([`Event::extension`])
//!
//! Events cross the dispatch boundary as a [`BoxedEvent`], a cheaply
//! clonable `Arc<dyn Event>` container that supports downcasting back to
//! the concrete type a handler expects.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ValidationError;

// ============================================================================
// Core Event Trait
// ============================================================================

/// A structured event as seen by the router.
///
/// The router treats events as immutable: it validates them, reads one
/// attribute to derive the routing key, and hands them to the matched
/// handler untouched.
///
/// Attribute accessors return the empty string when the attribute is
/// unset, so key extraction stays total (see [`Selector`]).
///
/// [`Selector`]: crate::selector::Selector
pub trait Event: Send + Sync {
    /// Reports whether the event is well-formed.
    ///
    /// Dispatch refuses invalid events before any handler lookup happens.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Returns the declared type attribute.
    fn event_type(&self) -> &str;

    /// Returns the origin attribute.
    fn source(&self) -> &str;

    /// Returns the subject attribute.
    fn subject(&self) -> &str;

    /// Returns the named extension value, if present.
    ///
    /// The default implementation reports no extensions.
    fn extension(&self, _name: &str) -> Option<&Value> {
        None
    }

    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

// ============================================================================
// Boxed Event
// ============================================================================

/// A type-erased, shareable event container.
///
/// `BoxedEvent` wraps any [`Event`] in an `Arc`, so it can move through the
/// router and into handlers without the concrete type being known, and a
/// handler's reply can travel back out the same way. Cloning is an `Arc`
/// clone.
///
/// `BoxedEvent` derefs to `dyn Event`, so trait methods are available
/// directly:
///
/// ```rust,ignore
/// let event: BoxedEvent = BoxedEvent::new(my_event);
/// let key = event.event_type();
/// ```
#[derive(Clone)]
pub struct BoxedEvent {
    inner: Arc<dyn Event>,
}

impl BoxedEvent {
    /// Wraps a concrete event.
    pub fn new<E: Event + 'static>(event: E) -> Self {
        Self {
            inner: Arc::new(event),
        }
    }

    /// Returns the inner `Arc<dyn Event>`.
    pub fn inner(&self) -> &Arc<dyn Event> {
        &self.inner
    }

    /// Attempts to downcast to a concrete event type.
    pub fn downcast_ref<E: Event + 'static>(&self) -> Option<&E> {
        self.inner.as_any().downcast_ref()
    }
}

impl std::ops::Deref for BoxedEvent {
    type Target = dyn Event;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl std::fmt::Debug for BoxedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxedEvent")
            .field("event_type", &self.event_type())
            .field("source", &self.source())
            .field("subject", &self.subject())
            .finish()
    }
}
