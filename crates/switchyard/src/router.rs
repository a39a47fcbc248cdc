//! The central router: a concurrency-safe registry of routing-key
//! bindings and the dispatch entry point transports drive.
//!
//! # Dispatch flow
//!
//! ```text
//! ┌───────────┐      ┌────────────┐      ┌───────────┐
//! │ Transport │─────▶│   Router   │─────▶│  Handler  │
//! │           │◀─────│ (registry) │◀─────│           │
//! └───────────┘      └────────────┘      └───────────┘
//! ```
//!
//! 1. The incoming event is validated; invalid events error out before any
//!    lookup happens.
//! 2. The active [`Selector`] derives the routing key.
//! 3. The key is looked up under a shared read lock; the lock is released
//!    before the matched handler runs.
//! 4. A match propagates the handler's result unchanged; no match is a
//!    silent drop, `Ok(None)`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::context::RouteContext;
use crate::event::BoxedEvent;
use crate::handler::{BoxedHandler, Handler, HandlerResult};
use crate::selector::Selector;

/// Routes each event to at most one handler, keyed by a single event
/// attribute.
///
/// A router is built once, configured with a [`Selector`], populated via
/// [`register`](Router::register), and then shared (typically behind an
/// `Arc`) with a transport that feeds it events:
///
/// ```rust,ignore
/// let router = Arc::new(Router::new().with_selector(Selector::Source));
/// router.register("/services/ping", handler_fn(on_ping));
///
/// // transport side:
/// let reply = router.dispatch(ctx, event).await?;
/// ```
///
/// `Router::default()` is equivalent to [`Router::new`]: ready to use,
/// empty registry, routing by event type.
///
/// # Thread safety
///
/// `Router` is `Send + Sync`. Registrations take the registry write lock;
/// dispatch lookups take the read lock and release it before the matched
/// handler is awaited, so handlers run concurrently with each other and
/// with later registrations.
pub struct Router {
    /// Routing key to handler bindings. Keys are unique for the lifetime
    /// of the router; there is no removal.
    registry: RwLock<HashMap<String, BoxedHandler>>,

    /// The active key-extraction strategy, fixed at construction.
    selector: Selector,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Creates a router with an empty registry, routing by event type.
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(HashMap::new()),
            selector: Selector::default(),
        }
    }

    /// Replaces the key-extraction strategy (builder style).
    ///
    /// Configuration consumes the router, so the strategy is fixed before
    /// the router can be shared with a transport.
    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    /// Returns the active key-extraction strategy.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Binds `handler` under `key`.
    ///
    /// # Panics
    ///
    /// Registration mistakes are wiring bugs that should surface during
    /// application startup, not request-serving errors. Panics if `key` is
    /// empty or already bound.
    pub fn register<H>(&self, key: impl Into<String>, handler: H)
    where
        H: Handler + 'static,
    {
        self.register_boxed(key, Arc::new(handler));
    }

    /// Binds an already-boxed handler under `key`.
    ///
    /// # Panics
    ///
    /// Same preconditions as [`register`](Router::register).
    pub fn register_boxed(&self, key: impl Into<String>, handler: BoxedHandler) {
        let key = key.into();
        assert!(!key.is_empty(), "switchyard: empty routing key");

        let mut registry = self.registry.write();
        assert!(
            !registry.contains_key(&key),
            "switchyard: duplicate registration for key '{key}'"
        );
        registry.insert(key.clone(), handler);
        debug!(key = %key, "handler registered");
    }

    /// Returns the number of registered bindings.
    pub fn handler_count(&self) -> usize {
        self.registry.read().len()
    }

    /// Returns `true` if no handler has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    /// Dispatches one event.
    ///
    /// The transport sees exactly three outcomes:
    ///
    /// - `Err(..)` — the event failed validation (no handler ran), or the
    ///   matched handler returned an error (passed through verbatim).
    /// - `Ok(None)` — no handler is bound under the derived key, or the
    ///   handler completed without a reply.
    /// - `Ok(Some(reply))` — the handler produced a reply event.
    pub async fn dispatch(&self, ctx: RouteContext, event: BoxedEvent) -> HandlerResult {
        if let Err(err) = event.validate() {
            debug!(error = %err, "rejecting invalid event");
            return Err(err.into());
        }

        let key = self.selector.key(&*event);
        trace!(key = %key, "routing key derived");

        // Clone the binding out so the lock is not held while the handler
        // runs.
        let handler = self.registry.read().get(&key).cloned();

        match handler {
            Some(handler) => {
                debug!(key = %key, "dispatching to handler");
                handler.handle(ctx, event).await
            }
            None => {
                debug!(key = %key, "no handler bound, dropping event");
                Ok(None)
            }
        }
    }

    /// Hands out the transport-facing entry point.
    ///
    /// Every copy reads the live registry and selector: handlers
    /// registered after this call are visible to later invocations.
    pub fn receiver(self: &Arc<Self>) -> BoxedHandler {
        Arc::clone(self) as BoxedHandler
    }
}

#[async_trait]
impl Handler for Router {
    async fn handle(&self, ctx: RouteContext, event: BoxedEvent) -> HandlerResult {
        self.dispatch(ctx, event).await
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("handler_count", &self.handler_count())
            .field("selector", &self.selector)
            .finish()
    }
}
