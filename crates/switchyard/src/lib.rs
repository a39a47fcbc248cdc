//! # Switchyard
//!
//! Attribute-keyed event routing between a transport and its handlers.
//!
//! Switchyard sits between an event-receiving transport and business
//! logic: it takes a structured event, derives a single string routing key
//! from one of the event's attributes, and dispatches to the one handler
//! registered under that key. Events with no matching handler are dropped
//! silently.
//!
//! ## Components
//!
//! - **Event abstraction** ([`Event`], [`BoxedEvent`]) — the collaborator
//!   contract: validation, the named string attributes, and the extension
//!   mapping. The transport supplies the concrete type.
//! - **Key extraction** ([`Selector`]) — the strategy deriving the routing
//!   key: by type (default), source, subject, named extension, or a custom
//!   function. Extraction is total and never fails.
//! - **Router** ([`Router`]) — the registry of key-to-handler bindings and
//!   the dispatch entry point. Registrations are unique per key and
//!   fail-fast on misuse; dispatch is safe under concurrent load.
//! - **Handlers** ([`Handler`], [`handler_fn`]) — user logic producing an
//!   optional reply event or a caller-opaque error, both passed back to
//!   the transport unchanged.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use switchyard::{BoxedEvent, RouteContext, Router, Selector, handler_fn};
//!
//! let router = Arc::new(Router::new().with_selector(Selector::Type));
//!
//! router.register(
//!     "com.example.ping",
//!     handler_fn(|_ctx, event: BoxedEvent| async move {
//!         println!("ping from {}", event.source());
//!         Ok(None)
//!     }),
//! );
//!
//! // Transport side: feed events through the shared entry point.
//! let receiver = router.receiver();
//! let reply = receiver.handle(RouteContext::new(), incoming_event).await?;
//! ```
//!
//! What switchyard does *not* do: no retry or backoff, no persistence, no
//! multi-handler fan-out, no event transformation. One key maps to at most
//! one handler, and the transport owns everything on the wire.

pub mod context;
pub mod error;
pub mod event;
pub mod handler;
pub mod router;
pub mod selector;

pub use context::RouteContext;
pub use error::ValidationError;
pub use event::{BoxedEvent, Event};
pub use handler::{BoxedHandler, Handler, HandlerFn, HandlerResult, handler_fn};
pub use router::Router;
pub use selector::{Selector, SelectorFn, extension_to_string};

/// Prelude for common imports.
pub mod prelude {
    pub use super::context::RouteContext;
    pub use super::error::ValidationError;
    pub use super::event::{BoxedEvent, Event};
    pub use super::handler::{BoxedHandler, Handler, HandlerResult, handler_fn};
    pub use super::router::Router;
    pub use super::selector::Selector;
}
