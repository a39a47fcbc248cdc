//! Handler contract for routed events.
//!
//! A [`Handler`] is the unit of user logic the router binds to a routing
//! key. It receives the dispatch context and the event, and produces an
//! optional reply event or an error. The router passes both back to the
//! transport untouched.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::RouteContext;
use crate::event::BoxedEvent;

/// The outcome of a handler invocation.
///
/// `Ok(Some(event))` is a reply for the transport to deliver, `Ok(None)`
/// means the event was consumed without a reply. Errors are caller-opaque;
/// the router neither interprets nor wraps them.
pub type HandlerResult = Result<Option<BoxedEvent>, anyhow::Error>;

/// A unit of user logic bound to one routing key.
///
/// Implement this for stateful handlers, or wrap a plain async closure
/// with [`handler_fn`].
#[async_trait]
pub trait Handler: Send + Sync {
    /// Processes one event.
    async fn handle(&self, ctx: RouteContext, event: BoxedEvent) -> HandlerResult;
}

/// A shared, type-erased handler.
pub type BoxedHandler = Arc<dyn Handler>;

#[async_trait]
impl<H> Handler for Arc<H>
where
    H: Handler + ?Sized,
{
    async fn handle(&self, ctx: RouteContext, event: BoxedEvent) -> HandlerResult {
        (**self).handle(ctx, event).await
    }
}

// ============================================================================
// Closure Adapter
// ============================================================================

/// Adapter that lets a plain async function act as a [`Handler`].
///
/// Built with [`handler_fn`].
pub struct HandlerFn<F> {
    f: F,
}

/// Wraps an async function or closure as a [`Handler`].
///
/// ```rust,ignore
/// let handler = handler_fn(|_ctx, event: BoxedEvent| async move {
///     println!("got {}", event.event_type());
///     Ok(None)
/// });
/// router.register("com.example.ping", handler);
/// ```
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(RouteContext, BoxedEvent) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    HandlerFn { f }
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(RouteContext, BoxedEvent) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    async fn handle(&self, ctx: RouteContext, event: BoxedEvent) -> HandlerResult {
        (self.f)(ctx, event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::event::Event;
    use std::any::Any;

    struct NullEvent;

    impl Event for NullEvent {
        fn validate(&self) -> Result<(), ValidationError> {
            Ok(())
        }

        fn event_type(&self) -> &str {
            "null"
        }

        fn source(&self) -> &str {
            ""
        }

        fn subject(&self) -> &str {
            ""
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[tokio::test]
    async fn closure_adapter_invokes_closure() {
        let handler = handler_fn(|_ctx, event: BoxedEvent| async move {
            assert_eq!(event.event_type(), "null");
            HandlerResult::Ok(Some(event))
        });

        let reply = handler
            .handle(RouteContext::new(), BoxedEvent::new(NullEvent))
            .await
            .unwrap();
        assert_eq!(reply.unwrap().event_type(), "null");
    }

    #[tokio::test]
    async fn boxed_handlers_forward_through_arc() {
        let handler: BoxedHandler =
            Arc::new(handler_fn(|_ctx, _event| async { HandlerResult::Ok(None) }));

        let reply = handler
            .handle(RouteContext::new(), BoxedEvent::new(NullEvent))
            .await
            .unwrap();
        assert!(reply.is_none());
    }
}
