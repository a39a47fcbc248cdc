//! Ping/pong demo for the switchyard router.
//!
//! Two handlers are registered by event type: the ping handler replies
//! with a pong event, the pong handler consumes it. The demo plays the
//! role of the transport, feeding each reply back into the router until
//! an event is consumed or dropped.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package pingpong-demo
//! RUST_LOG=switchyard=trace cargo run --package pingpong-demo
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use serde_json::{Value, json};
use switchyard::{
    BoxedEvent, Event, HandlerResult, RouteContext, Router, ValidationError, handler_fn,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// The demo's concrete event type.
///
/// The router only sees the [`Event`] trait; a real deployment would use
/// whatever event type its transport library produces.
#[derive(Debug, Clone)]
struct DemoEvent {
    id: String,
    ty: String,
    source: String,
    subject: String,
    data: String,
    extensions: HashMap<String, Value>,
}

impl DemoEvent {
    fn new(ty: &str, data: &str) -> Self {
        let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("demo-{seq}"),
            ty: ty.to_owned(),
            source: "/demos/pingpong".to_owned(),
            subject: "round-trip".to_owned(),
            data: data.to_owned(),
            extensions: HashMap::from([("hop".to_owned(), json!(seq))]),
        }
    }
}

impl Event for DemoEvent {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingAttribute { name: "id" });
        }
        if self.ty.is_empty() {
            return Err(ValidationError::MissingAttribute { name: "type" });
        }
        Ok(())
    }

    fn event_type(&self) -> &str {
        &self.ty
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn subject(&self) -> &str {
        &self.subject
    }

    fn extension(&self, name: &str) -> Option<&Value> {
        self.extensions.get(name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Replies to every ping with a pong.
async fn handle_ping(_ctx: RouteContext, event: BoxedEvent) -> HandlerResult {
    if let Some(ping) = event.downcast_ref::<DemoEvent>() {
        info!(data = %ping.data, "ping received, replying with pong");
    }

    Ok(Some(BoxedEvent::new(DemoEvent::new(
        "com.example.pong",
        "pong",
    ))))
}

/// Consumes pongs; the round trip ends here.
async fn handle_pong(_ctx: RouteContext, event: BoxedEvent) -> HandlerResult {
    if let Some(pong) = event.downcast_ref::<DemoEvent>() {
        info!(data = %pong.data, "pong received, round trip complete");
    }

    Ok(None)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,switchyard=debug")),
        )
        .init();

    let router = Arc::new(Router::new());
    router.register("com.example.ping", handler_fn(handle_ping));
    router.register("com.example.pong", handler_fn(handle_pong));

    // Play the transport: dispatch, then feed each reply back in.
    let mut event = BoxedEvent::new(DemoEvent::new("com.example.ping", "ping"));
    while let Some(reply) = router.dispatch(RouteContext::new(), event).await? {
        event = reply;
    }

    // An event nobody registered for is dropped silently.
    let dropped = router
        .dispatch(
            RouteContext::new(),
            BoxedEvent::new(DemoEvent::new("com.example.unknown", "?")),
        )
        .await?;
    assert!(dropped.is_none());
    info!("unmatched event dropped, demo finished");

    Ok(())
}
