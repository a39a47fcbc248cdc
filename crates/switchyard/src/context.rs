//! Per-dispatch context threaded through to handlers.

use tokio_util::sync::CancellationToken;

/// The opaque value handed to every handler invocation.
///
/// The router itself never reads the context; it only passes it along.
/// Cancellation and deadlines are an agreement between the transport that
/// builds the context and the handler that honors it.
///
/// # Example
///
/// ```rust,ignore
/// let token = CancellationToken::new();
/// let ctx = RouteContext::with_cancellation(token.child_token());
///
/// // later, inside a handler:
/// if ctx.is_cancelled() {
///     return Ok(None);
/// }
/// ```
#[derive(Clone)]
pub struct RouteContext {
    cancellation: CancellationToken,
}

impl RouteContext {
    /// Creates a context with a fresh, never-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context carrying the transport's cancellation token.
    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self { cancellation }
    }

    /// Returns the cancellation token for this dispatch.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Whether the transport has requested cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

impl Default for RouteContext {
    fn default() -> Self {
        Self {
            cancellation: CancellationToken::new(),
        }
    }
}

impl std::fmt::Debug for RouteContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteContext")
            .field("is_cancelled", &self.is_cancelled())
            .finish()
    }
}
