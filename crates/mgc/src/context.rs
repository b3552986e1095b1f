//! Per-call request context.
//!
//! A [`RequestContext`] travels with every request a client makes. It carries
//! an optional cancellation token, observed before each attempt and while
//! waiting on the network, and an optional request ID sent as `X-Request-ID`.

use mgc_core::CancellationToken;

/// Cancellation and correlation settings shared by every call of a client.
///
/// ```rust
/// use mgc::RequestContext;
/// use mgc::CancellationToken;
///
/// let token = CancellationToken::new();
/// let ctx = RequestContext::new()
///     .with_cancel(token.clone())
///     .with_request_id("deploy-42");
///
/// assert!(!ctx.is_cancelled());
/// token.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: Option<CancellationToken>,
    request_id: Option<String>,
}

impl RequestContext {
    /// Empty context: never cancelled, no request ID.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Attach a request ID forwarded as `X-Request-ID`.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Attach a freshly generated UUID v4 request ID.
    pub fn with_generated_request_id(self) -> Self {
        self.with_request_id(uuid::Uuid::new_v4().to_string())
    }

    /// The cancellation token, if any.
    pub fn cancel_token(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// The request ID, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Whether the attached token has fired.
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Resolves when the token fires, never when there is none.
    pub(crate) async fn cancelled(&self) {
        match &self.cancel {
            Some(token) => token.cancelled().await,
            None => std::future::pending().await,
        }
    }
}
