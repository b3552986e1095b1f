//! HTTP provider trait for abstracting the transport backend
//!
//! Resources never talk to `reqwest` directly. They go through an
//! [`HttpProvider`], which owns authentication, base URLs and retry policy,
//! so tests and alternative transports can swap it out.

use crate::{
    context::RequestContext,
    error::Result,
    http::{Method, RequestBuilder, Response},
};
use async_trait::async_trait;
use mgc_core::query::QueryParams;
use std::fmt;

/// Which base URL a request is resolved against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The configured region's gateway, e.g. `https://api.magalu.cloud/br-se1`.
    #[default]
    Regional,
    /// The region-less gateway, used by account-wide services.
    Global,
}

/// Provider trait for making HTTP requests to the Magalu Cloud API.
///
/// Implementations handle authentication, URL resolution and retries. A
/// request succeeds only with a 2xx status; anything else is returned as an
/// [`Error`](crate::Error).
#[async_trait]
pub trait HttpProvider: Send + Sync + fmt::Debug {
    /// Make a request and return the successful response.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Base URL family the path is resolved against
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `path` - API path, e.g. `"/volume/v1/volumes"`
    /// * `query` - Query parameters; may be empty
    /// * `body` - Optional request body (will be serialized to JSON)
    /// * `context` - Cancellation and request ID
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request fails (network, timeout, cancellation)
    /// - The API returns a non-2xx status code
    async fn request(
        &self,
        endpoint: Endpoint,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
        context: &RequestContext,
    ) -> Result<Response>;

    /// Create a `RequestBuilder` carrying this provider's headers and policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be constructed.
    fn create_request(
        &self,
        endpoint: Endpoint,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder>;

    /// Get the provider name for debugging/logging.
    fn provider_name(&self) -> &'static str;

    /// Base URL used for `endpoint`.
    fn base_url(&self, endpoint: Endpoint) -> &str;

    /// Cast to `std::any::Any` for downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Helper function to serialize a body to JSON bytes.
pub(crate) fn serialize_body(
    body: &(dyn erased_serde::Serialize + Send + Sync),
) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(crate::error::Error::Serialization)
}
