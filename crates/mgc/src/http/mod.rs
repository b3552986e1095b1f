//! HTTP client abstraction
//!
//! This module provides the HTTP layer for the SDK: URL resolution against
//! the regional or global gateway, authentication headers, retries with
//! exponential backoff and cancellation.

pub use mgc_provider::{MgcHttpProvider, MgcHttpProviderBuilder};
pub use provider::{Endpoint, HttpProvider};
pub use request::RequestBuilder;
pub use response::{REQUEST_ID_HEADER, Response, TRACE_ID_HEADER};

mod mgc_provider;
pub mod provider;
mod request;
mod response;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
