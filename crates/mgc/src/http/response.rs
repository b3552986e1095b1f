//! HTTP response handling

use crate::error::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Response header carrying the server-assigned request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
/// Response header carrying the gateway trace ID.
pub const TRACE_ID_HEADER: &str = "x-mgc-trace-id";

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    attempts: u32,
    elapsed: Duration,
}

impl Response {
    /// Create a new response.
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
        attempts: u32,
        elapsed: Duration,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            attempts,
            elapsed,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Get the body as a string, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Attempts made to obtain this response, the first one included.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Time from the first attempt to the end of this response's body.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// `X-Request-ID` of the response, if present.
    pub fn request_id(&self) -> Option<&str> {
        self.header_str(REQUEST_ID_HEADER)
    }

    /// `X-Mgc-Trace-Id` of the response, if present.
    pub fn trace_id(&self) -> Option<&str> {
        self.header_str(TRACE_ID_HEADER)
    }

    fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// [`Error::NullBody`] when the body is empty or the literal `null`;
    /// [`Error::Serialization`] when it is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let trimmed = self.body.trim_ascii();
        if trimmed.is_empty() || trimmed == b"null" {
            return Err(Error::NullBody);
        }
        serde_json::from_slice(trimmed).map_err(Error::Serialization)
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the response is an error (4xx or 5xx status).
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Classify this response as an SDK error.
    pub fn to_error(&self) -> Error {
        Error::from_response(self.status.as_u16(), &self.text(), &self.headers)
    }

    /// Parse a successful response, converting HTTP errors to SDK errors.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let response = transport
    ///     .send(Endpoint::Regional, Method::GET, "/volume/v1/volumes/abc", &QueryParams::new(), None)
    ///     .await?;
    /// let volume: Volume = response.parse_result()?;
    /// ```
    pub fn parse_result<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_success() {
            return Err(self.to_error());
        }
        self.json()
    }

    /// Accept `200 OK` or `204 No Content` and discard the body.
    pub fn ensure_success(self) -> Result<()> {
        match self.status {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            status if status.is_success() => Err(Error::Api {
                status: status.as_u16(),
                message: format!("unexpected status {status}"),
                request_id: self.request_id().map(String::from),
            }),
            _ => Err(self.to_error()),
        }
    }
}
