//! Error types for the Magalu Cloud SDK
//!
//! Every failure surfaced by the SDK is an [`Error`]. HTTP failures are
//! classified by status code and always carry the numeric status in their
//! message, so `err.to_string().contains("404")` holds for a 404 whatever
//! body the server sent.

use mgc_core::pagination::TraversalError;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with an SDK error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Magalu Cloud SDK.
#[derive(Debug, Error)]
pub enum Error {
    /// The API rejected the request as malformed (400).
    #[error("Bad request (400): {message}")]
    BadRequest {
        /// Error message from the API
        message: String,
        /// Machine-readable error code, when provided
        slug: Option<String>,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// Credentials were missing or rejected (401).
    #[error("Authentication failed (401): {message}")]
    Authentication {
        /// Error message
        message: String,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// The credentials lack permission for the operation (403).
    #[error("Permission denied (403): {message}")]
    PermissionDenied {
        /// Error message
        message: String,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// Resource not found (404).
    #[error("Resource not found (404): {message}")]
    NotFound {
        /// Error message
        message: String,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// Conflicting state, e.g. a duplicated name (409).
    #[error("Conflict (409): {message}")]
    Conflict {
        /// Error message
        message: String,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// Semantically invalid request (422).
    #[error("Unprocessable entity (422): {message}")]
    UnprocessableEntity {
        /// Error message
        message: String,
        /// Machine-readable error code, when provided
        slug: Option<String>,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// Rate limit exceeded (429).
    #[error("Rate limit exceeded (429): {message}")]
    RateLimit {
        /// Error message
        message: String,
        /// Time to wait before retrying, if provided by the API
        retry_after: Option<Duration>,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// Server-side failure (5xx).
    #[error("Server error (status {status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// Any other non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// The request context was cancelled.
    #[error("Operation cancelled: context canceled")]
    Cancelled,

    /// A response body that had to be decoded was empty or `null`.
    #[error("Response body is null")]
    NullBody,

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Missing or unusable configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Input rejected before any request was made.
    #[error("validation error: {field} - {message}")]
    Validation {
        /// Offending field
        field: String,
        /// Human-readable reason
        message: String,
    },

    /// Every attempt failed with a retryable error.
    #[error("max retry attempts reached after {attempts} attempts: {source}")]
    RetryExhausted {
        /// Attempts made
        attempts: u32,
        /// Error of the last attempt
        #[source]
        source: Box<Error>,
    },

    /// A full-collection listing hit its page ceiling.
    #[error("pagination stopped after {pages} full pages without reaching the end of the collection")]
    PageCeilingReached {
        /// Pages fetched
        pages: usize,
    },

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an API error from an HTTP response status and body.
    ///
    /// Understands `{"message": "...", "slug": "..."}` and `{"error": "..."}`
    /// bodies and falls back to the raw body text.
    pub fn from_response(status: u16, body: &str, headers: &http::HeaderMap) -> Self {
        let request_id = header_string(headers, "x-request-id");
        let parsed = serde_json::from_str::<ApiErrorBody>(body).ok();
        let slug = parsed.as_ref().and_then(|b| b.slug.clone());
        let message = parsed
            .and_then(ApiErrorBody::into_message)
            .unwrap_or_else(|| fallback_message(status, body));

        match status {
            400 => Error::BadRequest {
                message,
                slug,
                request_id,
            },
            401 => Error::Authentication {
                message,
                request_id,
            },
            403 => Error::PermissionDenied {
                message,
                request_id,
            },
            404 => Error::NotFound {
                message,
                request_id,
            },
            409 => Error::Conflict {
                message,
                request_id,
            },
            422 => Error::UnprocessableEntity {
                message,
                slug,
                request_id,
            },
            429 => Error::RateLimit {
                message,
                retry_after: headers
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .map(Duration::from_secs),
                request_id,
            },
            s if s >= 500 => Error::Server {
                status,
                message,
                request_id,
            },
            _ => Error::Api {
                status,
                message,
                request_id,
            },
        }
    }

    /// Build a [`Error::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status behind this error, looking through retry exhaustion.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest { .. } => Some(400),
            Error::Authentication { .. } => Some(401),
            Error::PermissionDenied { .. } => Some(403),
            Error::NotFound { .. } => Some(404),
            Error::Conflict { .. } => Some(409),
            Error::UnprocessableEntity { .. } => Some(422),
            Error::RateLimit { .. } => Some(429),
            Error::Server { status, .. } | Error::Api { status, .. } => Some(*status),
            Error::RetryExhausted { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Check if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::RateLimit { .. } | Error::Server { .. } | Error::Connection(_)
        )
    }

    /// Whether the operation stopped because its context was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Whether the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Server-assigned request ID, if the failing response carried one.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Error::BadRequest { request_id, .. }
            | Error::Authentication { request_id, .. }
            | Error::PermissionDenied { request_id, .. }
            | Error::NotFound { request_id, .. }
            | Error::Conflict { request_id, .. }
            | Error::UnprocessableEntity { request_id, .. }
            | Error::RateLimit { request_id, .. }
            | Error::Server { request_id, .. }
            | Error::Api { request_id, .. } => request_id.as_deref(),
            Error::RetryExhausted { source, .. } => source.request_id(),
            _ => None,
        }
    }

    /// Get retry delay if this is a rate limit error with retry-after.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimit { retry_after, .. } => *retry_after,
            Error::RetryExhausted { source, .. } => source.retry_after(),
            _ => None,
        }
    }
}

impl From<TraversalError> for Error {
    fn from(err: TraversalError) -> Self {
        match err {
            TraversalError::Cancelled => Error::Cancelled,
            TraversalError::PageCeilingReached { pages } => Error::PageCeilingReached { pages },
            other @ TraversalError::OffsetOverflow { .. } => Error::Other(other.into()),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl ApiErrorBody {
    fn into_message(self) -> Option<String> {
        if let Some(message) = self.message.filter(|m| !m.is_empty()) {
            return Some(message);
        }
        match self.error? {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(String::from),
            _ => None,
        }
    }
}

fn fallback_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown status")
        .to_string()
}

fn header_string(headers: &http::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
