//! HTTP request builder

use super::Response;
use super::response::{REQUEST_ID_HEADER, TRACE_ID_HEADER};
use crate::context::RequestContext;
use crate::error::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use mgc_core::query::QueryParams;
use mgc_core::retry::ExponentialBackoff;
use serde::Serialize;
use std::time::{Duration, Instant};
use url::Url;

/// Builder for HTTP requests.
///
/// [`send`](Self::send) retries 5xx, 429 and network failures following the
/// configured [`ExponentialBackoff`]. The timeout covers every attempt and
/// every wait between them. A cancelled context stops the request at once.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    headers: HeaderMap,
    query: QueryParams,
    body: Option<Vec<u8>>,
    timeout: Duration,
    backoff: ExponentialBackoff,
    context: RequestContext,
    pub(crate) http_client: Option<reqwest::Client>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            query: QueryParams::new(),
            body: None,
            timeout: crate::config::DEFAULT_TIMEOUT,
            backoff: ExponentialBackoff::default(),
            context: RequestContext::default(),
            http_client: None,
        }
    }

    /// Set the HTTP client to use
    pub(crate) fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set a header.
    pub fn header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Try to set a header, returning an error if the name or value is invalid.
    ///
    /// # Errors
    /// Returns an error if the header name or value contains invalid characters.
    pub fn try_header(self, key: &str, value: &str) -> Result<Self> {
        let name = key
            .parse::<HeaderName>()
            .map_err(|_| Error::InvalidHeaderName(key.to_string()))?;
        let value = value
            .parse::<HeaderValue>()
            .map_err(|_| Error::InvalidHeaderValue(value.to_string()))?;
        Ok(self.header(name, value))
    }

    /// Replace the query parameters.
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Set a single query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl std::fmt::Display) -> Self {
        self.query.set(key, value);
        self
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    /// Returns [`Error::Serialization`] if `body` cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    /// Set the request body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the overall timeout, retries included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry schedule.
    pub fn backoff(mut self, backoff: ExponentialBackoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set the cancellation and correlation context.
    pub fn context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    /// Send the request and get a successful response.
    ///
    /// # Errors
    ///
    /// - [`Error::Cancelled`] if the context is cancelled, before or during the call
    /// - [`Error::Timeout`] if the overall timeout elapses
    /// - [`Error::RetryExhausted`] if every attempt failed with a retryable error
    /// - the classified HTTP error for a non-retryable status
    pub async fn send(self) -> Result<Response> {
        if self.context.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let timeout = self.timeout;
        let context = self.context.clone();
        let attempts = tokio::time::timeout(timeout, self.execute());

        tokio::select! {
            biased;
            _ = context.cancelled() => Err(Error::Cancelled),
            result = attempts => result.unwrap_or(Err(Error::Timeout(timeout))),
        }
    }

    async fn execute(self) -> Result<Response> {
        let client = self
            .http_client
            .clone()
            .ok_or_else(|| Error::HttpClient("No HTTP client configured".to_string()))?;

        let url = self.resolved_url();
        let mut headers = self.headers.clone();
        if let Some(request_id) = self.context.request_id() {
            let value = HeaderValue::from_str(request_id)
                .map_err(|_| Error::InvalidHeaderValue(REQUEST_ID_HEADER.to_string()))?;
            headers.insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }

        let started = Instant::now();
        let max_attempts = self.backoff.max_attempts();
        let mut last_error: Option<Error> = None;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let delay = last_error
                    .as_ref()
                    .and_then(Error::retry_after)
                    .map(|d| d.min(self.backoff.max_delay()))
                    .unwrap_or_else(|| self.backoff.delay_for(attempt));
                tracing::debug!(attempt = attempt + 1, ?delay, "waiting before retry");
                tokio::time::sleep(delay).await;
            }

            tracing::info!(
                method = %self.method,
                url = %url,
                attempt = attempt + 1,
                "sending request"
            );

            let mut req = client.request(self.method.clone(), url.clone()).headers(headers.clone());
            if let Some(body) = &self.body {
                req = req.body(body.clone());
            }

            let resp = match req.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    tracing::warn!(attempt = attempt + 1, error = %e, "request failed");
                    last_error = Some(Error::Connection(e.to_string()));
                    continue;
                }
            };

            let status = resp.status();
            let resp_headers = resp.headers().clone();
            log_correlation(&resp_headers);

            let body = match resp.bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(e) => {
                    tracing::warn!(attempt = attempt + 1, error = %e, "failed to read response body");
                    last_error = Some(Error::Connection(e.to_string()));
                    continue;
                }
            };

            if status.is_success() {
                return Ok(Response::new(
                    status,
                    resp_headers,
                    body,
                    attempt + 1,
                    started.elapsed(),
                ));
            }

            let error = Error::from_response(
                status.as_u16(),
                &String::from_utf8_lossy(&body),
                &resp_headers,
            );
            if !mgc_core::retry::should_retry_status(status.as_u16()) {
                return Err(error);
            }
            tracing::warn!(attempt = attempt + 1, status = status.as_u16(), "retryable status");
            last_error = Some(error);
        }

        let source =
            last_error.unwrap_or_else(|| Error::Connection("no attempt was made".to_string()));
        Err(Error::RetryExhausted {
            attempts: max_attempts,
            source: Box::new(source),
        })
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the URL, without query parameters.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URL the request will be sent to, query parameters included.
    pub fn resolved_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.set_query(Some(&self.query.encode()));
        }
        url
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the query parameters.
    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    /// Get the timeout.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }
}

fn log_correlation(headers: &HeaderMap) {
    let request_id = headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok());
    let trace_id = headers.get(TRACE_ID_HEADER).and_then(|v| v.to_str().ok());
    if request_id.is_some() || trace_id.is_some() {
        tracing::info!(request_id, trace_id, "response correlation");
    } else {
        tracing::debug!("response carries no X-Request-ID or X-Mgc-Trace-Id");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> RequestBuilder {
        RequestBuilder::new(
            Method::GET,
            Url::parse("https://api.magalu.cloud/br-se1/volume/v1/volumes").unwrap(),
        )
    }

    #[test]
    fn test_resolved_url_appends_sorted_query() {
        let mut query = QueryParams::new();
        query.set("_offset", 0).set("_limit", 50);
        let request = builder().query(query);

        assert_eq!(
            request.resolved_url().as_str(),
            "https://api.magalu.cloud/br-se1/volume/v1/volumes?_limit=50&_offset=0"
        );
        assert!(request.url().query().is_none());
    }

    #[test]
    fn test_try_header_rejects_invalid_name() {
        let result = builder().try_header("bad header", "v");
        assert!(matches!(result, Err(Error::InvalidHeaderName(_))));
    }

    #[test]
    fn test_try_header_reports_offending_value() {
        let result = builder().try_header("x-tenant", "bad\nvalue");
        match result {
            Err(Error::InvalidHeaderValue(value)) => assert_eq!(value, "bad\nvalue"),
            other => panic!("expected InvalidHeaderValue, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_json_body() {
        let request = builder().json(&serde_json::json!({"size": 20})).unwrap();
        assert_eq!(request.body.as_deref(), Some(br#"{"size":20}"#.as_slice()));
    }

    #[tokio::test]
    async fn test_send_without_client_fails() {
        let result = builder().send().await;
        assert!(matches!(result, Err(Error::HttpClient(_))));
    }

    #[tokio::test]
    async fn test_cancelled_context_short_circuits() {
        let token = crate::CancellationToken::new();
        token.cancel();
        let result = builder()
            .with_client(reqwest::Client::new())
            .context(RequestContext::new().with_cancel(token))
            .send()
            .await;

        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
