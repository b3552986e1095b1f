//! Magalu Cloud API HTTP provider implementation
//!
//! This provider resolves paths against the regional or global gateway and
//! stamps every request with credentials, user agent and default headers.

use super::{Endpoint, HttpProvider, Method, RequestBuilder, provider::serialize_body};
use crate::config::{ClientConfig, DEFAULT_CONTENT_TYPE, DEFAULT_TIMEOUT, GLOBAL_BASE_URL, Region};
use crate::context::RequestContext;
use crate::error::{Error, Result};
use async_trait::async_trait;
use http::{HeaderName, HeaderValue};
use mgc_core::query::QueryParams;
use mgc_core::retry::ExponentialBackoff;
use secrecy::{ExposeSecret, SecretString};
use std::{sync::Arc, time::Duration};
use url::Url;

const API_KEY_HEADER: &str = "x-api-key";

/// HTTP provider for the Magalu Cloud API.
///
/// # Architecture
///
/// - Uses `reqwest` for HTTP client
/// - Authenticates with `X-API-Key`, or with `Authorization` carrying a JWT
/// - Retries with exponential backoff, see [`RequestBuilder::send`]
///
/// # Example
///
/// ```rust,no_run
/// use mgc::http::MgcHttpProvider;
/// use mgc::Region;
///
/// let provider = MgcHttpProvider::builder()
///     .api_key("my-api-key")
///     .region(Region::BrNe1)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct MgcHttpProvider {
    pub(crate) inner: Arc<ProviderInner>,
}

#[derive(Debug)]
pub(crate) struct ProviderInner {
    /// HTTP client for making requests
    pub(crate) http_client: reqwest::Client,
    /// Base URL of regional services, without trailing slash
    pub(crate) regional_base: String,
    /// Base URL of global services, without trailing slash
    pub(crate) global_base: String,
    /// API key (X-API-Key header)
    pub(crate) api_key: Option<SecretString>,
    /// JWT (Authorization header)
    pub(crate) jwt_token: Option<SecretString>,
    /// Content-Type header value
    pub(crate) content_type: String,
    /// Overall timeout of a request
    pub(crate) timeout: Duration,
    /// Retry schedule
    pub(crate) backoff: ExponentialBackoff,
    /// Custom headers to include with every request
    pub(crate) default_headers: http::HeaderMap,
}

impl MgcHttpProvider {
    /// Create a new builder for configuring the provider.
    pub fn builder() -> MgcHttpProviderBuilder {
        MgcHttpProviderBuilder::default()
    }

    /// Build a provider from a client configuration.
    ///
    /// # Errors
    ///
    /// See [`MgcHttpProviderBuilder::build`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .region(config.region)
            .user_agent(config.user_agent.clone())
            .content_type(config.content_type.clone())
            .timeout(config.timeout)
            .backoff(config.retry.backoff());
        builder.api_key = config.api_key.clone();
        builder.jwt_token = config.jwt_token.clone();
        builder.default_headers = config.default_headers.clone();
        if let Some(base_url) = &config.base_url {
            builder = builder.base_url(base_url.clone());
        }
        builder.build()
    }

    /// Create a request builder with provider configuration.
    fn build_request(
        &self,
        endpoint: Endpoint,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder> {
        let raw = format!("{}{}", self.base_url(endpoint), path);
        let url = Url::parse(&raw).map_err(|e| {
            Error::InvalidUrl(format!("Failed to construct URL from path '{}': {}", path, e))
        })?;

        tracing::debug!(method = %method, url = %url, ?endpoint, "creating request");

        let content_type = HeaderValue::from_str(&self.inner.content_type)
            .map_err(|_| Error::InvalidHeaderValue(self.inner.content_type.clone()))?;

        let mut builder = RequestBuilder::new(method, url)
            .with_client(self.inner.http_client.clone())
            .timeout(self.inner.timeout)
            .backoff(self.inner.backoff.clone())
            .header(http::header::CONTENT_TYPE, content_type);

        if let Some(api_key) = &self.inner.api_key {
            builder = builder.header(
                HeaderName::from_static(API_KEY_HEADER),
                sensitive(api_key.expose_secret(), API_KEY_HEADER)?,
            );
        } else if let Some(jwt) = &self.inner.jwt_token {
            let token = jwt.expose_secret();
            let token = token.strip_prefix("Bearer ").unwrap_or(token);
            builder = builder.header(
                http::header::AUTHORIZATION,
                sensitive(token, "authorization")?,
            );
        }

        for (key, value) in &self.inner.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        Ok(builder)
    }
}

fn sensitive(value: &str, name: &str) -> Result<HeaderValue> {
    let mut value =
        HeaderValue::from_str(value).map_err(|_| Error::InvalidHeaderValue(name.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

#[async_trait]
impl HttpProvider for MgcHttpProvider {
    async fn request(
        &self,
        endpoint: Endpoint,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
        context: &RequestContext,
    ) -> Result<super::Response> {
        let mut builder = self
            .build_request(endpoint, method, path)?
            .query(query.clone())
            .context(context.clone());

        if let Some(body) = body {
            let body_bytes = serialize_body(body)?;
            builder = builder.body(body_bytes);
        }

        builder.send().await
    }

    fn create_request(
        &self,
        endpoint: Endpoint,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder> {
        self.build_request(endpoint, method, path)
    }

    fn provider_name(&self) -> &'static str {
        "magalu-cloud"
    }

    fn base_url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Regional => &self.inner.regional_base,
            Endpoint::Global => &self.inner.global_base,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Builder for creating an `MgcHttpProvider` with custom configuration.
///
/// # Example
///
/// ```rust,no_run
/// use mgc::http::MgcHttpProvider;
///
/// let provider = MgcHttpProvider::builder()
///     .api_key("my-api-key")
///     .timeout(std::time::Duration::from_secs(120))
///     .build()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct MgcHttpProviderBuilder {
    api_key: Option<SecretString>,
    jwt_token: Option<SecretString>,
    region: Option<Region>,
    base_url: Option<String>,
    global_base_url: Option<String>,
    user_agent: Option<String>,
    content_type: Option<String>,
    timeout: Option<Duration>,
    backoff: Option<ExponentialBackoff>,
    default_headers: http::HeaderMap,
}

impl MgcHttpProviderBuilder {
    /// Set the API key, sent as `X-API-Key`.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into().into_boxed_str()));
        self
    }

    /// Set the JWT, sent as `Authorization` when no API key is set.
    pub fn jwt_token(mut self, jwt_token: impl Into<String>) -> Self {
        self.jwt_token = Some(SecretString::new(jwt_token.into().into_boxed_str()));
        self
    }

    /// Set the region. Defaults to [`Region::BrSe1`].
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Override the base URL of regional and global services alike.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the base URL of global services only.
    pub fn global_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.global_base_url = Some(base_url.into());
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the `Content-Type` header.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the overall request timeout.
    ///
    /// Defaults to 15 minutes.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the retry schedule.
    pub fn backoff(mut self, backoff: ExponentialBackoff) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Add a custom header to include with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value = value_str
            .parse::<HeaderValue>()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the provider with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither API key nor JWT is provided
    /// - A base URL is empty, unparseable or not `http`/`https`
    /// - HTTP client creation fails
    pub fn build(self) -> Result<MgcHttpProvider> {
        if self.api_key.is_none() && self.jwt_token.is_none() {
            return Err(Error::Authentication {
                message: "No API key or JWT provided. Set MGC_API_KEY or provide credentials explicitly."
                    .to_string(),
                request_id: None,
            });
        }

        let region = self.region.unwrap_or_default();
        let regional_base = validate_base_url(
            self.base_url
                .clone()
                .unwrap_or_else(|| region.base_url().to_string()),
        )?;
        let global_base = validate_base_url(
            self.global_base_url
                .or(self.base_url)
                .unwrap_or_else(|| GLOBAL_BASE_URL.to_string()),
        )?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| crate::DEFAULT_USER_AGENT.to_string());

        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let inner = Arc::new(ProviderInner {
            http_client,
            regional_base,
            global_base,
            api_key: self.api_key,
            jwt_token: self.jwt_token,
            content_type: self
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            timeout,
            backoff: self.backoff.unwrap_or_default(),
            default_headers: self.default_headers,
        });

        Ok(MgcHttpProvider { inner })
    }
}

fn validate_base_url(raw: String) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
    }

    let url: Url = trimmed
        .parse()
        .map_err(|e| Error::InvalidUrl(format!("{trimmed}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(Error::InvalidUrl(format!(
                "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                scheme
            )));
        }
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
