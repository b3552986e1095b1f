//! Configuration for the Magalu Cloud client

use crate::error::{Error, Result};
use http::HeaderMap;
use mgc_core::retry::{self, ExponentialBackoff};
use secrecy::SecretString;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default request timeout, retries and backoff waits included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Default `Content-Type` of request bodies.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Base URL of services that are not bound to a region.
pub const GLOBAL_BASE_URL: &str = "https://api.magalu.cloud";

/// Magalu Cloud region a client talks to.
///
/// Regional services are reached under `https://api.magalu.cloud/<region>`.
/// Global services such as SSH keys ignore the region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Region {
    /// Brazil, Northeast 1.
    BrNe1,
    /// Brazil, Southeast 1.
    #[default]
    BrSe1,
    /// Brazil, Magalu 1.
    BrMgl1,
    /// Not bound to a region.
    Global,
}

impl Region {
    /// Base URL of the region's API gateway.
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::BrNe1 => "https://api.magalu.cloud/br-ne1",
            Region::BrSe1 => "https://api.magalu.cloud/br-se1",
            Region::BrMgl1 => "https://api.magalu.cloud/br-se-1",
            Region::Global => GLOBAL_BASE_URL,
        }
    }

    /// Region identifier as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::BrNe1 => "br-ne1",
            Region::BrSe1 => "br-se1",
            Region::BrMgl1 => "br-mgl1",
            Region::Global => "global",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "br-ne1" | "br-ne-1" => Ok(Region::BrNe1),
            "br-se1" | "br-se-1" => Ok(Region::BrSe1),
            "br-mgl1" | "br-mgl-1" => Ok(Region::BrMgl1),
            "global" => Ok(Region::Global),
            other => Err(Error::MissingConfig(format!("unknown region: {other}"))),
        }
    }
}

/// Retry settings of the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts per request, the first one included.
    pub max_attempts: u32,
    /// Wait before the second attempt.
    pub initial_interval: Duration,
    /// Upper bound of a single wait.
    pub max_interval: Duration,
    /// Growth factor between waits.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: retry::DEFAULT_MAX_ATTEMPTS,
            initial_interval: retry::DEFAULT_INITIAL_DELAY,
            max_interval: retry::DEFAULT_MAX_DELAY,
            backoff_factor: retry::DEFAULT_MULTIPLIER,
        }
    }
}

impl RetryConfig {
    /// The delay schedule these settings describe.
    pub fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff::builder()
            .max_attempts(self.max_attempts)
            .initial_delay(self.initial_interval)
            .max_delay(self.max_interval)
            .multiplier(self.backoff_factor)
            .build()
    }
}

/// Configuration for the Magalu Cloud client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as `X-API-Key`
    pub api_key: Option<SecretString>,

    /// JWT sent as `Authorization`, used when no API key is set
    pub jwt_token: Option<SecretString>,

    /// Region for regional services
    pub region: Region,

    /// Overrides the base URL of every service, regional and global
    pub base_url: Option<String>,

    /// `User-Agent` header value
    pub user_agent: String,

    /// `Content-Type` header value
    pub content_type: String,

    /// Timeout of a whole request, retries included
    pub timeout: Duration,

    /// Retry settings
    pub retry: RetryConfig,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            jwt_token: None,
            region: Region::default(),
            base_url: None,
            user_agent: crate::DEFAULT_USER_AGENT.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with an API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(secret(api_key)),
            ..Default::default()
        }
    }

    /// Create a new configuration with a JWT.
    pub fn with_jwt_token(jwt_token: impl Into<String>) -> Self {
        Self {
            jwt_token: Some(secret(jwt_token)),
            ..Default::default()
        }
    }

    /// Base URL used for regional services.
    pub fn regional_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.region.base_url().to_string())
    }

    /// Base URL used for global services.
    pub fn global_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| GLOBAL_BASE_URL.to_string())
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first, if present.
    /// This will look for:
    /// - `MGC_API_KEY` or `MGC_JWT_TOKEN` for authentication
    /// - `MGC_REGION` for the region (`br-ne1`, `br-se1`, `br-mgl1`, `global`)
    /// - `MGC_BASE_URL` for a base URL override
    /// - `MGC_TIMEOUT` for request timeout (in seconds)
    /// - `MGC_MAX_ATTEMPTS` for the number of attempts per request
    /// - `MGC_USER_AGENT` for the `User-Agent` header
    ///
    /// Unparseable numbers are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] when `MGC_REGION` names an unknown region.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        use std::env;

        let _ = dotenvy::dotenv();
        let mut config = Self::default();

        if let Ok(api_key) = env::var("MGC_API_KEY") {
            config.api_key = Some(secret(api_key));
        }
        if let Ok(jwt_token) = env::var("MGC_JWT_TOKEN") {
            config.jwt_token = Some(secret(jwt_token));
        }

        if let Ok(region) = env::var("MGC_REGION") {
            config.region = region.parse()?;
        }

        if let Ok(base_url) = env::var("MGC_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(timeout_str) = env::var("MGC_TIMEOUT")
            && let Ok(timeout_secs) = timeout_str.parse::<u64>()
        {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(attempts_str) = env::var("MGC_MAX_ATTEMPTS")
            && let Ok(attempts) = attempts_str.parse::<u32>()
        {
            config.retry.max_attempts = attempts;
        }

        if let Ok(user_agent) = env::var("MGC_USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    ///
    /// Fields of `other` still at their default value do not override.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        let defaults = ClientConfig::default();

        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.jwt_token.is_some() {
            self.jwt_token = other.jwt_token;
        }
        if other.region != defaults.region {
            self.region = other.region;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.user_agent != defaults.user_agent {
            self.user_agent = other.user_agent;
        }
        if other.content_type != defaults.content_type {
            self.content_type = other.content_type;
        }
        if other.timeout != defaults.timeout {
            self.timeout = other.timeout;
        }
        if other.retry != defaults.retry {
            self.retry = other.retry;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }

        self
    }
}

fn secret(value: impl Into<String>) -> SecretString {
    SecretString::new(value.into().into_boxed_str())
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(secret(api_key));
        self
    }

    /// Set the JWT.
    pub fn jwt_token(mut self, jwt_token: impl Into<String>) -> Self {
        self.config.jwt_token = Some(secret(jwt_token));
        self
    }

    /// Set the region.
    pub fn region(mut self, region: Region) -> Self {
        self.config.region = region;
        self
    }

    /// Override the base URL of every service.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the `Content-Type` header.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.config.content_type = content_type.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry settings.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set the number of attempts per request.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.retry.max_attempts = max_attempts;
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
