//! Main client implementation for the Magalu Cloud API

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use mgc_core::pagination::Traversal;
use mgc_core::query::QueryParams;
use secrecy::SecretString;

use crate::{
    config::{ClientConfig, Region, RetryConfig},
    context::RequestContext,
    error::{Error, Result},
    http::{Endpoint, HttpProvider, Method, MgcHttpProvider, RequestBuilder, Response},
    resources::{
        audit::Audit, availability_zones::AvailabilityZones, block_storage::BlockStorage,
        lbaas::Lbaas, ssh_keys::SshKeys,
    },
};

/// Main client for interacting with the Magalu Cloud API.
///
/// Cloning is cheap; clones share the HTTP connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use mgc::{Client, Region};
///
/// # fn example() -> mgc::Result<()> {
/// let client = Client::builder()
///     .api_key("my-api-key")
///     .region(Region::BrNe1)
///     .build()?;
/// let volumes = client.block_storage().volumes();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    /// Provider plus context, handed to every resource
    transport: Transport,

    // Lazy-initialized resources
    lbaas: OnceLock<Lbaas>,
    ssh_keys: OnceLock<SshKeys>,
    availability_zones: OnceLock<AvailabilityZones>,
    audit: OnceLock<Audit>,
    block_storage: OnceLock<BlockStorage>,
}

impl ClientInner {
    fn new(transport: Transport) -> Self {
        Self {
            transport,
            lbaas: OnceLock::new(),
            ssh_keys: OnceLock::new(),
            availability_zones: OnceLock::new(),
            audit: OnceLock::new(),
            block_storage: OnceLock::new(),
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("provider", &self.inner.transport.provider.provider_name())
            .field("base_url", &self.base_url())
            .finish()
    }
}

impl Client {
    /// Create a new client with an API key and default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mgc::Client;
    ///
    /// let client = Client::new("my-api-key").expect("client");
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> MgcClientBuilder {
        MgcClientBuilder::default()
    }

    /// Create a client with a custom HTTP provider.
    pub fn from_provider(provider: Arc<dyn HttpProvider>) -> Self {
        Self {
            inner: Arc::new(ClientInner::new(Transport::new(
                provider,
                RequestContext::default(),
            ))),
        }
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or a base URL is invalid.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let provider = Arc::new(MgcHttpProvider::from_config(&config)?);
        Ok(Self::from_provider(provider))
    }

    /// Load configuration from the environment and build a client.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`] and [`Client::from_config`].
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// A client sharing this one's connection pool whose requests all carry `context`.
    ///
    /// ```rust,no_run
    /// use mgc::{CancellationToken, Client, RequestContext};
    ///
    /// # async fn example(client: Client) -> mgc::Result<()> {
    /// let token = CancellationToken::new();
    /// let scoped = client.with_context(RequestContext::new().with_cancel(token.clone()));
    /// let keys = scoped.ssh_keys().list_all().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_context(&self, context: RequestContext) -> Self {
        let transport = Transport::new(self.inner.transport.provider.clone(), context);
        Self {
            inner: Arc::new(ClientInner::new(transport)),
        }
    }

    /// Context attached to this client's requests.
    pub fn context(&self) -> &RequestContext {
        &self.inner.transport.context
    }

    /// Load balancer as a service.
    pub fn lbaas(&self) -> &Lbaas {
        self.inner
            .lbaas
            .get_or_init(|| Lbaas::new(self.inner.transport.clone()))
    }

    /// SSH keys of the account. Not bound to a region.
    pub fn ssh_keys(&self) -> &SshKeys {
        self.inner
            .ssh_keys
            .get_or_init(|| SshKeys::new(self.inner.transport.clone()))
    }

    /// Availability zones of every region. Not bound to a region.
    pub fn availability_zones(&self) -> &AvailabilityZones {
        self.inner
            .availability_zones
            .get_or_init(|| AvailabilityZones::new(self.inner.transport.clone()))
    }

    /// Audit events and event types.
    pub fn audit(&self) -> &Audit {
        self.inner
            .audit
            .get_or_init(|| Audit::new(self.inner.transport.clone()))
    }

    /// Block storage volumes.
    pub fn block_storage(&self) -> &BlockStorage {
        self.inner
            .block_storage
            .get_or_init(|| BlockStorage::new(self.inner.transport.clone()))
    }

    /// Create a request builder for custom requests, with this client's context.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be constructed from the base URL and path.
    pub fn request(
        &self,
        endpoint: Endpoint,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder> {
        self.inner.transport.request(endpoint, method, path)
    }

    /// Get the base URL of regional services
    pub fn base_url(&self) -> &str {
        self.inner.transport.provider.base_url(Endpoint::Regional)
    }

    /// Get the provider name (for debugging)
    pub fn provider_name(&self) -> &'static str {
        self.inner.transport.provider.provider_name()
    }
}

/// The handle resources use to reach the API.
///
/// It pairs the shared provider with the context of the client that created
/// it, and does not point back at the client.
#[derive(Clone, Debug)]
pub struct Transport {
    provider: Arc<dyn HttpProvider>,
    context: RequestContext,
}

impl Transport {
    pub(crate) fn new(provider: Arc<dyn HttpProvider>, context: RequestContext) -> Self {
        Self { provider, context }
    }

    /// Context carried by every request.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Request builder with provider headers and this context applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be constructed.
    pub fn request(
        &self,
        endpoint: Endpoint,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder> {
        Ok(self
            .provider
            .create_request(endpoint, method, path)?
            .context(self.context.clone()))
    }

    /// Send a request through the provider and return the successful response.
    ///
    /// # Errors
    ///
    /// See [`HttpProvider::request`].
    pub async fn send(
        &self,
        endpoint: Endpoint,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
    ) -> Result<Response> {
        self.provider
            .request(endpoint, method, path, query, body, &self.context)
            .await
    }

    /// Full-collection walk observing this context's cancellation.
    pub fn traversal(&self) -> Traversal {
        match self.context.cancel_token() {
            Some(token) => Traversal::new().cancel_on(token.clone()),
            None => Traversal::new(),
        }
    }
}

/// Builder for creating a configured Client.
#[derive(Default)]
pub struct MgcClientBuilder {
    config: ClientConfig,
}

impl MgcClientBuilder {
    /// Set the API key for authentication.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::new(api_key.into().into_boxed_str()));
        self
    }

    /// Set the JWT for authentication (alternative to API key).
    pub fn jwt_token(mut self, jwt_token: impl Into<String>) -> Self {
        self.config.jwt_token = Some(SecretString::new(jwt_token.into().into_boxed_str()));
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

    /// Set the overall timeout of a request.
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

    /// Add a custom default header.
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

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        Client::from_config(self.config)
    }
}
