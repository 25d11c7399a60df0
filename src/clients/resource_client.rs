//! Core client shared by every Battle.net resource.
//!
//! This module provides the [`ResourceClient`] type. It owns the resolved
//! credentials, region and target URL, the per-request query state with its
//! optional whitelist, one cache backend, and the HTTP client used to send
//! signed GET requests.

use std::collections::HashMap;

use chrono::Utc;

use crate::cache::{CacheStore, MemoryCache};
use crate::clients::http_response::{ApiResponse, ResponseMetadata};
use crate::clients::query::{QueryParams, QueryValue};
use crate::clients::signing;
use crate::config::{BattlenetConfig, ClientOptions, Credentials, KeyKind, Region};
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of redirects followed per request.
pub const MAX_REDIRECTS: usize = 10;

/// Lifecycle of a [`ResourceClient`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientState {
    /// Constructed or reset; no request issued since.
    Configured,
    /// At least one request or cache population has run.
    Queried,
}

/// Shared core for Battle.net resources.
///
/// The client is constructed once per resource session. Its cache is created
/// fresh at construction and never shared with another client, so distinct
/// clients can be used from different tasks without coordination.
///
/// # Example
///
/// ```rust
/// use battlenet_api::{BattlenetConfig, ClientOptions, Region};
/// use battlenet_api::clients::ResourceClient;
///
/// let config = BattlenetConfig::builder()
///     .api_key("public", "private")
///     .build()
///     .unwrap();
///
/// // Per-client region override; keys fall back to the config.
/// let client =
///     ResourceClient::with_options(&config, &ClientOptions::new().region("eu")).unwrap();
///
/// assert_eq!(client.region(), Region::Eu);
/// assert_eq!(client.api_url(), "http://eu.battle.net/api/");
/// ```
#[derive(Debug)]
pub struct ResourceClient {
    /// The internal reqwest HTTP client.
    http_client: reqwest::Client,
    /// Target URL of the next request, without query string.
    api_url: String,
    credentials: Credentials,
    region: Region,
    whitelist: Vec<String>,
    query: QueryParams,
    cache: Box<dyn CacheStore>,
    state: ClientState,
}

impl ResourceClient {
    /// Creates a client from the application defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(config: &BattlenetConfig) -> Result<Self, ConfigError> {
        Self::with_options(config, &ClientOptions::default())
    }

    /// Creates a client, applying per-client overrides.
    ///
    /// Each key and the region are taken from `options` when non-empty and
    /// from `config` otherwise. The API URL is derived from the resolved
    /// region through the configured template.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegion`] if the resolved region is not
    /// supported, or [`ConfigError::HttpClient`] if the HTTP client cannot be
    /// built.
    pub fn with_options(
        config: &BattlenetConfig,
        options: &ClientOptions,
    ) -> Result<Self, ConfigError> {
        let public_key = non_empty(options.public_key.as_deref())
            .unwrap_or_else(|| config.api_key(KeyKind::Public));
        let private_key = non_empty(options.private_key.as_deref())
            .unwrap_or_else(|| config.api_key(KeyKind::Private));

        let region = match non_empty(options.region.as_deref()) {
            Some(region) => region.parse()?,
            None => config.region(),
        };

        let http_client = Self::build_http_client(config)?;

        Ok(Self {
            http_client,
            api_url: config.api_url_for(region),
            credentials: Credentials::new(public_key, private_key),
            region,
            whitelist: Vec::new(),
            query: QueryParams::new(),
            cache: Box::new(MemoryCache::new()),
            state: ClientState::Configured,
        })
    }

    fn build_http_client(config: &BattlenetConfig) -> Result<reqwest::Client, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Battle.net API Library v{SDK_VERSION} | Rust");

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent)
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));

        if config.accept_invalid_certs() {
            tracing::warn!(
                "TLS certificate validation is disabled; HTTPS requests can be intercepted"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder.build().map_err(|e| ConfigError::HttpClient {
            reason: e.to_string(),
        })
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ClientState {
        self.state
    }

    pub(crate) fn mark_queried(&mut self) {
        self.state = ClientState::Queried;
    }

    /// Replaces the key pair.
    pub fn set_api_key(&mut self, public_key: impl Into<String>, private_key: impl Into<String>) {
        self.credentials = Credentials::new(public_key, private_key);
    }

    /// Returns one key of the pair.
    #[must_use]
    pub fn api_key(&self, kind: KeyKind) -> &str {
        self.credentials.get(kind)
    }

    /// Returns the full key pair.
    #[must_use]
    pub const fn api_keys(&self) -> &Credentials {
        &self.credentials
    }

    /// Sets the region.
    ///
    /// The API URL is not rebuilt; it keeps the host chosen at construction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegion`] if the region is not supported.
    pub fn set_region(&mut self, region: &str) -> Result<(), ConfigError> {
        self.region = region.parse()?;
        Ok(())
    }

    /// Returns the region.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Sets the target URL. No validation is performed.
    pub fn set_api_url(&mut self, url: impl Into<String>) {
        self.api_url = url.into();
    }

    /// Returns the target URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Restricts subsequent query writes to `names`. An empty list lifts the
    /// restriction.
    pub fn set_query_whitelist<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = names.into_iter().map(Into::into).collect();
    }

    /// Returns the active whitelist.
    #[must_use]
    pub fn query_whitelist(&self) -> &[String] {
        &self.whitelist
    }

    fn is_whitelisted(&self, name: &str) -> bool {
        self.whitelist.is_empty() || self.whitelist.iter().any(|w| w == name)
    }

    /// Sets one query parameter.
    ///
    /// Empty values (an empty string or an empty list) are accepted and
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedQueryParam`] if a whitelist is active
    /// and `name` is not in it.
    pub fn set_query_param(
        &mut self,
        name: &str,
        value: impl Into<QueryValue>,
    ) -> Result<(), ConfigError> {
        if !self.is_whitelisted(name) {
            return Err(ConfigError::UnsupportedQueryParam {
                param: name.to_string(),
            });
        }

        let value = value.into();
        if !value.is_empty() {
            self.query.insert(name, value);
        }

        Ok(())
    }

    /// Sets several query parameters.
    ///
    /// With an active whitelist, names outside it are dropped silently
    /// instead of failing; empty values are always dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedQueryParam`] only if a name is
    /// rejected by [`set_query_param`](Self::set_query_param), which cannot
    /// happen after the whitelist intersection.
    pub fn set_query<I, K, V>(&mut self, params: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<QueryValue>,
    {
        for (name, value) in params {
            let name = name.as_ref();
            if !self.is_whitelisted(name) {
                continue;
            }
            self.set_query_param(name, value)?;
        }
        Ok(())
    }

    /// Returns the URL-encoded query string.
    #[must_use]
    pub fn query(&self) -> String {
        self.query.build()
    }

    /// Returns the raw query mapping.
    #[must_use]
    pub const fn query_params(&self) -> &QueryParams {
        &self.query
    }

    /// Returns one query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&QueryValue> {
        self.query.get(name)
    }

    /// Returns the full URL the next request will target.
    #[must_use]
    pub fn request_url(&self) -> String {
        let query = self.query();
        if query.is_empty() {
            self.api_url.clone()
        } else {
            format!("{}?{query}", self.api_url)
        }
    }

    /// Clears the query parameters and the whitelist.
    ///
    /// Credentials, region, target URL and cached results are kept.
    pub fn reset(&mut self) {
        self.query.clear();
        self.whitelist.clear();
        self.state = ClientState::Configured;
    }

    /// Returns the cache backend.
    #[must_use]
    pub fn cache_engine(&self) -> &dyn CacheStore {
        self.cache.as_ref()
    }

    /// Returns the cache backend mutably.
    pub fn cache_engine_mut(&mut self) -> &mut dyn CacheStore {
        self.cache.as_mut()
    }

    /// Replaces the cache backend.
    pub fn set_cache_engine(&mut self, engine: Box<dyn CacheStore>) {
        self.cache = engine;
    }

    /// Sends a GET request to [`request_url`](Self::request_url).
    ///
    /// The request is signed when both keys are set and sent anonymously
    /// otherwise. Transport failures do not produce an error here: the
    /// returned [`ApiResponse`] carries the error text as its raw payload
    /// and reports it through [`ApiResponse::transport_failure`].
    pub async fn request(&mut self) -> ApiResponse {
        let url = self.request_url();
        self.state = ClientState::Queried;

        let mut req_builder = self.http_client.get(&url);

        if let Some(signed) = signing::sign_request(&self.credentials, &url, Utc::now()) {
            for (name, value) in signed.pairs() {
                req_builder = req_builder.header(name, value);
            }
            tracing::debug!("Sending signed request to {}", url);
        } else {
            tracing::debug!("Sending anonymous request to {}", url);
        }

        let res = match req_builder.send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::warn!("Request to {} failed: {}", url, e);
                return ApiResponse::from_transport_error(url, e.to_string());
            }
        };

        let metadata = ResponseMetadata {
            status: Some(res.status().as_u16()),
            url: res.url().to_string(),
            headers: Self::parse_response_headers(res.headers()),
        };

        match res.text().await {
            Ok(body) => ApiResponse::new(body, metadata),
            Err(e) => {
                tracing::warn!("Reading response from {} failed: {}", url, e);
                ApiResponse::from_transport_error(url, e.to_string())
            }
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

// Verify ResourceClient is Send at compile time
const _: fn() = || {
    const fn assert_send<T: Send>() {}
    assert_send::<ResourceClient>();
};

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
