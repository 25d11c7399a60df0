//! Configuration types for the Battle.net API SDK.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`BattlenetConfig`]: Application-wide defaults (keys, region, transport settings)
//! - [`BattlenetConfigBuilder`]: A builder for constructing [`BattlenetConfig`] instances
//! - [`ClientOptions`]: Per-client overrides applied on top of a [`BattlenetConfig`]
//! - [`Region`]: The supported API regions
//! - [`ApiKey`], [`ApiSecretKey`], [`Credentials`]: The key pair used for signing
//!
//! There is no global state: the application builds one [`BattlenetConfig`]
//! at startup and hands it to every resource client it constructs.
//!
//! # Example
//!
//! ```rust
//! use battlenet_api::{BattlenetConfig, Region};
//!
//! let config = BattlenetConfig::builder()
//!     .api_key("public", "private")
//!     .region("eu")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.region(), Region::Eu);
//! assert!(config.credentials().can_sign());
//! ```

mod newtypes;
mod region;

pub use newtypes::{ApiKey, ApiSecretKey, Credentials, KeyKind};
pub use region::Region;

use std::time::Duration;

use crate::error::ConfigError;

/// Default API URL template. `{region}` is replaced by the region code.
pub const DEFAULT_API_URL_TEMPLATE: &str = "http://{region}.battle.net/api/";

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default total request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Application-wide defaults for Battle.net resource clients.
///
/// Resource clients fall back to these values for any key or region their
/// own [`ClientOptions`] leave empty.
///
/// # Thread Safety
///
/// `BattlenetConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct BattlenetConfig {
    credentials: Credentials,
    region: Region,
    api_url_template: String,
    connect_timeout: Duration,
    timeout: Duration,
    accept_invalid_certs: bool,
    user_agent_prefix: Option<String>,
}

impl BattlenetConfig {
    /// Creates a new builder for constructing a `BattlenetConfig`.
    #[must_use]
    pub fn builder() -> BattlenetConfigBuilder {
        BattlenetConfigBuilder::new()
    }

    /// Returns the default key pair.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns one of the default keys.
    #[must_use]
    pub fn api_key(&self, kind: KeyKind) -> &str {
        self.credentials.get(kind)
    }

    /// Replaces the default key pair.
    pub fn set_api_key(&mut self, public_key: impl Into<String>, private_key: impl Into<String>) {
        self.credentials = Credentials::new(public_key, private_key);
    }

    /// Returns the default region.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Sets the default region.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegion`] if the region is not supported.
    pub fn set_region(&mut self, region: &str) -> Result<(), ConfigError> {
        self.region = region.parse()?;
        Ok(())
    }

    /// Returns the supported region codes.
    #[must_use]
    pub fn supported_regions(&self) -> Vec<&'static str> {
        Region::supported()
    }

    /// Returns the API URL template.
    #[must_use]
    pub fn api_url_template(&self) -> &str {
        &self.api_url_template
    }

    /// Returns the API base URL for `region`.
    #[must_use]
    pub fn api_url_for(&self, region: Region) -> String {
        self.api_url_template.replace("{region}", region.as_str())
    }

    /// Returns the connection timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the total request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns whether TLS certificate validation is disabled.
    #[must_use]
    pub const fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for BattlenetConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            region: Region::default(),
            api_url_template: DEFAULT_API_URL_TEMPLATE.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
            user_agent_prefix: None,
        }
    }
}

// Verify BattlenetConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BattlenetConfig>();
};

/// Builder for constructing [`BattlenetConfig`] instances.
///
/// # Defaults
///
/// - keys: empty (requests are sent unsigned)
/// - `region`: `us`
/// - `api_url_template`: [`DEFAULT_API_URL_TEMPLATE`]
/// - `connect_timeout`: 120 seconds
/// - `timeout`: 30 seconds
/// - `accept_invalid_certs`: `false`
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use battlenet_api::BattlenetConfig;
///
/// let config = BattlenetConfig::builder()
///     .api_key("public", "private")
///     .region("kr")
///     .timeout(Duration::from_secs(10))
///     .user_agent_prefix("MyGuildSite/1.0")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct BattlenetConfigBuilder {
    public_key: Option<String>,
    private_key: Option<String>,
    region: Option<String>,
    api_url_template: Option<String>,
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
    accept_invalid_certs: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl BattlenetConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default public and private keys.
    #[must_use]
    pub fn api_key(mut self, public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self.private_key = Some(private_key.into());
        self
    }

    /// Sets the default region. Validated by [`build`](Self::build).
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the API URL template; `{region}` is substituted per client.
    #[must_use]
    pub fn api_url_template(mut self, template: impl Into<String>) -> Self {
        self.api_url_template = Some(template.into());
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the total request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables TLS certificate validation.
    ///
    /// # Security
    ///
    /// This makes every HTTPS request open to interception. Only enable it
    /// when talking to an endpoint that cannot present a valid certificate.
    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = Some(accept);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`BattlenetConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegion`] if the region is not supported.
    pub fn build(self) -> Result<BattlenetConfig, ConfigError> {
        let region = self
            .region
            .map(|r| r.parse::<Region>())
            .transpose()?
            .unwrap_or_default();

        Ok(BattlenetConfig {
            credentials: Credentials::new(
                self.public_key.unwrap_or_default(),
                self.private_key.unwrap_or_default(),
            ),
            region,
            api_url_template: self
                .api_url_template
                .unwrap_or_else(|| DEFAULT_API_URL_TEMPLATE.to_string()),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            accept_invalid_certs: self.accept_invalid_certs.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

/// Per-client overrides.
///
/// Any field left `None` or empty falls back to the [`BattlenetConfig`]
/// value when the client is constructed.
///
/// # Example
///
/// ```rust
/// use battlenet_api::ClientOptions;
///
/// let options = ClientOptions::new()
///     .api_key("guild-public", "guild-private")
///     .region("tw");
/// assert_eq!(options.region.as_deref(), Some("tw"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClientOptions {
    /// Public key override.
    pub public_key: Option<String>,
    /// Private key override.
    pub private_key: Option<String>,
    /// Region override, validated when the client is constructed.
    pub region: Option<String>,
}

impl ClientOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides both keys.
    #[must_use]
    pub fn api_key(mut self, public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self.private_key = Some(private_key.into());
        self
    }

    /// Overrides the region.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}
