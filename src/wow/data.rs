//! Static game data resource.
//!
//! [`DataApi`] serves lookups that rarely change: character classes and
//! races, guild perks and rewards, and single items. Each lookup points the
//! client at its own path under `data/`, and its decoded body is memoized
//! in the client cache so repeating a lookup does not hit the network.

use serde_json::Value;

use crate::clients::ResourceClient;
use crate::config::{BattlenetConfig, ClientOptions};
use crate::error::{ApiError, ConfigError};
use crate::resource::Resource;
use crate::wow::{ensure_delivered, wow_client};

/// Static data lookups.
///
/// # Example
///
/// ```rust,ignore
/// use battlenet_api::{BattlenetConfig, ClientOptions};
/// use battlenet_api::wow::DataApi;
///
/// let mut data = DataApi::new(&BattlenetConfig::default(), &ClientOptions::new())?;
///
/// let classes = data.classes().await?;
/// let item = data.item(49623).await?;
/// ```
#[derive(Debug)]
pub struct DataApi {
    client: ResourceClient,
    base_url: String,
}

impl DataApi {
    /// Creates a data resource.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegion`] if the resolved region is not
    /// supported, or [`ConfigError::HttpClient`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &BattlenetConfig, options: &ClientOptions) -> Result<Self, ConfigError> {
        let client = wow_client(config, options)?;
        let base_url = client.api_url().to_string();
        Ok(Self { client, base_url })
    }

    /// Returns the WoW API root every lookup path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the character classes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the request fails.
    pub async fn classes(&mut self) -> Result<Value, ApiError> {
        self.request_data("DataApi::classes", "data/character/classes", Value::Null)
            .await
    }

    /// Returns the character races.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the request fails.
    pub async fn races(&mut self) -> Result<Value, ApiError> {
        self.request_data("DataApi::races", "data/character/races", Value::Null)
            .await
    }

    /// Returns the guild perks.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the request fails.
    pub async fn guild_perks(&mut self) -> Result<Value, ApiError> {
        self.request_data("DataApi::guild_perks", "data/guild/perks", Value::Null)
            .await
    }

    /// Returns the guild rewards.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the request fails.
    pub async fn guild_rewards(&mut self) -> Result<Value, ApiError> {
        self.request_data("DataApi::guild_rewards", "data/guild/rewards", Value::Null)
            .await
    }

    /// Returns one item.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFilterArgument`] for item id `0`, or
    /// [`ApiError::Transport`] if the request fails.
    pub async fn item(&mut self, id: u64) -> Result<Value, ApiError> {
        if id == 0 {
            return Err(ConfigError::InvalidFilterArgument {
                operation: "DataApi::item".to_string(),
                value: id.to_string(),
                reason: "item ids start at 1".to_string(),
            }
            .into());
        }

        self.request_data("DataApi::item", &format!("data/item/{id}"), Value::from(id))
            .await
    }

    /// Fetches `path` once per `(operation, args)` and memoizes the body.
    ///
    /// Transport failures are returned and not memoized, so the next call
    /// retries the request.
    async fn request_data(
        &mut self,
        operation: &str,
        path: &str,
        args: Value,
    ) -> Result<Value, ApiError> {
        let key = self.client.cache_engine().key(operation, &args);

        if self.client.cache_engine().has(&key) {
            if let Some(cached) = self.client.cache_engine().get(&key) {
                tracing::debug!("Data cache hit for {}", key);
                return Ok(cached);
            }
        }

        tracing::debug!("Data cache miss for {}", key);
        self.client.set_api_url(format!("{}{path}", self.base_url));

        let response = self.client.request().await;
        ensure_delivered(&response)?;

        let results = response.into_response();
        self.client.cache_engine_mut().set(&key, results.clone());

        Ok(results)
    }
}

impl Resource for DataApi {
    fn client(&self) -> &ResourceClient {
        &self.client
    }

    fn client_mut(&mut self) -> &mut ResourceClient {
        &mut self.client
    }
}
