//! Realm status resource.
//!
//! This module provides [`RealmApi`], which loads the realm status list once
//! per client and answers every filter from memory. Each filter result is
//! itself memoized, so asking twice for the same realms costs one HTTP
//! request and one filter pass in total.
//!
//! # Realm Record
//!
//! The `realm/status` endpoint returns `{"realms": [...]}` where each record
//! carries:
//!
//! | Field        | Type    | Values                          |
//! |--------------|---------|---------------------------------|
//! | `name`       | string  | localized realm name            |
//! | `slug`       | string  | URL-friendly English name       |
//! | `type`       | string  | `pve`, `pvp`, `rp`, `rppvp`     |
//! | `queue`      | boolean | `true` while a login queue runs |
//! | `status`     | boolean | `true` when the realm is up     |
//! | `population` | string  | `low`, `medium`, `high`         |
//!
//! # Example
//!
//! ```rust,ignore
//! use battlenet_api::{BattlenetConfig, ClientOptions};
//! use battlenet_api::wow::{Population, QueueStatus, RealmApi, RealmType};
//!
//! let config = BattlenetConfig::default();
//! let mut realms = RealmApi::new(&config, &ClientOptions::new())?;
//!
//! let mine = realms.filter_by_name(vec!["Lightbringer", "Tichondrius"]).await?;
//! let quiet = realms.filter_by_population(Population::Low).await?;
//! let queued = realms.filter_by_queue(QueueStatus::Queued).await?;
//! let pve = realms.filter_by_type(RealmType::Pve).await?;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::ResourceClient;
use crate::config::{BattlenetConfig, ClientOptions};
use crate::error::{ApiError, ConfigError};
use crate::resource::{FilterSpec, Resource, ResourceExt, Schema, BASE_CACHE_KEY};
use crate::wow::{ensure_delivered, wow_client};

/// Path of the realm status endpoint, relative to the WoW API root.
pub const REALM_STATUS_PATH: &str = "realm/status";

/// Field of the response body holding the realm list.
const REALMS_FIELD: &str = "realms";

const FILTER_BY_NAME: &str = "RealmApi::filter_by_name";

/// Ruleset of a realm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RealmType {
    /// Player versus environment.
    Pve,
    /// Player versus player.
    #[default]
    Pvp,
    /// Roleplaying.
    Rp,
    /// Roleplaying with player versus player.
    Rppvp,
}

impl RealmType {
    /// All realm types.
    pub const ALL: [Self; 4] = [Self::Pve, Self::Pvp, Self::Rp, Self::Rppvp];

    /// Returns the API value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pve => "pve",
            Self::Pvp => "pvp",
            Self::Rp => "rp",
            Self::Rppvp => "rppvp",
        }
    }
}

/// Population level of a realm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Population {
    /// Few characters online.
    #[default]
    Low,
    /// Average load.
    Medium,
    /// Crowded realm.
    High,
}

impl Population {
    /// All population levels.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Returns the API value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Whether a realm is online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RealmStatus {
    /// The realm accepts logins.
    #[default]
    Up,
    /// The realm is offline.
    Down,
}

impl RealmStatus {
    /// Returns the API value (`true` for up).
    #[must_use]
    pub const fn as_bool(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `"up"` or `"down"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Whether a realm currently has a login queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueueStatus {
    /// Players wait in a queue before logging in.
    Queued,
    /// No queue.
    #[default]
    Open,
}

impl QueueStatus {
    /// Returns the API value (`true` while queued).
    #[must_use]
    pub const fn as_bool(&self) -> bool {
        matches!(self, Self::Queued)
    }

    /// Returns `"queued"` or `"open"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Open => "open",
        }
    }
}

fn invalid_value(operation: &str, value: &str, field: &str) -> ConfigError {
    ConfigError::InvalidFilterArgument {
        operation: operation.to_string(),
        value: value.to_string(),
        reason: format!("not a valid {field}"),
    }
}

impl FromStr for RealmType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| invalid_value("RealmType::from_str", s, "realm type"))
    }
}

impl FromStr for Population {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| invalid_value("Population::from_str", s, "population"))
    }
}

impl FromStr for RealmStatus {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" | "true" | "1" => Ok(Self::Up),
            "down" | "false" | "0" => Ok(Self::Down),
            _ => Err(invalid_value("RealmStatus::from_str", s, "realm status")),
        }
    }
}

impl FromStr for QueueStatus {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "queued" | "yes" | "true" | "1" => Ok(Self::Queued),
            "open" | "no" | "false" | "0" => Ok(Self::Open),
            _ => Err(invalid_value("QueueStatus::from_str", s, "queue status")),
        }
    }
}

impl fmt::Display for RealmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RealmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed view of one realm status record.
///
/// Every field is optional: records are kept as the API sends them and
/// only converted on demand through [`RealmApi::realms`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Realm {
    /// Localized realm name.
    #[serde(default)]
    pub name: Option<String>,

    /// URL-friendly English name.
    #[serde(default)]
    pub slug: Option<String>,

    /// Ruleset, kept as text so unknown values survive.
    #[serde(default, rename = "type")]
    pub realm_type: Option<String>,

    /// `true` while a login queue is active.
    #[serde(default)]
    pub queue: Option<bool>,

    /// `true` when the realm is up.
    #[serde(default)]
    pub status: Option<bool>,

    /// Population level, kept as text so unknown values survive.
    #[serde(default)]
    pub population: Option<String>,

    /// Battlegroup the realm belongs to.
    #[serde(default)]
    pub battlegroup: Option<String>,
}

impl Realm {
    /// Returns the parsed ruleset, if known.
    #[must_use]
    pub fn kind(&self) -> Option<RealmType> {
        self.realm_type.as_deref().and_then(|t| t.parse().ok())
    }

    /// Returns the parsed population level, if known.
    #[must_use]
    pub fn population_level(&self) -> Option<Population> {
        self.population.as_deref().and_then(|p| p.parse().ok())
    }
}

fn realm_schema() -> Schema {
    Schema::new()
        .field("type", RealmType::ALL.iter().map(|t| Value::from(t.as_str())))
        .field("queue", [Value::Bool(true), Value::Bool(false)])
        .field("status", [Value::Bool(true), Value::Bool(false)])
        .field("population", Population::ALL.iter().map(|p| Value::from(p.as_str())))
}

/// Realm status resource.
///
/// The realm list is requested on the first filter call and kept in the
/// client cache for the lifetime of the value.
#[derive(Debug)]
pub struct RealmApi {
    client: ResourceClient,
    schema: Schema,
}

impl RealmApi {
    /// Creates a realm status resource.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegion`] if the resolved region is not
    /// supported, or [`ConfigError::HttpClient`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &BattlenetConfig, options: &ClientOptions) -> Result<Self, ConfigError> {
        let mut client = wow_client(config, options)?;
        let url = format!("{}{REALM_STATUS_PATH}", client.api_url());
        client.set_api_url(url);

        Ok(Self {
            client,
            schema: realm_schema(),
        })
    }

    /// Returns realms by name.
    ///
    /// Accepts one name, a list of names, or a predicate over the name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFilterArgument`] if no name is given,
    /// or [`ApiError::Transport`] if the realm list cannot be fetched.
    pub async fn filter_by_name(
        &mut self,
        name: impl Into<FilterSpec>,
    ) -> Result<Vec<Value>, ApiError> {
        let spec = name.into();
        if spec.is_empty() {
            return Err(ConfigError::InvalidFilterArgument {
                operation: FILTER_BY_NAME.to_string(),
                value: format!("{spec:?}"),
                reason: "a realm name is required".to_string(),
            }
            .into());
        }

        self.filter_by(FILTER_BY_NAME, "name", spec).await
    }

    /// Returns realms with the given population level.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the realm list cannot be fetched.
    pub async fn filter_by_population(
        &mut self,
        population: Population,
    ) -> Result<Vec<Value>, ApiError> {
        self.filter_by_field("population", Value::from(population.as_str()))
            .await
    }

    /// Returns realms with or without a login queue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the realm list cannot be fetched.
    pub async fn filter_by_queue(&mut self, queue: QueueStatus) -> Result<Vec<Value>, ApiError> {
        self.filter_by_field("queue", Value::Bool(queue.as_bool()))
            .await
    }

    /// Returns realms that are up or down.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the realm list cannot be fetched.
    pub async fn filter_by_status(
        &mut self,
        status: RealmStatus,
    ) -> Result<Vec<Value>, ApiError> {
        self.filter_by_field("status", Value::Bool(status.as_bool()))
            .await
    }

    /// Returns realms with the given ruleset.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the realm list cannot be fetched.
    pub async fn filter_by_type(&mut self, realm_type: RealmType) -> Result<Vec<Value>, ApiError> {
        self.filter_by_field("type", Value::from(realm_type.as_str()))
            .await
    }

    /// Returns realms whose `field` passes `spec`.
    ///
    /// Concrete values are checked against the schema before any request is
    /// made; predicates are not checked.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFilterArgument`] if a value is outside
    /// the declared values of `field`, or [`ApiError::Transport`] if the
    /// realm list cannot be fetched.
    pub async fn filter_by_field(
        &mut self,
        field: &str,
        spec: impl Into<FilterSpec>,
    ) -> Result<Vec<Value>, ApiError> {
        let spec = spec.into();
        let operation = format!("RealmApi::filter_by_{field}");

        match &spec {
            FilterSpec::Value(value) => self.schema.validate(&operation, field, value)?,
            FilterSpec::AnyOf(values) => {
                for value in values {
                    self.schema.validate(&operation, field, value)?;
                }
            }
            FilterSpec::Predicate(_) => {}
        }

        self.filter_by(&operation, field, spec).await
    }

    /// Returns the whole realm list as typed records.
    ///
    /// Records that do not have the shape of a realm are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the realm list cannot be fetched.
    pub async fn realms(&mut self) -> Result<Vec<Realm>, ApiError> {
        let realms = match self.results().await? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        };
        Ok(realms)
    }
}

impl Resource for RealmApi {
    fn client(&self) -> &ResourceClient {
        &self.client
    }

    fn client_mut(&mut self) -> &mut ResourceClient {
        &mut self.client
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    async fn cache(&mut self) -> Result<bool, ApiError> {
        if self.client.cache_engine().has(BASE_CACHE_KEY) {
            return Ok(true);
        }

        let response = self.client.request().await;
        ensure_delivered(&response)?;

        if response.is_empty() {
            tracing::debug!("Realm status response from {} is empty", self.client.api_url());
            return Ok(false);
        }

        let realms = match response.into_response() {
            Value::Object(mut body) => body.remove(REALMS_FIELD),
            _ => None,
        };

        match realms {
            Some(realms) => {
                self.client.cache_engine_mut().set(BASE_CACHE_KEY, realms);
                Ok(true)
            }
            None => {
                tracing::warn!(
                    "Realm status response from {} has no '{}' field",
                    self.client.api_url(),
                    REALMS_FIELD
                );
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_realm_api() -> RealmApi {
        RealmApi::new(&BattlenetConfig::default(), &ClientOptions::new()).unwrap()
    }

    fn seed(api: &mut RealmApi, realms: Value) {
        api.client_mut().cache_engine_mut().set(BASE_CACHE_KEY, realms);
    }

    fn sample_realms() -> Value {
        json!([
            {"name": "Lightbringer", "slug": "lightbringer", "type": "pve", "queue": false, "status": true, "population": "high"},
            {"name": "Tichondrius", "slug": "tichondrius", "type": "pvp", "queue": true, "status": true, "population": "low"},
            {"name": "Moon Guard", "slug": "moon-guard", "type": "rppvp", "queue": false, "status": false, "population": "medium"}
        ])
    }

    #[test]
    fn test_url_ends_with_realm_status() {
        let api = create_realm_api();
        assert_eq!(
            api.client().api_url(),
            "http://us.battle.net/api/wow/realm/status"
        );
    }

    #[test]
    fn test_schema_declares_enumerated_fields() {
        let api = create_realm_api();
        let schema = api.schema();

        assert_eq!(schema.values("type").unwrap().len(), 4);
        assert_eq!(schema.values("population").unwrap().len(), 3);
        assert_eq!(
            schema.values("queue").unwrap(),
            &[Value::Bool(true), Value::Bool(false)]
        );
        assert!(schema.values("name").is_none());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("PvE".parse::<RealmType>().unwrap(), RealmType::Pve);
        assert_eq!("high".parse::<Population>().unwrap(), Population::High);
        assert_eq!("down".parse::<RealmStatus>().unwrap(), RealmStatus::Down);
        assert_eq!("1".parse::<QueueStatus>().unwrap(), QueueStatus::Queued);

        let error = "huge".parse::<Population>().unwrap_err();
        assert!(error.to_string().contains("huge"));
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(RealmType::default(), RealmType::Pvp);
        assert_eq!(Population::default(), Population::Low);
        assert_eq!(RealmStatus::default(), RealmStatus::Up);
        assert_eq!(QueueStatus::default(), QueueStatus::Open);
    }

    #[tokio::test]
    async fn test_filters_against_seeded_list() {
        let mut api = create_realm_api();
        seed(&mut api, sample_realms());

        let by_name = api.filter_by_name("Lightbringer").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0]["slug"], "lightbringer");

        let queued = api.filter_by_queue(QueueStatus::Queued).await.unwrap();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0]["name"], "Tichondrius");

        let down = api.filter_by_status(RealmStatus::Down).await.unwrap();
        assert_eq!(down.len(), 1);
        assert_eq!(down[0]["name"], "Moon Guard");

        let pve = api.filter_by_type(RealmType::Pve).await.unwrap();
        assert_eq!(pve[0]["name"], "Lightbringer");

        let medium = api.filter_by_population(Population::Medium).await.unwrap();
        assert_eq!(medium[0]["name"], "Moon Guard");

        assert!(api
            .client()
            .cache_engine()
            .has("RealmApi.filter_by_population-medium"));
        assert!(api.client().cache_engine().has("RealmApi.filter_by_queue-true"));
    }

    #[tokio::test]
    async fn test_filter_by_name_rejects_empty_names() {
        let mut api = create_realm_api();
        seed(&mut api, sample_realms());

        let error = api.filter_by_name("").await.unwrap_err();
        assert!(matches!(
            error,
            ApiError::Config(ConfigError::InvalidFilterArgument { ref operation, .. })
                if operation == "RealmApi::filter_by_name"
        ));

        assert!(api.filter_by_name(Vec::<String>::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_filter_by_field_validates_against_schema() {
        let mut api = create_realm_api();
        seed(&mut api, sample_realms());

        let error = api.filter_by_field("population", "huge").await.unwrap_err();
        match error {
            ApiError::Config(ConfigError::InvalidFilterArgument {
                operation, value, ..
            }) => {
                assert_eq!(operation, "RealmApi::filter_by_population");
                assert_eq!(value, "\"huge\"");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Numbers are not booleans.
        assert!(api.filter_by_field("queue", 1_i64).await.is_err());

        // Undeclared fields accept anything.
        let slugs = api
            .filter_by_field("slug", vec!["moon-guard", "nowhere"])
            .await
            .unwrap();
        assert_eq!(slugs.len(), 1);
    }

    #[tokio::test]
    async fn test_filter_by_field_accepts_predicates() {
        let mut api = create_realm_api();
        seed(&mut api, sample_realms());

        let not_low = api
            .filter_by_field("population", FilterSpec::predicate(|p| p != "low"))
            .await
            .unwrap();
        assert_eq!(not_low.len(), 2);
    }

    #[tokio::test]
    async fn test_realms_returns_typed_records() {
        let mut api = create_realm_api();
        seed(&mut api, sample_realms());

        let realms = api.realms().await.unwrap();
        assert_eq!(realms.len(), 3);
        assert_eq!(realms[0].name.as_deref(), Some("Lightbringer"));
        assert_eq!(realms[0].kind(), Some(RealmType::Pve));
        assert_eq!(realms[1].population_level(), Some(Population::Low));
        assert_eq!(realms[1].queue, Some(true));
    }
}
