//! Character profile resource.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::clients::ResourceClient;
use crate::config::{BattlenetConfig, ClientOptions};
use crate::error::{ApiError, ConfigError};
use crate::resource::Resource;
use crate::wow::{ensure_delivered, wow_client};

/// The only query parameter the character endpoint accepts.
pub const FIELDS_PARAM: &str = "fields";

/// Optional sections of a character profile.
///
/// The basic profile (name, realm, class, race, level) is always returned;
/// each field adds one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharacterField {
    /// Completed achievements and criteria.
    Achievements,
    /// Face, hair and other appearance options.
    Appearance,
    /// Summary of the character's guild.
    Guild,
    /// Equipped items and average item level.
    Items,
    /// Collected mounts.
    Mounts,
    /// Collected battle pets.
    Pets,
    /// Primary and secondary professions with skill ranks.
    Professions,
    /// Raid progression per instance and boss.
    Progression,
    /// Arena teams and rated battleground standing.
    Pvp,
    /// Completed quest ids.
    Quests,
    /// Standing with each faction.
    Reputation,
    /// Character attributes and combat stats.
    Stats,
    /// Talent builds and glyphs.
    Talents,
    /// Earned titles and the selected one.
    Titles,
}

impl CharacterField {
    /// All profile fields.
    pub const ALL: [Self; 14] = [
        Self::Achievements,
        Self::Appearance,
        Self::Guild,
        Self::Items,
        Self::Mounts,
        Self::Pets,
        Self::Professions,
        Self::Progression,
        Self::Pvp,
        Self::Quests,
        Self::Reputation,
        Self::Stats,
        Self::Talents,
        Self::Titles,
    ];

    /// Returns the API value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Achievements => "achievements",
            Self::Appearance => "appearance",
            Self::Guild => "guild",
            Self::Items => "items",
            Self::Mounts => "mounts",
            Self::Pets => "pets",
            Self::Professions => "professions",
            Self::Progression => "progression",
            Self::Pvp => "pvp",
            Self::Quests => "quests",
            Self::Reputation => "reputation",
            Self::Stats => "stats",
            Self::Talents => "talents",
            Self::Titles => "titles",
        }
    }
}

impl fmt::Display for CharacterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == lower)
            .ok_or_else(|| ConfigError::InvalidFilterArgument {
                operation: "CharacterField::from_str".to_string(),
                value: s.to_string(),
                reason: "not a valid character field".to_string(),
            })
    }
}

/// One character's profile.
///
/// The realm and character name are fixed at construction and become part
/// of the URL, `character/{realm}/{name}`.
///
/// # Example
///
/// ```rust,ignore
/// use battlenet_api::{BattlenetConfig, ClientOptions};
/// use battlenet_api::wow::{CharacterApi, CharacterField};
///
/// let config = BattlenetConfig::default();
/// let mut character = CharacterApi::new(&config, &ClientOptions::new(), "Lightbringer", "Gwyn")?;
///
/// let basic = character.profile(&[]).await?;
/// let gear = character.profile(&[CharacterField::Items, CharacterField::Stats]).await?;
/// ```
#[derive(Debug)]
pub struct CharacterApi {
    client: ResourceClient,
    realm: String,
    name: String,
}

impl CharacterApi {
    /// Creates a character resource.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `realm` or `name` is
    /// empty, plus the construction errors of [`wow_client`].
    pub fn new(
        config: &BattlenetConfig,
        options: &ClientOptions,
        realm: &str,
        name: &str,
    ) -> Result<Self, ConfigError> {
        if realm.trim().is_empty() {
            return Err(ConfigError::MissingRequiredField { field: "realm" });
        }
        if name.trim().is_empty() {
            return Err(ConfigError::MissingRequiredField { field: "name" });
        }

        let mut client = wow_client(config, options)?;
        let url = format!(
            "{}character/{}/{}",
            client.api_url(),
            urlencoding::encode(realm),
            urlencoding::encode(name)
        );
        client.set_api_url(url);
        client.set_query_whitelist([FIELDS_PARAM]);

        Ok(Self {
            client,
            realm: realm.to_string(),
            name: name.to_string(),
        })
    }

    /// Returns the realm name.
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Returns the character name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetches the profile with the requested sections.
    ///
    /// The field set is order-insensitive and duplicates are ignored; each
    /// distinct set is requested once and memoized.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the request fails.
    pub async fn profile(&mut self, fields: &[CharacterField]) -> Result<Value, ApiError> {
        let mut fields = fields.to_vec();
        fields.sort_unstable();
        fields.dedup();
        let names: Vec<&str> = fields.iter().map(CharacterField::as_str).collect();

        let key = self
            .client
            .cache_engine()
            .key("CharacterApi::profile", &Value::from(names.clone()));

        if let Some(cached) = self.client.cache_engine().get(&key) {
            tracing::debug!("Profile cache hit for {}", key);
            return Ok(cached);
        }

        self.client.reset();
        self.client.set_query_whitelist([FIELDS_PARAM]);
        self.client.set_query_param(FIELDS_PARAM, names.join(","))?;

        let response = self.client.request().await;
        ensure_delivered(&response)?;

        let profile = response.into_response();
        self.client.cache_engine_mut().set(&key, profile.clone());

        Ok(profile)
    }
}

impl Resource for CharacterApi {
    fn client(&self) -> &ResourceClient {
        &self.client
    }

    fn client_mut(&mut self) -> &mut ResourceClient {
        &mut self.client
    }
}
