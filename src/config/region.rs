//! Battle.net region definitions.
//!
//! This module provides the [`Region`] enum. The region selects the API host
//! (`us.battle.net`, `eu.battle.net`, ...) through the URL template.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A supported Battle.net API region.
///
/// Parsing lower-cases the input and rejects anything outside the supported
/// set; an unknown region is never coerced into a default.
///
/// # Example
///
/// ```rust
/// use battlenet_api::Region;
///
/// let region: Region = "EU".parse().unwrap();
/// assert_eq!(region, Region::Eu);
/// assert_eq!(region.to_string(), "eu");
///
/// assert!("xx".parse::<Region>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Region {
    /// Americas.
    #[default]
    Us,
    /// Europe.
    Eu,
    /// Korea.
    Kr,
    /// Taiwan.
    Tw,
    /// China.
    Cn,
}

impl Region {
    /// All supported regions, in the order the API documents them.
    pub const ALL: [Self; 5] = [Self::Us, Self::Eu, Self::Kr, Self::Tw, Self::Cn];

    /// Returns the lowercase region code used in host names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::Kr => "kr",
            Self::Tw => "tw",
            Self::Cn => "cn",
        }
    }

    /// Returns the supported region codes.
    #[must_use]
    pub fn supported() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let region = s.to_lowercase();

        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == region)
            .ok_or(ConfigError::InvalidRegion { region })
    }
}

impl Serialize for Region {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
