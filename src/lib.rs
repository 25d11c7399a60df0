//! # Battle.net API Rust SDK
//!
//! A Rust SDK for the Battle.net community API, providing type-safe
//! configuration, HMAC-SHA1 request signing, per-client result caching and
//! in-memory filtering of cached result sets.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`BattlenetConfig`] and [`BattlenetConfigBuilder`]
//! - Per-client overrides of keys and region via [`ClientOptions`]
//! - A shared client core, [`ResourceClient`], that signs GET requests and
//!   normalizes responses into [`ApiResponse`]
//! - A swappable result cache behind [`cache::CacheStore`]
//! - The [`Resource`] trait and its memoized [`ResourceExt::filter_by`]
//! - World of Warcraft resources: [`RealmApi`], [`DataApi`], [`CharacterApi`]
//!
//! ## Quick Start
//!
//! ```rust
//! use battlenet_api::{BattlenetConfig, Region};
//!
//! let config = BattlenetConfig::builder()
//!     .api_key("your-public-key", "your-private-key")
//!     .region("eu")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.region(), Region::Eu);
//! ```
//!
//! Without keys, requests are sent anonymously.
//!
//! ## Filtering Realms
//!
//! ```rust,ignore
//! use battlenet_api::{BattlenetConfig, ClientOptions};
//! use battlenet_api::wow::{Population, RealmApi};
//!
//! let config = BattlenetConfig::default();
//! let mut realms = RealmApi::new(&config, &ClientOptions::new())?;
//!
//! // One HTTP request loads the realm list; both filters run in memory.
//! let named = realms.filter_by_name(vec!["Lightbringer", "Tichondrius"]).await?;
//! let quiet = realms.filter_by_population(Population::Low).await?;
//! ```
//!
//! ## Static Data
//!
//! ```rust,ignore
//! use battlenet_api::{BattlenetConfig, ClientOptions};
//! use battlenet_api::wow::DataApi;
//!
//! let mut data = DataApi::new(&BattlenetConfig::default(), &ClientOptions::new())?;
//! let races = data.races().await?;
//! let item = data.item(49623).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Regions, query parameters and filter
//!   arguments are checked at the call that introduces them
//! - **One owner per client**: Each client owns its cache; distinct clients
//!   can be used from different tasks without coordination
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Single-shot requests**: No retries, pagination or rate limiting

pub mod cache;
pub mod clients;
pub mod config;
pub mod error;
pub mod resource;
pub mod wow;

// Re-export public types at crate root for convenience
pub use config::{
    ApiKey, ApiSecretKey, BattlenetConfig, BattlenetConfigBuilder, ClientOptions, Credentials,
    KeyKind, Region,
};
pub use error::{ApiError, ConfigError, TransportFailure};

// Re-export client and resource types
pub use clients::{ApiResponse, ClientState, ResourceClient, ResponseMetadata};
pub use resource::{FilterSpec, Resource, ResourceExt, Schema, BASE_CACHE_KEY};

// Re-export World of Warcraft resources
pub use wow::{CharacterApi, CharacterField, DataApi, RealmApi};
