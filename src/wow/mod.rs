//! World of Warcraft resources.
//!
//! Each resource is a [`ResourceClient`] whose API URL is extended once at
//! construction with `wow/` and the resource's own path:
//!
//! - [`RealmApi`]: realm status, loaded once and filtered in memory
//! - [`DataApi`]: static game data (classes, races, guild perks and
//!   rewards, items), memoized per lookup
//! - [`CharacterApi`]: one character profile, memoized per field set
//!
//! # Example
//!
//! ```rust,ignore
//! use battlenet_api::{BattlenetConfig, ClientOptions};
//! use battlenet_api::wow::{Population, RealmApi};
//!
//! let config = BattlenetConfig::builder().api_key("pub", "priv").build()?;
//! let mut realms = RealmApi::new(&config, &ClientOptions::new().region("eu"))?;
//!
//! let low = realms.filter_by_population(Population::Low).await?;
//! ```

mod character;
mod data;
mod realm;

pub use character::{CharacterApi, CharacterField};
pub use data::DataApi;
pub use realm::{Population, QueueStatus, Realm, RealmApi, RealmStatus, RealmType};

use crate::clients::ResourceClient;
use crate::config::{BattlenetConfig, ClientOptions};
use crate::error::{ApiError, ConfigError};

/// Path segment shared by every World of Warcraft resource.
pub const WOW_PATH: &str = "wow/";

/// Creates a client pointed at the World of Warcraft API root.
///
/// # Errors
///
/// Returns the construction errors of [`ResourceClient::with_options`].
pub fn wow_client(
    config: &BattlenetConfig,
    options: &ClientOptions,
) -> Result<ResourceClient, ConfigError> {
    let mut client = ResourceClient::with_options(config, options)?;
    let url = format!("{}{WOW_PATH}", client.api_url());
    client.set_api_url(url);
    Ok(client)
}

/// Converts a transport failure carried by a response into an error.
fn ensure_delivered(response: &crate::clients::ApiResponse) -> Result<(), ApiError> {
    match response.transport_failure() {
        Some(failure) => Err(failure.into()),
        None => Ok(()),
    }
}
