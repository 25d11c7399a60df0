//! HTTP client layer for Battle.net API communication.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ResourceClient`]: The core client shared by every resource
//! - [`ApiResponse`]: The normalized result of one request
//! - [`ResponseMetadata`]: Status, effective URL and headers of a response
//! - [`QueryParams`] and [`QueryValue`]: Ordered query-string state
//! - [`signing`]: HMAC-SHA1 request signing
//!
//! # Example
//!
//! ```rust,ignore
//! use battlenet_api::BattlenetConfig;
//! use battlenet_api::clients::ResourceClient;
//!
//! let config = BattlenetConfig::builder().api_key("pub", "priv").build()?;
//! let mut client = ResourceClient::new(&config)?;
//! client.set_api_url(format!("{}wow/data/character/races", client.api_url()));
//!
//! let response = client.request().await;
//! if let Some(failure) = response.transport_failure() {
//!     eprintln!("{failure}");
//! } else {
//!     println!("{}", response.response());
//! }
//! ```
//!
//! # Retry Behavior
//!
//! None. Each call to [`ResourceClient::request`] issues exactly one HTTP
//! request.

mod http_response;
mod query;
mod resource_client;
pub mod signing;

pub use http_response::{ApiResponse, ResponseMetadata};
pub(crate) use http_response::is_empty_value;
pub use query::{QueryParams, QueryValue};
pub use resource_client::{ClientState, ResourceClient, MAX_REDIRECTS, SDK_VERSION};
