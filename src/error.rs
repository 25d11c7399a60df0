//! Error types for the Battle.net API SDK.
//!
//! The SDK separates two failure families:
//!
//! - [`ConfigError`]: a bad value was handed to the SDK (unsupported region,
//!   non-whitelisted query parameter, filter argument outside a resource
//!   schema). Always returned by the call that introduced the value.
//! - [`TransportFailure`]: the HTTP round trip did not produce a usable
//!   payload. [`ResourceClient::request`](crate::clients::ResourceClient::request)
//!   never returns this directly; it is carried inside the
//!   [`ApiResponse`](crate::clients::ApiResponse) and surfaced by the
//!   resource operations that need a decoded body.
//!
//! [`ApiError`] unifies both for operations that can fail either way.
//!
//! # Example
//!
//! ```rust
//! use battlenet_api::{ConfigError, Region};
//!
//! let result: Result<Region, _> = "xx".parse();
//! assert!(matches!(result, Err(ConfigError::InvalidRegion { .. })));
//! ```

use thiserror::Error;

/// Errors raised synchronously when the SDK is given an invalid value.
///
/// Every variant names the offending value so the message is actionable
/// without a debugger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Region is not one of the supported regions.
    #[error("The region '{region}' is not supported. Expected one of: us, eu, kr, tw, cn.")]
    InvalidRegion {
        /// The region that was provided.
        region: String,
    },

    /// Query parameter is not in the active whitelist.
    #[error("Query param '{param}' is not supported.")]
    UnsupportedQueryParam {
        /// The rejected parameter name.
        param: String,
    },

    /// A filter or lookup argument is outside the accepted values.
    #[error("Invalid argument '{value}' for {operation}: {reason}")]
    InvalidFilterArgument {
        /// The operation that rejected the argument.
        operation: String,
        /// The rejected value, rendered as text.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A required field is missing or empty.
    #[error("Missing required field: '{field}'. This field must be set before building the client.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClient {
        /// The error reported by the HTTP library.
        reason: String,
    },
}

/// A request that could not be completed at the transport level.
///
/// Connection refusals, timeouts and TLS errors end up here. The message is
/// the text reported by the HTTP library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Request to {url} failed: {message}")]
pub struct TransportFailure {
    /// The URL that was requested.
    pub url: String,
    /// The transport error text.
    pub message: String,
}

/// Unified error for resource operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid configuration or argument.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP round trip produced no usable payload.
    #[error(transparent)]
    Transport(#[from] TransportFailure),
}
