//! Response envelope for Battle.net API requests.
//!
//! This module provides the [`ApiResponse`] type, which normalizes whatever
//! the transport produced (a body and its metadata, or an error message)
//! into a decoded JSON value.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::TransportFailure;

/// Metadata reported by the transport for one request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
    /// The HTTP status code, or `None` if no response was received.
    pub status: Option<u16>,
    /// The effective URL after redirects.
    pub url: String,
    /// Response headers keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
}

impl ResponseMetadata {
    /// Returns the `Content-Type` header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get("content-type")
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// The result of a single API request.
///
/// # Decoding
///
/// When the `Content-Type` header indicates JSON, the body is parsed as
/// JSON (a malformed body decodes to `null`). Any other payload, including
/// the error text of a failed transport, decodes to a one-element array
/// holding the raw string.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use battlenet_api::clients::{ApiResponse, ResponseMetadata};
/// use serde_json::json;
///
/// let mut headers = HashMap::new();
/// headers.insert(
///     "content-type".to_string(),
///     vec!["application/json; charset=UTF-8".to_string()],
/// );
/// let metadata = ResponseMetadata { status: Some(200), url: String::new(), headers };
///
/// let response = ApiResponse::new(r#"{"realms":[]}"#, metadata);
/// assert_eq!(response.response(), &json!({"realms": []}));
///
/// let plain = ApiResponse::new("maintenance", ResponseMetadata::default());
/// assert_eq!(plain.response(), &json!(["maintenance"]));
/// ```
#[derive(Clone, Debug)]
pub struct ApiResponse {
    raw: String,
    metadata: ResponseMetadata,
    decoded: Value,
    transport_error: bool,
}

impl ApiResponse {
    /// Creates a response from a raw body and its metadata.
    #[must_use]
    pub fn new(raw: impl Into<String>, metadata: ResponseMetadata) -> Self {
        let raw = raw.into();
        let is_json = metadata
            .content_type()
            .is_some_and(|ct| ct.contains("application/json"));

        let decoded = if is_json {
            serde_json::from_str(&raw).unwrap_or(Value::Null)
        } else {
            Value::Array(vec![Value::String(raw.clone())])
        };

        Self {
            raw,
            metadata,
            decoded,
            transport_error: false,
        }
    }

    /// Creates a response for a request that failed at the transport level.
    ///
    /// The error text becomes the raw payload.
    #[must_use]
    pub fn from_transport_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        let metadata = ResponseMetadata {
            status: None,
            url: url.into(),
            headers: HashMap::new(),
        };
        let mut response = Self::new(message, metadata);
        response.transport_error = true;
        response
    }

    /// Returns the raw body (or transport error text).
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns all response headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.metadata.headers
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.metadata
            .headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the transport metadata.
    #[must_use]
    pub const fn metadata(&self) -> &ResponseMetadata {
        &self.metadata
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.metadata.status
    }

    /// Returns the decoded payload.
    #[must_use]
    pub const fn response(&self) -> &Value {
        &self.decoded
    }

    /// Consumes the response and returns the decoded payload.
    #[must_use]
    pub fn into_response(self) -> Value {
        self.decoded
    }

    /// Returns `true` if the decoded payload carries no data.
    ///
    /// `null`, an empty array, an empty object and an empty string are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_empty_value(&self.decoded)
    }

    /// Returns the transport failure if the request never produced a response.
    #[must_use]
    pub fn transport_failure(&self) -> Option<TransportFailure> {
        self.transport_error.then(|| TransportFailure {
            url: self.metadata.url.clone(),
            message: self.raw.clone(),
        })
    }
}

pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
