//! Newtype wrappers for API credentials.
//!
//! Battle.net accepts anonymous requests, so an empty key is a valid value
//! meaning "not configured" rather than an error.

use std::fmt;

/// A Battle.net application public key.
///
/// # Example
///
/// ```rust
/// use battlenet_api::ApiKey;
///
/// let key = ApiKey::new("my-public-key");
/// assert_eq!(key.as_ref(), "my-public-key");
/// assert!(ApiKey::default().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new public key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns `true` if no key is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A Battle.net application private key.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ApiSecretKey(*****)` instead of the actual key.
///
/// # Example
///
/// ```rust
/// use battlenet_api::ApiSecretKey;
///
/// let secret = ApiSecretKey::new("my-secret");
/// assert_eq!(format!("{:?}", secret), "ApiSecretKey(*****)");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiSecretKey(String);

impl ApiSecretKey {
    /// Creates a new private key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns `true` if no key is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ApiSecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecretKey(*****)")
    }
}

/// Selects one half of a key pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    /// The public key, sent in the `Authorization` header.
    Public,
    /// The private key, used only to compute the signature.
    Private,
}

/// A public/private key pair.
///
/// Requests are signed only when both halves are non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    /// The public key.
    pub public_key: ApiKey,
    /// The private key.
    pub private_key: ApiSecretKey,
}

impl Credentials {
    /// Creates a key pair from raw strings.
    #[must_use]
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: ApiKey::new(public_key),
            private_key: ApiSecretKey::new(private_key),
        }
    }

    /// Returns `true` if both keys are present and requests can be signed.
    #[must_use]
    pub fn can_sign(&self) -> bool {
        !self.public_key.is_empty() && !self.private_key.is_empty()
    }

    /// Returns the selected key as a string slice.
    #[must_use]
    pub fn get(&self, kind: KeyKind) -> &str {
        match kind {
            KeyKind::Public => self.public_key.as_ref(),
            KeyKind::Private => self.private_key.as_ref(),
        }
    }
}
