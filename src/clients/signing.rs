//! Request signing for the Battle.net API.
//!
//! An application that owns a key pair signs every GET request with
//! HMAC-SHA1 over the canonical string
//!
//! ```text
//! GET\n{date}\n{url}\n
//! ```
//!
//! where `{date}` is the RFC 2822 value sent in the `Date` header and
//! `{url}` is the full request URL including its query string. The
//! base64-encoded digest is sent as `Authorization: BNET {public}:{signature}`.
//!
//! # Example
//!
//! ```rust
//! use battlenet_api::clients::signing::authorization_header;
//! use battlenet_api::Credentials;
//!
//! let credentials = Credentials::new("pub", "priv");
//! let header = authorization_header(
//!     &credentials,
//!     "Tue, 15 Nov 1994 08:12:31 +0000",
//!     "http://us.battle.net/api/wow/realm/status?realm=Lightbringer",
//! );
//! assert_eq!(header, "BNET pub:IO6FVdngPVpwz+vQESUeOhx5f0g=");
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::Credentials;

type HmacSha1 = Hmac<Sha1>;

/// Header name carrying the request date.
pub const DATE_HEADER: &str = "Date";

/// Header name carrying the signature.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// The headers attached to a signed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedHeaders {
    /// RFC 2822 request date.
    pub date: String,
    /// `BNET {public}:{signature}`.
    pub authorization: String,
}

impl SignedHeaders {
    /// Returns the headers as `(name, value)` pairs.
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [
            (DATE_HEADER, self.date.as_str()),
            (AUTHORIZATION_HEADER, self.authorization.as_str()),
        ]
    }
}

/// Formats a timestamp the way the `Date` header expects (RFC 2822).
#[must_use]
pub fn http_date(at: DateTime<Utc>) -> String {
    at.to_rfc2822()
}

/// Builds the canonical string that gets signed.
#[must_use]
pub fn string_to_sign(date: &str, url: &str) -> String {
    format!("GET\n{date}\n{url}\n")
}

/// Computes a base64-encoded HMAC-SHA1 signature.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &str, secret: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Builds the `Authorization` header value for a request.
#[must_use]
pub fn authorization_header(credentials: &Credentials, date: &str, url: &str) -> String {
    let signature = compute_signature(
        &string_to_sign(date, url),
        credentials.private_key.as_ref(),
    );
    format!("BNET {}:{signature}", credentials.public_key.as_ref())
}

/// Signs a request for `url` at time `at`.
///
/// Returns `None` when either key is empty; the request is then sent
/// anonymously.
#[must_use]
pub fn sign_request(credentials: &Credentials, url: &str, at: DateTime<Utc>) -> Option<SignedHeaders> {
    if !credentials.can_sign() {
        return None;
    }

    let date = http_date(at);
    let authorization = authorization_header(credentials, &date, url);

    Some(SignedHeaders {
        date,
        authorization,
    })
}
