//! Base URL handling for API operations.

use std::fmt;

use super::HttpError;

/// Path prefix every SDK operation lives under.
pub const API_PREFIX: &str = "/api/v1/sdk";

/// A resolved API base URL.
///
/// Joining appends [`API_PREFIX`] unless the base already contains it, so
/// both `https://api.huefy.dev` and `https://api.huefy.dev/api/v1/sdk/`
/// produce the same operation URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Parses and normalizes a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if `base` is not an absolute
    /// http(s) URL.
    pub fn parse(base: &str) -> Result<Self, HttpError> {
        let trimmed = base.trim();
        let parsed =
            url::Url::parse(trimmed).map_err(|e| HttpError::InvalidUrl(format!("{trimmed}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(HttpError::InvalidUrl(format!(
                "{trimmed}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base: trimmed.strip_suffix('/').unwrap_or(trimmed).to_string(),
        })
    }

    /// Returns the normalized base without a trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Builds the full URL for an operation path such as `/emails/send`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the joined string does not parse.
    pub fn join(&self, path: &str) -> Result<url::Url, HttpError> {
        let path = path.trim_start_matches('/');
        let joined = if self.base.contains(API_PREFIX) {
            format!("{}/{path}", self.base)
        } else {
            format!("{}{API_PREFIX}/{path}", self.base)
        };

        url::Url::parse(&joined).map_err(|e| HttpError::InvalidUrl(format!("{joined}: {e}")))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
