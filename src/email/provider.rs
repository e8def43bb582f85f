//! Downstream email providers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Email provider that actually delivers a message.
///
/// Leaving the provider unset on a request lets the server pick its
/// default; the client never substitutes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmailProvider {
    /// Amazon Simple Email Service
    Ses,
    /// SendGrid
    Sendgrid,
    /// Mailgun
    Mailgun,
    /// Mailchimp Transactional (formerly Mandrill)
    Mailchimp,
}

/// A provider name that is not one of [`EmailProvider`]'s wire strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid email provider: {0}")]
pub struct UnknownProvider(pub String);

impl EmailProvider {
    /// Every provider, in declaration order.
    pub const ALL: [Self; 4] = [Self::Ses, Self::Sendgrid, Self::Mailgun, Self::Mailchimp];

    /// Returns the canonical lowercase wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ses => "ses",
            Self::Sendgrid => "sendgrid",
            Self::Mailgun => "mailgun",
            Self::Mailchimp => "mailchimp",
        }
    }
}

impl fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailProvider {
    type Err = UnknownProvider;

    /// Parses a wire string, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

impl Serialize for EmailProvider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EmailProvider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
