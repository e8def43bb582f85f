//! Send requests and their local validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::EmailProvider;

/// Shape of an acceptable recipient address: `local@domain.tld`.
static RECIPIENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .unwrap_or_else(|e| unreachable!("recipient pattern is a valid regex: {e}"))
});

/// Reasons a request is rejected before it reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Template key is required")]
    MissingTemplateKey,

    #[error("Recipient is required")]
    MissingRecipient,

    #[error("Invalid recipient email address: {0}")]
    InvalidRecipient(String),

    #[error("Template data is required")]
    MissingData,

    #[error("Bulk email request must contain at least one email")]
    EmptyBatch,

    /// An item of a bulk batch failed; `index` is zero-based.
    #[error("Validation failed for request {index}: {source}")]
    BatchItem {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

/// One template email to send.
///
/// Built with [`EmailSendRequest::new`] and the consuming `with_*`
/// methods:
///
/// ```
/// use huefy::{EmailProvider, EmailSendRequest};
///
/// let request = EmailSendRequest::new("welcome-email", "john@example.com")
///     .with_data("name", "John")
///     .with_provider(EmailProvider::Sendgrid);
///
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSendRequest {
    template_key: String,
    recipient: String,
    #[serde(default)]
    data: Map<String, Value>,
    #[serde(
        rename = "providerType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    provider: Option<EmailProvider>,
}

impl EmailSendRequest {
    /// Creates a request with empty template data and no provider.
    pub fn new(template_key: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            template_key: template_key.into(),
            recipient: recipient.into(),
            data: Map::new(),
            provider: None,
        }
    }

    /// Adds or replaces one template variable.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Merges every entry of `data` into the template variables.
    #[must_use]
    pub fn with_data_map(mut self, data: Map<String, Value>) -> Self {
        self.data.extend(data);
        self
    }

    /// Selects the provider that should deliver this email.
    #[must_use]
    pub const fn with_provider(mut self, provider: EmailProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    #[must_use]
    pub fn template_key(&self) -> &str {
        &self.template_key
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    #[must_use]
    pub const fn provider(&self) -> Option<EmailProvider> {
        self.provider
    }

    /// Checks the request locally.
    ///
    /// Checks run in field order and the first failure wins.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.template_key.trim().is_empty() {
            return Err(ValidationError::MissingTemplateKey);
        }

        let recipient = self.recipient.trim();
        if recipient.is_empty() {
            return Err(ValidationError::MissingRecipient);
        }
        if !RECIPIENT_PATTERN.is_match(recipient) {
            return Err(ValidationError::InvalidRecipient(self.recipient.clone()));
        }

        if self.data.is_empty() {
            return Err(ValidationError::MissingData);
        }

        Ok(())
    }
}

/// Validates a bulk batch in order.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyBatch`] for an empty slice, or
/// [`ValidationError::BatchItem`] stamped with the index of the first
/// invalid request.
pub fn validate_batch(requests: &[EmailSendRequest]) -> Result<(), ValidationError> {
    if requests.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }

    for (index, request) in requests.iter().enumerate() {
        request
            .validate()
            .map_err(|source| ValidationError::BatchItem {
                index,
                source: Box::new(source),
            })?;
    }

    Ok(())
}
