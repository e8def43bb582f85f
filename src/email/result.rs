//! Values returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::EmailProvider;

/// Outcome of one accepted email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSendResult {
    pub message_id: String,
    pub status: String,
    pub provider: EmailProvider,
    pub timestamp: DateTime<Utc>,
}

/// Machine-readable failure reported by the server.
///
/// Appears in the error envelope of a failed response and per item in a
/// bulk result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl ErrorDetail {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Returns `details[key]` if present.
    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref()?.get(key)
    }
}

/// Result for one item of a bulk send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum BulkOutcome {
    Sent(EmailSendResult),
    Failed(ErrorDetail),
}

impl BulkOutcome {
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

/// Per-item results of a bulk send, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkResult {
    outcomes: Vec<BulkOutcome>,
}

impl BulkResult {
    #[must_use]
    pub const fn new(outcomes: Vec<BulkOutcome>) -> Self {
        Self { outcomes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BulkOutcome> {
        self.outcomes.iter()
    }

    /// Returns the outcome for the request submitted at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BulkOutcome> {
        self.outcomes.get(index)
    }

    #[must_use]
    pub fn success_count(&self) -> usize {
        self.iter().filter(|o| o.is_sent()).count()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// Accepted items with their submission index.
    pub fn successes(&self) -> impl Iterator<Item = (usize, &EmailSendResult)> {
        self.iter().enumerate().filter_map(|(i, o)| match o {
            BulkOutcome::Sent(result) => Some((i, result)),
            BulkOutcome::Failed(_) => None,
        })
    }

    /// Rejected items with their submission index.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &ErrorDetail)> {
        self.iter().enumerate().filter_map(|(i, o)| match o {
            BulkOutcome::Failed(detail) => Some((i, detail)),
            BulkOutcome::Sent(_) => None,
        })
    }

    #[must_use]
    pub fn into_outcomes(self) -> Vec<BulkOutcome> {
        self.outcomes
    }
}

impl<'a> IntoIterator for &'a BulkResult {
    type Item = &'a BulkOutcome;
    type IntoIter = std::slice::Iter<'a, BulkOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Per-item error as sent by the server: either wrapped in the standard
/// envelope or bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemError {
    Envelope { error: ErrorDetail },
    Bare(ErrorDetail),
}

#[derive(Debug, Deserialize)]
struct BulkItem {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Option<EmailSendResult>,
    #[serde(default)]
    error: Option<ItemError>,
}

impl From<BulkItem> for BulkOutcome {
    fn from(item: BulkItem) -> Self {
        match (item.success, item.result, item.error) {
            (true, Some(result), _) => Self::Sent(result),
            (_, _, Some(ItemError::Envelope { error } | ItemError::Bare(error))) => {
                Self::Failed(error)
            }
            (true, None, None) => Self::Failed(ErrorDetail::new(
                "MISSING_RESULT",
                "Item reported success without a result",
            )),
            (false, _, None) => Self::Failed(ErrorDetail::new(
                "UNKNOWN_ERROR",
                "Item failed without error details",
            )),
        }
    }
}

/// Body of a successful `POST /emails/bulk`.
#[derive(Debug, Deserialize)]
pub(crate) struct BulkEmailResponse {
    results: Vec<BulkItem>,
}

impl BulkEmailResponse {
    pub(crate) fn len(&self) -> usize {
        self.results.len()
    }
}

impl From<BulkEmailResponse> for BulkResult {
    fn from(response: BulkEmailResponse) -> Self {
        Self::new(response.results.into_iter().map(Into::into).collect())
    }
}

/// Body of `POST /emails/bulk`.
#[derive(Debug, Serialize)]
pub(crate) struct BulkEmailRequest<'a> {
    pub(crate) emails: &'a [super::EmailSendRequest],
}

/// Service health as reported by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthStatus {
    /// True when the service reports `healthy` or `ok`.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        ["healthy", "ok"]
            .iter()
            .any(|s| self.status.eq_ignore_ascii_case(s))
    }
}
