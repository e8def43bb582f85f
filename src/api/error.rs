//! Typed errors surfaced by [`HuefyClient`](super::HuefyClient).

use serde_json::Value;
use thiserror::Error;

use crate::email::{ErrorDetail, ValidationError};
use crate::transport::HttpError;

/// Prefix marking validation failures raised before any request was sent.
pub const CLIENT_VALIDATION_PREFIX: &str = "Client-side validation failed: ";

/// Server error codes with a dedicated [`ApiError`] variant.
pub mod codes {
    pub const AUTHENTICATION_FAILED: &str = "AUTHENTICATION_FAILED";
    pub const TEMPLATE_NOT_FOUND: &str = "TEMPLATE_NOT_FOUND";
    pub const INVALID_TEMPLATE_DATA: &str = "INVALID_TEMPLATE_DATA";
    pub const INVALID_RECIPIENT: &str = "INVALID_RECIPIENT";
    pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    /// Client-side: the bulk response did not carry one result per email.
    pub const BULK_RESULT_MISMATCH: &str = "BULK_RESULT_MISMATCH";
}

/// Every failure an API operation can report.
///
/// Variants mirror the server's error codes; the remaining ones come from
/// the client itself (local validation, I/O, use after close).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API key was rejected.
    #[error("{message}")]
    Authentication { message: String },

    /// The template key does not exist.
    #[error("{message}")]
    TemplateNotFound {
        message: String,
        template_key: Option<String>,
    },

    /// The template data does not satisfy the template.
    #[error("{message}")]
    InvalidTemplateData {
        message: String,
        validation_errors: Option<Vec<String>>,
    },

    /// The server rejected the recipient address.
    #[error("{message}")]
    InvalidRecipient { message: String },

    /// The downstream email provider failed.
    #[error("{message}")]
    Provider {
        message: String,
        provider: Option<String>,
        provider_code: Option<String>,
    },

    /// Too many requests; `retry_after` is in seconds.
    #[error("{message}")]
    RateLimit {
        message: String,
        retry_after: Option<u64>,
    },

    /// The request is invalid.
    ///
    /// `source` is set when the check ran locally; nothing was sent then.
    #[error("{message}")]
    Validation {
        message: String,
        #[source]
        source: Option<ValidationError>,
    },

    /// The request or the server timed out.
    #[error("{message}")]
    Timeout { message: String },

    /// The request could not reach the server.
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<HttpError>,
    },

    /// Any other failure: unknown server codes, unparsable responses and
    /// requests that could not be encoded.
    #[error("{message}")]
    Api {
        code: Option<String>,
        message: String,
    },

    /// The client was closed.
    #[error("Client is closed")]
    Closed,
}

/// Fieldless discriminant of [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authentication,
    TemplateNotFound,
    InvalidTemplateData,
    InvalidRecipient,
    Provider,
    RateLimit,
    Validation,
    Timeout,
    Network,
    Api,
    Closed,
}

impl ApiError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::TemplateNotFound { .. } => ErrorKind::TemplateNotFound,
            Self::InvalidTemplateData { .. } => ErrorKind::InvalidTemplateData,
            Self::InvalidRecipient { .. } => ErrorKind::InvalidRecipient,
            Self::Provider { .. } => ErrorKind::Provider,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Network { .. } => ErrorKind::Network,
            Self::Api { .. } => ErrorKind::Api,
            Self::Closed => ErrorKind::Closed,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message }
            | Self::TemplateNotFound { message, .. }
            | Self::InvalidTemplateData { message, .. }
            | Self::InvalidRecipient { message }
            | Self::Provider { message, .. }
            | Self::RateLimit { message, .. }
            | Self::Validation { message, .. }
            | Self::Timeout { message }
            | Self::Network { message, .. }
            | Self::Api { message, .. } => message,
            Self::Closed => "Client is closed",
        }
    }

    /// Returns the server error code this error corresponds to.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Authentication { .. } => Some(codes::AUTHENTICATION_FAILED),
            Self::TemplateNotFound { .. } => Some(codes::TEMPLATE_NOT_FOUND),
            Self::InvalidTemplateData { .. } => Some(codes::INVALID_TEMPLATE_DATA),
            Self::InvalidRecipient { .. } => Some(codes::INVALID_RECIPIENT),
            Self::Provider { .. } => Some(codes::PROVIDER_ERROR),
            Self::RateLimit { .. } => Some(codes::RATE_LIMIT_EXCEEDED),
            Self::Validation { .. } => Some(codes::VALIDATION_FAILED),
            Self::Timeout { .. } => Some(codes::TIMEOUT),
            Self::Network { .. } => Some(codes::NETWORK_ERROR),
            Self::Api { code, .. } => code.as_deref(),
            Self::Closed => None,
        }
    }

    /// True when the error was raised locally before anything was sent.
    #[must_use]
    pub const fn is_client_validation(&self) -> bool {
        matches!(self, Self::Validation { source: Some(_), .. })
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            message: format!("{CLIENT_VALIDATION_PREFIX}{err}"),
            source: Some(err),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Timeout => Self::Timeout {
                message: err.to_string(),
            },
            HttpError::Connection(_) | HttpError::Interrupted => Self::Network {
                message: err.to_string(),
                source: Some(err),
            },
            HttpError::InvalidUrl(_) | HttpError::Serialize(_) => Self::Api {
                code: None,
                message: err.to_string(),
            },
        }
    }
}

impl From<ErrorDetail> for ApiError {
    fn from(detail: ErrorDetail) -> Self {
        detail.to_api_error()
    }
}

impl ErrorDetail {
    /// Maps the server code to its [`ApiError`] variant.
    ///
    /// Codes match exactly; anything unrecognised becomes
    /// [`ApiError::Api`] carrying the code. Detail fields that are absent
    /// or of the wrong type map to `None`.
    #[must_use]
    pub fn to_api_error(&self) -> ApiError {
        let message = self.message.clone();

        match self.code.as_str() {
            codes::AUTHENTICATION_FAILED => ApiError::Authentication { message },
            codes::TEMPLATE_NOT_FOUND => ApiError::TemplateNotFound {
                message,
                template_key: self.string_detail("templateKey"),
            },
            codes::INVALID_TEMPLATE_DATA => ApiError::InvalidTemplateData {
                message,
                validation_errors: self.detail("validationErrors").and_then(string_list),
            },
            codes::INVALID_RECIPIENT => ApiError::InvalidRecipient { message },
            codes::PROVIDER_ERROR => ApiError::Provider {
                message,
                provider: self.string_detail("provider"),
                provider_code: self.string_detail("providerCode"),
            },
            codes::RATE_LIMIT_EXCEEDED => ApiError::RateLimit {
                message,
                retry_after: self.detail("retryAfter").and_then(seconds),
            },
            codes::VALIDATION_FAILED => ApiError::Validation {
                message,
                source: None,
            },
            codes::TIMEOUT => ApiError::Timeout { message },
            codes::NETWORK_ERROR => ApiError::Network {
                message,
                source: None,
            },
            other => ApiError::Api {
                code: Some(other.to_string()),
                message,
            },
        }
    }

    fn string_detail(&self, key: &str) -> Option<String> {
        self.detail(key)?.as_str().map(str::to_string)
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Accepts `60` or `"60"`.
fn seconds(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
