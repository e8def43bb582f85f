//! Error types for HTTP transport operations.

use thiserror::Error;

/// Error type for a single HTTP exchange.
///
/// Describes what went wrong on the wire without deciding how the caller
/// should recover. [`HttpError::is_network`] separates transient I/O
/// failures, which the retry loop re-attempts, from local mistakes.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// Covers DNS resolution failures, refused connections and response
    /// bodies that were cut off mid-stream.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The connect, read or overall request deadline elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The client was shut down while the request waited to be retried.
    #[error("Request interrupted")]
    Interrupted,

    /// The request URL could not be built.
    ///
    /// This is a configuration error rather than a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be encoded as JSON.
    #[error("Failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl HttpError {
    /// Returns true for network-kind failures.
    ///
    /// The retry loop re-attempts these, except [`HttpError::Interrupted`].
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout | Self::Interrupted)
    }

    /// Wraps any error as a connection failure.
    pub fn connection(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Connection(source.into())
    }
}
