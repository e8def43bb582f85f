//! Turns raw responses into typed results.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::ApiError;
use crate::email::ErrorDetail;
use crate::transport::HttpResponse;

/// Standard error body: `{"error": {"code", "message", "details"?}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

/// Interprets one response.
///
/// # Errors
///
/// Returns [`ApiError::Api`] if a 2xx body does not parse as `T`, or the
/// error mapped from the server's error body for any other status.
pub fn interpret<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if response.is_success() {
        return serde_json::from_slice(&response.body).map_err(|e| ApiError::Api {
            code: None,
            message: format!("Failed to parse response: {e}"),
        });
    }

    Err(error_detail(response).to_api_error())
}

/// Extracts the error envelope, synthesizing one from the status and raw
/// body when the server did not send it.
pub fn error_detail(response: &HttpResponse) -> ErrorDetail {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(&response.body) {
        return envelope.error;
    }

    let code = format!("HTTP_{}", response.status.as_u16());
    let body = String::from_utf8_lossy(&response.body);
    let message = if body.trim().is_empty() {
        code.clone()
    } else {
        body.into_owned()
    };

    ErrorDetail::new(code, message)
}
