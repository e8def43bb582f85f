//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Base URL of the hosted API.
pub const PRODUCTION_BASE_URL: &str = "https://api.huefy.dev/api/v1/sdk";

/// Base URL of a locally running API.
pub const LOCAL_BASE_URL: &str = "http://localhost:8080/api/v1/sdk";

/// Default connect timeout in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default read timeout in seconds.
pub const READ_TIMEOUT_SECS: u64 = 30;

/// Default write timeout in seconds.
pub const WRITE_TIMEOUT_SECS: u64 = 30;

// Retry defaults live on `RetryPolicy` (`RetryPolicy::DEFAULT_*`).

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "HUEFY_API_KEY";

/// Environment variable holding an explicit base URL.
pub const BASE_URL_ENV: &str = "HUEFY_BASE_URL";

/// Default path written by `huefy init`.
pub const CONFIG_FILE: &str = "huefy.toml";

#[must_use]
pub const fn connect_timeout() -> Duration {
    Duration::from_secs(CONNECT_TIMEOUT_SECS)
}

#[must_use]
pub const fn read_timeout() -> Duration {
    Duration::from_secs(READ_TIMEOUT_SECS)
}

#[must_use]
pub const fn write_timeout() -> Duration {
    Duration::from_secs(WRITE_TIMEOUT_SECS)
}
