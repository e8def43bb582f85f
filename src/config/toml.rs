//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Client identity and endpoint
    #[serde(default)]
    pub client: ClientSection,

    /// HTTP timeouts
    #[serde(default)]
    pub timeouts: TimeoutsSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,
}

/// Client configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// API key sent as `X-API-Key`
    pub api_key: Option<String>,

    /// Explicit base URL, overriding `environment`
    pub base_url: Option<String>,

    /// "production" or "local"
    pub environment: Option<String>,
}

/// Timeout configuration section, in seconds.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeoutsSection {
    pub connect: Option<u64>,
    pub read: Option<u64>,
    pub write: Option<u64>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Retry failed requests at all
    pub enabled: Option<bool>,

    /// Maximum number of retries after the first attempt
    pub max_retries: Option<u32>,

    /// Delay before the first retry in milliseconds
    pub base_delay_ms: Option<u64>,

    /// Maximum retry delay in milliseconds
    pub max_delay_ms: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Huefy CLI Configuration File

[client]
# API key (required). Can also be given with --api-key or HUEFY_API_KEY.
# api_key = "your-api-key"

# Explicit API base URL; overrides `environment` when set
# base_url = "https://api.huefy.dev/api/v1/sdk"

# Deployment to talk to: "production" or "local" (default: production)
# environment = "production"

[timeouts]
# Connect timeout in seconds (default: 10)
# connect = 10

# Read timeout in seconds (default: 30)
# read = 30

# Write timeout in seconds (default: 30)
# write = 30

[retry]
# Retry failed requests (default: true)
# enabled = true

# Maximum number of retries after the first attempt (default: 3)
# max_retries = 3

# Delay before the first retry in milliseconds (default: 1000)
# base_delay_ms = 1000

# Maximum retry delay in milliseconds (default: 30000)
# max_delay_ms = 30000

# Backoff multiplier (default: 2.0)
# multiplier = 2.0
"#
    .to_string()
}
