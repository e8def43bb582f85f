//! Library-side client configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ConfigError, defaults};
use crate::transport::{Endpoint, RetryPolicy};

/// Deployment whose default endpoint the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// The hosted service.
    #[default]
    Production,
    /// A server on `localhost:8080`.
    Local,
}

impl Environment {
    /// Base URL used when no explicit one is configured.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => defaults::PRODUCTION_BASE_URL,
            Self::Local => defaults::LOCAL_BASE_URL,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "local" => Ok(Self::Local),
            _ => Err(ConfigError::InvalidEnvironment {
                value: s.to_string(),
            }),
        }
    }
}

/// Settings for [`HuefyClient`](crate::HuefyClient).
///
/// Immutable once handed to the client. Timeouts must be positive; the
/// client constructors check this together with the retry policy and the
/// endpoint.
///
/// # Example
///
/// ```
/// use huefy::config::{ClientConfig, Environment};
/// use huefy::transport::RetryPolicy;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_environment(Environment::Local)
///     .with_read_timeout(Duration::from_secs(5))
///     .with_retry_policy(RetryPolicy::disabled());
///
/// assert_eq!(config.endpoint().unwrap().as_str(), "http://localhost:8080/api/v1/sdk");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    base_url: Option<String>,
    environment: Environment,
    connect_timeout: Duration,
    read_timeout: Duration,
    write_timeout: Duration,
    retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    /// Creates a production configuration with default timeouts and retry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base_url: None,
            environment: Environment::Production,
            connect_timeout: defaults::connect_timeout(),
            read_timeout: defaults::read_timeout(),
            write_timeout: defaults::write_timeout(),
            retry: RetryPolicy::new(),
        }
    }

    /// Overrides the environment's base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    #[must_use]
    pub const fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Resolves the endpoint: the explicit base URL if non-blank, else the
    /// environment's default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the chosen URL is not an
    /// absolute http(s) URL.
    pub fn endpoint(&self) -> Result<Endpoint, ConfigError> {
        let url = self
            .base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.environment.base_url());

        Endpoint::parse(url).map_err(|e| ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// Checks timeouts, retry policy and endpoint.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("connect_timeout", self.connect_timeout),
            ("read_timeout", self.read_timeout),
            ("write_timeout", self.write_timeout),
        ] {
            if value.is_zero() {
                return Err(ConfigError::InvalidDuration {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        self.retry
            .validate()
            .map_err(|e| ConfigError::InvalidRetry(e.to_string()))?;
        self.endpoint()?;

        Ok(())
    }
}
