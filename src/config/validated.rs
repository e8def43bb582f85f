//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::transport::RetryPolicy;

use super::cli::Cli;
use super::client::{ClientConfig, Environment};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
pub struct ValidatedConfig {
    /// API key (required, trimmed, never printed)
    pub api_key: String,

    /// Client settings handed to [`HuefyClient`](crate::HuefyClient)
    pub client: ClientConfig,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("api_key", &"<redacted>")
            .field("client", &self.client)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoint = self
            .client
            .endpoint()
            .map_or_else(|_| "invalid".to_string(), |e| e.to_string());
        let retry = self.client.retry_policy();

        write!(
            f,
            "Config {{ endpoint: {}, timeouts: {}s/{}s/{}s, retry: {}, {}x/{}ms..{}ms x{} }}",
            endpoint,
            self.client.connect_timeout().as_secs(),
            self.client.read_timeout().as_secs(),
            self.client.write_timeout().as_secs(),
            if retry.is_enabled() { "on" } else { "off" },
            retry.max_retries(),
            retry.base_delay().as_millis(),
            retry.max_delay().as_millis(),
            retry.multiplier(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and the environment variables backing them) take
    /// precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is missing or blank
    /// - The environment name is unknown
    /// - The base URL is invalid
    /// - Timeout values are zero
    /// - Retry values are out of range or contradict each other
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let api_key = Self::resolve_api_key(cli, toml)?;

        let mut client = ClientConfig::new()
            .with_environment(Self::resolve_environment(cli, toml)?)
            .with_connect_timeout(Self::resolve_timeout(
                "connect_timeout",
                cli.connect_timeout,
                toml.and_then(|t| t.timeouts.connect),
                defaults::CONNECT_TIMEOUT_SECS,
            )?)
            .with_read_timeout(Self::resolve_timeout(
                "read_timeout",
                cli.read_timeout,
                toml.and_then(|t| t.timeouts.read),
                defaults::READ_TIMEOUT_SECS,
            )?)
            .with_write_timeout(Self::resolve_timeout(
                "write_timeout",
                cli.write_timeout,
                toml.and_then(|t| t.timeouts.write),
                defaults::WRITE_TIMEOUT_SECS,
            )?)
            .with_retry_policy(Self::build_retry_policy(cli, toml)?);

        // CLI takes precedence; blank values fall through
        let base_url = non_blank(cli.base_url.as_deref())
            .or_else(|| non_blank(toml.and_then(|t| t.client.base_url.as_deref())));
        if let Some(url) = base_url {
            client = client.with_base_url(url);
        }

        client.validate()?;

        Ok(Self {
            api_key,
            client,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_api_key(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        // An empty HUEFY_API_KEY must not hide the key from the file
        non_blank(cli.api_key.as_deref())
            .or_else(|| non_blank(toml.and_then(|t| t.client.api_key.as_deref())))
            .map(str::to_string)
            .ok_or_else(|| {
                ConfigError::missing(
                    field::API_KEY,
                    "Use --api-key, set HUEFY_API_KEY or set client.api_key in config file",
                )
            })
    }

    fn resolve_environment(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Environment, ConfigError> {
        if cli.local {
            return Ok(Environment::Local);
        }

        toml.and_then(|t| t.client.environment.as_deref())
            .map_or(Ok(Environment::Production), str::parse::<Environment>)
    }

    fn resolve_timeout(
        field: &'static str,
        cli: Option<u64>,
        toml: Option<u64>,
        default: u64,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli.or(toml).unwrap_or(default);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // --no-retry only disables; it cannot re-enable a TOML `enabled = false`
        let enabled = !cli.no_retry && retry.and_then(|r| r.enabled).unwrap_or(true);

        // Priority: CLI explicit > TOML > default, with RetryPolicy's defaults
        let max_retries = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_retries))
            .unwrap_or(RetryPolicy::DEFAULT_MAX_RETRIES);

        let base_delay = cli
            .retry_delay
            .or_else(|| retry.and_then(|r| r.base_delay_ms))
            .map_or(RetryPolicy::DEFAULT_BASE_DELAY, Duration::from_millis);

        let max_delay = retry
            .and_then(|r| r.max_delay_ms)
            .map_or(RetryPolicy::DEFAULT_MAX_DELAY, Duration::from_millis);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(RetryPolicy::DEFAULT_MULTIPLIER);

        if base_delay.is_zero() {
            return Err(ConfigError::InvalidRetry(
                "base_delay_ms must be greater than 0".to_string(),
            ));
        }

        if max_delay.is_zero() {
            return Err(ConfigError::InvalidRetry(
                "max_delay_ms must be greater than 0".to_string(),
            ));
        }

        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a finite number >= 1.0".to_string(),
            ));
        }

        let policy = RetryPolicy::new()
            .with_enabled(enabled)
            .with_max_retries(max_retries)
            .with_base_delay(base_delay)
            .with_max_delay(max_delay)
            .with_multiplier(multiplier);

        policy
            .validate()
            .map_err(|e| ConfigError::InvalidRetry(e.to_string()))?;

        Ok(policy)
    }
}

/// Trims `value`, treating an all-whitespace string as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
