//! Configuration layer for Huefy.
//!
//! This module provides:
//! - Library-side client settings ([`ClientConfig`], [`Environment`])
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! For the `huefy` binary, values are resolved with the following priority
//! (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values passed on the command line, or
//!    through `HUEFY_API_KEY` / `HUEFY_BASE_URL` for the flags they back
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! `--local` selects the local environment but an explicit base URL still
//! wins over either environment.
//!
//! # Boolean Flag Semantics
//!
//! `--no-retry` only disables: if TOML sets `retry.enabled = false`, no CLI
//! flag turns retries back on.
//!
//! # CLI-Only vs TOML-Only Options
//!
//! Some retry policy options are TOML-only (not available via CLI):
//! - `retry.max_delay_ms` (default: 30000) - Maximum retry delay
//! - `retry.multiplier` (default: 2.0) - Exponential backoff multiplier

mod cli;
mod client;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use client::{ClientConfig, Environment};
pub use error::{ConfigError, field};
pub use toml::{ClientSection, RetrySection, TimeoutsSection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
