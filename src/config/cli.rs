//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;
use crate::email::EmailProvider;

/// Huefy: template email sending from the command line
///
/// Sends single or bulk template emails through the Huefy API and checks
/// service health.
#[derive(Debug, Parser)]
#[command(name = "huefy")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// API key
    #[arg(long = "api-key", env = defaults::API_KEY_ENV, global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Explicit API base URL
    #[arg(long = "base-url", env = defaults::BASE_URL_ENV, global = true)]
    pub base_url: Option<String>,

    /// Use the local development server
    #[arg(long, global = true)]
    pub local: bool,

    /// Connect timeout in seconds
    #[arg(long = "connect-timeout", global = true)]
    pub connect_timeout: Option<u64>,

    /// Read timeout in seconds
    #[arg(long = "read-timeout", global = true)]
    pub read_timeout: Option<u64>,

    /// Write timeout in seconds
    #[arg(long = "write-timeout", global = true)]
    pub write_timeout: Option<u64>,

    /// Disable retries
    #[arg(long = "no-retry", global = true)]
    pub no_retry: bool,

    /// Maximum number of retries after the first attempt
    #[arg(long = "retry-max", global = true)]
    pub retry_max: Option<u32>,

    /// Delay before the first retry in milliseconds
    #[arg(long = "retry-delay", global = true)]
    pub retry_delay: Option<u64>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for huefy
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one template email
    Send {
        /// Template key
        #[arg(long)]
        template: String,

        /// Recipient email address
        #[arg(long)]
        to: String,

        /// Template data as a JSON object
        #[arg(long, default_value = "{}")]
        data: String,

        /// Email provider (ses, sendgrid, mailgun, mailchimp)
        #[arg(long)]
        provider: Option<EmailProvider>,
    },

    /// Send a batch of template emails from a JSON file
    Bulk {
        /// JSON array of email requests
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Check service health
    Health,

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
