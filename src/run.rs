//! Application execution logic.
//!
//! This module turns a parsed subcommand into one API call and renders the
//! result as pretty-printed JSON.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use huefy::config::{ConfigError, ValidatedConfig};
use huefy::time::Sleeper;
use huefy::transport::HttpClient;
use huefy::{ApiError, EmailProvider, EmailSendRequest, HuefyClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// `--data` is not valid JSON.
    #[error("Invalid template data: {0}")]
    InvalidData(#[source] serde_json::Error),

    /// `--data` is valid JSON but not an object.
    #[error("Template data must be a JSON object")]
    DataNotObject,

    /// Failed to read the bulk batch file.
    #[error("Failed to read batch file '{}': {source}", path.display())]
    BatchRead {
        /// Path to the batch file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The bulk batch file is not a JSON array of email requests.
    #[error("Failed to parse batch file '{}': {source}", path.display())]
    BatchParse {
        /// Path to the batch file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create the API client.
    #[error("Failed to create client: {0}")]
    Client(#[source] ConfigError),

    /// The API call failed.
    #[error("{}", describe(.0))]
    Api(#[from] ApiError),

    /// Failed to render the result.
    #[error("Failed to encode output: {0}")]
    Output(#[source] serde_json::Error),
}

fn describe(error: &ApiError) -> String {
    match error.code() {
        Some(code) => format!("API error [{code}]: {error}"),
        None => format!("API error: {error}"),
    }
}

/// One API call requested on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Send(EmailSendRequest),
    Bulk(Vec<EmailSendRequest>),
    Health,
}

impl Operation {
    /// Builds a send operation from `huefy send` arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is not a JSON object.
    pub fn send(
        template: &str,
        to: &str,
        data: &str,
        provider: Option<EmailProvider>,
    ) -> Result<Self, RunError> {
        let data = match serde_json::from_str::<Value>(data).map_err(RunError::InvalidData)? {
            Value::Object(map) => map,
            _ => return Err(RunError::DataNotObject),
        };

        let mut request = EmailSendRequest::new(template, to).with_data_map(data);
        if let Some(provider) = provider {
            request = request.with_provider(provider);
        }

        Ok(Self::Send(request))
    }

    /// Builds a bulk operation from a JSON file holding an array of send
    /// bodies (`templateKey`, `recipient`, `data`, `providerType`).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn bulk(path: &Path) -> Result<Self, RunError> {
        let content = std::fs::read_to_string(path).map_err(|e| RunError::BatchRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::bulk_from_str(path, &content)
    }

    fn bulk_from_str(path: &Path, content: &str) -> Result<Self, RunError> {
        serde_json::from_str(content)
            .map(Self::Bulk)
            .map_err(|e| RunError::BatchParse {
                path: path.to_path_buf(),
                source: e,
            })
    }
}

/// Executes one operation and returns its rendered output.
///
/// The client is closed before returning, whatever the outcome.
///
/// # Errors
///
/// Returns an error if the client cannot be created or the call fails.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, operation: Operation) -> Result<String, RunError> {
    let client =
        HuefyClient::with_config(&config.api_key, config.client).map_err(RunError::Client)?;

    let output = dispatch(&client, operation).await;
    client.close();
    output
}

/// Runs `operation` on `client`.
async fn dispatch<H: HttpClient, S: Sleeper>(
    client: &HuefyClient<H, S>,
    operation: Operation,
) -> Result<String, RunError> {
    match operation {
        Operation::Send(request) => {
            let result = client.send_email(&request).await?;
            tracing::info!(
                "Email sent to {} via {} (message {})",
                request.recipient(),
                result.provider,
                result.message_id
            );
            render(&result)
        }
        Operation::Bulk(requests) => {
            let result = client.send_bulk_emails(&requests).await?;
            tracing::info!(
                "Bulk send finished: {} sent, {} failed",
                result.success_count(),
                result.failure_count()
            );
            for (index, failure) in result.failures() {
                let recipient = requests.get(index).map_or("?", EmailSendRequest::recipient);
                tracing::warn!(
                    "Email {} to {} failed: [{}] {}",
                    index,
                    recipient,
                    failure.code,
                    failure.message
                );
            }
            render(&result)
        }
        Operation::Health => {
            let status = client.health_check().await?;
            if status.is_healthy() {
                tracing::info!("Service healthy (version {})", status.version);
            } else {
                tracing::warn!("Service reports status '{}'", status.status);
            }
            render(&status)
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, RunError> {
    serde_json::to_string_pretty(value).map_err(RunError::Output)
}

