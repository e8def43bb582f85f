//! The public client facade.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use super::{ApiError, codes, interpret};
use crate::config::{ClientConfig, ConfigError};
use crate::email::{
    BulkEmailRequest, BulkEmailResponse, BulkResult, EmailSendRequest, EmailSendResult,
    HealthStatus, validate_batch,
};
use crate::shutdown::{self, ShutdownTrigger};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{ApiTransport, Endpoint, HttpClient, ReqwestClient, RetryingClient};

const SEND_PATH: &str = "/emails/send";
const BULK_PATH: &str = "/emails/bulk";
const HEALTH_PATH: &str = "/health";

type Pipeline<H, S> = ApiTransport<RetryingClient<H, S>>;

/// Client for the Huefy email API.
///
/// Every operation takes `&self`, so one client can be shared (for example
/// behind an `Arc`) by any number of tasks. Requests are validated
/// locally, sent through the retry policy, and their responses turned into
/// typed results or [`ApiError`]s.
///
/// # Type Parameters
///
/// - `H`: The HTTP client doing the I/O (defaults to [`ReqwestClient`])
/// - `S`: The sleeper used between retries (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use huefy::{EmailSendRequest, HuefyClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HuefyClient::new("your-api-key")?;
///
/// let request = EmailSendRequest::new("welcome-email", "john@example.com")
///     .with_data("name", "John");
/// let result = client.send_email(&request).await?;
/// println!("sent {}", result.message_id);
///
/// client.close();
/// # Ok(())
/// # }
/// ```
pub struct HuefyClient<H = ReqwestClient, S = TokioSleeper> {
    transport: RwLock<Option<Arc<Pipeline<H, S>>>>,
    endpoint: Endpoint,
    shutdown: ShutdownTrigger,
}

impl HuefyClient {
    /// Creates a production client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the API key is blank or the HTTP client
    /// cannot be built.
    pub fn new(api_key: &str) -> Result<Self, ConfigError> {
        Self::with_config(api_key, ClientConfig::new())
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the API key is blank, the configuration
    /// is invalid or the HTTP client cannot be built.
    pub fn with_config(api_key: &str, config: ClientConfig) -> Result<Self, ConfigError> {
        let http = ReqwestClient::with_timeouts(
            config.connect_timeout(),
            config.read_timeout(),
            config.write_timeout(),
        )
        .map_err(ConfigError::HttpClient)?;

        Self::with_http_client(api_key, config, http)
    }
}

impl<H: HttpClient> HuefyClient<H> {
    /// Creates a client over a caller-supplied HTTP client.
    ///
    /// The timeouts in `config` are not applied to `http`; they only
    /// matter for [`HuefyClient::with_config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the API key is blank or unusable as a
    /// header, or the configuration is invalid.
    pub fn with_http_client(
        api_key: &str,
        config: ClientConfig,
        http: H,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigError::empty_api_key());
        }

        config.validate()?;
        let endpoint = config.endpoint()?;

        let (shutdown, signal) = shutdown::channel();
        let retrying =
            RetryingClient::new(http, config.retry_policy().clone()).with_shutdown(signal);
        let transport = ApiTransport::new(retrying, endpoint.clone(), api_key).map_err(|e| {
            ConfigError::InvalidApiKey {
                reason: e.to_string(),
            }
        })?;

        tracing::debug!(
            "Huefy client created for {} (retry: {:?})",
            endpoint,
            config.retry_policy()
        );

        Ok(Self {
            transport: RwLock::new(Some(Arc::new(transport))),
            endpoint,
            shutdown,
        })
    }
}

impl<H, S> HuefyClient<H, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// A closed client stays closed.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> HuefyClient<H, S2> {
        let transport = self
            .transport
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .and_then(|shared| Arc::try_unwrap(shared).ok())
            .map(|transport| Arc::new(transport.map_client(|c| c.with_sleeper(sleeper))));

        HuefyClient {
            transport: RwLock::new(transport),
            endpoint: self.endpoint,
            shutdown: self.shutdown,
        }
    }

    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Releases the client.
    ///
    /// Pending retry waits are interrupted and the connection pool is
    /// dropped once in-flight requests finish. Every later operation fails
    /// with [`ApiError::Closed`]. Calling it again does nothing.
    pub fn close(&self) {
        let first = self.shutdown.fire();
        let released = self
            .transport
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(released);

        if first {
            tracing::debug!("Huefy client closed");
        }
    }

    /// Returns true once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_fired()
    }

    fn pipeline(&self) -> Result<Arc<Pipeline<H, S>>, ApiError> {
        self.transport
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
            .ok_or(ApiError::Closed)
    }
}

impl<H: HttpClient, S: Sleeper> HuefyClient<H, S> {
    /// Sends one template email.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending anything if the
    /// request is invalid, otherwise the error mapped from the transport
    /// or the server's response.
    pub async fn send_email(&self, request: &EmailSendRequest) -> Result<EmailSendResult, ApiError> {
        let transport = self.pipeline()?;
        request.validate()?;

        let response = transport.post(SEND_PATH, request).await?;
        interpret(&response)
    }

    /// Sends a batch of template emails in one request.
    ///
    /// The whole batch is validated first; one invalid item means nothing
    /// is sent. Per-item failures reported by the server are returned in
    /// the [`BulkResult`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an empty or invalid batch, the
    /// mapped error if the request as a whole fails, or [`ApiError::Api`]
    /// with code `BULK_RESULT_MISMATCH` when the server does not return one
    /// result per email.
    pub async fn send_bulk_emails(
        &self,
        requests: &[EmailSendRequest],
    ) -> Result<BulkResult, ApiError> {
        let transport = self.pipeline()?;
        validate_batch(requests)?;

        let response = transport
            .post(BULK_PATH, &BulkEmailRequest { emails: requests })
            .await?;
        let body: BulkEmailResponse = interpret(&response)?;

        if body.len() != requests.len() {
            tracing::warn!(
                "Bulk send returned {} results for {} emails",
                body.len(),
                requests.len()
            );
            return Err(ApiError::Api {
                code: Some(codes::BULK_RESULT_MISMATCH.to_string()),
                message: format!(
                    "Expected {} bulk results, received {}",
                    requests.len(),
                    body.len()
                ),
            });
        }

        Ok(body.into())
    }

    /// Checks whether the service is up.
    ///
    /// # Errors
    ///
    /// Returns the error mapped from the transport or the server's response.
    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let transport = self.pipeline()?;

        let response = transport.get(HEALTH_PATH).await?;
        interpret(&response)
    }
}

impl<H, S> fmt::Debug for HuefyClient<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuefyClient")
            .field("endpoint", &self.endpoint)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
