//! Retry decorator for any [`HttpClient`].

use crate::shutdown::ShutdownSignal;
use crate::time::{Sleeper, TokioSleeper};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse, RetryPolicy};

/// Extension trait for checking if an outcome warrants another attempt.
pub trait IsRetryable {
    /// Returns true if the outcome is potentially transient.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        // Interruption means the client is going away; never retry it.
        self.is_network() && !matches!(self, Self::Interrupted)
    }
}

impl IsRetryable for http::StatusCode {
    fn is_retryable(&self) -> bool {
        self.is_server_error() || *self == Self::TOO_MANY_REQUESTS
    }
}

/// [`HttpClient`] decorator that re-issues failed exchanges with
/// exponential backoff.
///
/// Per logical call the state machine is:
///
/// - network failure: propagated once `max_retries` is spent, otherwise
///   wait and retry;
/// - non-retryable status (2xx, most 4xx): returned as-is;
/// - retryable status (5xx, 429): dropped and retried, or returned as-is
///   once retries are exhausted so the caller can interpret it.
///
/// A disabled policy makes this a transparent pass-through. Waits race
/// against a [`ShutdownSignal`]; if it fires the call ends with
/// [`HttpError::Interrupted`].
///
/// # Type Parameters
///
/// - `H`: The wrapped HTTP client
/// - `S`: The sleeper used between attempts (defaults to [`TokioSleeper`])
#[derive(Debug)]
pub struct RetryingClient<H, S = TokioSleeper> {
    inner: H,
    sleeper: S,
    policy: RetryPolicy,
    shutdown: ShutdownSignal,
}

impl<H> RetryingClient<H, TokioSleeper> {
    /// Wraps `inner` with the given policy, sleeping on the Tokio timer.
    #[must_use]
    pub fn new(inner: H, policy: RetryPolicy) -> Self {
        Self {
            inner,
            sleeper: TokioSleeper,
            policy,
            shutdown: ShutdownSignal::never(),
        }
    }
}

impl<H, S> RetryingClient<H, S> {
    /// Sets a custom sleeper for retry delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryingClient<H, S2> {
        RetryingClient {
            inner: self.inner,
            sleeper,
            policy: self.policy,
            shutdown: self.shutdown,
        }
    }

    /// Sets the signal that interrupts pending waits.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the wrapped client.
    #[must_use]
    pub const fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: HttpClient, S: Sleeper> RetryingClient<H, S> {
    /// Waits before the next attempt unless shutdown fires first.
    async fn pause(&self, attempt: u32) -> Result<(), HttpError> {
        if self.shutdown.is_fired() {
            return Err(HttpError::Interrupted);
        }

        let delay = self.policy.delay_for_retry(attempt);
        tracing::debug!(
            "Retrying request after {}ms (attempt {})",
            delay.as_millis(),
            attempt + 2
        );

        tokio::select! {
            biased;

            () = self.shutdown.fired() => Err(HttpError::Interrupted),
            () = self.sleeper.sleep(delay) => Ok(()),
        }
    }

    async fn request_with_retry(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut attempt: u32 = 0;

        loop {
            match self.inner.request(req.clone()).await {
                Ok(response) if !response.status.is_retryable() => return Ok(response),
                Ok(response) => {
                    if !self.policy.should_retry(attempt) {
                        tracing::warn!(
                            "Request to {} still failing with status {} after {} attempt(s)",
                            req.url.path(),
                            response.status,
                            attempt + 1
                        );
                        return Ok(response);
                    }
                    tracing::debug!(
                        "Request failed with status {} (attempt {})",
                        response.status,
                        attempt + 1
                    );
                }
                Err(e) if e.is_retryable() && self.policy.should_retry(attempt) => {
                    tracing::debug!("Request failed (attempt {}): {e}", attempt + 1);
                }
                Err(e) => return Err(e),
            }

            self.pause(attempt).await?;
            attempt += 1;
        }
    }
}

impl<H: HttpClient, S: Sleeper> HttpClient for RetryingClient<H, S> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        if !self.policy.is_enabled() {
            return self.inner.request(req).await;
        }
        self.request_with_retry(req).await
    }
}
