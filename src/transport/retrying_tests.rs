//! Tests for `RetryingClient`.

use super::retrying::IsRetryable;
use super::{HttpClient, HttpError, HttpRequest, HttpResponse, RetryPolicy, RetryingClient};
use crate::shutdown;
use crate::time::{InstantSleeper, Sleeper};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock HTTP client that plays back a fixed sequence of outcomes.
#[derive(Debug)]
struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    call_count: AtomicUsize,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: AtomicUsize::new(0),
        }
    }

    fn statuses(statuses: &[u16]) -> Self {
        Self::new(statuses.iter().map(|s| Ok(status(*s))).collect())
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl HttpClient for MockClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.responses.lock().unwrap().remove(0)
    }
}

/// Sleeper that records requested delays instead of waiting.
#[derive(Debug, Default, Clone)]
struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

fn status(code: u16) -> HttpResponse {
    HttpResponse::with_status(http::StatusCode::from_u16(code).unwrap(), "")
}

fn request() -> HttpRequest {
    HttpRequest::post(url::Url::parse("https://api.huefy.dev/api/v1/sdk/emails/send").unwrap())
}

fn refused() -> HttpError {
    HttpError::connection(std::io::Error::other("connection refused"))
}

fn policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new()
        .with_max_retries(max_retries)
        .with_base_delay(Duration::from_millis(100))
        .with_max_delay(Duration::from_secs(5))
        .with_multiplier(2.0)
}

mod classification {
    use super::*;

    #[test]
    fn server_errors_and_429_are_retryable() {
        for code in [500, 502, 503, 504, 429] {
            assert!(
                http::StatusCode::from_u16(code).unwrap().is_retryable(),
                "{code} should be retryable"
            );
        }
    }

    #[test]
    fn success_and_client_errors_are_not_retryable() {
        for code in [200, 201, 400, 401, 404, 408, 422] {
            assert!(
                !http::StatusCode::from_u16(code).unwrap().is_retryable(),
                "{code} should not be retryable"
            );
        }
    }

    #[test]
    fn only_transient_transport_errors_are_retryable() {
        assert!(HttpError::Timeout.is_retryable());
        assert!(refused().is_retryable());
        assert!(!HttpError::Interrupted.is_retryable());
        assert!(!HttpError::InvalidUrl("x".to_string()).is_retryable());
    }

    #[test]
    fn retryable_errors_are_network_errors_except_interruption() {
        let serialize = serde_json::from_str::<u8>("x").unwrap_err();
        let errors = [
            HttpError::Timeout,
            refused(),
            HttpError::Interrupted,
            HttpError::InvalidUrl("x".to_string()),
            HttpError::Serialize(serialize),
        ];

        for error in errors {
            let expected = error.is_network() && !matches!(error, HttpError::Interrupted);
            assert_eq!(error.is_retryable(), expected, "{error:?}");
        }
    }
}

mod status_retries {
    use super::*;

    #[tokio::test]
    async fn succeeds_on_third_attempt_with_backoff() {
        let client = Arc::new(MockClient::statuses(&[500, 500, 200]));
        let sleeper = RecordingSleeper::default();
        let retrying = RetryingClient::new(Arc::clone(&client), policy(2)).with_sleeper(sleeper.clone());

        let resp = retrying.request(request()).await.unwrap();

        assert_eq!(resp.status, http::StatusCode::OK);
        assert_eq!(client.calls(), 3);
        let delays: Vec<u128> = sleeper.delays().iter().map(Duration::as_millis).collect();
        assert_eq!(delays, vec![100, 200]);
    }

    #[tokio::test]
    async fn returns_last_retryable_response_when_exhausted() {
        let client = Arc::new(MockClient::statuses(&[503, 502, 500]));
        let retrying =
            RetryingClient::new(Arc::clone(&client), policy(2)).with_sleeper(InstantSleeper);

        let resp = retrying.request(request()).await.unwrap();

        assert_eq!(resp.status, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn rate_limit_is_retried() {
        let client = Arc::new(MockClient::statuses(&[429, 200]));
        let retrying =
            RetryingClient::new(Arc::clone(&client), policy(3)).with_sleeper(InstantSleeper);

        let resp = retrying.request(request()).await.unwrap();

        assert!(resp.is_success());
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn client_error_is_returned_without_retry() {
        let client = Arc::new(MockClient::statuses(&[404, 200]));
        let retrying =
            RetryingClient::new(Arc::clone(&client), policy(3)).with_sleeper(InstantSleeper);

        let resp = retrying.request(request()).await.unwrap();

        assert_eq!(resp.status, http::StatusCode::NOT_FOUND);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn zero_max_retries_makes_single_attempt() {
        let client = Arc::new(MockClient::statuses(&[500, 200]));
        let retrying =
            RetryingClient::new(Arc::clone(&client), policy(0)).with_sleeper(InstantSleeper);

        let resp = retrying.request(request()).await.unwrap();

        assert_eq!(resp.status, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(client.calls(), 1);
    }
}

mod error_retries {
    use super::*;

    #[tokio::test]
    async fn network_error_then_success() {
        let client = Arc::new(MockClient::new(vec![Err(refused()), Ok(status(200))]));
        let retrying =
            RetryingClient::new(Arc::clone(&client), policy(1)).with_sleeper(InstantSleeper);

        let resp = retrying.request(request()).await.unwrap();

        assert!(resp.is_success());
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn network_error_propagates_after_exhaustion() {
        let client = Arc::new(MockClient::new(vec![
            Err(HttpError::Timeout),
            Err(HttpError::Timeout),
            Err(HttpError::Timeout),
        ]));
        let retrying =
            RetryingClient::new(Arc::clone(&client), policy(2)).with_sleeper(InstantSleeper);

        let result = retrying.request(request()).await;

        assert!(matches!(result, Err(HttpError::Timeout)));
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn invalid_url_is_not_retried() {
        let client = Arc::new(MockClient::new(vec![
            Err(HttpError::InvalidUrl("bad".to_string())),
            Ok(status(200)),
        ]));
        let retrying =
            RetryingClient::new(Arc::clone(&client), policy(3)).with_sleeper(InstantSleeper);

        let result = retrying.request(request()).await;

        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
        assert_eq!(client.calls(), 1);
    }
}

mod disabled {
    use super::*;

    #[tokio::test]
    async fn server_error_passes_straight_through() {
        let client = Arc::new(MockClient::statuses(&[503, 200]));
        let sleeper = RecordingSleeper::default();
        let retrying = RetryingClient::new(Arc::clone(&client), RetryPolicy::disabled())
            .with_sleeper(sleeper.clone());

        let resp = retrying.request(request()).await.unwrap();

        assert_eq!(resp.status, http::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(client.calls(), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn network_error_passes_straight_through() {
        let client = Arc::new(MockClient::new(vec![Err(refused()), Ok(status(200))]));
        let retrying = RetryingClient::new(Arc::clone(&client), RetryPolicy::disabled())
            .with_sleeper(InstantSleeper);

        let result = retrying.request(request()).await;

        assert!(matches!(result, Err(HttpError::Connection(_))));
        assert_eq!(client.calls(), 1);
    }
}

mod timing {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_waits_between_attempts() {
        let client = Arc::new(MockClient::statuses(&[500, 500, 200]));
        let retrying = RetryingClient::new(Arc::clone(&client), policy(2));
        let start = tokio::time::Instant::now();

        let resp = retrying.request(request()).await.unwrap();

        let elapsed = start.elapsed();
        assert!(resp.is_success());
        assert!(elapsed >= Duration::from_millis(300), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(350), "elapsed {elapsed:?}");
    }
}

mod interruption {
    use super::*;

    #[tokio::test]
    async fn fired_signal_aborts_before_waiting() {
        let (trigger, signal) = shutdown::channel();
        trigger.fire();
        let client = Arc::new(MockClient::statuses(&[500, 200]));
        let retrying = RetryingClient::new(Arc::clone(&client), policy(3))
            .with_sleeper(InstantSleeper)
            .with_shutdown(signal);

        let result = retrying.request(request()).await;

        assert!(matches!(result, Err(HttpError::Interrupted)));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn signal_during_wait_interrupts_with_network_error() {
        let (trigger, signal) = shutdown::channel();
        let client = Arc::new(MockClient::statuses(&[503, 200]));
        let retrying = Arc::new(
            RetryingClient::new(
                Arc::clone(&client),
                policy(3).with_base_delay(Duration::from_secs(10)),
            )
            .with_shutdown(signal),
        );

        let task = {
            let retrying = Arc::clone(&retrying);
            tokio::spawn(async move { retrying.request(request()).await })
        };
        tokio::time::sleep(Duration::from_secs(1)).await;
        trigger.fire();

        let result = task.await.unwrap();

        match result {
            Err(e) => assert!(e.is_network() && matches!(e, HttpError::Interrupted)),
            Ok(resp) => panic!("expected interruption, got {}", resp.status),
        }
        assert_eq!(client.calls(), 1);
    }
}
