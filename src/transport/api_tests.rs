//! Tests for `ApiTransport` request assembly.

use super::api::{API_KEY_HEADER, JSON_CONTENT_TYPE, SDK_USER_AGENT};
use super::{ApiTransport, Endpoint, HttpClient, HttpError, HttpRequest, HttpResponse};
use std::sync::Mutex;

/// Mock client that records every request it receives.
#[derive(Debug, Default)]
struct CapturingClient {
    requests: Mutex<Vec<HttpRequest>>,
}

impl CapturingClient {
    fn captured(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for CapturingClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        Ok(HttpResponse::with_status(http::StatusCode::OK, "{}"))
    }
}

fn transport() -> ApiTransport<CapturingClient> {
    ApiTransport::new(
        CapturingClient::default(),
        Endpoint::parse("https://api.huefy.dev").unwrap(),
        "test-api-key",
    )
    .unwrap()
}

mod headers {
    use super::*;

    #[test]
    fn user_agent_identifies_sdk_and_version() {
        assert!(SDK_USER_AGENT.starts_with("Huefy-Rust-SDK/"));
        assert!(SDK_USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn get_carries_identity_headers_without_content_type() {
        let transport = transport();

        transport.get("/health").await.unwrap();

        let req = &transport.client().captured()[0];
        assert_eq!(req.method, http::Method::GET);
        assert_eq!(req.headers.get(http::header::USER_AGENT).unwrap(), SDK_USER_AGENT);
        assert_eq!(req.headers.get(API_KEY_HEADER).unwrap(), "test-api-key");
        assert!(req.headers.get(http::header::CONTENT_TYPE).is_none());
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn post_adds_json_content_type() {
        let transport = transport();

        transport
            .post("/emails/send", &serde_json::json!({"templateKey": "welcome"}))
            .await
            .unwrap();

        let req = &transport.client().captured()[0];
        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            JSON_CONTENT_TYPE
        );
        assert_eq!(req.headers.get(API_KEY_HEADER).unwrap(), "test-api-key");
    }

    #[test]
    fn api_key_header_is_sensitive() {
        let req = transport()
            .build::<()>(http::Method::GET, "/health", None)
            .unwrap();

        assert!(req.headers.get(API_KEY_HEADER).unwrap().is_sensitive());
    }

    #[test]
    fn rejects_key_with_control_characters() {
        let result = ApiTransport::new(
            CapturingClient::default(),
            Endpoint::parse("https://api.huefy.dev").unwrap(),
            "bad\nkey",
        );

        assert!(result.is_err());
    }
}

mod body_and_url {
    use super::*;

    #[tokio::test]
    async fn post_serializes_body_as_json() {
        let transport = transport();
        let body = serde_json::json!({"emails": [{"recipient": "john@example.com"}]});

        transport.post("/emails/bulk", &body).await.unwrap();

        let req = &transport.client().captured()[0];
        let sent: serde_json::Value = serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
        assert_eq!(sent, body);
        assert_eq!(
            req.url.as_str(),
            "https://api.huefy.dev/api/v1/sdk/emails/bulk"
        );
    }

    #[test]
    fn endpoint_is_exposed() {
        assert_eq!(transport().endpoint().as_str(), "https://api.huefy.dev");
    }

    #[tokio::test]
    async fn unserializable_body_fails_before_sending() {
        use std::collections::HashMap;

        // JSON object keys must be strings.
        let mut body = HashMap::new();
        body.insert(vec![1u8], "value");
        let transport = transport();

        let result = transport.post("/emails/send", &body).await;

        assert!(matches!(result, Err(HttpError::Serialize(_))));
        assert!(transport.client().captured().is_empty());
    }
}
