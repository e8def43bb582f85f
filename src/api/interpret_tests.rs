//! Tests for response interpretation.

use super::{ApiError, ErrorKind, error_detail, interpret};
use crate::email::{EmailProvider, EmailSendResult, HealthStatus};
use crate::transport::HttpResponse;
use http::StatusCode;

fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::with_status(StatusCode::from_u16(status).unwrap(), body)
}

mod success {
    use super::*;

    #[test]
    fn parses_typed_body() {
        let resp = response(
            200,
            r#"{"messageId":"msg-123","status":"sent","provider":"ses","timestamp":"2024-01-01T00:00:00Z"}"#,
        );

        let result: EmailSendResult = interpret(&resp).unwrap();

        assert_eq!(result.message_id, "msg-123");
        assert_eq!(result.provider, EmailProvider::Ses);
    }

    #[test]
    fn any_2xx_is_success() {
        let resp = response(
            202,
            r#"{"status":"healthy","timestamp":"2024-01-01T00:00:00Z","version":"1.0.0"}"#,
        );

        let health: HealthStatus = interpret(&resp).unwrap();

        assert!(health.is_healthy());
    }

    #[test]
    fn unparsable_body_is_base_error() {
        let err = interpret::<HealthStatus>(&response(200, "<html>")).unwrap_err();

        match err {
            ApiError::Api { code, message } => {
                assert_eq!(code, None);
                assert!(message.starts_with("Failed to parse response: "));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }
}

mod failure {
    use super::*;

    #[test]
    fn envelope_maps_to_typed_error() {
        let resp = response(
            401,
            r#"{"error":{"code":"AUTHENTICATION_FAILED","message":"Invalid API key"}}"#,
        );

        let err = interpret::<HealthStatus>(&resp).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.message(), "Invalid API key");
    }

    #[test]
    fn envelope_code_wins_over_status() {
        let resp = response(
            500,
            r#"{"error":{"code":"TEMPLATE_NOT_FOUND","message":"gone","details":{"templateKey":"x"}}}"#,
        );

        let err = interpret::<HealthStatus>(&resp).unwrap_err();

        assert!(matches!(
            err,
            ApiError::TemplateNotFound { template_key: Some(ref k), .. } if k == "x"
        ));
    }

    #[test]
    fn raw_body_becomes_message() {
        let err = interpret::<HealthStatus>(&response(502, "Bad Gateway")).unwrap_err();

        match err {
            ApiError::Api { code, message } => {
                assert_eq!(code.as_deref(), Some("HTTP_502"));
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn empty_body_uses_status_code() {
        let detail = error_detail(&response(503, ""));

        assert_eq!(detail.code, "HTTP_503");
        assert_eq!(detail.message, "HTTP_503");
    }

    #[test]
    fn json_without_envelope_is_treated_as_raw() {
        let detail = error_detail(&response(400, r#"{"message":"nope"}"#));

        assert_eq!(detail.code, "HTTP_400");
        assert_eq!(detail.message, r#"{"message":"nope"}"#);
    }
}
