//! Tests for error code mapping and conversions.

use super::{ApiError, ErrorKind, codes};
use crate::email::{ErrorDetail, ValidationError};
use crate::transport::HttpError;
use serde_json::json;

fn detail(code: &str, details: serde_json::Value) -> ErrorDetail {
    ErrorDetail {
        code: code.to_string(),
        message: format!("{code} happened"),
        details: details.as_object().cloned(),
    }
}

mod code_mapping {
    use super::*;

    #[test]
    fn every_known_code_has_its_kind() {
        let cases = [
            (codes::AUTHENTICATION_FAILED, ErrorKind::Authentication),
            (codes::TEMPLATE_NOT_FOUND, ErrorKind::TemplateNotFound),
            (codes::INVALID_TEMPLATE_DATA, ErrorKind::InvalidTemplateData),
            (codes::INVALID_RECIPIENT, ErrorKind::InvalidRecipient),
            (codes::PROVIDER_ERROR, ErrorKind::Provider),
            (codes::RATE_LIMIT_EXCEEDED, ErrorKind::RateLimit),
            (codes::VALIDATION_FAILED, ErrorKind::Validation),
            (codes::TIMEOUT, ErrorKind::Timeout),
            (codes::NETWORK_ERROR, ErrorKind::Network),
        ];

        for (code, kind) in cases {
            let err = detail(code, json!(null)).to_api_error();
            assert_eq!(err.kind(), kind, "{code}");
            assert_eq!(err.code(), Some(code));
            assert_eq!(err.message(), format!("{code} happened"));
        }
    }

    #[test]
    fn unknown_code_keeps_code_on_base_kind() {
        let err = detail("QUOTA_EXHAUSTED", json!(null)).to_api_error();

        match err {
            ApiError::Api { code, message } => {
                assert_eq!(code.as_deref(), Some("QUOTA_EXHAUSTED"));
                assert_eq!(message, "QUOTA_EXHAUSTED happened");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn codes_match_exactly() {
        let err = detail("authentication_failed", json!(null)).to_api_error();

        assert_eq!(err.kind(), ErrorKind::Api);
    }

    #[test]
    fn server_validation_has_no_local_source() {
        let err = detail(codes::VALIDATION_FAILED, json!(null)).to_api_error();

        assert!(!err.is_client_validation());
    }
}

mod details {
    use super::*;

    #[test]
    fn template_key() {
        let err = detail(codes::TEMPLATE_NOT_FOUND, json!({"templateKey": "x"})).to_api_error();

        assert!(matches!(
            err,
            ApiError::TemplateNotFound { template_key: Some(ref k), .. } if k == "x"
        ));
    }

    #[test]
    fn validation_errors_list() {
        let err = detail(
            codes::INVALID_TEMPLATE_DATA,
            json!({"validationErrors": ["name is required", "plan must be a number"]}),
        )
        .to_api_error();

        match err {
            ApiError::InvalidTemplateData {
                validation_errors, ..
            } => assert_eq!(
                validation_errors.unwrap(),
                ["name is required", "plan must be a number"]
            ),
            other => panic!("expected InvalidTemplateData, got {other:?}"),
        }
    }

    #[test]
    fn mixed_validation_errors_list_is_dropped() {
        let err = detail(
            codes::INVALID_TEMPLATE_DATA,
            json!({"validationErrors": ["ok", 3]}),
        )
        .to_api_error();

        assert!(matches!(
            err,
            ApiError::InvalidTemplateData {
                validation_errors: None,
                ..
            }
        ));
    }

    #[test]
    fn provider_fields() {
        let err = detail(
            codes::PROVIDER_ERROR,
            json!({"provider": "sendgrid", "providerCode": "550"}),
        )
        .to_api_error();

        match err {
            ApiError::Provider {
                provider,
                provider_code,
                ..
            } => {
                assert_eq!(provider.as_deref(), Some("sendgrid"));
                assert_eq!(provider_code.as_deref(), Some("550"));
            }
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn retry_after_accepts_number_or_numeric_string() {
        let cases = [
            (json!({"retryAfter": 60}), Some(60)),
            (json!({"retryAfter": "120"}), Some(120)),
            (json!({"retryAfter": "soon"}), None),
            (json!({"retryAfter": -1}), None),
            (json!({"retryAfter": true}), None),
            (json!({}), None),
        ];

        for (details, expected) in cases {
            let err = detail(codes::RATE_LIMIT_EXCEEDED, details.clone()).to_api_error();
            match err {
                ApiError::RateLimit { retry_after, .. } => {
                    assert_eq!(retry_after, expected, "{details}");
                }
                other => panic!("expected RateLimit, got {other:?}"),
            }
        }
    }

    #[test]
    fn mistyped_detail_is_none() {
        let err = detail(codes::TEMPLATE_NOT_FOUND, json!({"templateKey": 42})).to_api_error();

        assert!(matches!(
            err,
            ApiError::TemplateNotFound {
                template_key: None,
                ..
            }
        ));
    }

    #[test]
    fn from_error_detail_matches_to_api_error() {
        let err: ApiError = detail(codes::AUTHENTICATION_FAILED, json!(null)).into();

        assert_eq!(err.kind(), ErrorKind::Authentication);
    }
}

mod conversions {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn local_validation_is_prefixed_and_chained() {
        let err = ApiError::from(ValidationError::InvalidRecipient("bad".into()));

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.is_client_validation());
        assert_eq!(
            err.to_string(),
            "Client-side validation failed: Invalid recipient email address: bad"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn http_timeout_is_timeout() {
        let err = ApiError::from(HttpError::Timeout);

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(err.message(), "Request timed out");
    }

    #[test]
    fn connection_failures_are_network() {
        let refused = HttpError::connection(std::io::Error::other("connection refused"));

        for source in [refused, HttpError::Interrupted] {
            let err = ApiError::from(source);
            assert_eq!(err.kind(), ErrorKind::Network);
            assert!(err.source().is_some());
        }
    }

    #[test]
    fn local_request_failures_are_base_kind() {
        let err = ApiError::from(HttpError::InvalidUrl("nope".into()));

        assert!(matches!(err, ApiError::Api { code: None, .. }));
        assert!(err.message().contains("nope"));
    }

    #[test]
    fn closed_has_no_code() {
        assert_eq!(ApiError::Closed.code(), None);
        assert_eq!(ApiError::Closed.kind(), ErrorKind::Closed);
        assert_eq!(ApiError::Closed.to_string(), "Client is closed");
    }
}
