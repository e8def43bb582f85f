//! Transport layer for talking to the Huefy API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`]) and reading responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Resolving operation URLs ([`Endpoint`])
//! - Injecting identity headers and JSON bodies ([`ApiTransport`])
//! - Retrying with exponential backoff ([`RetryPolicy`], [`RetryingClient`])
//!
//! The pipeline is composed outside-in as
//! `ApiTransport<RetryingClient<ReqwestClient>>`.

mod api;
mod client;
mod endpoint;
mod error;
mod exchange;
mod retry;
mod retrying;

#[cfg(test)]
mod api_tests;
#[cfg(test)]
mod retrying_tests;

pub use api::{API_KEY_HEADER, ApiTransport, JSON_CONTENT_TYPE, SDK_USER_AGENT};
pub use client::ReqwestClient;
pub use endpoint::{API_PREFIX, Endpoint};
pub use error::HttpError;
pub use exchange::{HttpClient, HttpRequest, HttpResponse};
pub use retry::{InvalidRetryPolicy, RetryPolicy};
pub use retrying::{IsRetryable, RetryingClient};
