//! Client facade and its error model.
//!
//! - [`HuefyClient`]: send, bulk send, health check, close
//! - [`ApiError`] / [`ErrorKind`]: typed failures
//! - [`interpret`]: response body or error envelope to typed result

mod client;
mod error;
mod interpret;

#[cfg(test)]
mod error_tests;
#[cfg(test)]
mod interpret_tests;

pub use client::HuefyClient;
pub use error::{ApiError, CLIENT_VALIDATION_PREFIX, ErrorKind, codes};
pub use interpret::{error_detail, interpret};
