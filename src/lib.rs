//! Huefy: client SDK for template-based transactional email
//!
//! Sends single or bulk template emails through the Huefy API, optionally
//! choosing the delivering provider, and checks service health. Requests
//! are validated locally, retried with exponential backoff on transient
//! failures, and answered with typed results or typed [`ApiError`]s.
//!
//! ```no_run
//! use huefy::{ApiError, EmailSendRequest, HuefyClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HuefyClient::new(&std::env::var("HUEFY_API_KEY")?)?;
//!
//! let request = EmailSendRequest::new("welcome-email", "john@example.com")
//!     .with_data("name", "John");
//!
//! match client.send_email(&request).await {
//!     Ok(result) => println!("sent {}", result.message_id),
//!     Err(ApiError::RateLimit { retry_after, .. }) => println!("retry in {retry_after:?}s"),
//!     Err(e) => return Err(e.into()),
//! }
//!
//! client.close();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod email;
pub mod shutdown;
pub mod time;
pub mod transport;

pub use api::{ApiError, ErrorKind, HuefyClient};
pub use config::{ClientConfig, ConfigError, Environment};
pub use email::{
    BulkOutcome, BulkResult, EmailProvider, EmailSendRequest, EmailSendResult, ErrorDetail,
    HealthStatus, ValidationError,
};
pub use transport::RetryPolicy;
