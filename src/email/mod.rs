//! Email request and response models.
//!
//! - [`EmailSendRequest`] with local validation ([`validate_batch`] for bulk)
//! - [`EmailProvider`] wire names
//! - Results: [`EmailSendResult`], [`BulkResult`], [`HealthStatus`]

mod provider;
mod request;
mod result;


pub use provider::{EmailProvider, UnknownProvider};
pub use request::{EmailSendRequest, ValidationError, validate_batch};
pub(crate) use result::{BulkEmailRequest, BulkEmailResponse};
pub use result::{BulkOutcome, BulkResult, EmailSendResult, ErrorDetail, HealthStatus};
