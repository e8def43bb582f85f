//! Time abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait so the retry loop can wait
//! between attempts on the Tokio timer in production while tests swap in
//! a sleeper that returns immediately.

use std::future::Future;
use std::time::Duration;

/// Abstraction over asynchronous waiting.
///
/// Implementations suspend the calling task for (roughly) the requested
/// duration. Only the calling task is suspended; other requests on the
/// same client keep running.
///
/// # Example
///
/// ```
/// use huefy::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # async fn example() {
/// InstantSleeper.sleep(Duration::from_secs(3600)).await; // returns at once
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Waits for the given duration.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that never waits.
///
/// Useful in tests that exercise retry paths without real delays.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
