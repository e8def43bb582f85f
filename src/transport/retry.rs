//! Retry policy configuration for API requests.

use std::time::Duration;

use thiserror::Error;

/// Configuration for exponential backoff retry behavior.
///
/// Controls whether failed requests are re-attempted, how many extra
/// attempts are allowed and how long to wait between them. The wait grows
/// by `multiplier` after every attempt and is capped at `max_delay`.
///
/// # Defaults
///
/// - `enabled`: true
/// - `max_retries`: 3 (so up to 4 attempts in total)
/// - `base_delay`: 1 second
/// - `max_delay`: 30 seconds
/// - `multiplier`: 2.0
///
/// # Example
///
/// ```
/// use huefy::transport::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_retries(5)
///     .with_base_delay(Duration::from_millis(500))
///     .with_max_delay(Duration::from_secs(10))
///     .with_multiplier(1.5);
/// assert!(policy.validate().is_ok());
///
/// let off = RetryPolicy::disabled();
/// assert!(!off.is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    enabled: bool,
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
}

/// A retry policy whose fields contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("base_delay ({base_delay:?}) cannot be greater than max_delay ({max_delay:?})")]
pub struct InvalidRetryPolicy {
    /// Configured base delay
    pub base_delay: Duration,
    /// Configured maximum delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Default maximum number of retries after the first attempt.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Default delay before the first retry (1 second).
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

    /// Default maximum delay (30 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

    /// Default multiplier (2.0).
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Creates an enabled retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: true,
            max_retries: Self::DEFAULT_MAX_RETRIES,
            base_delay: Self::DEFAULT_BASE_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            multiplier: Self::DEFAULT_MULTIPLIER,
        }
    }

    /// Creates a policy that performs exactly one attempt.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new().with_enabled(false)
    }

    /// Turns retrying on or off.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the maximum number of retries. Zero means a single attempt.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    ///
    /// # Panics
    ///
    /// Panics if `delay` is zero.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        assert!(!delay.is_zero(), "base_delay must be positive");
        self.base_delay = delay;
        self
    }

    /// Sets the cap applied to every computed delay.
    ///
    /// # Panics
    ///
    /// Panics if `delay` is zero.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        assert!(!delay.is_zero(), "max_delay must be positive");
        self.max_delay = delay;
        self
    }

    /// Sets the backoff multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier` is below 1.0 or not finite.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(
            multiplier.is_finite() && multiplier >= 1.0,
            "multiplier must be >= 1.0"
        );
        self.multiplier = multiplier;
        self
    }

    /// Checks the invariants that span several fields.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRetryPolicy`] if `base_delay > max_delay`.
    pub const fn validate(&self) -> Result<(), InvalidRetryPolicy> {
        if self.base_delay.as_nanos() > self.max_delay.as_nanos() {
            return Err(InvalidRetryPolicy {
                base_delay: self.base_delay,
                max_delay: self.max_delay,
            });
        }
        Ok(())
    }

    /// Returns whether retrying is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the maximum number of retries.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the base delay.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Returns the maximum delay.
    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Returns the backoff multiplier.
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Computes the wait after attempt `attempt` (0-indexed) failed.
    ///
    /// `min(base_delay * multiplier^attempt, max_delay)`
    #[must_use]
    pub fn delay_for_retry(&self, attempt: u32) -> Duration {
        // Attempt counts are tiny; saturate rather than wrap on absurd input.
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let delay_secs = self.base_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let capped = delay_secs.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Returns true if another attempt may follow attempt `attempt` (0-indexed).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        self.enabled && attempt < self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
