//! Exponential backoff schedule.
//!
//! The transport asks the schedule two questions: whether another attempt is
//! allowed, and how long to wait before it. Sleeping, cancellation and error
//! classification stay with the caller.

use std::time::Duration;

/// Default number of attempts, the first one included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default wait before the second attempt.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);
/// Default upper bound of a single wait.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);
/// Default growth factor between consecutive waits.
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Whether an HTTP status is worth retrying: any 5xx and 429.
pub fn should_retry_status(status: u16) -> bool {
    status >= 500 || status == 429
}

/// Exponential delays between attempts.
///
/// The wait before attempt `n` (0-indexed, `n > 0`) is
/// `min(initial_delay * multiplier^(n-1), max_delay)`, optionally spread by
/// `jitter`.
///
/// # Examples
///
/// ```rust
/// use mgc_core::retry::ExponentialBackoff;
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::default();
/// assert_eq!(backoff.delay_for(0), Duration::ZERO);
/// assert_eq!(backoff.delay_for(1), Duration::from_secs(1));
/// assert_eq!(backoff.delay_for(2), Duration::from_secs(2));
/// assert_eq!(backoff.delay_for(10), Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialBackoff {
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
    jitter: f64,
}

impl ExponentialBackoff {
    /// Create a new builder for configuring exponential backoff.
    pub fn builder() -> ExponentialBackoffBuilder {
        ExponentialBackoffBuilder::default()
    }

    /// Total attempts allowed, the first one included. Never below 1.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before the second attempt.
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Upper bound of a single wait.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Growth factor.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Whether attempt `attempt` (0-indexed) may still be made.
    pub fn allows(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Wait before attempt `attempt` (0-indexed). Zero for the first one.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let base = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let capped = base.min(self.max_delay.as_secs_f64());

        let jittered = if self.jitter > 0.0 {
            let spread = capped * self.jitter * (rand::random::<f64>() - 0.5) * 2.0;
            (capped + spread).clamp(0.0, self.max_delay.as_secs_f64())
        } else {
            capped
        };

        if jittered.is_finite() {
            Duration::from_secs_f64(jittered.max(0.0))
        } else {
            self.max_delay
        }
    }
}

impl Default for ExponentialBackoff {
    /// 3 attempts, 1s initial wait doubling up to 30s, no jitter.
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            multiplier: DEFAULT_MULTIPLIER,
            jitter: 0.0,
        }
    }
}

/// Builder for [`ExponentialBackoff`]. Unset fields take the defaults.
///
/// ```rust
/// use mgc_core::retry::ExponentialBackoff;
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::builder()
///     .max_attempts(5)
///     .initial_delay(Duration::from_millis(100))
///     .max_delay(Duration::from_secs(2))
///     .multiplier(3.0)
///     .build();
/// assert_eq!(backoff.delay_for(2), Duration::from_millis(300));
/// ```
#[derive(Debug, Default)]
pub struct ExponentialBackoffBuilder {
    max_attempts: Option<u32>,
    initial_delay: Option<Duration>,
    max_delay: Option<Duration>,
    multiplier: Option<f64>,
    jitter: Option<f64>,
}

impl ExponentialBackoffBuilder {
    /// Total attempts, the first one included. `0` is treated as `1`.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Wait before the second attempt.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    /// Upper bound of a single wait.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = Some(delay);
        self
    }

    /// Growth factor between waits.
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    /// Random spread applied to each wait, from 0.0 to 1.0.
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = Some(jitter.clamp(0.0, 1.0));
        self
    }

    /// Build the schedule.
    pub fn build(self) -> ExponentialBackoff {
        let multiplier = self
            .multiplier
            .filter(|m| m.is_finite() && *m >= 1.0)
            .unwrap_or(DEFAULT_MULTIPLIER);
        ExponentialBackoff {
            max_attempts: self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS).max(1),
            initial_delay: self.initial_delay.unwrap_or(DEFAULT_INITIAL_DELAY),
            max_delay: self.max_delay.unwrap_or(DEFAULT_MAX_DELAY),
            multiplier,
            jitter: self.jitter.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let backoff = ExponentialBackoff::default();

        assert_eq!(backoff.max_attempts(), 3);
        assert_eq!(backoff.delay_for(1), Duration::from_secs(1));
        assert_eq!(backoff.delay_for(2), Duration::from_secs(2));
        assert_eq!(backoff.delay_for(3), Duration::from_secs(4));
        assert_eq!(backoff.delay_for(5), Duration::from_secs(16));
        assert_eq!(backoff.delay_for(6), Duration::from_secs(30));
    }

    #[test]
    fn test_allows() {
        let backoff = ExponentialBackoff::default();

        assert!(backoff.allows(0));
        assert!(backoff.allows(2));
        assert!(!backoff.allows(3));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let backoff = ExponentialBackoff::builder().max_attempts(0).build();

        assert_eq!(backoff.max_attempts(), 1);
        assert!(backoff.allows(0));
        assert!(!backoff.allows(1));
    }

    #[test]
    fn test_huge_attempt_is_capped() {
        let backoff = ExponentialBackoff::default();

        assert_eq!(backoff.delay_for(u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_multiplier_falls_back() {
        let backoff = ExponentialBackoff::builder().multiplier(f64::NAN).build();
        assert_eq!(backoff.multiplier(), DEFAULT_MULTIPLIER);

        let backoff = ExponentialBackoff::builder().multiplier(0.5).build();
        assert_eq!(backoff.multiplier(), DEFAULT_MULTIPLIER);
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let backoff = ExponentialBackoff::builder()
            .initial_delay(Duration::from_millis(100))
            .jitter(0.5)
            .build();

        for _ in 0..100 {
            let delay = backoff.delay_for(1);
            assert!(delay >= Duration::from_millis(50), "{delay:?}");
            assert!(delay <= Duration::from_millis(150), "{delay:?}");
        }
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(should_retry_status(500));
        assert!(should_retry_status(503));
        assert!(should_retry_status(429));
        assert!(!should_retry_status(404));
        assert!(!should_retry_status(400));
        assert!(!should_retry_status(200));
    }
}
