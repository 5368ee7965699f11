//! Retry policy for clone attempts.
//!
//! Clones are retried a bounded number of times with a pause between
//! attempts. The pause is fixed by default; an exponential schedule with a
//! ceiling is available for long lists against rate-limited hosts.

use std::time::Duration;

/// Default number of clone attempts per repository.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between failed clone attempts.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(10);

/// Upper bound for exponential backoff delays.
pub const MAX_EXPONENTIAL_BACKOFF: Duration = Duration::from_secs(300);

/// How long to wait before the next attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// The same delay after every failure.
    Fixed(Duration),
    /// `initial`, doubled after each further failure, never above `max`.
    Exponential { initial: Duration, max: Duration },
}

impl Backoff {
    /// Exponential backoff starting at `initial` and capped at
    /// [`MAX_EXPONENTIAL_BACKOFF`].
    pub fn exponential(initial: Duration) -> Self {
        Backoff::Exponential {
            initial,
            max: MAX_EXPONENTIAL_BACKOFF.max(initial),
        }
    }

    /// Delay to apply after `failed_attempts` consecutive failures (1-based).
    pub fn delay(&self, failed_attempts: u32) -> Duration {
        match *self {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { initial, max } => {
                let exponent = failed_attempts.saturating_sub(1).min(31);
                initial
                    .checked_mul(1u32 << exponent)
                    .map_or(max, |delay| delay.min(max))
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::Fixed(DEFAULT_BACKOFF)
    }
}

/// Bounded retry policy applied to each clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
}

impl RetryPolicy {
    /// Create a policy allowing `max_attempts` clone attempts.
    ///
    /// A clone is always attempted at least once, so `0` behaves like `1`.
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Total number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// The pause to take after attempt `attempt` failed, or `None` when it was
    /// the last one allowed.
    pub fn pause_after(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            None
        } else {
            Some(self.backoff.delay(attempt))
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, Backoff::default())
    }
}
