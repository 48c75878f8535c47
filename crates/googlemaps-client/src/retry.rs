//! Backoff and deadline rules for retrying a logical request.

use googlemaps_core::{MapsError, Result};
use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::DEFAULT_RETRY_TIMEOUT;

/// When and how long to wait before another attempt.
///
/// The delay before attempt `i` (the first attempt is `0` and never waits) is
/// `base_delay * multiplier^(i - 1)`, scaled by a random factor in
/// `[0.5, 1.5)` when jitter is on. Attempts continue until `retry_timeout` has
/// elapsed since the first one; there is no attempt cap.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    retry_timeout: Duration,
    base_delay: Duration,
    multiplier: f64,
    jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_timeout: DEFAULT_RETRY_TIMEOUT,
            base_delay: Duration::from_millis(500),
            multiplier: 1.5,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Create the default policy: 60 s deadline, 0.5 s base delay growing 1.5x
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deadline across all attempts
    #[must_use]
    pub const fn retry_timeout(mut self, timeout: Duration) -> Self {
        self.retry_timeout = timeout;
        self
    }

    /// Set the delay before the first retry
    #[must_use]
    pub const fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the growth factor between consecutive delays
    #[must_use]
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Enable or disable random jitter
    #[must_use]
    pub const fn jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// The deadline across all attempts
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.retry_timeout
    }

    /// Fail with [`MapsError::Timeout`] once the deadline has passed
    pub fn check_deadline(&self, state: &AttemptState) -> Result<()> {
        self.check_deadline_at(state, Instant::now())
    }

    /// [`RetryPolicy::check_deadline`] against an explicit clock reading
    pub fn check_deadline_at(&self, state: &AttemptState, now: Instant) -> Result<()> {
        if now.saturating_duration_since(state.first_attempt) > self.retry_timeout {
            return Err(MapsError::Timeout);
        }
        Ok(())
    }

    /// Un-jittered delay before the given attempt
    #[must_use]
    pub fn base_delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let seconds = self.base_delay.as_secs_f64() * self.multiplier.powi(exponent);
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    }

    /// Delay before the given attempt, jittered when enabled
    #[must_use]
    pub fn jittered_delay(&self, attempt: u32) -> Duration {
        let delay = self.base_delay_for(attempt);
        if !self.jitter || delay.is_zero() {
            return delay;
        }
        let factor: f64 = rand::thread_rng().gen_range(0.5..1.5);
        Duration::try_from_secs_f64(delay.as_secs_f64() * factor).unwrap_or(delay)
    }
}

/// Progress of one logical request across its attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptState {
    first_attempt: Instant,
    attempt: u32,
    total_delay: Duration,
}

impl AttemptState {
    /// Start tracking a request whose first attempt happens now
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start tracking a request whose first attempt happened at `first_attempt`
    #[must_use]
    pub const fn starting_at(first_attempt: Instant) -> Self {
        Self {
            first_attempt,
            attempt: 0,
            total_delay: Duration::ZERO,
        }
    }

    /// Time of the first attempt
    #[must_use]
    pub const fn first_attempt(&self) -> Instant {
        self.first_attempt
    }

    /// Current attempt, `0` for the first try
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Sum of all backoff delays so far
    #[must_use]
    pub const fn total_delay(&self) -> Duration {
        self.total_delay
    }

    pub(crate) fn next_attempt(&mut self) {
        self.attempt = self.attempt.saturating_add(1);
    }

    pub(crate) fn add_delay(&mut self, delay: Duration) {
        self.total_delay = self.total_delay.saturating_add(delay);
    }
}

impl Default for AttemptState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_exceeded() {
        let policy = RetryPolicy::new().retry_timeout(Duration::from_secs(1));
        let start = Instant::now();
        let state = AttemptState::starting_at(start);

        assert!(policy.check_deadline_at(&state, start).is_ok());
        assert!(policy
            .check_deadline_at(&state, start + Duration::from_secs(1))
            .is_ok());
        assert!(matches!(
            policy.check_deadline_at(&state, start + Duration::from_secs(2)),
            Err(MapsError::Timeout)
        ));
    }

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy::new();
        assert_eq!(policy.base_delay_for(0), Duration::ZERO);
        assert_eq!(policy.base_delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.base_delay_for(2), Duration::from_millis(750));
        assert_eq!(policy.base_delay_for(3), Duration::from_millis(1125));
    }

    #[test]
    fn test_jitter_stays_within_half_to_one_and_a_half() {
        let policy = RetryPolicy::new();
        for attempt in 1..6 {
            let base = policy.base_delay_for(attempt);
            for _ in 0..50 {
                let delay = policy.jittered_delay(attempt);
                assert!(delay >= base / 2, "{delay:?} below half of {base:?}");
                assert!(delay < base * 3 / 2, "{delay:?} above 1.5x {base:?}");
            }
        }
    }

    #[test]
    fn test_jitter_disabled_is_exact() {
        let policy = RetryPolicy::new().jitter(false);
        assert_eq!(policy.jittered_delay(2), Duration::from_millis(750));
        assert_eq!(policy.jittered_delay(0), Duration::ZERO);
    }

    #[test]
    fn test_huge_attempt_does_not_panic() {
        let policy = RetryPolicy::new();
        assert_eq!(policy.base_delay_for(u32::MAX), Duration::MAX);
    }

    #[test]
    fn test_attempt_state_tracking() {
        let mut state = AttemptState::new();
        assert_eq!(state.attempt(), 0);
        state.next_attempt();
        state.add_delay(Duration::from_millis(400));
        state.next_attempt();
        state.add_delay(Duration::from_millis(600));
        assert_eq!(state.attempt(), 2);
        assert_eq!(state.total_delay(), Duration::from_secs(1));
    }
}
