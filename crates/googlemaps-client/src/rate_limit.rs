//! Sliding-window limit on outgoing requests.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Caps dispatches at `capacity` per rolling window.
///
/// The queue holds the times of the last `capacity` recorded requests. A new
/// dispatch waits until the oldest of them has left the window. The lock is
/// held while waiting, so concurrent callers are admitted in FIFO order.
///
/// [`RateLimiter::acquire`] waits and records in one step. The client instead
/// calls [`RateLimiter::wait`] before every attempt and
/// [`RateLimiter::record`] once a request has succeeded, so retried attempts
/// do not take up slots.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: usize,
    window: Duration,
    sent: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Allow `queries_per_second` requests in any one-second window
    #[must_use]
    pub fn new(queries_per_second: usize) -> Self {
        Self::with_window(queries_per_second, Duration::from_secs(1))
    }

    /// Allow `capacity` requests in any window of the given length
    #[must_use]
    pub fn with_window(capacity: usize, window: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            window,
            sent: Mutex::new(VecDeque::new()),
        }
    }

    /// Maximum requests per window
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Wait for a free slot, then record a dispatch at the current time
    pub async fn acquire(&self) {
        let mut sent = self.sent.lock().await;
        self.wait_for_slot(&sent).await;
        self.push(&mut sent);
    }

    /// Wait for a free slot without taking it
    pub async fn wait(&self) {
        let sent = self.sent.lock().await;
        self.wait_for_slot(&sent).await;
    }

    /// Record a dispatch at the current time
    pub async fn record(&self) {
        let mut sent = self.sent.lock().await;
        self.push(&mut sent);
    }

    async fn wait_for_slot(&self, sent: &VecDeque<Instant>) {
        if sent.len() < self.capacity {
            return;
        }
        let Some(&oldest) = sent.front() else {
            return;
        };
        let ready_at = oldest + self.window;
        if ready_at > Instant::now() {
            debug!(
                wait_ms = u64::try_from(ready_at.duration_since(Instant::now()).as_millis())
                    .unwrap_or(u64::MAX),
                "rate limit reached, delaying request"
            );
            tokio::time::sleep_until(ready_at).await;
        }
    }

    fn push(&self, sent: &mut VecDeque<Instant>) {
        sent.push_back(Instant::now());
        while sent.len() > self.capacity {
            sent.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_third_request_waits_for_window() {
        let limiter = RateLimiter::new(2);
        let first = Instant::now();

        limiter.acquire().await;
        limiter.acquire().await;
        assert_eq!(first.elapsed(), Duration::ZERO);

        limiter.acquire().await;
        assert!(first.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_once_window_has_passed() {
        let limiter = RateLimiter::new(2);
        limiter.acquire().await;
        limiter.acquire().await;

        tokio::time::advance(Duration::from_millis(1500)).await;

        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_is_measured_from_oldest_dispatch() {
        let limiter = RateLimiter::new(2);
        let start = Instant::now();

        limiter.acquire().await;
        tokio::time::advance(Duration::from_millis(600)).await;
        limiter.acquire().await;

        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_the_window() {
        let limiter = Arc::new(RateLimiter::new(1));
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.acquire().await;
                    start.elapsed()
                })
            })
            .collect();

        let mut dispatched = Vec::new();
        for handle in handles {
            dispatched.push(handle.await.unwrap());
        }
        dispatched.sort();

        assert_eq!(dispatched[0], Duration::ZERO);
        assert!(dispatched[1] >= Duration::from_secs(1));
        assert!(dispatched[2] >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_does_not_take_a_slot() {
        let limiter = RateLimiter::new(1);
        let start = Instant::now();

        limiter.wait().await;
        limiter.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        limiter.record().await;
        limiter.wait().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_huge_capacity_does_not_preallocate() {
        let limiter = RateLimiter::new(usize::MAX);
        assert_eq!(limiter.capacity(), usize::MAX);
        limiter.acquire().await;
        limiter.acquire().await;
    }
}
