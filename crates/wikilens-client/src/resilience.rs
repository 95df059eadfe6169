//! Client-side throttling for Wikidata.
//!
//! Wikimedia asks API clients to keep request rates modest. Every search and
//! `Special:EntityData` fetch made by [`WikidataClient`] first waits on the
//! client's [`RateLimiter`], including each backoff retry.
//!
//! [`WikidataClient`]: crate::WikidataClient

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::time::{sleep, Duration};

/// Spaces out requests to `requests_per_second` from the configuration.
///
/// Clones share one permit, so concurrent fetches from clones of a client
/// are serialized too.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    interval: Duration,
}

impl RateLimiter {
    /// A limiter for `requests_per_second`; zero is treated as one.
    pub fn new(requests_per_second: u32) -> Self {
        let per_second = u64::from(requests_per_second.max(1));
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            interval: Duration::from_millis(1000 / per_second),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for this request's turn.
    pub async fn acquire(&self) {
        // The semaphore is never closed, so acquisition only fails if that
        // invariant is broken; in that case we simply do not throttle.
        if let Ok(_permit) = self.semaphore.acquire().await {
            sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_rate() {
        assert_eq!(RateLimiter::new(5).interval(), Duration::from_millis(200));
        assert_eq!(RateLimiter::new(1).interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_zero_rate_does_not_divide_by_zero() {
        assert_eq!(RateLimiter::new(0).interval(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_clones_share_the_limit() {
        let limiter = RateLimiter::new(50);
        let clone = limiter.clone();
        let start = tokio::time::Instant::now();
        tokio::join!(limiter.acquire(), clone.acquire());
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_acquire_serializes_callers() {
        let limiter = RateLimiter::new(50);
        let start = tokio::time::Instant::now();
        tokio::join!(limiter.acquire(), limiter.acquire(), limiter.acquire());
        assert!(start.elapsed() >= Duration::from_millis(60));
    }
}
