//! Governor-backed implementation of the [`RateLimiter`] port.
//!
//! Each app gets its own direct (unkeyed) token bucket so that
//! `setPermits` can swap one app's rate without disturbing any other's.
//! Governor limiters don't support changing their quota in place, so
//! `set_permits` simply replaces the map entry.

use async_trait::async_trait;
use governor::{Quota, RateLimiter as GovernorLimiter};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::ports::RateLimiter;

type DirectLimiter = GovernorLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A per-app token bucket. `None` means the app's rate is non-positive and
/// it never grants a token (spec.md §4.5's rate limiter gate is then
/// effectively closed, matching "rate <= 0" as "never fire").
enum Bucket {
    Limiter(DirectLimiter),
    Closed,
}

/// Per-app token-bucket rate limiter gating terminal-status-triggered scale
/// events (spec.md §4.3, §4.5).
pub struct GovernorRateLimiter {
    buckets: RwLock<HashMap<String, Arc<Bucket>>>,
}

impl GovernorRateLimiter {
    pub fn new() -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for GovernorRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimiter for GovernorRateLimiter {
    async fn set_permits(&self, app_id: &str, rate: f64) {
        let bucket = match NonZeroU32::new(rate.round() as u32) {
            Some(cells) => Bucket::Limiter(GovernorLimiter::direct(Quota::per_second(cells))),
            None => Bucket::Closed,
        };
        self.buckets
            .write()
            .await
            .insert(app_id.to_string(), Arc::new(bucket));
    }

    async fn try_acquire(&self, app_id: &str) -> bool {
        let bucket = self.buckets.read().await.get(app_id).cloned();
        match bucket.as_deref() {
            Some(Bucket::Limiter(limiter)) => limiter.check().is_ok(),
            Some(Bucket::Closed) | None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_app_never_acquires() {
        let limiter = GovernorRateLimiter::new();
        assert!(!limiter.try_acquire("unknown").await);
    }

    #[tokio::test]
    async fn zero_rate_never_acquires() {
        let limiter = GovernorRateLimiter::new();
        limiter.set_permits("x", 0.0).await;
        assert!(!limiter.try_acquire("x").await);
    }

    #[tokio::test]
    async fn positive_rate_grants_then_throttles() {
        let limiter = GovernorRateLimiter::new();
        limiter.set_permits("x", 1.0).await;
        assert!(limiter.try_acquire("x").await);
        // Burst of 1 at 1/sec: the very next attempt is throttled.
        assert!(!limiter.try_acquire("x").await);
    }

    #[tokio::test]
    async fn reconfiguring_replaces_bucket() {
        let limiter = GovernorRateLimiter::new();
        limiter.set_permits("x", 0.0).await;
        assert!(!limiter.try_acquire("x").await);
        limiter.set_permits("x", 5.0).await;
        assert!(limiter.try_acquire("x").await);
    }
}
