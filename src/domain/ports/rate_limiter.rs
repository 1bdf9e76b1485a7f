//! RateLimiter port: per-app token bucket gating how often scale events
//! may fire on terminal status (spec.md §2, §6).

use async_trait::async_trait;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Configure (or reconfigure) the permit rate, in tokens/sec, for an app.
    async fn set_permits(&self, app_id: &str, rate: f64);

    /// Attempt to acquire one token for `app_id`. Returns `false` if none
    /// are currently available.
    async fn try_acquire(&self, app_id: &str) -> bool;
}
