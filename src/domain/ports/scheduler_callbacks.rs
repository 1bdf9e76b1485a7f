//! SchedulerCallbacks port (spec.md §6, §9).
//!
//! Constructor-injected rather than resolved from a global container, per
//! the redesign flag in spec.md §9.

use async_trait::async_trait;

#[async_trait]
pub trait SchedulerCallbacks: Send + Sync {
    /// Invoked on master disconnect. Canonical implementation abdicates
    /// leadership so a peer instance can take over (spec.md §4.7).
    async fn disconnected(&self);
}
