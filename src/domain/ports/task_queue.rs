//! TaskQueue port: a multiset of apps awaiting placement (spec.md §2, §6).
//!
//! Accessed only by `resourceOffers` and the scaling paths; must support
//! concurrent `add`/`add_all`/`remove_all`/`purge`/`count` (spec.md §5).

use async_trait::async_trait;

use crate::domain::models::App;

#[async_trait]
pub trait TaskQueue: Send + Sync {
    async fn add(&self, app: App);
    async fn add_all(&self, apps: Vec<App>);
    /// Drain the queue, returning everything it held in FIFO order.
    async fn remove_all(&self) -> Vec<App>;
    async fn count(&self, app_id: &str) -> usize;
    /// Remove every queued entry for `app_id`.
    async fn purge(&self, app_id: &str);
}
