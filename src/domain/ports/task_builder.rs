//! TaskBuilder port: given (app, offer), either builds a task descriptor
//! and reserves ports, or reports no match. Internal matching strategy is a
//! non-goal (spec.md §1) — this port only fixes the contract.

use async_trait::async_trait;

use crate::domain::models::{App, Offer, TaskDescriptor};

#[async_trait]
pub trait TaskBuilder: Send + Sync {
    /// Attempt to place `app` on `offer`. `Ok(None)` means no match; the
    /// caller re-queues the app and keeps walking. `Err` is a collaborator
    /// failure and is treated like a non-match by the offer path, except it
    /// is also logged (spec.md §4.2 point 4).
    async fn build(&self, app: &App, offer: &Offer) -> anyhow::Result<Option<TaskDescriptor>>;
}
