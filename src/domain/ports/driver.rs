//! Outbound commands to the cluster master (spec.md §6).
//!
//! The engine assumes these are fire-and-forget; acknowledgement arrives
//! only as a later callback (`statusUpdate`, `offerRescinded`, ...). None of
//! these methods return a `Result` for that reason — a failed send is the
//! binding's problem, not the scheduling engine's.

use async_trait::async_trait;

use crate::domain::models::{TaskDescriptor, TaskStatus};

#[async_trait]
pub trait Driver: Send + Sync {
    async fn launch_tasks(&self, offer_id: &str, tasks: Vec<TaskDescriptor>);
    async fn decline_offer(&self, offer_id: &str);
    async fn kill_task(&self, task_id: &str);
    async fn reconcile_tasks(&self, statuses: Vec<TaskStatus>);
}
