//! Durable store for the single `FrameworkId` a scheduler persists on
//! first registration and reuses on reconnect (spec.md §4.1).

use async_trait::async_trait;

use crate::domain::errors::SchedulerResult;
use crate::domain::models::FrameworkId;

#[async_trait]
pub trait FrameworkIdStore: Send + Sync {
    async fn load(&self) -> SchedulerResult<Option<FrameworkId>>;
    async fn save(&self, id: &FrameworkId) -> SchedulerResult<()>;
}
