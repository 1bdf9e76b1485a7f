//! TaskTracker port: the authoritative in-memory index of tasks per app
//! (spec.md §2, §6).

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::errors::SchedulerResult;
use crate::domain::models::{Attributes, Task, TaskStatus};

#[async_trait]
pub trait TaskTracker: Send + Sync {
    /// Tasks observed in staging longer than the configured staged-task
    /// timeout (spec.md §4.2 pre-step, §9 open question).
    async fn check_staged_tasks(&self) -> SchedulerResult<Vec<Task>>;

    /// Record a newly launched task.
    async fn created(
        &self,
        app_id: &str,
        task_id: &str,
        host: &str,
        ports: Vec<u32>,
        attributes: Attributes,
        app_version: chrono::DateTime<chrono::Utc>,
    ) -> SchedulerResult<()>;

    /// Mark a task running and persist it. Returns the updated record, or
    /// `None` if no such task was tracked.
    async fn running(&self, app_id: &str, status: TaskStatus) -> SchedulerResult<Option<Task>>;

    /// Remove a terminal task from the tracker. Returns the prior record if
    /// one existed.
    async fn terminated(&self, app_id: &str, status: TaskStatus) -> SchedulerResult<Option<Task>>;

    /// Record any other status observation against a task.
    async fn status_update(&self, app_id: &str, status: TaskStatus) -> SchedulerResult<Option<Task>>;

    async fn contains(&self, app_id: &str) -> SchedulerResult<bool>;
    async fn count(&self, app_id: &str) -> SchedulerResult<usize>;
    async fn get(&self, app_id: &str) -> SchedulerResult<Vec<Task>>;
    async fn list(&self) -> SchedulerResult<HashMap<String, Vec<Task>>>;

    /// Select `n` tasks to kill from the live set for `app_id`. Selection
    /// policy (e.g. newest-first) is the tracker's own choice; the only
    /// contract is that exactly `n` (or fewer, if fewer exist) are returned.
    async fn take(&self, app_id: &str, n: usize) -> SchedulerResult<Vec<Task>>;

    /// Tear down an app's slot entirely (used by `stopApp`).
    async fn shut_down(&self, app_id: &str) -> SchedulerResult<()>;
}
