//! EventBus port: fan-out of lifecycle events to observers (spec.md §2, §6).

use serde::{Deserialize, Serialize};

use crate::domain::models::{Task, TaskStatus};

/// Events the scheduler core publishes. Kept narrow and scheduler-specific;
/// embedders that need a richer envelope can wrap these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SchedulerEvent {
    /// A task transitioned and the tracker accepted the new state.
    StatusUpdate { app_id: String, task: Task, status: TaskStatus },
    /// A framework message arrived from the master; published verbatim
    /// with no further state change (spec.md §4.7).
    FrameworkMessage { executor_id: String, data: Vec<u8> },
}

/// Fan-out publisher. `post` is best-effort: a failure to deliver must
/// never block the caller's tracker mutation (spec.md §4.3 invariants).
pub trait EventBus: Send + Sync {
    fn post(&self, event: SchedulerEvent);
}
