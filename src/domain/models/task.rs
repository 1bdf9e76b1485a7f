//! Task record domain model (spec.md §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::status::{TaskLifecycle, TaskState, TaskStatus};

/// Attributes captured from the offer a task was matched against (rack,
/// zone, custom labels, etc). Opaque beyond being carried and reported.
pub type Attributes = HashMap<String, String>;

/// A concrete, running (or about to run) copy of an app.
///
/// Invariant: `app_id` either references a live app or the task is pending
/// cleanup via reconciliation (spec.md §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub app_id: String,
    pub host: String,
    pub ports: Vec<u32>,
    pub attributes: Attributes,
    pub app_version: DateTime<Utc>,
    /// Every status ever observed for this task, oldest first.
    pub status_history: Vec<TaskStatus>,
    pub staged_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        task_id: impl Into<String>,
        app_id: impl Into<String>,
        host: impl Into<String>,
        ports: Vec<u32>,
        attributes: Attributes,
        app_version: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            app_id: app_id.into(),
            host: host.into(),
            ports,
            attributes,
            app_version,
            status_history: Vec::new(),
            staged_at: now,
        }
    }

    /// Derived lifecycle state: `staging | running | terminal`. A freshly
    /// created task with no recorded status is `staging`.
    pub fn lifecycle(&self) -> TaskLifecycle {
        self.status_history
            .last()
            .map(|s| TaskLifecycle::from(s.state))
            .unwrap_or(TaskLifecycle::Staging)
    }

    pub fn latest_state(&self) -> Option<TaskState> {
        self.status_history.last().map(|s| s.state)
    }

    pub fn record(&mut self, status: TaskStatus) {
        self.status_history.push(status);
    }
}
