//! Durable mirror of [`InMemoryTaskTracker`](crate::services::task_tracker::InMemoryTaskTracker)
//! state, used for crash recovery. Implements the tracker's
//! [`TaskPersistence`] hook rather than a full `TaskTracker` on its own —
//! the engine always talks to the in-memory tracker; this is its write-behind
//! shadow (SPEC_FULL.md §2).

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::warn;

use crate::domain::models::Task;
use crate::services::task_tracker::TaskPersistence;

#[derive(Clone)]
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reload every mirrored task, for use at startup before reconciliation.
    pub async fn load_all(&self) -> Result<Vec<Task>, sqlx::Error> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT task_id, app_id, host, ports, attributes, app_version, status_history, staged_at FROM tasks",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().filter_map(TaskRow::into_task).collect())
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    task_id: String,
    app_id: String,
    host: String,
    ports: String,
    attributes: String,
    app_version: String,
    status_history: String,
    staged_at: String,
}

impl TaskRow {
    fn into_task(self) -> Option<Task> {
        let ports = serde_json::from_str(&self.ports).ok()?;
        let attributes = serde_json::from_str(&self.attributes).ok()?;
        let status_history = serde_json::from_str(&self.status_history).ok()?;
        let app_version = self.app_version.parse().ok()?;
        let staged_at = self.staged_at.parse().ok()?;
        Some(Task {
            task_id: self.task_id,
            app_id: self.app_id,
            host: self.host,
            ports,
            attributes,
            app_version,
            status_history,
            staged_at,
        })
    }
}

#[async_trait]
impl TaskPersistence for SqliteTaskStore {
    async fn persist(&self, task: &Task) {
        let Ok(ports) = serde_json::to_string(&task.ports) else {
            warn!(task_id = %task.task_id, "failed to serialize task ports, skipping persist");
            return;
        };
        let Ok(attributes) = serde_json::to_string(&task.attributes) else {
            warn!(task_id = %task.task_id, "failed to serialize task attributes, skipping persist");
            return;
        };
        let Ok(status_history) = serde_json::to_string(&task.status_history) else {
            warn!(task_id = %task.task_id, "failed to serialize task status history, skipping persist");
            return;
        };

        let result = sqlx::query(
            "INSERT INTO tasks (task_id, app_id, host, ports, attributes, app_version, status_history, staged_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (task_id) DO UPDATE SET
                 host = excluded.host,
                 ports = excluded.ports,
                 attributes = excluded.attributes,
                 app_version = excluded.app_version,
                 status_history = excluded.status_history,
                 staged_at = excluded.staged_at",
        )
        .bind(&task.task_id)
        .bind(&task.app_id)
        .bind(&task.host)
        .bind(ports)
        .bind(attributes)
        .bind(task.app_version.to_rfc3339())
        .bind(status_history)
        .bind(task.staged_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        if let Err(err) = result {
            warn!(task_id = %task.task_id, %err, "failed to persist task mirror");
        }
    }

    async fn remove(&self, task_id: &str) {
        if let Err(err) = sqlx::query("DELETE FROM tasks WHERE task_id = ?")
            .bind(task_id)
            .execute(&self.pool)
            .await
        {
            warn!(%task_id, %err, "failed to remove task mirror");
        }
    }
}
