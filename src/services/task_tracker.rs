//! In-memory implementation of the [`TaskTracker`] port, optionally backed
//! by a durable mirror for crash recovery (spec.md §2, §6).

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::errors::SchedulerResult;
use crate::domain::models::{Attributes, Task, TaskState, TaskStatus};
use crate::domain::ports::TaskTracker;

/// Hook for persisting task records as they change. Kept separate from the
/// `TaskTracker` port itself — the port's contract is in-memory indexing;
/// persistence is an orthogonal concern the core delegates to whatever
/// store the embedder wires in (spec.md §1 "persistence encoding" is a
/// non-goal of the core).
#[async_trait]
pub trait TaskPersistence: Send + Sync {
    async fn persist(&self, task: &Task);
    async fn remove(&self, task_id: &str);
}

/// An app's slot of tracked tasks, keyed by task id.
type AppSlot = HashMap<String, Task>;

pub struct InMemoryTaskTracker {
    apps: RwLock<HashMap<String, AppSlot>>,
    staged_timeout: Duration,
    persistence: Option<Arc<dyn TaskPersistence>>,
}

impl InMemoryTaskTracker {
    pub fn new(staged_timeout: Duration) -> Self {
        Self {
            apps: RwLock::new(HashMap::new()),
            staged_timeout,
            persistence: None,
        }
    }

    pub fn with_persistence(mut self, persistence: Arc<dyn TaskPersistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    fn find_task_id(status: &TaskStatus) -> &str {
        &status.task_id
    }
}

#[async_trait]
impl TaskTracker for InMemoryTaskTracker {
    async fn check_staged_tasks(&self) -> SchedulerResult<Vec<Task>> {
        let now = Utc::now();
        let apps = self.apps.read().await;
        let stale = apps
            .values()
            .flat_map(|slot| slot.values())
            .filter(|task| {
                matches!(task.lifecycle(), crate::domain::models::TaskLifecycle::Staging)
                    && now.signed_duration_since(task.staged_at).to_std().unwrap_or_default()
                        > self.staged_timeout
            })
            .cloned()
            .collect();
        Ok(stale)
    }

    async fn created(
        &self,
        app_id: &str,
        task_id: &str,
        host: &str,
        ports: Vec<u32>,
        attributes: Attributes,
        app_version: chrono::DateTime<Utc>,
    ) -> SchedulerResult<()> {
        let now = Utc::now();
        let task = Task::new(task_id, app_id, host, ports, attributes, app_version, now);
        if let Some(p) = &self.persistence {
            p.persist(&task).await;
        }
        self.apps
            .write()
            .await
            .entry(app_id.to_string())
            .or_default()
            .insert(task_id.to_string(), task);
        Ok(())
    }

    async fn running(&self, app_id: &str, status: TaskStatus) -> SchedulerResult<Option<Task>> {
        let task_id = Self::find_task_id(&status).to_string();
        let mut apps = self.apps.write().await;
        let Some(slot) = apps.get_mut(app_id) else {
            return Ok(None);
        };
        let Some(task) = slot.get_mut(&task_id) else {
            return Ok(None);
        };
        task.record(status);
        let snapshot = task.clone();
        if let Some(p) = &self.persistence {
            p.persist(&snapshot).await;
        }
        Ok(Some(snapshot))
    }

    async fn terminated(&self, app_id: &str, status: TaskStatus) -> SchedulerResult<Option<Task>> {
        let task_id = Self::find_task_id(&status).to_string();
        let mut apps = self.apps.write().await;
        let removed = apps.get_mut(app_id).and_then(|slot| slot.remove(&task_id));
        if removed.is_some() {
            if let Some(p) = &self.persistence {
                p.remove(&task_id).await;
            }
        }
        Ok(removed)
    }

    async fn status_update(&self, app_id: &str, status: TaskStatus) -> SchedulerResult<Option<Task>> {
        let task_id = Self::find_task_id(&status).to_string();
        let mut apps = self.apps.write().await;
        let Some(slot) = apps.get_mut(app_id) else {
            return Ok(None);
        };
        let Some(task) = slot.get_mut(&task_id) else {
            return Ok(None);
        };
        task.record(status);
        let snapshot = task.clone();
        if let Some(p) = &self.persistence {
            p.persist(&snapshot).await;
        }
        Ok(Some(snapshot))
    }

    async fn contains(&self, app_id: &str) -> SchedulerResult<bool> {
        Ok(self.apps.read().await.contains_key(app_id))
    }

    async fn count(&self, app_id: &str) -> SchedulerResult<usize> {
        Ok(self
            .apps
            .read()
            .await
            .get(app_id)
            .map(|slot| slot.len())
            .unwrap_or(0))
    }

    async fn get(&self, app_id: &str) -> SchedulerResult<Vec<Task>> {
        Ok(self
            .apps
            .read()
            .await
            .get(app_id)
            .map(|slot| slot.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn list(&self) -> SchedulerResult<HashMap<String, Vec<Task>>> {
        Ok(self
            .apps
            .read()
            .await
            .iter()
            .map(|(app_id, slot)| (app_id.clone(), slot.values().cloned().collect()))
            .collect())
    }

    async fn take(&self, app_id: &str, n: usize) -> SchedulerResult<Vec<Task>> {
        let apps = self.apps.read().await;
        let Some(slot) = apps.get(app_id) else {
            return Ok(Vec::new());
        };
        // Newest-first: a task that has not yet reported any status is
        // treated as "just staged" and sorts after anything with history.
        let mut tasks: Vec<Task> = slot.values().cloned().collect();
        tasks.sort_by(|a, b| b.staged_at.cmp(&a.staged_at));
        tasks.truncate(n);
        Ok(tasks)
    }

    async fn shut_down(&self, app_id: &str) -> SchedulerResult<()> {
        let removed = self.apps.write().await.remove(app_id);
        if let (Some(slot), Some(p)) = (removed, &self.persistence) {
            for task_id in slot.keys() {
                p.remove(task_id).await;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryTaskTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTaskTracker").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(task_id: &str, state: TaskState) -> TaskStatus {
        TaskStatus {
            task_id: task_id.to_string(),
            state,
            message: None,
        }
    }

    #[tokio::test]
    async fn created_then_contains_and_count() {
        let tracker = InMemoryTaskTracker::new(Duration::from_secs(60));
        tracker
            .created("x", "t1", "host1", vec![], Default::default(), Utc::now())
            .await
            .unwrap();

        assert!(tracker.contains("x").await.unwrap());
        assert_eq!(tracker.count("x").await.unwrap(), 1);
        assert!(!tracker.contains("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn running_then_terminated_removes_task() {
        let tracker = InMemoryTaskTracker::new(Duration::from_secs(60));
        tracker
            .created("x", "t1", "host1", vec![], Default::default(), Utc::now())
            .await
            .unwrap();

        let running = tracker
            .running("x", status("t1", TaskState::Running))
            .await
            .unwrap();
        assert!(running.is_some());
        assert_eq!(tracker.count("x").await.unwrap(), 1);

        let removed = tracker
            .terminated("x", status("t1", TaskState::Finished))
            .await
            .unwrap();
        assert!(removed.is_some());
        assert_eq!(tracker.count("x").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_task_status_update_returns_none() {
        let tracker = InMemoryTaskTracker::new(Duration::from_secs(60));
        let result = tracker
            .status_update("x", status("ghost-task", TaskState::Staging))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn take_respects_count_and_selects_from_live_set() {
        let tracker = InMemoryTaskTracker::new(Duration::from_secs(60));
        for i in 0..3 {
            tracker
                .created("x", &format!("t{i}"), "host", vec![], Default::default(), Utc::now())
                .await
                .unwrap();
        }
        let taken = tracker.take("x", 2).await.unwrap();
        assert_eq!(taken.len(), 2);
    }

    #[tokio::test]
    async fn shut_down_removes_app_slot() {
        let tracker = InMemoryTaskTracker::new(Duration::from_secs(60));
        tracker
            .created("x", "t1", "host", vec![], Default::default(), Utc::now())
            .await
            .unwrap();
        tracker.shut_down("x").await.unwrap();
        assert!(!tracker.contains("x").await.unwrap());
    }
}
