//! Rolling kill-and-relaunch update hook (spec.md §9 "update hook" open
//! question, resolved in SPEC_FULL.md §9).
//!
//! `updateApp` persists a new app version and returns; it does not itself
//! relaunch anything. This hook is the piece that nudges tasks still
//! running the stale version toward replacement, by killing a bounded
//! number of them per call and letting the existing
//! scale-on-terminal-status path launch their replacements at the new
//! version. Calling it repeatedly (e.g. once per reconcile tick) converges
//! to zero stale tasks, which makes it safe to call unconditionally.

use tracing::info;

use crate::domain::models::App;
use crate::domain::ports::{Driver, TaskTracker};
use crate::domain::errors::SchedulerResult;

pub struct RollingUpdateHook {
    max_parallel_restarts: usize,
}

impl RollingUpdateHook {
    pub fn new(max_parallel_restarts: usize) -> Self {
        Self { max_parallel_restarts }
    }

    /// Kill up to `max_parallel_restarts` tasks of `app` still running a
    /// version other than `app.version`. Idempotent: tasks already on the
    /// current version are never touched.
    pub async fn apply(
        &self,
        app: &App,
        tracker: &dyn TaskTracker,
        driver: &dyn Driver,
    ) -> SchedulerResult<usize> {
        let tasks = tracker.get(&app.id).await?;
        let stale: Vec<_> = tasks
            .into_iter()
            .filter(|t| t.app_version != app.version)
            .take(self.max_parallel_restarts)
            .collect();

        for task in &stale {
            info!(app_id = %app.id, task_id = %task.task_id, "killing stale-version task for rolling update");
            driver.kill_task(&task.task_id).await;
        }
        Ok(stale.len())
    }
}

impl Default for RollingUpdateHook {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{TaskDescriptor, TaskStatus};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex as StdMutex;

    use crate::services::task_tracker::InMemoryTaskTracker;

    #[derive(Default)]
    struct RecordingDriver {
        killed: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl Driver for RecordingDriver {
        async fn launch_tasks(&self, _offer_id: &str, _tasks: Vec<TaskDescriptor>) {}
        async fn decline_offer(&self, _offer_id: &str) {}
        async fn kill_task(&self, task_id: &str) {
            self.killed.lock().unwrap().push(task_id.to_string());
        }
        async fn reconcile_tasks(&self, _statuses: Vec<TaskStatus>) {}
    }

    #[tokio::test]
    async fn kills_only_stale_version_tasks_up_to_limit() {
        let tracker = InMemoryTaskTracker::new(std::time::Duration::from_secs(60));
        let driver = RecordingDriver::default();

        let old_version = Utc::now();
        let new_version = old_version + chrono::Duration::seconds(1);

        tracker
            .created("app", "stale-1", "h", vec![], Default::default(), old_version)
            .await
            .unwrap();
        tracker
            .created("app", "stale-2", "h", vec![], Default::default(), old_version)
            .await
            .unwrap();
        tracker
            .created("app", "fresh-1", "h", vec![], Default::default(), new_version)
            .await
            .unwrap();

        let app = App {
            id: "app".into(),
            instances: 2,
            task_rate_limit: 1.0,
            version: new_version,
            launch_params: Default::default(),
        };

        let hook = RollingUpdateHook::new(1);
        let killed_count = hook.apply(&app, &tracker, &driver).await.unwrap();
        assert_eq!(killed_count, 1);
        assert_eq!(driver.killed.lock().unwrap().len(), 1);
        assert!(driver.killed.lock().unwrap()[0].starts_with("stale"));
    }

    #[tokio::test]
    async fn no_stale_tasks_kills_nothing() {
        let tracker = InMemoryTaskTracker::new(std::time::Duration::from_secs(60));
        let driver = RecordingDriver::default();
        let version = Utc::now();

        tracker
            .created("app", "t1", "h", vec![], Default::default(), version)
            .await
            .unwrap();

        let app = App {
            id: "app".into(),
            instances: 1,
            task_rate_limit: 1.0,
            version,
            launch_params: Default::default(),
        };

        let hook = RollingUpdateHook::new(5);
        let killed_count = hook.apply(&app, &tracker, &driver).await.unwrap();
        assert_eq!(killed_count, 0);
        assert!(driver.killed.lock().unwrap().is_empty());
    }
}
