//! Minimal `Driver`/`HealthChecks`/`SchedulerCallbacks` implementations that
//! only log. Useful for running the engine without a real cluster-master
//! transport wired in (there is no spec module for that transport; it's a
//! port by design).

use async_trait::async_trait;
use tracing::info;

use crate::domain::models::{App, TaskDescriptor, TaskStatus};
use crate::domain::ports::{Driver, HealthChecks, SchedulerCallbacks};

#[derive(Debug, Default)]
pub struct LoggingDriver;

#[async_trait]
impl Driver for LoggingDriver {
    async fn launch_tasks(&self, offer_id: &str, tasks: Vec<TaskDescriptor>) {
        info!(offer_id, task_count = tasks.len(), "launching tasks");
    }

    async fn decline_offer(&self, offer_id: &str) {
        info!(offer_id, "declining offer");
    }

    async fn kill_task(&self, task_id: &str) {
        info!(task_id, "killing task");
    }

    async fn reconcile_tasks(&self, statuses: Vec<TaskStatus>) {
        info!(count = statuses.len(), "reconciling tasks");
    }
}

#[derive(Debug, Default)]
pub struct LoggingHealthChecks;

#[async_trait]
impl HealthChecks for LoggingHealthChecks {
    async fn reconcile(&self, app: &App) {
        info!(app_id = %app.id, "reconciling health checks");
    }

    async fn remove(&self, app_id: &str) {
        info!(app_id, "removing health checks");
    }
}

#[derive(Debug, Default)]
pub struct LoggingCallbacks;

#[async_trait]
impl SchedulerCallbacks for LoggingCallbacks {
    async fn disconnected(&self) {
        info!("master disconnected");
    }
}
