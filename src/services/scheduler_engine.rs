//! The scheduler engine: the core callback handler for the cluster master
//! (spec.md §4). Owns offer matching, status handling, scaling,
//! reconciliation, and app lifecycle; every other module in this crate
//! exists to support this one.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::domain::errors::{SchedulerError, SchedulerResult};
use crate::domain::models::{App, AppDelta, FrameworkId, MasterInfo, Offer, TaskState, TaskStatus};
use crate::domain::ports::{
    AppRepository, Driver, EventBus, FrameworkIdStore, HealthChecks, RateLimiter,
    SchedulerCallbacks, SchedulerEvent, TaskBuilder, TaskQueue, TaskTracker,
};
use crate::domain::task_id;
use crate::services::app_lock::AppLockRegistry;
use crate::services::update_hook::RollingUpdateHook;

/// Outcome of walking the drained app queue against a single offer.
enum OfferOutcome {
    /// A task was launched; `requeue` holds every drained app that was not
    /// the match, in their original relative order.
    Matched { requeue: Vec<App> },
    /// No app in the queue matched; the whole drained list is requeued.
    Declined { requeue: Vec<App> },
    /// A collaborator failed while walking; the offer is declined and the
    /// entire pristine drained list is requeued untouched.
    Failed { requeue: Vec<App>, error: anyhow::Error },
}

pub struct SchedulerEngine {
    task_tracker: Arc<dyn TaskTracker>,
    task_queue: Arc<dyn TaskQueue>,
    app_repository: Arc<dyn AppRepository>,
    task_builder: Arc<dyn TaskBuilder>,
    rate_limiter: Arc<dyn RateLimiter>,
    event_bus: Arc<dyn EventBus>,
    driver: Arc<dyn Driver>,
    framework_id_store: Arc<dyn FrameworkIdStore>,
    health_checks: Arc<dyn HealthChecks>,
    callbacks: Arc<dyn SchedulerCallbacks>,
    update_hook: RollingUpdateHook,
    app_locks: AppLockRegistry,
}

impl SchedulerEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        task_tracker: Arc<dyn TaskTracker>,
        task_queue: Arc<dyn TaskQueue>,
        app_repository: Arc<dyn AppRepository>,
        task_builder: Arc<dyn TaskBuilder>,
        rate_limiter: Arc<dyn RateLimiter>,
        event_bus: Arc<dyn EventBus>,
        driver: Arc<dyn Driver>,
        framework_id_store: Arc<dyn FrameworkIdStore>,
        health_checks: Arc<dyn HealthChecks>,
        callbacks: Arc<dyn SchedulerCallbacks>,
        update_hook: RollingUpdateHook,
    ) -> Self {
        Self {
            task_tracker,
            task_queue,
            app_repository,
            task_builder,
            rate_limiter,
            event_bus,
            driver,
            framework_id_store,
            health_checks,
            callbacks,
            update_hook,
            app_locks: AppLockRegistry::new(),
        }
    }

    // ---- §4.1 registration -------------------------------------------

    /// Persist the framework identity. The caller (the enclosing service)
    /// is expected to follow up with `reconcile_and_scale_tasks` itself, to
    /// keep this callback's own latency bounded.
    pub async fn registered(
        &self,
        framework_id: FrameworkId,
        master_info: MasterInfo,
    ) -> SchedulerResult<()> {
        info!(framework_id = %framework_id.0, master = %master_info.host, "registered with master");
        self.framework_id_store.save(&framework_id).await
    }

    pub fn reregistered(&self, master_info: MasterInfo) {
        info!(master = %master_info.host, "reregistered with master, identity already persisted");
    }

    // ---- §4.2 offer handling ------------------------------------------

    pub async fn resource_offers(&self, offers: Vec<Offer>) {
        match self.task_tracker.check_staged_tasks().await {
            Ok(stale) => {
                for task in stale {
                    warn!(task_id = %task.task_id, "task stuck in staging past timeout, killing");
                    self.driver.kill_task(&task.task_id).await;
                }
            }
            Err(err) => error!(error = %err, "failed checking for staged tasks"),
        }

        for offer in offers {
            self.handle_offer(offer).await;
        }
    }

    async fn handle_offer(&self, offer: Offer) {
        let apps = self.task_queue.remove_all().await;
        match self.walk_offer(&offer, apps).await {
            OfferOutcome::Matched { requeue } => {
                self.task_queue.add_all(requeue).await;
            }
            OfferOutcome::Declined { requeue } => {
                self.driver.decline_offer(&offer.offer_id).await;
                self.task_queue.add_all(requeue).await;
            }
            OfferOutcome::Failed { requeue, error } => {
                error!(offer_id = %offer.offer_id, error = %error, "offer processing failed, declining");
                self.driver.decline_offer(&offer.offer_id).await;
                self.task_queue.add_all(requeue).await;
            }
        }
    }

    async fn walk_offer(&self, offer: &Offer, apps: Vec<App>) -> OfferOutcome {
        let mut tried = Vec::with_capacity(apps.len());

        for (index, app) in apps.iter().enumerate() {
            match self.task_builder.build(app, offer).await {
                Ok(Some(descriptor)) => {
                    if let Err(err) = self
                        .task_tracker
                        .created(
                            &app.id,
                            &descriptor.task_id,
                            &descriptor.host,
                            descriptor.ports.clone(),
                            offer.attributes.clone(),
                            app.version,
                        )
                        .await
                    {
                        error!(app_id = %app.id, error = %err, "failed recording launched task");
                    }
                    self.driver
                        .launch_tasks(&offer.offer_id, vec![descriptor])
                        .await;

                    let mut requeue = tried;
                    requeue.extend(apps[index + 1..].iter().cloned());
                    return OfferOutcome::Matched { requeue };
                }
                Ok(None) => tried.push(app.clone()),
                Err(error) => return OfferOutcome::Failed { requeue: apps, error },
            }
        }

        OfferOutcome::Declined { requeue: tried }
    }

    // ---- §4.3 status updates -------------------------------------------

    pub async fn status_update(&self, status: TaskStatus) {
        let Some(app_id) = task_id::app_id_of(&status.task_id) else {
            warn!(task_id = %status.task_id, "status for task id with no recoverable app id, killing");
            self.driver.kill_task(&status.task_id).await;
            return;
        };
        let app_id = app_id.to_string();

        if status.state.is_terminal() {
            self.handle_terminal_status(&app_id, status).await;
        } else if status.state == TaskState::Running {
            self.handle_running_status(&app_id, status).await;
        } else if status.state == TaskState::Staging {
            match self.task_tracker.contains(&app_id).await {
                Ok(true) => self.handle_other_status(&app_id, status).await,
                Ok(false) => {
                    warn!(app_id = %app_id, task_id = %status.task_id, "staging update for unknown app, killing");
                    self.driver.kill_task(&status.task_id).await;
                }
                Err(err) => {
                    error!(app_id = %app_id, error = %err, "failed checking tracker for app");
                    self.driver.kill_task(&status.task_id).await;
                }
            }
        } else {
            self.handle_other_status(&app_id, status).await;
        }
    }

    async fn handle_terminal_status(&self, app_id: &str, status: TaskStatus) {
        match self.task_tracker.terminated(app_id, status.clone()).await {
            Ok(Some(task)) => {
                self.event_bus.post(SchedulerEvent::StatusUpdate {
                    app_id: app_id.to_string(),
                    task,
                    status,
                });
            }
            Ok(None) => {}
            Err(err) => error!(app_id = %app_id, error = %err, "failed removing terminated task"),
        }

        if self.rate_limiter.try_acquire(app_id).await {
            self.scale_by_name(app_id).await;
        } else {
            debug!(app_id = %app_id, "rate limiter denied scale on terminal status");
        }
    }

    async fn handle_running_status(&self, app_id: &str, status: TaskStatus) {
        match self.task_tracker.running(app_id, status.clone()).await {
            Ok(Some(task)) => {
                self.event_bus.post(SchedulerEvent::StatusUpdate {
                    app_id: app_id.to_string(),
                    task,
                    status,
                });
            }
            Ok(None) => {
                warn!(app_id = %app_id, task_id = %status.task_id, "running update for untracked task, killing");
                self.driver.kill_task(&status.task_id).await;
            }
            Err(err) => {
                error!(app_id = %app_id, error = %err, "failed marking task running, killing");
                self.driver.kill_task(&status.task_id).await;
            }
        }
    }

    async fn handle_other_status(&self, app_id: &str, status: TaskStatus) {
        match self.task_tracker.status_update(app_id, status.clone()).await {
            Ok(Some(_)) => {}
            Ok(None) => self.driver.kill_task(&status.task_id).await,
            Err(err) => {
                error!(app_id = %app_id, error = %err, "failed recording status, killing task");
                self.driver.kill_task(&status.task_id).await;
            }
        }
    }

    // ---- §4.4 reconciliation -------------------------------------------

    pub async fn reconcile_and_scale_tasks(&self) -> SchedulerResult<()> {
        let app_ids = self.app_repository.app_ids().await?;
        for app_id in &app_ids {
            self.scale_by_name(app_id).await;
        }

        let tracked = self.task_tracker.list().await?;

        let latest_statuses = tracked
            .values()
            .flat_map(|tasks| tasks.iter())
            .filter_map(|task| task.status_history.last().cloned())
            .collect();
        self.driver.reconcile_tasks(latest_statuses).await;

        let known: HashSet<&String> = app_ids.iter().collect();
        for (app_id, tasks) in &tracked {
            if known.contains(app_id) {
                continue;
            }
            for task in tasks {
                self.driver.kill_task(&task.task_id).await;
            }
            self.task_tracker.shut_down(app_id).await?;
        }

        Ok(())
    }

    // ---- §4.5 scaling ----------------------------------------------------

    pub async fn scale_by_name(&self, app_id: &str) {
        match self.app_repository.current_version(app_id).await {
            Ok(Some(app)) => {
                if let Err(err) = self.scale(&app).await {
                    error!(app_id = %app_id, error = %err, "scale failed");
                }
            }
            Ok(None) => warn!(app_id = %app_id, "scale requested for unknown app"),
            Err(err) => error!(app_id = %app_id, error = %err, "failed loading app for scale"),
        }
    }

    pub async fn scale(&self, app: &App) -> SchedulerResult<()> {
        let _guard = self.app_locks.acquire(&app.id).await;

        let current = self.task_tracker.count(&app.id).await?;
        let queued = self.task_queue.count(&app.id).await;
        let target = app.instances as usize;

        if target > current {
            let to_queue = target.saturating_sub(current + queued);
            if to_queue > 0 {
                let copies = std::iter::repeat(app.clone()).take(to_queue).collect();
                self.task_queue.add_all(copies).await;
            } else {
                debug!(app_id = %app.id, "enough launch intents already in flight");
            }
        } else if target < current {
            self.task_queue.purge(&app.id).await;
            let to_kill = current - target;
            let victims = self.task_tracker.take(&app.id, to_kill).await?;
            for task in victims {
                self.driver.kill_task(&task.task_id).await;
            }
        }

        Ok(())
    }

    // ---- §4.6 app lifecycle ----------------------------------------------

    pub async fn start_app(&self, app: App) -> SchedulerResult<()> {
        if self
            .app_repository
            .current_version(&app.id)
            .await?
            .is_some()
        {
            return Err(SchedulerError::AppAlreadyExists(app.id.clone()));
        }

        self.app_repository.store(&app).await?;
        self.rate_limiter.set_permits(&app.id, app.task_rate_limit).await;
        self.scale(&app).await?;
        self.health_checks.reconcile(&app).await;
        Ok(())
    }

    pub async fn stop_app(&self, app_id: &str) -> SchedulerResult<()> {
        let results = self.app_repository.expunge(app_id).await?;
        if results.iter().any(|ok| !ok) {
            return Err(SchedulerError::StorageError(app_id.to_string()));
        }

        self.health_checks.remove(app_id).await;

        let tasks = self.task_tracker.get(app_id).await?;
        for task in tasks {
            self.driver.kill_task(&task.task_id).await;
        }

        self.task_queue.purge(app_id).await;
        self.task_tracker.shut_down(app_id).await?;
        self.app_locks.forget(app_id).await;
        Ok(())
    }

    pub async fn update_app(&self, id: &str, delta: AppDelta) -> SchedulerResult<App> {
        let current = self
            .app_repository
            .current_version(id)
            .await?
            .ok_or_else(|| SchedulerError::UnknownApp(id.to_string()))?;

        let updated = delta.apply(&current, Utc::now());
        self.health_checks.reconcile(&updated).await;
        self.app_repository.store(&updated).await?;
        self.rate_limiter
            .set_permits(&updated.id, updated.task_rate_limit)
            .await;

        let restarted = self
            .update_hook
            .apply(&updated, self.task_tracker.as_ref(), self.driver.as_ref())
            .await?;
        info!(app_id = %id, restarted, "rolling update applied");

        Ok(updated)
    }

    // ---- §4.7 disconnect, slave/executor loss, error ----------------------

    pub async fn disconnected(&self) {
        warn!("disconnected from master");
        self.callbacks.disconnected().await;
    }

    pub fn slave_lost(&self, slave_id: &str) {
        warn!(slave_id = %slave_id, "slave lost, awaiting authoritative status updates");
    }

    pub fn executor_lost(&self, executor_id: &str) {
        warn!(executor_id = %executor_id, "executor lost, awaiting authoritative status updates");
    }

    pub fn offer_rescinded(&self, offer_id: &str) {
        info!(offer_id = %offer_id, "offer rescinded");
    }

    pub fn framework_message(&self, executor_id: &str, data: Vec<u8>) {
        self.event_bus.post(SchedulerEvent::FrameworkMessage {
            executor_id: executor_id.to_string(),
            data,
        });
    }

    /// Fatal master-level error: log and exit the process with status 9.
    /// The exit is scheduled on its own task so it cannot deadlock on any
    /// in-process shutdown hook running on the calling stack.
    pub fn error(&self, message: &str) {
        error!(message = %message, "fatal master error, committing suicide");
        suicide();
    }
}

fn suicide() {
    tokio::spawn(async {
        std::process::exit(9);
    });
}
