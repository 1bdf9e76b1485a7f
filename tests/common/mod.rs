//! Shared fixtures for the scheduler engine integration tests: in-memory
//! collaborators plus a `RecordingDriver` test double, mirroring the unit
//! fixtures in `services::scheduler_engine`'s own test module but built
//! purely against public crate API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use fleetsched::domain::errors::SchedulerResult;
use fleetsched::domain::models::{App, FrameworkId, Offer, Resource, TaskDescriptor, TaskStatus};
use fleetsched::domain::ports::{AppRepository, Driver, FrameworkIdStore, HealthChecks, SchedulerCallbacks};
use fleetsched::services::{
    BroadcastEventBus, GovernorRateLimiter, InMemoryTaskQueue, InMemoryTaskTracker, RollingUpdateHook,
    SchedulerEngine, SimpleTaskBuilder,
};

#[derive(Default)]
pub struct RecordingDriver {
    pub launched: StdMutex<Vec<(String, Vec<TaskDescriptor>)>>,
    pub declined: StdMutex<Vec<String>>,
    pub killed: StdMutex<Vec<String>>,
    pub reconciled: StdMutex<Vec<Vec<TaskStatus>>>,
}

#[async_trait]
impl Driver for RecordingDriver {
    async fn launch_tasks(&self, offer_id: &str, tasks: Vec<TaskDescriptor>) {
        self.launched.lock().unwrap().push((offer_id.to_string(), tasks));
    }
    async fn decline_offer(&self, offer_id: &str) {
        self.declined.lock().unwrap().push(offer_id.to_string());
    }
    async fn kill_task(&self, task_id: &str) {
        self.killed.lock().unwrap().push(task_id.to_string());
    }
    async fn reconcile_tasks(&self, statuses: Vec<TaskStatus>) {
        self.reconciled.lock().unwrap().push(statuses);
    }
}

pub struct NoopHealthChecks;
#[async_trait]
impl HealthChecks for NoopHealthChecks {
    async fn reconcile(&self, _app: &App) {}
    async fn remove(&self, _app_id: &str) {}
}

pub struct NoopCallbacks;
#[async_trait]
impl SchedulerCallbacks for NoopCallbacks {
    async fn disconnected(&self) {}
}

pub struct InMemoryAppRepository {
    apps: RwLock<HashMap<String, App>>,
}

impl InMemoryAppRepository {
    pub fn new() -> Self {
        Self { apps: RwLock::new(HashMap::new()) }
    }
}

#[async_trait]
impl AppRepository for InMemoryAppRepository {
    async fn store(&self, app: &App) -> SchedulerResult<()> {
        self.apps.write().await.insert(app.id.clone(), app.clone());
        Ok(())
    }
    async fn current_version(&self, id: &str) -> SchedulerResult<Option<App>> {
        Ok(self.apps.read().await.get(id).cloned())
    }
    async fn expunge(&self, id: &str) -> SchedulerResult<Vec<bool>> {
        Ok(self.apps.write().await.remove(id).map(|_| true).into_iter().collect())
    }
    async fn app_ids(&self) -> SchedulerResult<Vec<String>> {
        Ok(self.apps.read().await.keys().cloned().collect())
    }
}

pub struct FrameworkIdMemory(pub RwLock<Option<FrameworkId>>);

#[async_trait]
impl FrameworkIdStore for FrameworkIdMemory {
    async fn load(&self) -> SchedulerResult<Option<FrameworkId>> {
        Ok(self.0.read().await.clone())
    }
    async fn save(&self, id: &FrameworkId) -> SchedulerResult<()> {
        *self.0.write().await = Some(id.clone());
        Ok(())
    }
}

pub fn offer_with(cpus: f64, mem: f64, ports: f64) -> Offer {
    Offer {
        offer_id: "offer-1".to_string(),
        host: "host-1".to_string(),
        attributes: Default::default(),
        resources: vec![
            Resource { name: "cpus".to_string(), scalar: cpus },
            Resource { name: "mem".to_string(), scalar: mem },
            Resource { name: "ports".to_string(), scalar: ports },
        ],
    }
}

#[allow(clippy::type_complexity)]
pub fn build_engine() -> (
    Arc<SchedulerEngine>,
    Arc<RecordingDriver>,
    Arc<InMemoryTaskTracker>,
    Arc<InMemoryTaskQueue>,
    Arc<InMemoryAppRepository>,
    Arc<GovernorRateLimiter>,
) {
    let tracker = Arc::new(InMemoryTaskTracker::new(Duration::from_secs(60)));
    let queue = Arc::new(InMemoryTaskQueue::new());
    let repo = Arc::new(InMemoryAppRepository::new());
    let builder = Arc::new(SimpleTaskBuilder::new(0.5, 128.0, 1));
    let limiter = Arc::new(GovernorRateLimiter::new());
    let bus = Arc::new(BroadcastEventBus::default());
    let driver = Arc::new(RecordingDriver::default());
    let fw_store = Arc::new(FrameworkIdMemory(RwLock::new(None)));
    let health = Arc::new(NoopHealthChecks);
    let callbacks = Arc::new(NoopCallbacks);

    let engine = Arc::new(SchedulerEngine::new(
        tracker.clone(),
        queue.clone(),
        repo.clone(),
        builder,
        limiter.clone(),
        bus,
        driver.clone(),
        fw_store,
        health,
        callbacks,
        RollingUpdateHook::default(),
    ));
    (engine, driver, tracker, queue, repo, limiter)
}
