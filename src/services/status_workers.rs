//! Optional fan-in worker pool for embedders that receive status updates
//! off a channel (e.g. a transport thread) rather than calling the engine
//! inline (spec.md §9 "futures in callbacks"). Routes every update for a
//! given task id to the same worker, so per-task ordering is preserved
//! even though distinct tasks are processed concurrently.

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::error;

use crate::domain::models::TaskStatus;

/// Sink a `StatusWorkerPool` drives sequentially within each worker lane.
#[async_trait]
pub trait StatusHandler: Send + Sync {
    async fn handle(&self, app_id: String, status: TaskStatus);
}

struct Lane {
    sender: mpsc::Sender<(String, TaskStatus)>,
    _worker: JoinHandle<()>,
}

/// A fixed pool of ordered lanes. `submit` never blocks the caller beyond a
/// channel send; processing happens on the lane's own task.
pub struct StatusWorkerPool {
    lanes: Vec<Lane>,
}

impl StatusWorkerPool {
    pub fn new(lane_count: usize, handler: Arc<dyn StatusHandler>, lane_capacity: usize) -> Self {
        assert!(lane_count > 0, "status worker pool needs at least one lane");
        let lanes = (0..lane_count)
            .map(|_| {
                let (sender, mut receiver) = mpsc::channel::<(String, TaskStatus)>(lane_capacity);
                let handler = handler.clone();
                let worker = tokio::spawn(async move {
                    while let Some((app_id, status)) = receiver.recv().await {
                        handler.handle(app_id, status).await;
                    }
                });
                Lane { sender, _worker: worker }
            })
            .collect();
        Self { lanes }
    }

    fn lane_index(&self, task_id: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        task_id.hash(&mut hasher);
        (hasher.finish() as usize) % self.lanes.len()
    }

    /// Route a status update to the lane owning its task id. Errors if the
    /// pool has been shut down (all receivers dropped), which is logged and
    /// swallowed: a lost status update is recoverable via reconciliation
    /// (spec.md §4.4), unlike a panic mid-transport.
    pub async fn submit(&self, app_id: String, status: TaskStatus) {
        let index = self.lane_index(&status.task_id);
        if let Err(err) = self.lanes[index].sender.send((app_id, status)).await {
            error!(error = %err, "status worker pool lane closed, dropping update");
        }
    }
}
