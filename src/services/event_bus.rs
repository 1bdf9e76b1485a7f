//! Broadcast-based implementation of the [`EventBus`] port.

use tokio::sync::broadcast;
use tracing::warn;

use crate::domain::ports::{EventBus, SchedulerEvent};

/// Fans events out to any number of subscribers over a `tokio::broadcast`
/// channel. Posting never blocks and never fails the caller: if there are
/// no subscribers, or a subscriber has lagged off the channel, the send
/// error is logged and swallowed (spec.md §4.3 — events are best-effort).
pub struct BroadcastEventBus {
    sender: broadcast::Sender<SchedulerEvent>,
}

impl BroadcastEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SchedulerEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus for BroadcastEventBus {
    fn post(&self, event: SchedulerEvent) {
        if let Err(err) = self.sender.send(event) {
            warn!(error = %err, "no subscribers for scheduler event, dropping");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Task, TaskState, TaskStatus};
    use chrono::Utc;

    #[tokio::test]
    async fn subscriber_receives_posted_event() {
        let bus = BroadcastEventBus::default();
        let mut rx = bus.subscribe();

        let task = Task::new("t1", "app", "host", vec![], Default::default(), Utc::now(), Utc::now());
        bus.post(SchedulerEvent::StatusUpdate {
            app_id: "app".into(),
            task,
            status: TaskStatus {
                task_id: "t1".into(),
                state: TaskState::Running,
                message: None,
            },
        });

        let received = rx.recv().await.unwrap();
        matches!(received, SchedulerEvent::StatusUpdate { .. });
    }

    #[test]
    fn post_without_subscribers_does_not_panic() {
        let bus = BroadcastEventBus::default();
        let task = Task::new("t1", "app", "host", vec![], Default::default(), Utc::now(), Utc::now());
        bus.post(SchedulerEvent::StatusUpdate {
            app_id: "app".into(),
            task,
            status: TaskStatus {
                task_id: "t1".into(),
                state: TaskState::Running,
                message: None,
            },
        });
    }
}
