//! In-memory implementation of the [`TaskQueue`] port.
//!
//! A FIFO-ish multiset of apps awaiting placement. Ordering within the
//! queue is insertion order (spec.md §4.2 "Tie-breaking ... is insertion
//! order"); `remove_all` drains it in that order.

use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

use crate::domain::models::App;
use crate::domain::ports::TaskQueue;

pub struct InMemoryTaskQueue {
    entries: Mutex<VecDeque<App>>,
}

impl InMemoryTaskQueue {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
        }
    }
}

impl Default for InMemoryTaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskQueue for InMemoryTaskQueue {
    async fn add(&self, app: App) {
        self.entries.lock().await.push_back(app);
    }

    async fn add_all(&self, apps: Vec<App>) {
        let mut entries = self.entries.lock().await;
        entries.extend(apps);
    }

    async fn remove_all(&self) -> Vec<App> {
        let mut entries = self.entries.lock().await;
        entries.drain(..).collect()
    }

    async fn count(&self, app_id: &str) -> usize {
        self.entries
            .lock()
            .await
            .iter()
            .filter(|a| a.id == app_id)
            .count()
    }

    async fn purge(&self, app_id: &str) {
        self.entries.lock().await.retain(|a| a.id != app_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: &str) -> App {
        App::new(id, 1, 1.0)
    }

    #[tokio::test]
    async fn drains_in_insertion_order() {
        let queue = InMemoryTaskQueue::new();
        queue.add(app("a")).await;
        queue.add(app("b")).await;
        queue.add(app("a")).await;

        let drained = queue.remove_all().await;
        let ids: Vec<_> = drained.iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec!["a", "b", "a"]);
        assert!(queue.remove_all().await.is_empty());
    }

    #[tokio::test]
    async fn count_and_purge_are_per_app() {
        let queue = InMemoryTaskQueue::new();
        queue.add_all(vec![app("a"), app("b"), app("a")]).await;
        assert_eq!(queue.count("a").await, 2);
        assert_eq!(queue.count("b").await, 1);

        queue.purge("a").await;
        assert_eq!(queue.count("a").await, 0);
        assert_eq!(queue.count("b").await, 1);
    }
}
