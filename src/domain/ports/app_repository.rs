//! AppRepository port: versioned durable store of app definitions
//! (spec.md §2, §6).

use async_trait::async_trait;

use crate::domain::errors::SchedulerResult;
use crate::domain::models::App;

#[async_trait]
pub trait AppRepository: Send + Sync {
    async fn store(&self, app: &App) -> SchedulerResult<()>;
    async fn current_version(&self, id: &str) -> SchedulerResult<Option<App>>;
    /// Expunge every version of `id`. Returns one `true` per row actually
    /// deleted; an empty vec means none matched, which is a no-op success
    /// (retrying `stopApp` after it already succeeded must not error —
    /// spec.md §4.6). A genuine storage fault is surfaced as `Err`, never
    /// as a `false` entry.
    async fn expunge(&self, id: &str) -> SchedulerResult<Vec<bool>>;
    async fn app_ids(&self) -> SchedulerResult<Vec<String>>;
}
