//! Domain-level errors for the scheduler core.

use thiserror::Error;

/// Errors raised by the scheduler engine and its collaborators.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A collaborator (persistence, tracker) failed transiently. The caller
    /// is expected to kill the affected task or decline the affected offer
    /// rather than propagate this further.
    #[error("transient collaborator failure: {0}")]
    Transient(String),

    /// `update_app` was called for an app id with no current version.
    #[error("unknown app: {0}")]
    UnknownApp(String),

    /// `start_app` was called for an app id that already has a current
    /// version. Violating this is a programming error in the caller.
    #[error("app already exists: {0}")]
    AppAlreadyExists(String),

    /// `stop_app` could not expunge every version of the app.
    #[error("storage error expunging app {0}")]
    StorageError(String),

    /// Underlying persistence failure.
    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Convenience alias used throughout the scheduler core.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

impl From<serde_json::Error> for SchedulerError {
    fn from(err: serde_json::Error) -> Self {
        SchedulerError::Transient(format!("serialization: {err}"))
    }
}
