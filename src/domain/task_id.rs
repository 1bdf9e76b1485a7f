//! Deterministic task id scheme: every task id embeds its owning app id, so
//! the engine can recover `appId` from a bare `taskId` in `statusUpdate`
//! without a side lookup (spec.md §4.3 "the engine derives appId from
//! taskId via a deterministic id scheme owned by the id utility").

const SEPARATOR: &str = "::";

/// Mint a task id for `app_id`. The suffix only needs to be unique per app;
/// callers (currently `TaskBuilder` adapters) supply it.
pub fn build(app_id: &str, unique_suffix: impl std::fmt::Display) -> String {
    format!("{app_id}{SEPARATOR}{unique_suffix}")
}

/// Recover the app id a task id was minted for, or `None` if `task_id`
/// doesn't match this scheme (e.g. it was injected by a test or a foreign
/// driver binding).
pub fn app_id_of(task_id: &str) -> Option<&str> {
    task_id.split_once(SEPARATOR).map(|(app_id, _)| app_id)
}
