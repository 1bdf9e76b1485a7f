//! Health-check collaborator port. Probing implementation is explicitly a
//! non-goal (spec.md §1); the engine only needs to notify it of lifecycle
//! changes so it can reconcile its own state.

use async_trait::async_trait;

use crate::domain::models::App;

#[async_trait]
pub trait HealthChecks: Send + Sync {
    /// Reconcile health checks against the given app's current definition.
    async fn reconcile(&self, app: &App);
    /// Remove all health checks registered for an app.
    async fn remove(&self, app_id: &str);
}
