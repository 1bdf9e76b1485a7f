//! App domain model — a versioned declarative specification of a program
//! to run, with a target instance count (spec.md §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque resource and launch parameters, consumed only by `TaskBuilder`.
/// The scheduler core never interprets this payload.
pub type LaunchParams = serde_json::Value;

/// A versioned application definition.
///
/// Invariant: at most one current version exists per `id` at any time;
/// historical versions are retained by [`crate::domain::ports::AppRepository`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    pub instances: u32,
    pub task_rate_limit: f64,
    /// Monotonically increasing wall-clock version. `AppRepository` is
    /// responsible for ensuring increasing versions; the engine treats this
    /// as an opaque ordering key.
    pub version: DateTime<Utc>,
    pub launch_params: LaunchParams,
}

impl App {
    pub fn new(id: impl Into<String>, instances: u32, task_rate_limit: f64) -> Self {
        Self {
            id: id.into(),
            instances,
            task_rate_limit,
            version: Utc::now(),
            launch_params: serde_json::Value::Null,
        }
    }

    /// Produce the next version of this app with `instances` replaced and
    /// the version timestamp advanced. Used by `updateApp` (spec.md §4.6).
    pub fn with_instances(&self, instances: u32, at: DateTime<Utc>) -> Self {
        Self {
            instances,
            version: at,
            ..self.clone()
        }
    }
}

/// A partial update applied by `updateApp` (spec.md §4.6). `None` fields
/// leave the corresponding `App` field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppDelta {
    pub instances: Option<u32>,
    pub task_rate_limit: Option<f64>,
    pub launch_params: Option<LaunchParams>,
}

impl AppDelta {
    /// Apply this delta atop `current`, producing the next version.
    pub fn apply(&self, current: &App, at: DateTime<Utc>) -> App {
        App {
            id: current.id.clone(),
            instances: self.instances.unwrap_or(current.instances),
            task_rate_limit: self.task_rate_limit.unwrap_or(current.task_rate_limit),
            version: at,
            launch_params: self
                .launch_params
                .clone()
                .unwrap_or_else(|| current.launch_params.clone()),
        }
    }
}
