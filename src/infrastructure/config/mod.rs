//! Configuration management infrastructure.
//!
//! Hierarchical configuration loaded with `figment`: programmatic defaults,
//! an optional YAML file, then `SCHED_`-prefixed environment overrides.

mod loader;

pub use loader::{ConfigError, ConfigLoader};

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::logging::LogConfig;

/// Top-level scheduler configuration. Recognised knobs are deliberately
/// narrow (spec.md §6): persistence and synchronous-bridge timeouts, the
/// staged-task timeout open question, and the rolling-update fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Duration for persistence collaborator calls (spec.md §6 `zkFutureTimeout`).
    #[serde(default = "default_zk_future_timeout_secs")]
    pub zk_future_timeout_secs: u64,

    /// Duration for synchronous admin-API bridges (spec.md §6 `defaultWait`).
    #[serde(default = "default_wait_secs")]
    pub default_wait_secs: u64,

    /// How long a task may sit in staging before the engine kills it
    /// (SPEC_FULL.md §9 open-question resolution).
    #[serde(default = "default_staged_task_timeout_secs")]
    pub staged_task_timeout_secs: u64,

    /// Bound on concurrent kills issued per `updateApp` rolling restart.
    #[serde(default = "default_max_parallel_restarts")]
    pub max_parallel_restarts: usize,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            zk_future_timeout_secs: default_zk_future_timeout_secs(),
            default_wait_secs: default_wait_secs(),
            staged_task_timeout_secs: default_staged_task_timeout_secs(),
            max_parallel_restarts: default_max_parallel_restarts(),
            database: DatabaseConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn zk_future_timeout(&self) -> Duration {
        Duration::from_secs(self.zk_future_timeout_secs)
    }

    pub fn default_wait(&self) -> Duration {
        Duration::from_secs(self.default_wait_secs)
    }

    pub fn staged_task_timeout(&self) -> Duration {
        Duration::from_secs(self.staged_task_timeout_secs)
    }
}

fn default_zk_future_timeout_secs() -> u64 {
    5
}

fn default_wait_secs() -> u64 {
    3
}

fn default_staged_task_timeout_secs() -> u64 {
    60
}

fn default_max_parallel_restarts() -> usize {
    1
}

fn default_database_path() -> String {
    ".fleetsched/fleetsched.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}
