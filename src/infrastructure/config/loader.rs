use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use super::SchedulerConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("zk_future_timeout_secs must be positive")]
    InvalidZkFutureTimeout,

    #[error("default_wait_secs must be positive")]
    InvalidDefaultWait,

    #[error("staged_task_timeout_secs must be positive")]
    InvalidStagedTaskTimeout,

    #[error("max_parallel_restarts must be at least 1")]
    InvalidMaxParallelRestarts,

    #[error("database path cannot be empty")]
    EmptyDatabasePath,

    #[error("max_connections must be at least 1")]
    InvalidMaxConnections,

    #[error("invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Loads `SchedulerConfig` with hierarchical merging.
///
/// Precedence (lowest to highest):
/// 1. Programmatic defaults.
/// 2. `fleetsched.yaml`, if present.
/// 3. `SCHED_`-prefixed environment variables (nested fields via `__`).
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load() -> Result<SchedulerConfig> {
        Self::load_from_file("fleetsched.yaml")
    }

    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<SchedulerConfig> {
        let config: SchedulerConfig = Figment::new()
            .merge(Serialized::defaults(SchedulerConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("SCHED_").split("__"))
            .extract()
            .context("failed to extract scheduler configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    pub fn validate(config: &SchedulerConfig) -> Result<(), ConfigError> {
        if config.zk_future_timeout_secs == 0 {
            return Err(ConfigError::InvalidZkFutureTimeout);
        }
        if config.default_wait_secs == 0 {
            return Err(ConfigError::InvalidDefaultWait);
        }
        if config.staged_task_timeout_secs == 0 {
            return Err(ConfigError::InvalidStagedTaskTimeout);
        }
        if config.max_parallel_restarts == 0 {
            return Err(ConfigError::InvalidMaxParallelRestarts);
        }
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }
        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections);
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}
