//! fleetsched entry point.
//!
//! With no subcommand, runs a brief daemon demonstration: load config, wire
//! up collaborators, register with a synthetic master, and run one
//! reconciliation pass. With `reconcile` or `status`, acts as a local
//! operational client against the same collaborators.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use fleetsched::cli::{commands, Cli, Commands};
use fleetsched::domain::models::{FrameworkId, MasterInfo};
use fleetsched::infrastructure::config::ConfigLoader;
use fleetsched::infrastructure::logging::LoggerHandle;
use fleetsched::infrastructure::persistence::sqlite::{self, PoolConfig};
use fleetsched::services::{
    BroadcastEventBus, GovernorRateLimiter, InMemoryTaskQueue, InMemoryTaskTracker, LoggingCallbacks,
    LoggingDriver, LoggingHealthChecks, RollingUpdateHook, SchedulerEngine, SimpleTaskBuilder,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load().context("failed to load scheduler configuration")?;
    let _logging = LoggerHandle::init(&config.logging).context("failed to initialize logging")?;

    let database_url = format!("sqlite:{}", config.database.path);
    let pool_config = PoolConfig {
        max_connections: config.database.max_connections,
        acquire_timeout: Duration::from_secs(5),
    };
    let pool = sqlite::create_pool(&database_url, pool_config)
        .await
        .context("failed to open scheduler database")?;

    let app_repository = Arc::new(sqlite::SqliteAppRepository::new(pool.clone()));
    let framework_id_store = Arc::new(sqlite::SqliteFrameworkIdStore::new(pool.clone()));
    let task_store = Arc::new(sqlite::SqliteTaskStore::new(pool));

    let task_tracker = Arc::new(
        InMemoryTaskTracker::new(config.staged_task_timeout()).with_persistence(task_store),
    );
    let task_queue = Arc::new(InMemoryTaskQueue::new());
    let task_builder = Arc::new(SimpleTaskBuilder::default());
    let rate_limiter = Arc::new(GovernorRateLimiter::new());
    let event_bus = Arc::new(BroadcastEventBus::default());
    let driver = Arc::new(LoggingDriver);
    let health_checks = Arc::new(LoggingHealthChecks);
    let callbacks = Arc::new(LoggingCallbacks);
    let update_hook = RollingUpdateHook::new(config.max_parallel_restarts);

    let engine = SchedulerEngine::new(
        task_tracker.clone(),
        task_queue,
        app_repository.clone(),
        task_builder,
        rate_limiter,
        event_bus,
        driver,
        framework_id_store,
        health_checks,
        callbacks,
        update_hook,
    );

    match cli.command {
        Some(Commands::Reconcile) => commands::handle_reconcile(&engine).await,
        Some(Commands::Status) => commands::handle_status(&*app_repository, &*task_tracker).await,
        None => run_demo(&engine).await,
    }
}

async fn run_demo(engine: &SchedulerEngine) -> Result<()> {
    engine
        .registered(
            FrameworkId("demo-framework".to_string()),
            MasterInfo {
                id: "demo-master".to_string(),
                host: "localhost:5050".to_string(),
            },
        )
        .await
        .context("registration failed")?;

    engine
        .reconcile_and_scale_tasks()
        .await
        .context("reconciliation failed")?;

    tracing::info!("demonstration run complete; no cluster-master transport is wired in");
    Ok(())
}
