//! Concrete adapters for the domain ports, plus the scheduler engine that
//! wires them together (spec.md §2, §4).

pub mod app_lock;
pub mod event_bus;
pub mod logging_adapters;
pub mod rate_limiter;
pub mod scheduler_engine;
pub mod status_workers;
pub mod task_builder;
pub mod task_queue;
pub mod task_tracker;
pub mod update_hook;

pub use app_lock::AppLockRegistry;
pub use event_bus::BroadcastEventBus;
pub use logging_adapters::{LoggingCallbacks, LoggingDriver, LoggingHealthChecks};
pub use rate_limiter::GovernorRateLimiter;
pub use scheduler_engine::SchedulerEngine;
pub use status_workers::{StatusHandler, StatusWorkerPool};
pub use task_builder::SimpleTaskBuilder;
pub use task_queue::InMemoryTaskQueue;
pub use task_tracker::InMemoryTaskTracker;
pub use update_hook::RollingUpdateHook;
