//! Structured logging infrastructure built on `tracing`.

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat, RotationPolicy};
pub use logger::LoggerHandle;
