//! Ambient engineering surface: configuration, logging, and durable
//! persistence. None of this is scheduling logic — it exists so the
//! scheduler engine can be wired into a real process.

pub mod config;
pub mod logging;
pub mod persistence;
