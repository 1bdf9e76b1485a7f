//! Durable persistence adapters.

pub mod sqlite;
