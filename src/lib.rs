//! Offer-based cluster application scheduler core.
//!
//! The `domain` module is the pure scheduling core; `services` hosts
//! in-memory port adapters and the engine itself; `infrastructure` carries
//! the ambient engineering surface (config, logging, durable persistence);
//! `cli` exposes local operational commands.

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;
