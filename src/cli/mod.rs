//! Local operational commands.
//!
//! These call straight into [`SchedulerEngine`](crate::services::SchedulerEngine)
//! and its collaborators in-process — there is no HTTP/JSON admin surface
//! (spec.md §1 non-goals).

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fleetsched")]
#[command(about = "Offer-based cluster application scheduler", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Force an immediate reconciliation pass against the driver.
    Reconcile,
    /// Print every tracked app and its live task counts.
    Status,
}
