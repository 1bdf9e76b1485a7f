//! Resource offer domain model (spec.md §3).
//!
//! Ephemeral: the engine owns an offer only between receipt and the moment
//! it responds with `launchTasks` or `declineOffer`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::app::LaunchParams;

/// A single named, quantified resource (cpus, mem, disk, ports, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub scalar: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub offer_id: String,
    pub host: String,
    pub attributes: HashMap<String, String>,
    pub resources: Vec<Resource>,
}

/// Output of a successful `TaskBuilder` match: a concrete task descriptor
/// plus the ports it reserved from the offer. The descriptor's internal
/// shape is a non-goal (spec.md §1); the engine only needs enough to
/// record a task and hand a launch command to the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub task_id: String,
    pub host: String,
    pub ports: Vec<u32>,
    pub launch_params: LaunchParams,
}
