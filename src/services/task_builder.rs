//! A concrete, deliberately simple [`TaskBuilder`]: greedy scalar-resource
//! matching plus sequential port assignment. The matching strategy itself
//! is a non-goal of the core (spec.md §1) — this exists so the crate has a
//! working default and something to exercise in tests, not as a reference
//! bin-packing algorithm.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::{App, Offer, TaskDescriptor};
use crate::domain::ports::TaskBuilder;
use crate::domain::task_id;

/// Resource names this builder looks for on an offer. Anything else on the
/// offer is ignored.
const CPUS: &str = "cpus";
const MEM: &str = "mem";
const PORTS: &str = "ports";

pub struct SimpleTaskBuilder {
    cpus_per_task: f64,
    mem_per_task: f64,
    ports_per_task: usize,
}

impl SimpleTaskBuilder {
    pub fn new(cpus_per_task: f64, mem_per_task: f64, ports_per_task: usize) -> Self {
        Self {
            cpus_per_task,
            mem_per_task,
            ports_per_task,
        }
    }

    fn scalar(offer: &Offer, name: &str) -> f64 {
        offer
            .resources
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.scalar)
            .unwrap_or(0.0)
    }
}

impl Default for SimpleTaskBuilder {
    fn default() -> Self {
        Self::new(0.1, 128.0, 1)
    }
}

#[async_trait]
impl TaskBuilder for SimpleTaskBuilder {
    async fn build(&self, app: &App, offer: &Offer) -> anyhow::Result<Option<TaskDescriptor>> {
        let cpus = Self::scalar(offer, CPUS);
        let mem = Self::scalar(offer, MEM);
        let available_ports = Self::scalar(offer, PORTS) as usize;

        if cpus < self.cpus_per_task || mem < self.mem_per_task || available_ports < self.ports_per_task {
            return Ok(None);
        }

        let ports: Vec<u32> = (0..self.ports_per_task as u32).collect();
        Ok(Some(TaskDescriptor {
            task_id: task_id::build(&app.id, Uuid::new_v4()),
            host: offer.host.clone(),
            ports,
            launch_params: app.launch_params.clone(),
        }))
    }
}
