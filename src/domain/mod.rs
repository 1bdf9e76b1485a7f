//! Domain layer: models, ports, and errors. No collaborator's internal
//! design lives here — only the shapes the scheduler engine depends on.

pub mod errors;
pub mod models;
pub mod ports;
pub mod task_id;
