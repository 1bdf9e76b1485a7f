//! Framework identity domain model (spec.md §3).

use serde::{Deserialize, Serialize};

/// The single opaque identity a framework is assigned by the master on
/// first registration and reuses on every subsequent reconnect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkId(pub String);

/// Metadata the master supplies alongside (re)registration. Opaque to the
/// core; carried only for logging and for `SchedulerCallbacks` hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterInfo {
    pub id: String,
    pub host: String,
}
