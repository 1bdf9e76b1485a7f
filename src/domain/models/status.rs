//! Task status vocabulary as reported by the cluster master.

use serde::{Deserialize, Serialize};

/// The state a master reports for a task in a `statusUpdate` callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Staging,
    Starting,
    Running,
    Finished,
    Failed,
    Killed,
    Lost,
}

impl TaskState {
    /// Terminal states remove the task record once observed (spec.md §4.3).
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Finished | Self::Failed | Self::Killed | Self::Lost
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Staging => "staging",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Finished => "finished",
            Self::Failed => "failed",
            Self::Killed => "killed",
            Self::Lost => "lost",
        }
    }
}

/// A single observation of a task's state, as delivered by the master.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatus {
    pub task_id: String,
    pub state: TaskState,
    pub message: Option<String>,
}

/// The scheduler's own derived view of where a task sits in its lifecycle,
/// computed from the most recent [`TaskStatus`] recorded against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskLifecycle {
    Staging,
    Running,
    Terminal,
}

impl From<TaskState> for TaskLifecycle {
    fn from(state: TaskState) -> Self {
        match state {
            TaskState::Staging | TaskState::Starting => TaskLifecycle::Staging,
            TaskState::Running => TaskLifecycle::Running,
            TaskState::Finished | TaskState::Failed | TaskState::Killed | TaskState::Lost => {
                TaskLifecycle::Terminal
            }
        }
    }
}
