//! Status enum for task executions.

use serde::{Deserialize, Serialize};

/// Status of a single TaskExecution.
///
/// The engine only ever produces `Running`, `Completed` and `Failed`.
/// `Pending` and `Cancelled` exist for records built by other callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Execution created but not yet started.
    #[default]
    Pending,
    /// Executor is running.
    Running,
    /// Executor returned a result within the timeout.
    Completed,
    /// Executor failed, timed out, or was missing.
    Failed,
    /// Execution was cancelled.
    Cancelled,
}

impl ExecutionStatus {
    /// All statuses, in declaration order.
    pub const ALL: [ExecutionStatus; 5] = [
        Self::Pending,
        Self::Running,
        Self::Completed,
        Self::Failed,
        Self::Cancelled,
    ];

    /// Returns true if the execution is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Lowercase label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}
