//! Execution records.

use crate::{CoreError, ExecutionId, ExecutionStatus, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Record of one concrete run of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskExecution {
    /// Unique execution identifier.
    pub id: ExecutionId,

    /// Task this execution belongs to.
    pub task_id: TaskId,

    /// Current execution status.
    pub status: ExecutionStatus,

    /// Caller-supplied payload for this run.
    ///
    /// Absent means no input; a JSON `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub input: Option<Value>,

    /// Executor result, set only on success. May itself be `null`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub output: Option<Value>,

    /// Error message, set only on failure.
    pub error: Option<String>,

    /// When the execution was first persisted.
    pub started_at: DateTime<Utc>,

    /// When the execution reached a terminal state.
    pub completed_at: Option<DateTime<Utc>>,

    pub metrics: ExecutionMetrics,
}

/// Timing and resource figures for an execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    pub duration_ms: u64,

    /// Always 0: retries are not performed.
    pub retry_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_usage: Option<f64>,
}

/// A field that is present deserializes to `Some`, even when it is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl TaskExecution {
    /// Create a running execution for `task_id`, stamped now.
    pub fn start(task_id: TaskId, input: Option<Value>) -> Self {
        Self {
            id: ExecutionId::generate(),
            task_id,
            status: ExecutionStatus::Running,
            input,
            output: None,
            error: None,
            started_at: Utc::now(),
            completed_at: None,
            metrics: ExecutionMetrics::default(),
        }
    }

    /// Mark the execution as completed with the executor's output.
    pub fn complete(&mut self, output: Value) -> Result<(), CoreError> {
        self.finish(ExecutionStatus::Completed)?;
        self.output = Some(output);
        self.error = None;
        Ok(())
    }

    /// Mark the execution as failed.
    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), CoreError> {
        self.finish(ExecutionStatus::Failed)?;
        self.error = Some(error.into());
        self.output = None;
        Ok(())
    }

    /// Check if the execution is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    fn finish(&mut self, status: ExecutionStatus) -> Result<(), CoreError> {
        if self.status.is_terminal() {
            return Err(CoreError::InvalidStateTransition {
                from: self.status.as_str().to_string(),
                to: status.as_str().to_string(),
            });
        }

        let completed_at = Utc::now();
        let elapsed = (completed_at - self.started_at).num_milliseconds().max(0);

        self.status = status;
        self.completed_at = Some(completed_at);
        self.metrics.duration_ms = elapsed as u64;
        self.metrics.retry_count = 0;
        Ok(())
    }
}
