//! Task definitions and their metadata.

use crate::{TaskId, TaskType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default priority for new tasks.
pub const DEFAULT_PRIORITY: u32 = 1;
/// Default execution timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default retry count. Stored but not acted on by the engine.
pub const DEFAULT_RETRY_COUNT: u32 = 3;
/// Default retry delay in milliseconds. Stored but not acted on by the engine.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// A Task is a named, typed unit of automatable work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,

    /// Human-readable label.
    pub name: String,

    /// Kind of task; selects the executor.
    #[serde(rename = "type")]
    pub task_type: TaskType,

    /// Executor-specific configuration. Opaque to the engine.
    pub config: Value,

    /// Scheduling and execution metadata.
    pub metadata: TaskMetadata,

    /// When the task was created.
    pub created_at: DateTime<Utc>,

    /// When the task was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new Task with a fresh id and creation timestamps.
    pub fn new(
        name: impl Into<String>,
        task_type: TaskType,
        config: Value,
        metadata: TaskMetadata,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::generate(),
            name: name.into(),
            task_type,
            config,
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder method to set a specific ID (useful for testing).
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }
}

/// Resolved task metadata, with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub priority: u32,

    /// Soft timeout applied to each execution.
    pub timeout_ms: u64,

    pub retry_count: u32,

    pub retry_delay_ms: u64,
}

impl Default for TaskMetadata {
    fn default() -> Self {
        Self {
            description: None,
            tags: Vec::new(),
            priority: DEFAULT_PRIORITY,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl TaskMetadata {
    /// Apply a partial override on top of this metadata.
    ///
    /// Fields left as `None` in `overrides` keep their current value.
    pub fn merged(mut self, overrides: TaskMetadataOverrides) -> Self {
        if let Some(description) = overrides.description {
            self.description = Some(description);
        }
        if let Some(tags) = overrides.tags {
            self.tags = tags;
        }
        if let Some(priority) = overrides.priority {
            self.priority = priority;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(retry_count) = overrides.retry_count {
            self.retry_count = retry_count;
        }
        if let Some(retry_delay_ms) = overrides.retry_delay_ms {
            self.retry_delay_ms = retry_delay_ms;
        }
        self
    }
}

/// Caller-supplied metadata; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskMetadataOverrides {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub retry_count: Option<u32>,
    #[serde(default)]
    pub retry_delay_ms: Option<u64>,
}

impl TaskMetadataOverrides {
    /// Builder method to set the priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Builder method to set the timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_metadata() {
        let meta = TaskMetadata::default();
        assert_eq!(meta.priority, 1);
        assert_eq!(meta.timeout_ms, 30_000);
        assert_eq!(meta.retry_count, 3);
        assert_eq!(meta.retry_delay_ms, 1_000);
        assert!(meta.description.is_none());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let meta =
            TaskMetadata::default().merged(TaskMetadataOverrides::default().with_priority(9));
        assert_eq!(meta.priority, 9);
        assert_eq!(meta.timeout_ms, 30_000);
        assert_eq!(meta.retry_count, 3);
        assert_eq!(meta.retry_delay_ms, 1_000);
    }

    #[test]
    fn test_overrides_deserialize_from_partial_json() {
        let overrides: TaskMetadataOverrides =
            serde_json::from_value(json!({ "timeout_ms": 500, "tags": ["a"] })).unwrap();
        let meta = TaskMetadata::default().merged(overrides);
        assert_eq!(meta.timeout_ms, 500);
        assert_eq!(meta.tags, vec!["a".to_string()]);
        assert_eq!(meta.priority, 1);
    }

    #[test]
    fn test_new_task_timestamps_match() {
        let task = Task::new(
            "ping",
            TaskType::HttpRequest,
            json!({ "url": "https://example.com" }),
            TaskMetadata::default(),
        );
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_type_serialized_as_type() {
        let task = Task::new("x", TaskType::NotifyA, json!({}), TaskMetadata::default());
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "notify_a");
        assert_eq!(value["metadata"]["timeout_ms"], 30_000);
    }
}
