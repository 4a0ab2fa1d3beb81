//! Storage abstraction for persisting tasks and their executions.
//!
//! The engine only talks to [`TaskStore`]; which backend is used is decided
//! by whoever constructs the engine.

mod file;
mod memory;

pub use file::FileTaskStore;
pub use memory::InMemoryTaskStore;

use async_trait::async_trait;
use thiserror::Error;

use taskflow_core::{ExecutionId, Task, TaskExecution, TaskId};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem or other I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic backend error.
    #[error("storage error: {0}")]
    Backend(String),
}

/// Persistence contract for tasks and executions.
///
/// Tasks live in a `tasks` collection keyed by id; executions live in an
/// `executions` collection keyed by id and are queryable by `task_id`.
/// Saving an existing id replaces the stored document.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert or replace a task.
    async fn save_task(&self, task: &Task) -> Result<(), StoreError>;

    /// Fetch a task by id.
    async fn get_task(&self, id: &TaskId) -> Result<Option<Task>, StoreError>;

    /// List all tasks, newest `created_at` first.
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError>;

    /// Delete a task and its executions. Returns false if the task was absent.
    async fn delete_task(&self, id: &TaskId) -> Result<bool, StoreError>;

    /// Insert or replace an execution.
    async fn save_execution(&self, execution: &TaskExecution) -> Result<(), StoreError>;

    /// Fetch an execution by id.
    async fn get_execution(&self, id: &ExecutionId) -> Result<Option<TaskExecution>, StoreError>;

    /// List every stored execution, newest `started_at` first.
    async fn list_executions(&self) -> Result<Vec<TaskExecution>, StoreError>;

    /// List executions of a task, newest `started_at` first.
    async fn list_executions_for_task(
        &self,
        task_id: &TaskId,
    ) -> Result<Vec<TaskExecution>, StoreError>;
}

/// Sort executions newest-first by start time.
pub(crate) fn sort_newest_first(executions: &mut [TaskExecution]) {
    executions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
}

/// Sort tasks newest-first by creation time.
pub(crate) fn sort_tasks_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
