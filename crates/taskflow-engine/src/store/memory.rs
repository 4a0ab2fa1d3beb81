//! In-memory task store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use taskflow_core::{ExecutionId, Task, TaskExecution, TaskId};

use super::{sort_newest_first, sort_tasks_newest_first, StoreError, TaskStore};

/// Task store that keeps everything in process memory.
///
/// Nothing survives a restart. Suitable for tests and local runs.
#[derive(Default)]
pub struct InMemoryTaskStore {
    /// Tasks indexed by TaskId.
    tasks: RwLock<HashMap<TaskId, Task>>,

    /// Executions indexed by ExecutionId.
    executions: RwLock<HashMap<ExecutionId, TaskExecution>>,
}

impl InMemoryTaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored tasks.
    pub async fn task_count(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Get the number of stored executions.
    pub async fn execution_count(&self) -> usize {
        self.executions.read().await.len()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn save_task(&self, task: &Task) -> Result<(), StoreError> {
        self.tasks
            .write()
            .await
            .insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn get_task(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(id).cloned())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        sort_tasks_newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<bool, StoreError> {
        let removed = self.tasks.write().await.remove(id).is_some();
        if removed {
            self.executions
                .write()
                .await
                .retain(|_, exec| &exec.task_id != id);
        }
        Ok(removed)
    }

    async fn save_execution(&self, execution: &TaskExecution) -> Result<(), StoreError> {
        self.executions
            .write()
            .await
            .insert(execution.id.clone(), execution.clone());
        Ok(())
    }

    async fn get_execution(&self, id: &ExecutionId) -> Result<Option<TaskExecution>, StoreError> {
        Ok(self.executions.read().await.get(id).cloned())
    }

    async fn list_executions(&self) -> Result<Vec<TaskExecution>, StoreError> {
        let mut executions: Vec<TaskExecution> =
            self.executions.read().await.values().cloned().collect();
        sort_newest_first(&mut executions);
        Ok(executions)
    }

    async fn list_executions_for_task(
        &self,
        task_id: &TaskId,
    ) -> Result<Vec<TaskExecution>, StoreError> {
        let mut executions: Vec<TaskExecution> = self
            .executions
            .read()
            .await
            .values()
            .filter(|exec| &exec.task_id == task_id)
            .cloned()
            .collect();
        sort_newest_first(&mut executions);
        Ok(executions)
    }
}
