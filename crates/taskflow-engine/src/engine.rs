//! Task automation engine.
//!
//! Creates tasks, dispatches executions to the registered executor for the
//! task's type, applies the task's soft timeout, and records every outcome
//! through the [`TaskStore`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use taskflow_core::{
    ExecutionId, Task, TaskExecution, TaskId, TaskMetadata, TaskMetadataOverrides, TaskType,
};

use crate::error::EngineError;
use crate::executor::{Executor, ExecutorError};
use crate::registry::ExecutorRegistry;
use crate::store::TaskStore;

/// Orchestration core. Cheap to clone; clones share store and registry.
#[derive(Clone)]
pub struct TaskEngine {
    store: Arc<dyn TaskStore>,
    registry: ExecutorRegistry,
}

impl TaskEngine {
    /// Create an engine over the given store and registry.
    pub fn new(store: Arc<dyn TaskStore>, registry: ExecutorRegistry) -> Self {
        Self { store, registry }
    }

    /// Create an engine with the built-in executors installed.
    pub fn with_builtins(store: Arc<dyn TaskStore>) -> Self {
        Self::new(store, ExecutorRegistry::with_builtins())
    }

    /// The executor registry used by this engine.
    pub fn registry(&self) -> &ExecutorRegistry {
        &self.registry
    }

    /// Create and persist a new task.
    ///
    /// `metadata` is merged over the defaults field by field. The type is
    /// not checked against the registry here; a task of an unregistered type
    /// is stored and fails when executed.
    pub async fn create_task(
        &self,
        name: impl Into<String>,
        task_type: TaskType,
        config: Value,
        metadata: Option<TaskMetadataOverrides>,
    ) -> Result<Task, EngineError> {
        let metadata = TaskMetadata::default().merged(metadata.unwrap_or_default());
        let task = Task::new(name, task_type, config, metadata);

        self.store.save_task(&task).await?;

        info!(
            task_id = %task.id,
            task_type = %task.task_type,
            name = %task.name,
            "Created task"
        );
        Ok(task)
    }

    /// Fetch a task by id.
    pub async fn get_task(&self, id: &TaskId) -> Result<Option<Task>, EngineError> {
        Ok(self.store.get_task(id).await?)
    }

    /// List all tasks, newest first.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, EngineError> {
        Ok(self.store.list_tasks().await?)
    }

    /// Run a task once and return the terminal execution record.
    ///
    /// Executor errors, timeouts and missing executors produce a `failed`
    /// execution, not an `Err`. Only a missing task or a store failure is
    /// returned as an error.
    pub async fn execute_task(
        &self,
        task_id: &TaskId,
        input: Option<Value>,
    ) -> Result<TaskExecution, EngineError> {
        let task = self
            .store
            .get_task(task_id)
            .await?
            .ok_or_else(|| EngineError::TaskNotFound(task_id.clone()))?;

        let mut execution = TaskExecution::start(task.id.clone(), input.clone());
        self.store.save_execution(&execution).await?;

        info!(
            task_id = %task.id,
            execution_id = %execution.id,
            task_type = %task.task_type,
            timeout_ms = task.metadata.timeout_ms,
            "Execution started"
        );

        match self.run_executor(&task, input).await {
            Ok(output) => {
                execution.complete(output)?;
                info!(
                    task_id = %task.id,
                    execution_id = %execution.id,
                    duration_ms = execution.metrics.duration_ms,
                    "Execution completed"
                );
            }
            Err(message) => {
                warn!(
                    task_id = %task.id,
                    execution_id = %execution.id,
                    error = %message,
                    "Execution failed"
                );
                execution.fail(message)?;
            }
        }

        self.store.save_execution(&execution).await?;
        Ok(execution)
    }

    /// Fetch an execution by id.
    pub async fn get_task_execution(
        &self,
        id: &ExecutionId,
    ) -> Result<Option<TaskExecution>, EngineError> {
        Ok(self.store.get_execution(id).await?)
    }

    /// All executions of a task, newest `started_at` first.
    pub async fn get_task_executions(
        &self,
        task_id: &TaskId,
    ) -> Result<Vec<TaskExecution>, EngineError> {
        Ok(self.store.list_executions_for_task(task_id).await?)
    }

    /// Every stored execution across all tasks, newest `started_at` first.
    pub async fn list_executions(&self) -> Result<Vec<TaskExecution>, EngineError> {
        Ok(self.store.list_executions().await?)
    }

    /// Every task type with a registered executor.
    pub async fn list_registered_types(&self) -> Vec<TaskType> {
        self.registry.list_types().await
    }

    /// Register (or replace) the executor for a task type.
    pub async fn register_executor(&self, task_type: TaskType, executor: Arc<dyn Executor>) {
        self.registry.register(task_type, executor).await;
    }

    /// Register an async closure as the executor for a task type.
    pub async fn register_executor_fn<F, Fut>(&self, task_type: TaskType, f: F)
    where
        F: Fn(Value, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ExecutorError>> + Send + 'static,
    {
        self.registry.register_fn(task_type, f).await;
    }

    /// Invoke the executor for `task` under its timeout.
    ///
    /// The executor runs on its own tokio task. When the timeout fires the
    /// handle is dropped without aborting, so the executor keeps running in
    /// the background and its eventual result is discarded.
    async fn run_executor(&self, task: &Task, input: Option<Value>) -> Result<Value, String> {
        let Some(executor) = self.registry.lookup(&task.task_type).await else {
            return Err(format!(
                "No executor registered for task type: {}",
                task.task_type
            ));
        };

        let config = task.config.clone();
        let handle = tokio::spawn(async move { executor.execute(config, input).await });

        let timeout_ms = task.metadata.timeout_ms;
        match tokio::time::timeout(Duration::from_millis(timeout_ms), handle).await {
            Ok(Ok(Ok(output))) => Ok(output),
            Ok(Ok(Err(e))) => Err(e.to_string()),
            Ok(Err(join_err)) => Err(format!("Executor panicked: {join_err}")),
            Err(_) => Err(format!("Task execution timed out after {timeout_ms}ms")),
        }
    }
}
