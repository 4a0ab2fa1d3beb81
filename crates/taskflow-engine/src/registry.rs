//! Mapping from task type to executor.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use taskflow_core::TaskType;

use crate::builtin;
use crate::executor::{executor_fn, Executor, ExecutorError};

/// Registry of executors, keyed by task type.
///
/// Cloning shares the underlying map. Registration replaces any previous
/// executor for the same type.
#[derive(Clone, Default)]
pub struct ExecutorRegistry {
    executors: Arc<RwLock<BTreeMap<TaskType, Arc<dyn Executor>>>>,
}

impl ExecutorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in executor for every known type.
    pub fn with_builtins() -> Self {
        let executors: BTreeMap<_, _> = builtin::default_executors().into_iter().collect();
        Self {
            executors: Arc::new(RwLock::new(executors)),
        }
    }

    /// Register (or replace) the executor for `task_type`.
    pub async fn register(&self, task_type: TaskType, executor: Arc<dyn Executor>) {
        let replaced = self
            .executors
            .write()
            .await
            .insert(task_type.clone(), executor)
            .is_some();
        info!(task_type = %task_type, replaced, "Registered executor");
    }

    /// Register an async closure as the executor for `task_type`.
    pub async fn register_fn<F, Fut>(&self, task_type: TaskType, f: F)
    where
        F: Fn(Value, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ExecutorError>> + Send + 'static,
    {
        self.register(task_type, executor_fn(f)).await;
    }

    /// Look up the executor for `task_type`.
    pub async fn lookup(&self, task_type: &TaskType) -> Option<Arc<dyn Executor>> {
        let found = self.executors.read().await.get(task_type).cloned();
        if found.is_none() {
            debug!(task_type = %task_type, "No executor registered");
        }
        found
    }

    /// All registered types, in a stable order.
    pub async fn list_types(&self) -> Vec<TaskType> {
        self.executors.read().await.keys().cloned().collect()
    }

    /// Number of registered executors.
    pub async fn len(&self) -> usize {
        self.executors.read().await.len()
    }

    /// Returns true if nothing is registered.
    pub async fn is_empty(&self) -> bool {
        self.executors.read().await.is_empty()
    }
}
