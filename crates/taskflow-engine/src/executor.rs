//! Executor trait and closure adapter.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors an executor can report. They end up as the `error` of a failed
/// execution, never as an error returned by the engine.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// Task config is missing or has a malformed field.
    #[error("Invalid task config: {0}")]
    InvalidConfig(String),

    /// Outbound request failed.
    #[error("Request failed: {0}")]
    Request(String),

    /// Any other failure raised by the executor.
    #[error("{0}")]
    Failed(String),
}

/// Performs the work for one task type.
///
/// `config` is the task's config, `input` the per-run payload. The result
/// must be JSON-serializable.
#[async_trait]
pub trait Executor: Send + Sync + 'static {
    async fn execute(&self, config: Value, input: Option<Value>) -> Result<Value, ExecutorError>;
}

/// Executor backed by an async closure.
pub struct FnExecutor<F, Fut> {
    f: F,
    _marker: PhantomData<fn() -> Fut>,
}

#[async_trait]
impl<F, Fut> Executor for FnExecutor<F, Fut>
where
    F: Fn(Value, Option<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ExecutorError>> + Send + 'static,
{
    async fn execute(&self, config: Value, input: Option<Value>) -> Result<Value, ExecutorError> {
        (self.f)(config, input).await
    }
}

/// Wrap an async closure as an [`Executor`].
pub fn executor_fn<F, Fut>(f: F) -> Arc<dyn Executor>
where
    F: Fn(Value, Option<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ExecutorError>> + Send + 'static,
{
    Arc::new(FnExecutor {
        f,
        _marker: PhantomData,
    })
}
