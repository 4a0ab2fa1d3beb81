//! Engine errors.

use thiserror::Error;

use taskflow_core::{CoreError, TaskId};

use crate::store::StoreError;

/// Errors returned by [`crate::TaskEngine`].
///
/// Executor failures and timeouts are not errors at this level; they are
/// recorded on the returned execution instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The task to execute does not exist.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// The task store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A domain invariant was violated.
    #[error(transparent)]
    Core(#[from] CoreError),
}
