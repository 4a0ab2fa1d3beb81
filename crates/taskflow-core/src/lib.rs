//! TaskFlow Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Storage backends
//! - Runtime specifics
//!
//! All types here describe tasks, their execution records, and the
//! state transitions an execution goes through.

pub mod error;
pub mod execution;
pub mod ids;
pub mod status;
pub mod task;
pub mod task_type;

// Re-export commonly used types
pub use error::CoreError;
pub use execution::{ExecutionMetrics, TaskExecution};
pub use ids::{ExecutionId, TaskId};
pub use status::ExecutionStatus;
pub use task::{Task, TaskMetadata, TaskMetadataOverrides};
pub use task_type::TaskType;
