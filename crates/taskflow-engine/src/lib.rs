//! TaskFlow Engine
//!
//! This crate provides the task automation engine: the executor registry,
//! the built-in executors, the persistence contract with its in-memory and
//! file-backed implementations, and the [`TaskEngine`] that ties them
//! together.

pub mod builtin;
pub mod engine;
pub mod error;
pub mod executor;
pub mod registry;
pub mod store;

pub use engine::TaskEngine;
pub use error::EngineError;
pub use executor::{executor_fn, Executor, ExecutorError};
pub use registry::ExecutorRegistry;
pub use store::{FileTaskStore, InMemoryTaskStore, StoreError, TaskStore};
