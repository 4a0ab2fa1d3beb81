//! HTTP request handlers.

mod executions;
mod health;
mod tasks;

pub use executions::{execute_task, get_execution, list_task_executions};
pub use health::{health_check, metrics_handler};
pub use tasks::{create_task, get_task, list_task_types, list_tasks};
