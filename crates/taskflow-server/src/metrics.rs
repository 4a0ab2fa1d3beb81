//! Prometheus metrics collection and formatting.
//!
//! This module provides metrics in Prometheus text exposition format.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use taskflow_core::ExecutionStatus;
use taskflow_engine::EngineError;

use crate::state::AppState;

/// Collect all metrics from the engine and format as Prometheus text.
pub async fn collect_metrics(state: &Arc<AppState>) -> Result<String, EngineError> {
    let mut output = String::new();

    collect_task_metrics(state, &mut output).await?;
    collect_executor_metrics(state, &mut output).await;

    Ok(output)
}

/// Collect task and execution counts.
async fn collect_task_metrics(
    state: &Arc<AppState>,
    output: &mut String,
) -> Result<(), EngineError> {
    let tasks = state.engine.list_tasks().await?;

    let mut by_status: HashMap<ExecutionStatus, u64> = HashMap::new();
    for execution in state.engine.list_executions().await? {
        *by_status.entry(execution.status).or_default() += 1;
    }

    writeln!(output, "# HELP taskflow_tasks_total Total number of tasks").ok();
    writeln!(output, "# TYPE taskflow_tasks_total gauge").ok();
    writeln!(output, "taskflow_tasks_total {}", tasks.len()).ok();

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP taskflow_executions_total Total number of executions by status"
    )
    .ok();
    writeln!(output, "# TYPE taskflow_executions_total gauge").ok();
    for status in ExecutionStatus::ALL {
        let count = by_status.get(&status).copied().unwrap_or(0);
        writeln!(
            output,
            "taskflow_executions_total{{status=\"{}\"}} {count}",
            status.as_str()
        )
        .ok();
    }

    Ok(())
}

/// Collect executor registry size.
async fn collect_executor_metrics(state: &Arc<AppState>, output: &mut String) {
    let registered = state.engine.registry().len().await;

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP taskflow_executor_types_registered Number of task types with an executor"
    )
    .ok();
    writeln!(output, "# TYPE taskflow_executor_types_registered gauge").ok();
    writeln!(output, "taskflow_executor_types_registered {registered}").ok();
}
