//! Execution handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};

use taskflow_core::{ExecutionId, TaskExecution, TaskId};

use crate::http::error::ApiError;
use crate::http::responses::ExecuteTaskRequest;
use crate::state::AppState;

/// Execute a task once.
///
/// POST /tasks/:id/execute
///
/// Responds 200 with the execution whether it completed or failed. The body
/// is optional; an empty body runs the task without input.
pub async fn execute_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<TaskExecution>, ApiError> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        ExecuteTaskRequest::default()
    } else {
        serde_json::from_slice::<ExecuteTaskRequest>(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))?
    };

    let execution = state
        .engine
        .execute_task(&TaskId::new(id), req.input)
        .await?;
    Ok(Json(execution))
}

/// Get an execution.
///
/// GET /executions/:id
pub async fn get_execution(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TaskExecution>, ApiError> {
    let execution_id = ExecutionId::new(id);
    state
        .engine
        .get_task_execution(&execution_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Execution not found: {execution_id}")))
}

/// List executions of a task, newest first.
///
/// GET /tasks/:id/executions
pub async fn list_task_executions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TaskExecution>>, ApiError> {
    let executions = state
        .engine
        .get_task_executions(&TaskId::new(id))
        .await?;
    Ok(Json(executions))
}
