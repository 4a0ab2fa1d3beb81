//! Task handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use taskflow_core::{Task, TaskId, TaskType};

use crate::http::error::ApiError;
use crate::http::responses::CreateTaskRequest;
use crate::state::AppState;

/// Create a task.
///
/// POST /tasks
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        warn!(error = %rejection, "Invalid JSON in request body");
        ApiError::BadRequest(rejection.body_text())
    })?;

    let name = req
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("name is required".to_string()))?;
    let task_type = req
        .task_type
        .filter(|t| !t.trim().is_empty())
        .map(TaskType::from)
        .ok_or_else(|| ApiError::BadRequest("type is required".to_string()))?;

    if !task_type.is_known() {
        return Err(ApiError::BadRequest(format!("Unknown task type: {task_type}")));
    }

    let config = req.config.unwrap_or_else(|| Value::Object(Default::default()));
    let task = state
        .engine
        .create_task(name, task_type, config, req.metadata)
        .await?;

    info!(task_id = %task.id, "Task created via HTTP");
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task.
///
/// GET /tasks/:id
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task_id = TaskId::new(id);
    state
        .engine
        .get_task(&task_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Task not found: {task_id}")))
}

/// List all tasks, newest first.
///
/// GET /tasks
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.engine.list_tasks().await?))
}

/// List task types with a registered executor.
///
/// GET /task-types
pub async fn list_task_types(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let types = state
        .engine
        .list_registered_types()
        .await
        .into_iter()
        .map(String::from)
        .collect();
    Json(types)
}
