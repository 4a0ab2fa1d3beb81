//! HTTP request and response types.
//!
//! Tasks and executions are returned as their domain JSON form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use taskflow_core::TaskMetadataOverrides;

// ============================================================================
// Task types
// ============================================================================

/// Request body for `POST /tasks`.
///
/// `name` and `type` are optional here so that their absence maps to a 400
/// with a readable message instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub task_type: Option<String>,

    #[serde(default)]
    pub config: Option<Value>,

    #[serde(default)]
    pub metadata: Option<TaskMetadataOverrides>,
}

/// Request body for `POST /tasks/:id/execute`.
#[derive(Debug, Default, Deserialize)]
pub struct ExecuteTaskRequest {
    #[serde(default)]
    pub input: Option<Value>,
}

// ============================================================================
// Error types
// ============================================================================

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
