//! HTTP server for the task engine.
//!
//! Provides endpoints for:
//! - Task creation and lookup (`/tasks`, `/tasks/:id`)
//! - Execution (`/tasks/:id/execute`) and history (`/tasks/:id/executions`)
//! - Execution lookup (`/executions/:id`)
//! - Registered task types (`/task-types`)
//! - Health check (`/health`) and metrics (`/metrics`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod error;
mod handlers;
pub mod responses;

pub use error::ApiError;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Task routes
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route("/tasks/:id", get(handlers::get_task))
        .route("/tasks/:id/execute", post(handlers::execute_task))
        .route("/tasks/:id/executions", get(handlers::list_task_executions))
        .route("/executions/:id", get(handlers::get_execution))
        .route("/task-types", get(handlers::list_task_types))
        // Observability routes
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
