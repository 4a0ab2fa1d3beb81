//! Shared application state.

use std::sync::Arc;

use taskflow_engine::TaskEngine;

/// Shared application state.
pub struct AppState {
    /// Engine serving every request.
    pub engine: TaskEngine,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(engine: TaskEngine) -> Arc<Self> {
        Arc::new(Self { engine })
    }
}
