//! Core domain errors.

use thiserror::Error;

/// Core domain errors for TaskFlow.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid state transition.
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },
}
