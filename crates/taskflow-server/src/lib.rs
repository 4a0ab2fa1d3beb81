//! TaskFlow Server Library
//!
//! This crate exposes the task engine over HTTP, and holds the server
//! configuration and metrics rendering.

pub mod config;
pub mod http;
pub mod metrics;
pub mod state;

pub use config::{Config, StoreBackend};
pub use http::create_router;
pub use state::AppState;
