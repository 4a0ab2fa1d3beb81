//! Server configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Which task store backs the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Keep tasks and executions in memory only.
    #[default]
    Memory,
    /// Persist tasks and executions as JSON files under `data_dir`.
    File,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address.
    pub bind_addr: String,

    /// Task store backend.
    pub store: StoreBackend,

    /// Root directory for the file store.
    pub data_dir: PathBuf,

    /// Tracing filter directive (e.g. `info`, `taskflow_engine=debug`).
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            store: StoreBackend::Memory,
            data_dir: PathBuf::from("./data"),
            log_filter: "info".to_string(),
        }
    }
}

/// TaskFlow server - task automation engine over HTTP
#[derive(Debug, Parser)]
#[command(name = "taskflow-server")]
#[command(about = "Task automation engine over HTTP", long_about = None)]
pub struct Cli {
    /// HTTP bind address
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Task store backend
    #[arg(short, long, value_enum)]
    pub store: Option<StoreBackend>,

    /// Data directory for the file store
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Log filter directive
    #[arg(short, long)]
    pub log: Option<String>,
}

impl Config {
    /// Build a config from defaults overridden by command line flags.
    pub fn from_cli(cli: Cli) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: cli.bind.unwrap_or(defaults.bind_addr),
            store: cli.store.unwrap_or(defaults.store),
            data_dir: cli.data_dir.unwrap_or(defaults.data_dir),
            log_filter: cli.log.unwrap_or(defaults.log_filter),
        }
    }
}
