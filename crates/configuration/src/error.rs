use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read settings: {0}")]
    Load(#[from] config::ConfigError),

    /// The `[funnel]` section parsed but the planner would reject it.
    #[error("Invalid [funnel] settings: {}", .0.join("; "))]
    InvalidFunnel(Vec<String>),
}
