//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load, save, or validate a [`GameConfig`](crate::GameConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// An action code outside the discrete action set `{0, 1, 2}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("action {0} is not one of 0 (none), 1 (jump), 2 (crouch)")]
pub struct InvalidAction(pub i64);
