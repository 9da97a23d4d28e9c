// ABOUTME: Application-wide error types for docker-mcp.
// ABOUTME: Covers configuration loading, secret resolution, startup, and session failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("failed to read secret file {path}: {source}")]
    SecretFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Runtime(#[from] crate::runtime::RuntimeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("MCP session failed: {0}")]
    Session(String),
}

pub type Result<T> = std::result::Result<T, Error>;
