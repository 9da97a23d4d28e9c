// ABOUTME: Log operations trait for container runtimes.
// ABOUTME: Fetch the tail of a container's combined stdout/stderr output.

use super::sealed::Sealed;
use crate::types::ContainerId;
use async_trait::async_trait;

/// Log retrieval operations.
#[async_trait]
pub trait LogOps: Sealed + Send + Sync {
    /// Fetch logs from a container, decoded as UTF-8 (lossy).
    async fn container_logs(&self, id: &ContainerId, opts: &LogOptions)
    -> Result<String, LogError>;
}

/// How many lines to read from the end of the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTail {
    Lines(u64),
    All,
}

impl LogTail {
    /// Query value understood by the daemon.
    pub fn as_query(&self) -> String {
        match self {
            LogTail::Lines(n) => n.to_string(),
            LogTail::All => "all".to_string(),
        }
    }
}

impl Default for LogTail {
    fn default() -> Self {
        LogTail::Lines(100)
    }
}

/// Options for log retrieval.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Include stdout.
    pub stdout: bool,
    /// Include stderr.
    pub stderr: bool,
    /// Lines to read from the end.
    pub tail: LogTail,
}

impl LogOptions {
    /// Both streams, last `tail` lines.
    pub fn tail(tail: LogTail) -> Self {
        Self {
            stdout: true,
            stderr: true,
            tail,
        }
    }
}

/// Errors from log operations.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("{0}")]
    ContainerNotFound(String),

    #[error("{0}")]
    StreamError(String),
}
