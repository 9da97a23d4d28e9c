// ABOUTME: Stats operations trait for container runtimes.
// ABOUTME: One-shot resource usage snapshots for a container.

use super::sealed::Sealed;
use crate::types::ContainerId;
use async_trait::async_trait;
use serde_json::Value;

/// Resource usage operations.
#[async_trait]
pub trait StatsOps: Sealed + Send + Sync {
    /// Read a single, non-streaming stats sample as the daemon reports it.
    async fn container_stats(&self, id: &ContainerId) -> Result<Value, StatsError>;
}

/// Errors from stats operations.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("{0}")]
    ContainerNotFound(String),

    #[error("stats stream ended without a sample for {0}")]
    NoSample(String),

    #[error("{0}")]
    Runtime(String),
}
