// ABOUTME: Container operations trait for container runtimes.
// ABOUTME: List, inspect, create, start, stop, and remove containers.

use super::sealed::Sealed;
use super::shared_types::{ContainerDetails, ContainerSpec};
use crate::types::ContainerId;
use async_trait::async_trait;
use std::time::Duration;

/// Container lifecycle operations.
#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// List containers with full inspect details. `all` includes stopped ones.
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerDetails>, ContainerError>;

    /// Get detailed information about a container by ID or name.
    async fn inspect_container(&self, id: &ContainerId)
    -> Result<ContainerDetails, ContainerError>;

    /// Create a container from the given spec without starting it.
    async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, ContainerError>;

    /// Start a created container. Starting a running container is a no-op.
    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError>;

    /// Stop a running container. `None` uses the daemon's grace period.
    async fn stop_container(
        &self,
        id: &ContainerId,
        timeout: Option<Duration>,
    ) -> Result<(), ContainerError>;

    /// Remove a container.
    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<(), ContainerError>;
}

/// Errors from container operations. Messages are the daemon's own.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    ImageNotFound(String),

    #[error("{0}")]
    Runtime(String),
}
