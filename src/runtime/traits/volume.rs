// ABOUTME: Volume operations trait for container runtimes.
// ABOUTME: List, inspect, create, and remove named volumes.

use super::sealed::Sealed;
use super::shared_types::{VolumeDetails, VolumeSpec};
use crate::types::VolumeName;
use async_trait::async_trait;

/// Volume operations.
#[async_trait]
pub trait VolumeOps: Sealed + Send + Sync {
    /// List all volumes.
    async fn list_volumes(&self) -> Result<Vec<VolumeDetails>, VolumeError>;

    /// Inspect a volume by name.
    async fn inspect_volume(&self, name: &VolumeName) -> Result<VolumeDetails, VolumeError>;

    /// Create a volume and return its inspect document.
    async fn create_volume(&self, spec: &VolumeSpec) -> Result<VolumeDetails, VolumeError>;

    /// Remove a volume.
    async fn remove_volume(&self, name: &VolumeName, force: bool) -> Result<(), VolumeError>;
}

/// Errors from volume operations. Messages are the daemon's own.
#[derive(Debug, thiserror::Error)]
pub enum VolumeError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InUse(String),

    #[error("{0}")]
    Runtime(String),
}
