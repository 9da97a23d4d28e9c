// ABOUTME: Network operations trait for container runtimes.
// ABOUTME: List, inspect, create, and remove networks.

use super::sealed::Sealed;
use super::shared_types::{NetworkDetails, NetworkSpec};
use crate::types::NetworkId;
use async_trait::async_trait;

/// Network operations.
#[async_trait]
pub trait NetworkOps: Sealed + Send + Sync {
    /// List all networks.
    async fn list_networks(&self) -> Result<Vec<NetworkDetails>, NetworkError>;

    /// Inspect a network by ID or name.
    async fn inspect_network(&self, id: &NetworkId) -> Result<NetworkDetails, NetworkError>;

    /// Create a network.
    async fn create_network(&self, spec: &NetworkSpec) -> Result<NetworkId, NetworkError>;

    /// Remove a network.
    async fn remove_network(&self, id: &NetworkId) -> Result<(), NetworkError>;
}

/// Errors from network operations. Messages are the daemon's own.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    InUse(String),

    #[error("{0}")]
    Runtime(String),
}
