// ABOUTME: Image operations trait for container runtimes.
// ABOUTME: List, inspect, pull, push, build, and remove container images.

use super::sealed::Sealed;
use super::shared_types::{BuildSpec, ImageDetails, ImageFilters, RegistryAuth};
use crate::types::{ImageId, ImageReference};
use async_trait::async_trait;

/// Image operations.
#[async_trait]
pub trait ImageOps: Sealed + Send + Sync {
    /// List images matching the filters, with full inspect details.
    async fn list_images(&self, filters: &ImageFilters) -> Result<Vec<ImageDetails>, ImageError>;

    /// Inspect an image by ID or reference.
    async fn inspect_image(&self, image: &ImageId) -> Result<ImageDetails, ImageError>;

    /// Pull an image from a registry.
    async fn pull_image(
        &self,
        reference: &ImageReference,
        auth: Option<&RegistryAuth>,
    ) -> Result<(), ImageError>;

    /// Push a local image to its registry.
    async fn push_image(
        &self,
        reference: &ImageReference,
        auth: Option<&RegistryAuth>,
    ) -> Result<(), ImageError>;

    /// Build an image from a local context directory.
    async fn build_image(&self, spec: &BuildSpec) -> Result<(), ImageError>;

    /// Remove an image.
    async fn remove_image(&self, image: &ImageId, force: bool) -> Result<(), ImageError>;
}

/// Errors from image operations. Messages are the daemon's own.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PullFailed(String),

    #[error("{0}")]
    PushFailed(String),

    #[error("{0}")]
    BuildFailed(String),

    #[error("failed to read build context {path}: {source}")]
    BuildContext {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    InUse(String),

    #[error("{0}")]
    Runtime(String),
}
