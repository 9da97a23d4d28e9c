// ABOUTME: Container runtime access for Docker and Podman.
// ABOUTME: Endpoint detection, capability traits, and the bollard-backed implementation.

mod bollard;
mod build_context;
mod detection;
mod error;
pub mod traits;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use self::bollard::BollardRuntime;
pub use build_context::pack_build_context;
pub use detection::{DetectionError, detect_local, resolve_endpoint};
pub use error::{RuntimeError, RuntimeErrorKind};
pub use traits::FullRuntime;
pub use types::{DEFAULT_TIMEOUT, Endpoint, RuntimeConfig, RuntimeInfo, RuntimeType};

/// Result alias for runtime-backed operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
