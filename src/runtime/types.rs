// ABOUTME: Runtime type definitions for Docker and Podman.
// ABOUTME: Includes RuntimeType, the detected endpoint, and connection settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Seconds the client waits on a single daemon request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// The container runtime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Docker,
    Podman,
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeType::Docker => write!(f, "docker"),
            RuntimeType::Podman => write!(f, "podman"),
        }
    }
}

/// Detected runtime information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    /// The type of runtime detected.
    pub runtime_type: RuntimeType,
    /// Path to the runtime socket.
    pub socket_path: String,
}

/// Where the client should connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A local Unix socket.
    Socket(RuntimeInfo),
    /// Whatever `DOCKER_HOST` points at (unix, tcp, or ssl).
    DockerHost(String),
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Socket(info) => write!(f, "{} at {}", info.runtime_type, info.socket_path),
            Endpoint::DockerHost(host) => write!(f, "DOCKER_HOST={host}"),
        }
    }
}

/// Connection settings; every field is optional and falls back to detection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Explicit runtime type (overrides auto-detection).
    #[serde(default, rename = "type")]
    pub runtime: Option<RuntimeType>,
    /// Explicit socket path (overrides default).
    #[serde(default)]
    pub socket: Option<String>,
    /// Per-request client timeout.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            runtime: None,
            socket: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
