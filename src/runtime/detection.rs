// ABOUTME: Runtime detection logic for the local system.
// ABOUTME: Honors explicit config and DOCKER_HOST, then checks Podman sockets before Docker.

use super::types::{Endpoint, RuntimeConfig, RuntimeInfo, RuntimeType};
use std::path::Path;

/// Error during runtime detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked Podman and Docker sockets)")]
    NoRuntimeFound,
}

const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// Decide which endpoint to connect to.
///
/// Precedence:
/// 1. An explicit socket in `config` (runtime type from config, or guessed from the path)
/// 2. An explicit runtime type in `config` (its default socket)
/// 3. `docker_host`, the value of `DOCKER_HOST` if set
/// 4. Local socket detection, see [`detect_local`]
pub fn resolve_endpoint(
    config: &RuntimeConfig,
    docker_host: Option<String>,
) -> Result<Endpoint, DetectionError> {
    if let Some(socket) = &config.socket {
        let runtime_type = config.runtime.unwrap_or_else(|| guess_runtime(socket));
        return Ok(Endpoint::Socket(RuntimeInfo {
            runtime_type,
            socket_path: socket.clone(),
        }));
    }

    if let Some(runtime_type) = config.runtime {
        return Ok(Endpoint::Socket(RuntimeInfo {
            runtime_type,
            socket_path: default_socket_path(runtime_type),
        }));
    }

    if let Some(host) = docker_host.filter(|h| !h.trim().is_empty()) {
        return Ok(Endpoint::DockerHost(host));
    }

    detect_local().map(Endpoint::Socket)
}

/// Detect container runtime on the local system.
///
/// Detection order:
/// 1. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
/// 2. Rootful Podman socket (`/run/podman/podman.sock`)
/// 3. Docker socket (`/var/run/docker.sock`)
pub fn detect_local() -> Result<RuntimeInfo, DetectionError> {
    if let Some(rootless_socket) = rootless_podman_socket()
        && Path::new(&rootless_socket).exists()
    {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Podman,
            socket_path: rootless_socket,
        });
    }

    if Path::new(ROOTFUL_PODMAN).exists() {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Podman,
            socket_path: ROOTFUL_PODMAN.to_string(),
        });
    }

    if Path::new(DOCKER_SOCKET).exists() {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Docker,
            socket_path: DOCKER_SOCKET.to_string(),
        });
    }

    Err(DetectionError::NoRuntimeFound)
}

fn rootless_podman_socket() -> Option<String> {
    get_uid().map(|uid| format!("/run/user/{}/podman/podman.sock", uid))
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        // Fall back to reading /proc/self/status
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}

fn guess_runtime(socket: &str) -> RuntimeType {
    if socket.contains("podman") {
        RuntimeType::Podman
    } else {
        RuntimeType::Docker
    }
}

fn default_socket_path(runtime: RuntimeType) -> String {
    match runtime {
        RuntimeType::Docker => DOCKER_SOCKET.to_string(),
        RuntimeType::Podman => rootless_podman_socket()
            .filter(|socket| Path::new(socket).exists())
            .unwrap_or_else(|| ROOTFUL_PODMAN.to_string()),
    }
}
