// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: Inspect payloads for containers, images, networks, volumes, plus create specs.

use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

// =============================================================================
// Inspect payloads
// =============================================================================
//
// These mirror the daemon's inspect documents (PascalCase keys) and keep only
// the attributes the tool layer reports. Every field is optional because
// Docker and Podman disagree on which ones they fill in.

/// Container inspect document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerDetails {
    pub id: Option<String>,
    pub name: Option<String>,
    /// ID of the image the container was created from.
    pub image: Option<String>,
    pub created: Option<Value>,
    pub state: Option<Value>,
    pub restart_count: Option<i64>,
    pub mounts: Option<Value>,
    pub config: Option<ContainerConfigDetails>,
    pub network_settings: Option<NetworkSettingsDetails>,
}

impl ContainerDetails {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Container name without the leading slash the daemon adds.
    pub fn name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_default()
            .trim_start_matches('/')
    }

    /// Lifecycle status from the state object (`created`, `running`, `exited`, ...).
    pub fn status(&self) -> Option<&str> {
        self.state
            .as_ref()
            .and_then(|state| state.get("Status"))
            .and_then(Value::as_str)
    }
}

/// The `Config` section of a container inspect document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerConfigDetails {
    pub hostname: Option<String>,
    pub user: Option<String>,
    pub image: Option<String>,
    /// Raw `KEY=value` entries. Only the keys ever leave this crate.
    pub env: Option<Vec<String>>,
    pub labels: Option<BTreeMap<String, String>>,
}

/// The `NetworkSettings` section of a container inspect document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkSettingsDetails {
    pub ports: Option<Value>,
    pub networks: Option<BTreeMap<String, Value>>,
}

/// Image inspect document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageDetails {
    pub id: Option<String>,
    pub repo_tags: Option<Vec<String>>,
    pub repo_digests: Option<Vec<String>>,
    pub created: Option<Value>,
    pub size: Option<i64>,
    pub config: Option<ImageConfigDetails>,
}

impl ImageDetails {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// The `Config` section of an image inspect document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageConfigDetails {
    pub labels: Option<BTreeMap<String, String>>,
}

/// Network inspect document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkDetails {
    pub id: Option<String>,
    pub name: Option<String>,
    pub driver: Option<String>,
    pub scope: Option<String>,
    pub created: Option<Value>,
    pub labels: Option<BTreeMap<String, String>>,
}

impl NetworkDetails {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// Volume inspect document. Volumes are addressed by name; they have no ID.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VolumeDetails {
    pub name: Option<String>,
    pub driver: Option<String>,
    pub mountpoint: Option<String>,
    pub created_at: Option<Value>,
    pub labels: Option<BTreeMap<String, String>>,
    pub scope: Option<String>,
}

impl VolumeDetails {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

// =============================================================================
// Create specs
// =============================================================================

/// Configuration for creating a container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerSpec {
    /// Image to run.
    pub image: String,
    /// Name for the container; the daemon picks one when absent.
    pub name: Option<String>,
    /// Command to run (overrides image CMD).
    pub command: Option<Vec<String>>,
    /// Entrypoint (overrides image ENTRYPOINT).
    pub entrypoint: Option<Vec<String>>,
    /// Network mode / network name to attach to.
    pub network: Option<String>,
    /// Environment variables.
    pub env: BTreeMap<String, String>,
    /// Published ports. Several entries may share a container port.
    pub ports: Vec<PortMapping>,
    /// Bind strings in `source:target[:mode]` form.
    pub binds: Vec<String>,
}

/// One published port, in the daemon's own string forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    /// Container port with protocol, e.g. `8080/tcp`.
    pub port_key: String,
    /// Host port; `None` lets the daemon pick one.
    pub host_port: Option<String>,
    /// Host IP to bind to.
    pub host_ip: Option<String>,
}

impl PortMapping {
    /// A mapping for `key`, which gets `/tcp` when it names no protocol.
    pub fn new(key: &str, host_ip: Option<String>, host_port: Option<String>) -> Self {
        let port_key = if key.contains('/') {
            key.to_string()
        } else {
            format!("{key}/tcp")
        };
        Self {
            port_key,
            host_port,
            host_ip,
        }
    }
}

/// Filters for listing images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFilters {
    /// Include intermediate images.
    pub all: bool,
    /// Repository name or reference pattern.
    pub reference: Option<String>,
    /// Only dangling (`true`) or only tagged (`false`) images.
    pub dangling: Option<bool>,
    /// Label filters in `key` or `key=value` form.
    pub labels: Vec<String>,
}

impl ImageFilters {
    /// Render as the daemon's `filters` query map.
    pub fn to_filter_map(&self) -> HashMap<String, Vec<String>> {
        let mut filters = HashMap::new();
        if let Some(reference) = &self.reference {
            filters.insert("reference".to_string(), vec![reference.clone()]);
        }
        if let Some(dangling) = self.dangling {
            filters.insert("dangling".to_string(), vec![dangling.to_string()]);
        }
        if !self.labels.is_empty() {
            filters.insert("label".to_string(), self.labels.clone());
        }
        filters
    }
}

/// Configuration for building an image from a local context directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
    /// Build context directory.
    pub context: PathBuf,
    /// Tag applied to the result.
    pub tag: String,
    /// Dockerfile path relative to the context.
    pub dockerfile: Option<String>,
}

/// Configuration for creating a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSpec {
    /// Network name.
    pub name: String,
    /// Network driver (bridge, host, overlay, etc.).
    pub driver: Option<String>,
    /// Restrict external access.
    pub internal: bool,
}

/// Configuration for creating a volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSpec {
    /// Volume name.
    pub name: String,
    /// Volume driver.
    pub driver: Option<String>,
    /// Labels.
    pub labels: BTreeMap<String, String>,
}

/// Registry authentication credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryAuth {
    /// Username.
    pub username: String,
    /// Password or token.
    pub password: String,
    /// Registry server (e.g., "ghcr.io").
    pub server: String,
}

impl std::fmt::Debug for RegistryAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("server", &self.server)
            .finish()
    }
}

/// Runtime metadata.
#[derive(Debug, Clone)]
pub struct RuntimeMetadata {
    /// Runtime name (e.g., "docker", "podman").
    pub name: String,
    /// Runtime version.
    pub version: String,
    /// API version.
    pub api_version: String,
    /// Operating system.
    pub os: String,
    /// Architecture.
    pub arch: String,
}
