// ABOUTME: Configuration types and parsing for docker-mcp.yml.
// ABOUTME: Handles YAML parsing, runtime connection settings, and registry credentials.

mod deserialize;
mod env_value;

pub use deserialize::normalize_registry_host;
pub use env_value::EnvValue;

use crate::error::{Error, Result};
use crate::runtime::RuntimeConfig;
use crate::runtime::traits::RegistryAuth;
use crate::types::ImageReference;
use deserialize::deserialize_registries;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "docker-mcp.yml";
pub const CONFIG_FILENAME_ALT: &str = "docker-mcp.yaml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DOCKER_MCP_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Credentials keyed by registry host (`docker.io`, `ghcr.io`, ...).
    #[serde(default, deserialize_with = "deserialize_registries")]
    pub registries: HashMap<String, RegistryConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    pub username: String,
    pub password: EnvValue,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file is a valid, all-defaults config.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Find a config file in `dir`.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Load configuration for startup.
    ///
    /// An explicit path (flag or [`CONFIG_ENV`]) must exist. Otherwise the
    /// working directory is searched, and defaults apply when nothing is found.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let explicit: Option<PathBuf> = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match explicit {
            Some(path) => Self::load(&path),
            None => match Self::discover(dir) {
                Err(Error::ConfigNotFound(_)) => {
                    tracing::debug!(dir = %dir.display(), "no config file found, using defaults");
                    Ok(Self::default())
                }
                other => other,
            },
        }
    }

    /// Resolve every registry password now so a bad secret fails at startup.
    pub fn credentials(&self) -> Result<RegistryCredentials> {
        let by_host = self
            .registries
            .iter()
            .map(|(host, registry)| {
                registry.password.resolve().map(|password| {
                    (
                        host.clone(),
                        RegistryAuth {
                            username: registry.username.clone(),
                            password,
                            server: host.clone(),
                        },
                    )
                })
            })
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(RegistryCredentials { by_host })
    }
}

/// Resolved registry credentials.
#[derive(Debug, Clone, Default)]
pub struct RegistryCredentials {
    by_host: HashMap<String, RegistryAuth>,
}

impl RegistryCredentials {
    /// Credentials for the registry that serves `reference`, if configured.
    pub fn for_reference(&self, reference: &ImageReference) -> Option<&RegistryAuth> {
        self.by_host
            .get(&normalize_registry_host(reference.registry_host()))
    }

    pub fn len(&self) -> usize {
        self.by_host.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_host.is_empty()
    }
}

impl FromIterator<RegistryAuth> for RegistryCredentials {
    fn from_iter<I: IntoIterator<Item = RegistryAuth>>(iter: I) -> Self {
        Self {
            by_host: iter
                .into_iter()
                .map(|auth| (normalize_registry_host(&auth.server), auth))
                .collect(),
        }
    }
}
