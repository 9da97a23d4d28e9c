// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Normalizes registry host keys so lookups match image references.

use serde::Deserialize;
use std::collections::HashMap;

use super::RegistryConfig;
use crate::types::DEFAULT_REGISTRY;

/// Hostnames Docker Hub answers to, all folded into [`DEFAULT_REGISTRY`].
const DOCKER_HUB_ALIASES: &[&str] = &["index.docker.io", "registry-1.docker.io", "docker.io"];

/// Reduce a registry key to the bare host an image reference would carry.
///
/// Accepts `https://ghcr.io/`, `ghcr.io`, or the legacy
/// `https://index.docker.io/v1/` form.
pub fn normalize_registry_host(key: &str) -> String {
    let host = key
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let host = host.split('/').next().unwrap_or(host).to_ascii_lowercase();

    if DOCKER_HUB_ALIASES.contains(&host.as_str()) {
        DEFAULT_REGISTRY.to_string()
    } else {
        host
    }
}

pub fn deserialize_registries<'de, D>(
    deserializer: D,
) -> Result<HashMap<String, RegistryConfig>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: HashMap<String, RegistryConfig> = HashMap::deserialize(deserializer)?;
    let mut registries = HashMap::with_capacity(raw.len());
    for (key, config) in raw {
        let host = normalize_registry_host(&key);
        if host.is_empty() {
            return Err(serde::de::Error::custom(format!(
                "invalid registry host: {key:?}"
            )));
        }
        if registries.insert(host.clone(), config).is_some() {
            return Err(serde::de::Error::custom(format!(
                "registry {host} is configured more than once"
            )));
        }
    }
    Ok(registries)
}
