// ABOUTME: Flattens runtime inspect documents into the fixed records tools reply with.
// ABOUTME: One function per entity kind; environment values never make it into a record.

use crate::runtime::traits::{ContainerDetails, ImageDetails, NetworkDetails, VolumeDetails};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A normalized reply record.
pub type Record = Map<String, Value>;

/// Placeholder tag the daemon reports for untagged images.
const UNTAGGED: &str = "<none>:<none>";

/// Anything a tool can report on.
#[derive(Debug, Clone)]
pub enum Entity {
    Image(ImageDetails),
    Container(ContainerEntity),
    Network(NetworkDetails),
    Volume(VolumeDetails),
}

/// A container together with its resolved image, if the image still exists.
#[derive(Debug, Clone)]
pub struct ContainerEntity {
    pub details: ContainerDetails,
    pub image: Option<ImageDetails>,
}

/// Normalize `entity`, then apply `overrides` key by key.
pub fn normalize(entity: &Entity, overrides: Option<&Record>) -> Record {
    let mut record = match entity {
        Entity::Image(image) => into_record(image_record(image)),
        Entity::Container(container) => into_record(container_record(container)),
        Entity::Network(network) => into_record(network_record(network)),
        Entity::Volume(volume) => into_record(volume_record(volume)),
    };

    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            record.insert(key.clone(), value.clone());
        }
    }
    record
}

/// Build a one-key override map, e.g. `{"status": "removed"}`.
pub fn status_override(status: &str) -> Record {
    let mut overrides = Record::new();
    overrides.insert("status".to_string(), Value::String(status.to_string()));
    overrides
}

fn into_record(record: impl Serialize) -> Record {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        _ => Record::new(),
    }
}

/// First 12 characters; image ids keep their `sha256:` prefix plus 10.
pub fn short_id(id: &str) -> String {
    let len = if id.starts_with("sha256:") { 17 } else { 12 };
    id.chars().take(len).collect()
}

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Serialize)]
struct ImageRecord {
    id: String,
    tags: Vec<String>,
    short_id: String,
    labels: BTreeMap<String, String>,
    repo_tags: Vec<String>,
    repo_digests: Vec<String>,
    created: Option<Value>,
    size: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ContainerRecord {
    id: String,
    name: String,
    short_id: String,
    image: Option<ImageRecord>,
    status: Option<String>,
    labels: BTreeMap<String, String>,
    ports: Value,
    created: Option<Value>,
    state: Option<Value>,
    restart_count: Option<i64>,
    networks: Vec<String>,
    mounts: Value,
    config: ConfigRecord,
}

/// Only variable names are kept from the container environment.
#[derive(Debug, Serialize)]
struct ConfigRecord {
    hostname: Option<String>,
    user: Option<String>,
    image: Option<String>,
    env_keys: Vec<String>,
}

#[derive(Debug, Serialize)]
struct NetworkRecord {
    id: String,
    name: Option<String>,
    short_id: String,
    driver: Option<String>,
    scope: Option<String>,
    created: Option<Value>,
    labels: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct VolumeRecord {
    id: String,
    name: String,
    short_id: String,
    labels: BTreeMap<String, String>,
    mountpoint: Option<String>,
    created: Option<Value>,
    driver: Option<String>,
    scope: Option<String>,
}

fn image_record(image: &ImageDetails) -> ImageRecord {
    let repo_tags = image.repo_tags.clone().unwrap_or_default();
    ImageRecord {
        id: image.id().to_string(),
        tags: repo_tags
            .iter()
            .filter(|tag| tag.as_str() != UNTAGGED)
            .cloned()
            .collect(),
        short_id: short_id(image.id()),
        labels: image
            .config
            .as_ref()
            .and_then(|config| config.labels.clone())
            .unwrap_or_default(),
        repo_tags,
        repo_digests: image.repo_digests.clone().unwrap_or_default(),
        created: image.created.clone(),
        size: image.size,
    }
}

fn container_record(container: &ContainerEntity) -> ContainerRecord {
    let details = &container.details;
    let config = details.config.as_ref();
    let settings = details.network_settings.as_ref();

    ContainerRecord {
        id: details.id().to_string(),
        name: details.name().to_string(),
        short_id: short_id(details.id()),
        image: container.image.as_ref().map(image_record),
        status: details.status().map(str::to_string),
        labels: config
            .and_then(|c| c.labels.clone())
            .unwrap_or_default(),
        ports: settings
            .and_then(|s| s.ports.clone())
            .filter(|ports| !ports.is_null())
            .unwrap_or_else(|| Value::Object(Map::new())),
        created: details.created.clone(),
        state: details.state.clone(),
        restart_count: details.restart_count,
        networks: settings
            .and_then(|s| s.networks.as_ref())
            .map(|networks| networks.keys().cloned().collect())
            .unwrap_or_default(),
        mounts: details
            .mounts
            .clone()
            .filter(|mounts| !mounts.is_null())
            .unwrap_or_else(|| Value::Array(Vec::new())),
        config: ConfigRecord {
            hostname: config.and_then(|c| c.hostname.clone()),
            user: config.and_then(|c| c.user.clone()),
            image: config.and_then(|c| c.image.clone()),
            env_keys: config
                .and_then(|c| c.env.as_ref())
                .map(|env| env_keys(env))
                .unwrap_or_default(),
        },
    }
}

/// Names from `KEY=value` entries; an entry without `=` is all name.
fn env_keys(env: &[String]) -> Vec<String> {
    env.iter()
        .map(|entry| entry.split_once('=').map_or(entry.as_str(), |(key, _)| key))
        .map(str::to_string)
        .collect()
}

fn network_record(network: &NetworkDetails) -> NetworkRecord {
    NetworkRecord {
        id: network.id().to_string(),
        name: network.name.clone(),
        short_id: short_id(network.id()),
        driver: network.driver.clone(),
        scope: network.scope.clone(),
        created: network.created.clone(),
        labels: network.labels.clone().unwrap_or_default(),
    }
}

fn volume_record(volume: &VolumeDetails) -> VolumeRecord {
    VolumeRecord {
        id: volume.name().to_string(),
        name: volume.name().to_string(),
        short_id: short_id(volume.name()),
        labels: volume.labels.clone().unwrap_or_default(),
        mountpoint: volume.mountpoint.clone(),
        created: volume.created_at.clone(),
        driver: volume.driver.clone(),
        scope: volume.scope.clone(),
    }
}
