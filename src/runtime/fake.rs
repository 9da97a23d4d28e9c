// ABOUTME: In-memory runtime used by dispatcher, resource, and server tests.
// ABOUTME: Behaves like a tiny daemon and records every call it receives.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    BuildSpec, ContainerDetails, ContainerError, ContainerOps, ContainerSpec, ImageDetails,
    ImageError, ImageFilters, ImageOps, LogError, LogOps, LogOptions, LogTail, NetworkDetails,
    NetworkError, NetworkOps, NetworkSpec, RegistryAuth, RuntimeInfo, RuntimeInfoError,
    RuntimeMetadata, StatsError, StatsOps, VolumeDetails, VolumeError, VolumeOps, VolumeSpec,
};
use crate::types::{ContainerId, ImageId, ImageReference, NetworkId, VolumeName};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::time::Duration;

#[derive(Default)]
struct State {
    containers: Vec<(ContainerDetails, String)>,
    images: Vec<ImageDetails>,
    networks: Vec<NetworkDetails>,
    volumes: Vec<VolumeDetails>,
    next_id: u64,
}

impl State {
    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("{:064x}", 0xfeed_0000 + self.next_id)
    }

    fn container_index(&self, key: &str) -> Option<usize> {
        self.containers
            .iter()
            .position(|(c, _)| c.id() == key || c.name() == key || c.id().starts_with(key))
    }

    fn image_index(&self, key: &str) -> Option<usize> {
        let tagged = if key.contains(':') && !key.starts_with("sha256:") {
            key.to_string()
        } else {
            format!("{key}:latest")
        };
        self.images.iter().position(|image| {
            image.id() == key
                || image
                    .repo_tags
                    .iter()
                    .flatten()
                    .any(|tag| tag == key || *tag == tagged)
        })
    }

    fn network_index(&self, key: &str) -> Option<usize> {
        self.networks
            .iter()
            .position(|n| n.id() == key || n.name.as_deref() == Some(key))
    }

    fn volume_index(&self, key: &str) -> Option<usize> {
        self.volumes.iter().position(|v| v.name() == key)
    }

    fn add_image(&mut self, tag: &str) -> String {
        if let Some(index) = self.image_index(tag) {
            return self.images[index].id().to_string();
        }
        let id = format!("sha256:{}", self.fresh_id());
        self.images.push(image(&id, &[tag]));
        id
    }
}

/// The name a pulled image is stored under; names the daemon would refuse
/// fail the same way.
fn local_name(reference: &ImageReference) -> Result<String, ImageError> {
    let name = reference.to_string();
    if ImageReference::parse(&name).is_err() {
        return Err(ImageError::Runtime(format!("invalid reference format: {name}")));
    }
    Ok(match (reference.tag(), reference.digest()) {
        (None, None) => format!("{name}:latest"),
        _ => name,
    })
}

/// Fake runtime with canned state. Cheap to build per test.
#[derive(Default)]
pub struct FakeRuntime {
    state: Mutex<State>,
    calls: Mutex<Vec<String>>,
}

/// Build an image inspect document.
pub fn image(id: &str, tags: &[&str]) -> ImageDetails {
    serde_json::from_value(json!({
        "Id": id,
        "RepoTags": tags,
        "RepoDigests": [],
        "Created": "2024-01-01T00:00:00Z",
        "Size": 1024,
        "Config": { "Labels": { "org.example": "fake" } },
    }))
    .expect("valid image document")
}

/// Build a container inspect document.
pub fn container(id: &str, name: &str, image_id: &str, status: &str, env: &[&str]) -> ContainerDetails {
    serde_json::from_value(json!({
        "Id": id,
        "Name": format!("/{name}"),
        "Image": image_id,
        "Created": "2024-01-01T00:00:00Z",
        "State": { "Status": status, "Running": status == "running" },
        "RestartCount": 0,
        "Mounts": [],
        "Config": {
            "Hostname": &id[..12.min(id.len())],
            "User": "",
            "Image": image_id,
            "Env": env,
            "Labels": {},
        },
        "NetworkSettings": {
            "Ports": {},
            "Networks": { "bridge": {} },
        },
    }))
    .expect("valid container document")
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(self, id: &str, tags: &[&str]) -> Self {
        self.state.lock().images.push(image(id, tags));
        self
    }

    pub fn with_container(self, details: ContainerDetails, logs: &str) -> Self {
        self.state.lock().containers.push((details, logs.to_string()));
        self
    }

    pub fn with_network(self, id: &str, name: &str) -> Self {
        self.state.lock().networks.push(network(id, name, "bridge", false));
        self
    }

    pub fn with_volume(self, name: &str) -> Self {
        self.state.lock().volumes.push(volume(name, "local", &[]));
        self
    }

    /// Names of the trait methods called so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().push(call.to_string());
    }

    fn set_status(&self, id: &ContainerId, status: &str) -> Result<(), ContainerError> {
        let mut state = self.state.lock();
        let index = state
            .container_index(id.as_str())
            .ok_or_else(|| no_such_container(id.as_str()))?;
        let details = &mut state.containers[index].0;
        details.state = Some(json!({ "Status": status, "Running": status == "running" }));
        Ok(())
    }
}

fn no_such_container(key: &str) -> ContainerError {
    ContainerError::NotFound(format!("No such container: {key}"))
}

fn network(id: &str, name: &str, driver: &str, internal: bool) -> NetworkDetails {
    serde_json::from_value(json!({
        "Id": id,
        "Name": name,
        "Driver": driver,
        "Scope": "local",
        "Internal": internal,
        "Created": "2024-01-01T00:00:00Z",
        "Labels": {},
    }))
    .expect("valid network document")
}

fn volume(name: &str, driver: &str, labels: &[(&str, &str)]) -> VolumeDetails {
    let labels: serde_json::Map<String, Value> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect();
    serde_json::from_value(json!({
        "Name": name,
        "Driver": driver,
        "Mountpoint": format!("/var/lib/docker/volumes/{name}/_data"),
        "CreatedAt": "2024-01-01T00:00:00Z",
        "Labels": labels,
        "Scope": "local",
    }))
    .expect("valid volume document")
}

impl Sealed for FakeRuntime {}

#[async_trait]
impl RuntimeInfo for FakeRuntime {
    async fn info(&self) -> Result<RuntimeMetadata, RuntimeInfoError> {
        self.record("info");
        Ok(RuntimeMetadata {
            name: "Fake".into(),
            version: "0.0.0".into(),
            api_version: "1.47".into(),
            os: "linux".into(),
            arch: "x86_64".into(),
        })
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        self.record("ping");
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for FakeRuntime {
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerDetails>, ContainerError> {
        self.record("list_containers");
        Ok(self
            .state
            .lock()
            .containers
            .iter()
            .map(|(c, _)| c)
            .filter(|c| all || c.status() == Some("running"))
            .cloned()
            .collect())
    }

    async fn inspect_container(
        &self,
        id: &ContainerId,
    ) -> Result<ContainerDetails, ContainerError> {
        self.record("inspect_container");
        let state = self.state.lock();
        state
            .container_index(id.as_str())
            .map(|index| state.containers[index].0.clone())
            .ok_or_else(|| no_such_container(id.as_str()))
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, ContainerError> {
        self.record("create_container");
        let mut state = self.state.lock();
        let image_index = state.image_index(&spec.image).ok_or_else(|| {
            ContainerError::ImageNotFound(format!("No such image: {}", spec.image))
        })?;
        if let Some(name) = &spec.name
            && state.container_index(name).is_some()
        {
            return Err(ContainerError::AlreadyExists(format!(
                "Conflict. The container name \"/{name}\" is already in use"
            )));
        }

        let image_id = state.images[image_index].id().to_string();
        let id = state.fresh_id();
        let name = spec.name.clone().unwrap_or_else(|| format!("fake_{}", &id[56..]));
        let env: Vec<String> = spec.env.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let env: Vec<&str> = env.iter().map(String::as_str).collect();
        let details = container(&id, &name, &image_id, "created", &env);
        state.containers.push((details, String::new()));
        Ok(ContainerId::new(id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.record("start_container");
        self.set_status(id, "running")
    }

    async fn stop_container(
        &self,
        id: &ContainerId,
        _timeout: Option<Duration>,
    ) -> Result<(), ContainerError> {
        self.record("stop_container");
        self.set_status(id, "exited")
    }

    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<(), ContainerError> {
        self.record("remove_container");
        let mut state = self.state.lock();
        let index = state
            .container_index(id.as_str())
            .ok_or_else(|| no_such_container(id.as_str()))?;
        if !force && state.containers[index].0.status() == Some("running") {
            return Err(ContainerError::AlreadyExists(format!(
                "cannot remove container {}: container is running",
                id
            )));
        }
        state.containers.remove(index);
        Ok(())
    }
}

#[async_trait]
impl ImageOps for FakeRuntime {
    async fn list_images(&self, filters: &ImageFilters) -> Result<Vec<ImageDetails>, ImageError> {
        self.record("list_images");
        let state = self.state.lock();
        Ok(state
            .images
            .iter()
            .filter(|image| match &filters.reference {
                Some(reference) => image
                    .repo_tags
                    .iter()
                    .flatten()
                    .any(|tag| tag.split(':').next() == Some(reference.as_str())),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn inspect_image(&self, image: &ImageId) -> Result<ImageDetails, ImageError> {
        self.record("inspect_image");
        let state = self.state.lock();
        state
            .image_index(image.as_str())
            .map(|index| state.images[index].clone())
            .ok_or_else(|| ImageError::NotFound(format!("No such image: {image}")))
    }

    async fn pull_image(
        &self,
        reference: &ImageReference,
        _auth: Option<&RegistryAuth>,
    ) -> Result<(), ImageError> {
        self.record("pull_image");
        if reference.repository().starts_with("missing") {
            return Err(ImageError::NotFound(format!(
                "pull access denied for {}, repository does not exist",
                reference.repository()
            )));
        }
        let name = local_name(reference)?;
        self.state.lock().add_image(&name);
        Ok(())
    }

    async fn push_image(
        &self,
        reference: &ImageReference,
        auth: Option<&RegistryAuth>,
    ) -> Result<(), ImageError> {
        self.record("push_image");
        if auth.is_some() {
            self.record("push_image:authenticated");
        }
        let name = local_name(reference)?;
        match self.state.lock().image_index(&name) {
            Some(_) => Ok(()),
            None => Err(ImageError::NotFound(format!(
                "An image does not exist locally with the tag: {}",
                reference.repository()
            ))),
        }
    }

    async fn build_image(&self, spec: &BuildSpec) -> Result<(), ImageError> {
        self.record("build_image");
        if !spec.context.is_dir() {
            return Err(ImageError::BuildContext {
                path: spec.context.display().to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        self.state.lock().add_image(&spec.tag);
        Ok(())
    }

    async fn remove_image(&self, image: &ImageId, _force: bool) -> Result<(), ImageError> {
        self.record("remove_image");
        let mut state = self.state.lock();
        let index = state
            .image_index(image.as_str())
            .ok_or_else(|| ImageError::NotFound(format!("No such image: {image}")))?;
        state.images.remove(index);
        Ok(())
    }
}

#[async_trait]
impl NetworkOps for FakeRuntime {
    async fn list_networks(&self) -> Result<Vec<NetworkDetails>, NetworkError> {
        self.record("list_networks");
        Ok(self.state.lock().networks.clone())
    }

    async fn inspect_network(&self, id: &NetworkId) -> Result<NetworkDetails, NetworkError> {
        self.record("inspect_network");
        let state = self.state.lock();
        state
            .network_index(id.as_str())
            .map(|index| state.networks[index].clone())
            .ok_or_else(|| NetworkError::NotFound(format!("network {id} not found")))
    }

    async fn create_network(&self, spec: &NetworkSpec) -> Result<NetworkId, NetworkError> {
        self.record("create_network");
        let mut state = self.state.lock();
        if state.network_index(&spec.name).is_some() {
            return Err(NetworkError::AlreadyExists(format!(
                "network with name {} already exists",
                spec.name
            )));
        }
        let id = state.fresh_id();
        let driver = spec.driver.as_deref().unwrap_or("bridge");
        state
            .networks
            .push(network(&id, &spec.name, driver, spec.internal));
        Ok(NetworkId::new(id))
    }

    async fn remove_network(&self, id: &NetworkId) -> Result<(), NetworkError> {
        self.record("remove_network");
        let mut state = self.state.lock();
        let index = state
            .network_index(id.as_str())
            .ok_or_else(|| NetworkError::NotFound(format!("network {id} not found")))?;
        state.networks.remove(index);
        Ok(())
    }
}

#[async_trait]
impl VolumeOps for FakeRuntime {
    async fn list_volumes(&self) -> Result<Vec<VolumeDetails>, VolumeError> {
        self.record("list_volumes");
        Ok(self.state.lock().volumes.clone())
    }

    async fn inspect_volume(&self, name: &VolumeName) -> Result<VolumeDetails, VolumeError> {
        self.record("inspect_volume");
        let state = self.state.lock();
        state
            .volume_index(name.as_str())
            .map(|index| state.volumes[index].clone())
            .ok_or_else(|| VolumeError::NotFound(format!("get {name}: no such volume")))
    }

    async fn create_volume(&self, spec: &VolumeSpec) -> Result<VolumeDetails, VolumeError> {
        self.record("create_volume");
        let labels: Vec<(&str, &str)> = spec
            .labels
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let created = volume(
            &spec.name,
            spec.driver.as_deref().unwrap_or("local"),
            &labels,
        );
        let mut state = self.state.lock();
        match state.volume_index(&spec.name) {
            Some(index) => Ok(state.volumes[index].clone()),
            None => {
                state.volumes.push(created.clone());
                Ok(created)
            }
        }
    }

    async fn remove_volume(&self, name: &VolumeName, _force: bool) -> Result<(), VolumeError> {
        self.record("remove_volume");
        let mut state = self.state.lock();
        let index = state
            .volume_index(name.as_str())
            .ok_or_else(|| VolumeError::NotFound(format!("get {name}: no such volume")))?;
        state.volumes.remove(index);
        Ok(())
    }
}

#[async_trait]
impl LogOps for FakeRuntime {
    async fn container_logs(
        &self,
        id: &ContainerId,
        opts: &LogOptions,
    ) -> Result<String, LogError> {
        self.record("container_logs");
        let state = self.state.lock();
        let index = state
            .container_index(id.as_str())
            .ok_or_else(|| LogError::ContainerNotFound(format!("No such container: {id}")))?;
        let logs = &state.containers[index].1;
        match opts.tail {
            LogTail::All => Ok(logs.clone()),
            LogTail::Lines(n) => {
                let lines: Vec<&str> = logs.split_inclusive('\n').collect();
                let skip = lines.len().saturating_sub(n as usize);
                Ok(lines[skip..].concat())
            }
        }
    }
}

#[async_trait]
impl StatsOps for FakeRuntime {
    async fn container_stats(&self, id: &ContainerId) -> Result<Value, StatsError> {
        self.record("container_stats");
        let state = self.state.lock();
        let index = state
            .container_index(id.as_str())
            .ok_or_else(|| StatsError::ContainerNotFound(format!("No such container: {id}")))?;
        Ok(json!({
            "id": state.containers[index].0.id(),
            "read": "2024-01-01T00:00:00Z",
            "cpu_stats": { "online_cpus": 2 },
            "memory_stats": { "usage": 4096 },
        }))
    }
}
