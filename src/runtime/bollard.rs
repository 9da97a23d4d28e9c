// ABOUTME: Bollard-based container runtime implementation.
// ABOUTME: Supports both Docker and Podman via Docker-compatible API.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    BuildSpec, ContainerDetails, ContainerError, ContainerOps, ContainerSpec, ImageDetails,
    ImageError, ImageFilters, ImageOps, LogError, LogOps, LogOptions, NetworkDetails,
    NetworkError, NetworkOps, NetworkSpec, RegistryAuth, RuntimeInfo, RuntimeInfoError,
    RuntimeMetadata, StatsError, StatsOps, VolumeDetails, VolumeError, VolumeOps, VolumeSpec,
};
use crate::runtime::build_context::pack_build_context;
use crate::runtime::types::{Endpoint, RuntimeType};
use crate::types::{ContainerId, ImageId, ImageReference, NetworkId, VolumeName};
use async_trait::async_trait;
use bollard::Docker;
use bollard::auth::DockerCredentials;
use bollard::models::{
    ContainerCreateBody, ErrorDetail, HostConfig, PortBinding, VolumeCreateRequest,
};
use bollard::query_parameters::{
    BuildImageOptionsBuilder, CreateContainerOptions, CreateImageOptions,
    InspectContainerOptions, InspectNetworkOptions, ListContainersOptions, ListImagesOptions,
    ListNetworksOptions, ListVolumesOptions, LogsOptions, PushImageOptionsBuilder,
    RemoveContainerOptions, RemoveImageOptions, RemoveVolumeOptions, StartContainerOptions,
    StatsOptions, StopContainerOptions,
};
use futures::StreamExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn status_of(e: &bollard::errors::Error) -> Option<(u16, &str)> {
    match e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } => Some((*status_code, message.as_str())),
        _ => None,
    }
}

fn map_container_create_error(e: bollard::errors::Error) -> ContainerError {
    match status_of(&e) {
        Some((404, message)) => ContainerError::ImageNotFound(message.to_string()),
        Some((409, message)) => ContainerError::AlreadyExists(message.to_string()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_not_found_error(e: bollard::errors::Error) -> ContainerError {
    match status_of(&e) {
        Some((404, message)) => ContainerError::NotFound(message.to_string()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

/// Start and stop answer 304 when the container is already in the requested
/// state; that counts as success.
fn ignore_not_modified(
    result: Result<(), bollard::errors::Error>,
) -> Result<(), bollard::errors::Error> {
    match result {
        Err(e) if matches!(status_of(&e), Some((304, _))) => Ok(()),
        other => other,
    }
}

fn map_image_not_found_error(e: bollard::errors::Error) -> ImageError {
    match status_of(&e) {
        Some((404, message)) => ImageError::NotFound(message.to_string()),
        _ => ImageError::Runtime(e.to_string()),
    }
}

fn map_image_remove_error(e: bollard::errors::Error) -> ImageError {
    match status_of(&e) {
        Some((404, message)) => ImageError::NotFound(message.to_string()),
        Some((409, message)) => ImageError::InUse(message.to_string()),
        _ => ImageError::Runtime(e.to_string()),
    }
}

fn map_network_not_found_error(e: bollard::errors::Error) -> NetworkError {
    match status_of(&e) {
        Some((404, message)) => NetworkError::NotFound(message.to_string()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

fn map_network_create_error(e: bollard::errors::Error) -> NetworkError {
    match status_of(&e) {
        Some((409, message)) => NetworkError::AlreadyExists(message.to_string()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

fn map_network_remove_error(e: bollard::errors::Error) -> NetworkError {
    match status_of(&e) {
        Some((404, message)) => NetworkError::NotFound(message.to_string()),
        Some((403 | 409, message)) => NetworkError::InUse(message.to_string()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

fn map_volume_not_found_error(e: bollard::errors::Error) -> VolumeError {
    match status_of(&e) {
        Some((404, message)) => VolumeError::NotFound(message.to_string()),
        _ => VolumeError::Runtime(e.to_string()),
    }
}

fn map_volume_remove_error(e: bollard::errors::Error) -> VolumeError {
    match status_of(&e) {
        Some((404, message)) => VolumeError::NotFound(message.to_string()),
        Some((409, message)) => VolumeError::InUse(message.to_string()),
        _ => VolumeError::Runtime(e.to_string()),
    }
}

fn map_log_error(e: bollard::errors::Error) -> LogError {
    match status_of(&e) {
        Some((404, message)) => LogError::ContainerNotFound(message.to_string()),
        _ => LogError::StreamError(e.to_string()),
    }
}

fn map_stats_error(e: bollard::errors::Error) -> StatsError {
    match status_of(&e) {
        Some((404, message)) => StatsError::ContainerNotFound(message.to_string()),
        _ => StatsError::Runtime(e.to_string()),
    }
}

/// Convert a bollard model into one of our inspect documents.
///
/// Both sides use the daemon's PascalCase keys, so this goes through JSON
/// and keeps only the fields the details types declare.
fn reshape<T: DeserializeOwned>(model: impl Serialize) -> Result<T, String> {
    serde_json::to_value(model)
        .and_then(serde_json::from_value)
        .map_err(|e| format!("unexpected response from runtime: {e}"))
}

/// Progress streams report failures in-band through `errorDetail`.
fn stream_error(detail: Option<ErrorDetail>) -> Option<String> {
    detail
        .and_then(|detail| detail.message)
        .filter(|message| !message.is_empty())
}

fn credentials(auth: Option<&RegistryAuth>) -> Option<DockerCredentials> {
    auth.map(|a| DockerCredentials {
        username: Some(a.username.clone()),
        password: Some(a.password.clone()),
        serveraddress: Some(a.server.clone()),
        ..Default::default()
    })
}

fn volume_request(spec: &VolumeSpec) -> VolumeCreateRequest {
    VolumeCreateRequest {
        name: Some(spec.name.clone()),
        driver: spec.driver.clone(),
        labels: if spec.labels.is_empty() {
            None
        } else {
            Some(spec.labels.clone().into_iter().collect())
        },
        ..Default::default()
    }
}

fn container_body(spec: &ContainerSpec) -> ContainerCreateBody {
    let env: Vec<String> = spec
        .env
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();

    let mut host_config = HostConfig::default();

    // Several host bindings may share one container port.
    let mut port_bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
    let mut exposed_ports: Vec<String> = Vec::new();
    for port in &spec.ports {
        let port_key = port.port_key.clone();
        if !exposed_ports.contains(&port_key) {
            exposed_ports.push(port_key.clone());
        }
        port_bindings
            .entry(port_key)
            .or_insert_with(|| Some(Vec::new()))
            .get_or_insert_with(Vec::new)
            .push(PortBinding {
                host_ip: port.host_ip.clone(),
                host_port: port.host_port.clone(),
            });
    }
    if !port_bindings.is_empty() {
        host_config.port_bindings = Some(port_bindings);
    }

    if !spec.binds.is_empty() {
        host_config.binds = Some(spec.binds.clone());
    }

    if let Some(ref network) = spec.network {
        host_config.network_mode = Some(network.clone());
    }

    ContainerCreateBody {
        image: Some(spec.image.clone()),
        env: if env.is_empty() { None } else { Some(env) },
        cmd: spec.command.clone(),
        entrypoint: spec.entrypoint.clone(),
        host_config: Some(host_config),
        exposed_ports: if exposed_ports.is_empty() {
            None
        } else {
            Some(exposed_ports)
        },
        ..Default::default()
    }
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Container runtime implementation using bollard.
///
/// Supports both Docker and Podman via Docker-compatible API.
pub struct BollardRuntime {
    client: Docker,
    runtime_type: RuntimeType,
}

impl BollardRuntime {
    /// Create a new BollardRuntime from a Docker client.
    pub fn new(client: Docker, runtime_type: RuntimeType) -> Self {
        Self {
            client,
            runtime_type,
        }
    }

    /// Connect to the endpoint chosen by [`super::resolve_endpoint`].
    ///
    /// No request is made here; use [`RuntimeInfo::ping`] to check liveness.
    pub fn connect(endpoint: &Endpoint, timeout: Duration) -> Result<Self, RuntimeInfoError> {
        match endpoint {
            Endpoint::Socket(info) => {
                let client = Docker::connect_with_unix(
                    &info.socket_path,
                    timeout.as_secs(),
                    bollard::API_DEFAULT_VERSION,
                )
                .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
                Ok(Self::new(client, info.runtime_type))
            }
            Endpoint::DockerHost(_) => {
                let client = Docker::connect_with_defaults()
                    .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?
                    .with_timeout(timeout);
                Ok(Self::new(client, RuntimeType::Docker))
            }
        }
    }

    /// Get the runtime type (Docker or Podman).
    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }
}

// Implement Sealed trait to allow runtime trait implementations
impl Sealed for BollardRuntime {}

#[async_trait]
impl RuntimeInfo for BollardRuntime {
    async fn info(&self) -> Result<RuntimeMetadata, RuntimeInfoError> {
        let info = self
            .client
            .info()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;

        let name = match self.runtime_type {
            RuntimeType::Docker => "Docker".to_string(),
            RuntimeType::Podman => "Podman".to_string(),
        };

        Ok(RuntimeMetadata {
            name,
            version: info.server_version.unwrap_or_default(),
            api_version: bollard::API_DEFAULT_VERSION.to_string(),
            os: info.operating_system.unwrap_or_default(),
            arch: info.architecture.unwrap_or_default(),
        })
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        self.client
            .ping()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerDetails>, ContainerError> {
        let opts = ListContainersOptions {
            all,
            ..Default::default()
        };

        let summaries = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(|e| ContainerError::Runtime(e.to_string()))?;

        let mut containers = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let Some(id) = summary.id else { continue };
            match self.inspect_container(&ContainerId::new(id)).await {
                Ok(details) => containers.push(details),
                // Removed between list and inspect.
                Err(ContainerError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(containers)
    }

    async fn inspect_container(
        &self,
        id: &ContainerId,
    ) -> Result<ContainerDetails, ContainerError> {
        let details = self
            .client
            .inspect_container(id.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(map_container_not_found_error)?;

        reshape(details).map_err(ContainerError::Runtime)
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, ContainerError> {
        let opts = CreateContainerOptions {
            name: spec.name.clone(),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(Some(opts), container_body(spec))
            .await
            .map_err(map_container_create_error)?;

        tracing::debug!(container = %response.id, "created container");

        Ok(ContainerId::new(response.id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        let result = self
            .client
            .start_container(id.as_str(), None::<StartContainerOptions>)
            .await;

        ignore_not_modified(result).map_err(map_container_not_found_error)
    }

    async fn stop_container(
        &self,
        id: &ContainerId,
        timeout: Option<Duration>,
    ) -> Result<(), ContainerError> {
        let opts = StopContainerOptions {
            t: timeout.map(|d| d.as_secs() as i32),
            signal: None,
        };

        let result = self.client.stop_container(id.as_str(), Some(opts)).await;

        ignore_not_modified(result).map_err(map_container_not_found_error)
    }

    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<(), ContainerError> {
        let opts = RemoveContainerOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_container(id.as_str(), Some(opts))
            .await
            .map_err(map_container_not_found_error)?;

        Ok(())
    }
}

#[async_trait]
impl ImageOps for BollardRuntime {
    async fn list_images(&self, filters: &ImageFilters) -> Result<Vec<ImageDetails>, ImageError> {
        let opts = ListImagesOptions {
            all: filters.all,
            filters: Some(filters.to_filter_map()),
            ..Default::default()
        };

        let summaries = self
            .client
            .list_images(Some(opts))
            .await
            .map_err(|e| ImageError::Runtime(e.to_string()))?;

        let mut images = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let listed: ImageDetails = reshape(summary).map_err(ImageError::Runtime)?;
            match self.inspect_image(&ImageId::new(listed.id())).await {
                Ok(details) => images.push(details),
                // Removed between list and inspect.
                Err(ImageError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(images)
    }

    async fn inspect_image(&self, image: &ImageId) -> Result<ImageDetails, ImageError> {
        let details = self
            .client
            .inspect_image(image.as_str())
            .await
            .map_err(map_image_not_found_error)?;

        reshape(details).map_err(ImageError::Runtime)
    }

    async fn pull_image(
        &self,
        reference: &ImageReference,
        auth: Option<&RegistryAuth>,
    ) -> Result<(), ImageError> {
        let opts = CreateImageOptions {
            from_image: Some(reference.repository().to_string()),
            tag: Some(reference.remote_tag().to_string()),
            ..Default::default()
        };

        // Pull returns a stream of progress updates - consume it
        let mut stream = self.client.create_image(Some(opts), None, credentials(auth));
        while let Some(result) = stream.next().await {
            let progress = result.map_err(|e| match status_of(&e) {
                Some((404, message)) => ImageError::NotFound(message.to_string()),
                _ => ImageError::PullFailed(e.to_string()),
            })?;
            if let Some(message) = stream_error(progress.error_detail) {
                return Err(ImageError::PullFailed(message));
            }
        }

        Ok(())
    }

    async fn push_image(
        &self,
        reference: &ImageReference,
        auth: Option<&RegistryAuth>,
    ) -> Result<(), ImageError> {
        let opts = PushImageOptionsBuilder::default()
            .tag(reference.remote_tag())
            .build();

        let mut stream =
            self.client
                .push_image(reference.repository(), Some(opts), credentials(auth));
        while let Some(result) = stream.next().await {
            let progress = result.map_err(|e| match status_of(&e) {
                Some((404, message)) => ImageError::NotFound(message.to_string()),
                _ => ImageError::PushFailed(e.to_string()),
            })?;
            if let Some(message) = stream_error(progress.error_detail) {
                return Err(ImageError::PushFailed(message));
            }
        }

        Ok(())
    }

    async fn build_image(&self, spec: &BuildSpec) -> Result<(), ImageError> {
        let root = spec.context.clone();
        let dockerfile = spec.dockerfile.clone();
        let context =
            tokio::task::spawn_blocking(move || pack_build_context(&root, dockerfile.as_deref()))
                .await
                .map_err(|e| ImageError::BuildFailed(e.to_string()))?
                .map_err(|source| ImageError::BuildContext {
                    path: spec.context.display().to_string(),
                    source,
                })?;

        let mut builder = BuildImageOptionsBuilder::default().t(&spec.tag).rm(true);
        if let Some(ref dockerfile) = spec.dockerfile {
            builder = builder.dockerfile(dockerfile);
        }

        let mut stream = self.client.build_image(
            builder.build(),
            None,
            Some(bollard::body_full(bytes::Bytes::from(context))),
        );
        while let Some(result) = stream.next().await {
            let progress = result.map_err(|e| ImageError::BuildFailed(e.to_string()))?;
            if let Some(message) = stream_error(progress.error_detail) {
                return Err(ImageError::BuildFailed(message));
            }
        }

        Ok(())
    }

    async fn remove_image(&self, image: &ImageId, force: bool) -> Result<(), ImageError> {
        let opts = RemoveImageOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_image(image.as_str(), Some(opts), None)
            .await
            .map_err(map_image_remove_error)?;

        Ok(())
    }
}

#[async_trait]
impl NetworkOps for BollardRuntime {
    async fn list_networks(&self) -> Result<Vec<NetworkDetails>, NetworkError> {
        let networks = self
            .client
            .list_networks(None::<ListNetworksOptions>)
            .await
            .map_err(|e| NetworkError::Runtime(e.to_string()))?;

        networks
            .into_iter()
            .map(|network| reshape(network).map_err(NetworkError::Runtime))
            .collect()
    }

    async fn inspect_network(&self, id: &NetworkId) -> Result<NetworkDetails, NetworkError> {
        let details = self
            .client
            .inspect_network(id.as_str(), None::<InspectNetworkOptions>)
            .await
            .map_err(map_network_not_found_error)?;

        reshape(details).map_err(NetworkError::Runtime)
    }

    async fn create_network(&self, spec: &NetworkSpec) -> Result<NetworkId, NetworkError> {
        let opts = bollard::models::NetworkCreateRequest {
            name: spec.name.clone(),
            driver: spec.driver.clone(),
            internal: Some(spec.internal),
            ..Default::default()
        };

        let response = self
            .client
            .create_network(opts)
            .await
            .map_err(map_network_create_error)?;

        Ok(NetworkId::new(response.id))
    }

    async fn remove_network(&self, id: &NetworkId) -> Result<(), NetworkError> {
        self.client
            .remove_network(id.as_str())
            .await
            .map_err(map_network_remove_error)
    }
}

#[async_trait]
impl VolumeOps for BollardRuntime {
    async fn list_volumes(&self) -> Result<Vec<VolumeDetails>, VolumeError> {
        let response = self
            .client
            .list_volumes(None::<ListVolumesOptions>)
            .await
            .map_err(|e| VolumeError::Runtime(e.to_string()))?;

        response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(|volume| reshape(volume).map_err(VolumeError::Runtime))
            .collect()
    }

    async fn inspect_volume(&self, name: &VolumeName) -> Result<VolumeDetails, VolumeError> {
        let volume = self
            .client
            .inspect_volume(name.as_str())
            .await
            .map_err(map_volume_not_found_error)?;

        reshape(volume).map_err(VolumeError::Runtime)
    }

    async fn create_volume(&self, spec: &VolumeSpec) -> Result<VolumeDetails, VolumeError> {
        let volume = self
            .client
            .create_volume(volume_request(spec))
            .await
            .map_err(|e| VolumeError::Runtime(e.to_string()))?;

        reshape(volume).map_err(VolumeError::Runtime)
    }

    async fn remove_volume(&self, name: &VolumeName, force: bool) -> Result<(), VolumeError> {
        self.client
            .remove_volume(name.as_str(), Some(RemoveVolumeOptions { force }))
            .await
            .map_err(map_volume_remove_error)
    }
}

#[async_trait]
impl LogOps for BollardRuntime {
    async fn container_logs(
        &self,
        id: &ContainerId,
        opts: &LogOptions,
    ) -> Result<String, LogError> {
        let log_opts = LogsOptions {
            stdout: opts.stdout,
            stderr: opts.stderr,
            tail: opts.tail.as_query(),
            ..Default::default()
        };

        let mut stream = self.client.logs(id.as_str(), Some(log_opts));
        let mut raw = Vec::new();
        while let Some(result) = stream.next().await {
            let message = match result.map_err(map_log_error)? {
                bollard::container::LogOutput::StdOut { message } => message,
                bollard::container::LogOutput::StdErr { message } => message,
                bollard::container::LogOutput::StdIn { message } => message,
                bollard::container::LogOutput::Console { message } => message,
            };
            raw.extend_from_slice(&message);
        }

        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}

#[async_trait]
impl StatsOps for BollardRuntime {
    async fn container_stats(&self, id: &ContainerId) -> Result<Value, StatsError> {
        let opts = StatsOptions {
            stream: false,
            one_shot: false,
        };

        let mut stream = self.client.stats(id.as_str(), Some(opts));
        let sample = stream
            .next()
            .await
            .ok_or_else(|| StatsError::NoSample(id.to_string()))?
            .map_err(map_stats_error)?;

        serde_json::to_value(sample).map_err(|e| StatsError::Runtime(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::traits::PortMapping;
    use std::collections::BTreeMap;

    fn server_error(status_code: u16, message: &str) -> bollard::errors::Error {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message: message.to_string(),
        }
    }

    #[test]
    fn not_modified_counts_as_success() {
        assert!(ignore_not_modified(Err(server_error(304, ""))).is_ok());
        assert!(ignore_not_modified(Err(server_error(500, "boom"))).is_err());
    }

    #[test]
    fn daemon_messages_pass_through_unmodified() {
        let err = map_container_not_found_error(server_error(404, "No such container: ghost"));
        assert!(matches!(err, ContainerError::NotFound(_)));
        assert_eq!(err.to_string(), "No such container: ghost");
    }

    #[test]
    fn conflicts_map_to_in_use() {
        assert!(matches!(
            map_image_remove_error(server_error(409, "image is being used")),
            ImageError::InUse(_)
        ));
        assert!(matches!(
            map_volume_remove_error(server_error(409, "volume is in use")),
            VolumeError::InUse(_)
        ));
        assert!(matches!(
            map_network_remove_error(server_error(403, "has active endpoints")),
            NetworkError::InUse(_)
        ));
    }

    #[test]
    fn stream_errors_come_from_error_detail() {
        let failed = ErrorDetail {
            message: Some("unauthorized".into()),
            ..Default::default()
        };
        assert_eq!(stream_error(Some(failed)).as_deref(), Some("unauthorized"));
        assert_eq!(stream_error(Some(ErrorDetail::default())), None);
        assert_eq!(stream_error(None), None);
    }

    #[test]
    fn volume_request_carries_name_driver_and_labels() {
        let request = volume_request(&VolumeSpec {
            name: "data".into(),
            driver: Some("local".into()),
            labels: [("tier".to_string(), "db".to_string())].into_iter().collect(),
        });
        assert_eq!(request.name.as_deref(), Some("data"));
        assert_eq!(request.driver.as_deref(), Some("local"));
        assert_eq!(
            request.labels.and_then(|labels| labels.get("tier").cloned()).as_deref(),
            Some("db")
        );

        let bare = volume_request(&VolumeSpec {
            name: "cache".into(),
            driver: None,
            labels: Default::default(),
        });
        assert_eq!(bare.labels, None);
    }

    #[test]
    fn container_body_groups_bindings_per_port() {
        let spec = ContainerSpec {
            image: "nginx".into(),
            command: Some(vec!["nginx".into(), "-g".into(), "daemon off;".into()]),
            network: Some("backend".into()),
            env: BTreeMap::from([("MODE".to_string(), "prod".to_string())]),
            ports: vec![
                PortMapping::new("80", None, Some("8080".into())),
                PortMapping::new("80/tcp", None, Some("8081".into())),
                PortMapping::new("53/udp", Some("127.0.0.1".into()), None),
            ],
            binds: vec!["/srv:/data:ro".into()],
            ..Default::default()
        };

        let body = container_body(&spec);
        assert_eq!(body.env, Some(vec!["MODE=prod".to_string()]));
        assert_eq!(
            body.exposed_ports,
            Some(vec!["80/tcp".to_string(), "53/udp".to_string()])
        );

        let host = body.host_config.unwrap();
        let bindings = host.port_bindings.unwrap();
        assert_eq!(bindings["80/tcp"].as_ref().unwrap().len(), 2);
        let udp = &bindings["53/udp"].as_ref().unwrap()[0];
        assert_eq!(udp.host_port, None);
        assert_eq!(udp.host_ip.as_deref(), Some("127.0.0.1"));
        assert_eq!(host.binds, Some(vec!["/srv:/data:ro".to_string()]));
        assert_eq!(host.network_mode.as_deref(), Some("backend"));
    }
}
