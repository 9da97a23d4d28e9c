// ABOUTME: Routes a tool call by name: validate, call the runtime, normalize the result.
// ABOUTME: Validation failures are answered locally; runtime failures propagate to the caller.

use super::catalog::Operation;
use super::contract::ValidationError;
use super::inputs::{
    self, BuildImageInput, ContainerActionInput, CreateContainerInput, CreateNetworkInput,
    CreateVolumeInput, EmptyInput, FetchContainerLogsInput, ListContainersInput, ListImagesInput,
    PullPushImageInput, RemoveContainerInput, RemoveImageInput, RemoveNetworkInput,
    RemoveVolumeInput,
};
use crate::config::RegistryCredentials;
use crate::normalize::{ContainerEntity, Entity, Record, normalize, status_override};
use crate::runtime::traits::{
    BuildSpec, ContainerDetails, ContainerError, ContainerSpec, ImageDetails, ImageError,
    ImageFilters, LogOptions, NetworkSpec, VolumeSpec,
};
use crate::runtime::{FullRuntime, Result, RuntimeError};
use crate::types::{ContainerId, ImageId, ImageReference, NetworkId, VolumeName};
use serde_json::{Map, Value, json};

/// Outcome of a tool call that did not fail at the runtime.
#[derive(Debug, Clone)]
pub enum Invocation {
    /// Normalized result.
    Success(Value),
    /// The name matched no tool.
    UnknownTool(String),
    /// Arguments broke the tool's contract; the runtime was not called.
    InvalidInput {
        tool: String,
        error: ValidationError,
    },
}

impl Invocation {
    /// Only contract violations are flagged; an unknown tool is plain text.
    pub fn is_error(&self) -> bool {
        matches!(self, Invocation::InvalidInput { .. })
    }

    /// Text placed in the tool result content.
    pub fn to_text(&self) -> String {
        match self {
            Invocation::Success(value) => pretty(value),
            Invocation::UnknownTool(name) => format!("Unknown tool: {name}"),
            Invocation::InvalidInput { tool, error } => pretty(&json!({
                "error": "invalid_tool_input",
                "tool": tool,
                "message": format!("ERROR: You provided invalid Tool inputs: {error}"),
                "violations": error.violations,
            })),
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// A validated call, ready for the runtime.
#[derive(Debug, Clone)]
enum Request {
    ListContainers { all: bool },
    CreateContainer(ContainerSpec),
    RunContainer(ContainerSpec),
    StartContainer(ContainerId),
    StopContainer(ContainerId),
    RemoveContainer { id: ContainerId, force: bool },
    FetchContainerLogs { id: ContainerId, options: LogOptions },
    ListImages(ImageFilters),
    PullImage(ImageReference),
    PushImage(ImageReference),
    BuildImage(BuildSpec),
    RemoveImage { image: ImageId, force: bool },
    ListNetworks,
    CreateNetwork(NetworkSpec),
    RemoveNetwork(NetworkId),
    ListVolumes,
    CreateVolume(VolumeSpec),
    RemoveVolume { name: VolumeName, force: bool },
}

/// Check `args` against the operation's contract and build the request.
fn prepare(op: Operation, args: &Map<String, Value>) -> std::result::Result<Request, ValidationError> {
    let contract = op.contract();
    let name = contract.name;
    let args = contract.validate(args)?;

    let request = match op {
        Operation::ListContainers => {
            let input: ListContainersInput = inputs::parse(name, args)?;
            Request::ListContainers { all: input.all }
        }
        Operation::CreateContainer => {
            Request::CreateContainer(inputs::parse::<CreateContainerInput>(name, args)?.into_spec())
        }
        Operation::RunContainer => {
            Request::RunContainer(inputs::parse::<CreateContainerInput>(name, args)?.into_spec())
        }
        Operation::StartContainer => {
            let input: ContainerActionInput = inputs::parse(name, args)?;
            Request::StartContainer(ContainerId::new(input.container_id))
        }
        Operation::StopContainer => {
            let input: ContainerActionInput = inputs::parse(name, args)?;
            Request::StopContainer(ContainerId::new(input.container_id))
        }
        Operation::RemoveContainer => {
            let input: RemoveContainerInput = inputs::parse(name, args)?;
            Request::RemoveContainer {
                id: ContainerId::new(input.container_id),
                force: input.force,
            }
        }
        Operation::FetchContainerLogs => {
            let input: FetchContainerLogsInput = inputs::parse(name, args)?;
            Request::FetchContainerLogs {
                options: input.log_options(),
                id: ContainerId::new(input.container_id),
            }
        }
        Operation::ListImages => {
            Request::ListImages(inputs::parse::<ListImagesInput>(name, args)?.filters())
        }
        Operation::PullImage => {
            Request::PullImage(inputs::parse::<PullPushImageInput>(name, args)?.reference())
        }
        Operation::PushImage => {
            Request::PushImage(inputs::parse::<PullPushImageInput>(name, args)?.reference())
        }
        Operation::BuildImage => {
            Request::BuildImage(inputs::parse::<BuildImageInput>(name, args)?.into_spec())
        }
        Operation::RemoveImage => {
            let input: RemoveImageInput = inputs::parse(name, args)?;
            Request::RemoveImage {
                image: ImageId::new(input.image),
                force: input.force,
            }
        }
        Operation::ListNetworks => {
            let _: EmptyInput = inputs::parse(name, args)?;
            Request::ListNetworks
        }
        Operation::CreateNetwork => {
            Request::CreateNetwork(inputs::parse::<CreateNetworkInput>(name, args)?.into_spec())
        }
        Operation::RemoveNetwork => {
            let input: RemoveNetworkInput = inputs::parse(name, args)?;
            Request::RemoveNetwork(NetworkId::new(input.network_id))
        }
        Operation::ListVolumes => {
            let _: EmptyInput = inputs::parse(name, args)?;
            Request::ListVolumes
        }
        Operation::CreateVolume => {
            Request::CreateVolume(inputs::parse::<CreateVolumeInput>(name, args)?.into_spec())
        }
        Operation::RemoveVolume => {
            let input: RemoveVolumeInput = inputs::parse(name, args)?;
            Request::RemoveVolume {
                name: VolumeName::new(input.volume_name),
                force: input.force,
            }
        }
    };
    Ok(request)
}

/// Executes tool calls against one runtime.
pub struct Dispatcher<'a, R: FullRuntime + ?Sized> {
    runtime: &'a R,
    credentials: &'a RegistryCredentials,
}

impl<'a, R: FullRuntime + ?Sized> Dispatcher<'a, R> {
    pub fn new(runtime: &'a R, credentials: &'a RegistryCredentials) -> Self {
        Self {
            runtime,
            credentials,
        }
    }

    /// Run the tool called `name`. Absent arguments count as an empty mapping.
    pub async fn invoke(&self, name: &str, args: Option<&Map<String, Value>>) -> Result<Invocation> {
        let Some(op) = Operation::from_name(name) else {
            tracing::warn!(tool = name, "unknown tool requested");
            return Ok(Invocation::UnknownTool(name.to_string()));
        };

        let empty = Map::new();
        let request = match prepare(op, args.unwrap_or(&empty)) {
            Ok(request) => request,
            Err(error) => {
                tracing::error!(tool = name, "Failed to validate input provided by LLM: {}", error);
                return Ok(Invocation::InvalidInput {
                    tool: name.to_string(),
                    error,
                });
            }
        };

        tracing::debug!(tool = name, "invoking tool");
        self.execute(request).await.map(Invocation::Success)
    }

    async fn execute(&self, request: Request) -> Result<Value> {
        let value = match request {
            Request::ListContainers { all } => {
                let mut records = Vec::new();
                for details in self.runtime.list_containers(all).await? {
                    records.push(self.container_record(details, None).await?);
                }
                list(records)
            }
            Request::CreateContainer(spec) => {
                let id = self.runtime.create_container(&spec).await?;
                self.container_value(&id, None).await?
            }
            Request::RunContainer(spec) => {
                let id = self.create_pulling_if_missing(&spec).await?;
                self.runtime.start_container(&id).await?;
                self.container_value(&id, None).await?
            }
            Request::StartContainer(id) => {
                self.runtime.start_container(&id).await?;
                self.container_value(&id, None).await?
            }
            Request::StopContainer(id) => {
                self.runtime.stop_container(&id, None).await?;
                self.container_value(&id, None).await?
            }
            Request::RemoveContainer { id, force } => {
                let details = self.runtime.inspect_container(&id).await?;
                let record = self
                    .container_record(details, Some(&status_override("removed")))
                    .await?;
                self.runtime.remove_container(&id, force).await?;
                Value::Object(record)
            }
            Request::FetchContainerLogs { id, options } => {
                let logs = self.runtime.container_logs(&id, &options).await?;
                json!({ "logs": logs.split('\n').collect::<Vec<_>>() })
            }
            Request::ListImages(filters) => list(
                self.runtime
                    .list_images(&filters)
                    .await?
                    .into_iter()
                    .map(|image| normalize(&Entity::Image(image), None))
                    .collect(),
            ),
            Request::PullImage(reference) => {
                self.runtime
                    .pull_image(&reference, self.credentials.for_reference(&reference))
                    .await?;
                self.image_value(&reference, None).await?
            }
            Request::PushImage(reference) => {
                let record = self
                    .image_value(&reference, Some(&status_override("pushed")))
                    .await?;
                self.runtime
                    .push_image(&reference, self.credentials.for_reference(&reference))
                    .await?;
                record
            }
            Request::BuildImage(spec) => {
                self.runtime.build_image(&spec).await?;
                let image = self.runtime.inspect_image(&ImageId::new(&spec.tag)).await?;
                Value::Object(normalize(&Entity::Image(image), None))
            }
            Request::RemoveImage { image, force } => {
                let details = self.runtime.inspect_image(&image).await?;
                self.runtime.remove_image(&image, force).await?;
                Value::Object(normalize(
                    &Entity::Image(details),
                    Some(&status_override("removed")),
                ))
            }
            Request::ListNetworks => list(
                self.runtime
                    .list_networks()
                    .await?
                    .into_iter()
                    .map(|network| normalize(&Entity::Network(network), None))
                    .collect(),
            ),
            Request::CreateNetwork(spec) => {
                let id = self.runtime.create_network(&spec).await?;
                let network = self.runtime.inspect_network(&id).await?;
                Value::Object(normalize(&Entity::Network(network), None))
            }
            Request::RemoveNetwork(id) => {
                let details = self.runtime.inspect_network(&id).await?;
                self.runtime.remove_network(&id).await?;
                Value::Object(normalize(
                    &Entity::Network(details),
                    Some(&status_override("removed")),
                ))
            }
            Request::ListVolumes => list(
                self.runtime
                    .list_volumes()
                    .await?
                    .into_iter()
                    .map(|volume| normalize(&Entity::Volume(volume), None))
                    .collect(),
            ),
            Request::CreateVolume(spec) => {
                let volume = self.runtime.create_volume(&spec).await?;
                Value::Object(normalize(&Entity::Volume(volume), None))
            }
            Request::RemoveVolume { name, force } => {
                let details = self.runtime.inspect_volume(&name).await?;
                self.runtime.remove_volume(&name, force).await?;
                Value::Object(normalize(
                    &Entity::Volume(details),
                    Some(&status_override("removed")),
                ))
            }
        };
        Ok(value)
    }

    /// Create a container, pulling its image once if the daemon lacks it.
    async fn create_pulling_if_missing(&self, spec: &ContainerSpec) -> Result<ContainerId> {
        match self.runtime.create_container(spec).await {
            Err(ContainerError::ImageNotFound(message)) => {
                let reference = ImageReference::parse(&spec.image)
                    .map_err(|_| ContainerError::ImageNotFound(message))?;
                tracing::info!(image = %reference, "image not present, pulling");
                self.runtime
                    .pull_image(&reference, self.credentials.for_reference(&reference))
                    .await?;
                Ok(self.runtime.create_container(spec).await?)
            }
            other => Ok(other?),
        }
    }

    async fn container_value(&self, id: &ContainerId, overrides: Option<&Record>) -> Result<Value> {
        let details = self.runtime.inspect_container(id).await?;
        self.container_record(details, overrides)
            .await
            .map(Value::Object)
    }

    async fn container_record(
        &self,
        details: ContainerDetails,
        overrides: Option<&Record>,
    ) -> Result<Record> {
        let image = resolve_image(self.runtime, &details).await?;
        Ok(normalize(
            &Entity::Container(ContainerEntity { details, image }),
            overrides,
        ))
    }

    async fn image_value(&self, reference: &ImageReference, overrides: Option<&Record>) -> Result<Value> {
        let image = self
            .runtime
            .inspect_image(&ImageId::new(reference.to_string()))
            .await?;
        Ok(Value::Object(normalize(&Entity::Image(image), overrides)))
    }
}

/// The image a container was created from, or `None` once it has been removed.
async fn resolve_image<R: FullRuntime + ?Sized>(
    runtime: &R,
    details: &ContainerDetails,
) -> Result<Option<ImageDetails>> {
    let Some(image_id) = details.image.as_deref().filter(|id| !id.is_empty()) else {
        return Ok(None);
    };
    match runtime.inspect_image(&ImageId::new(image_id)).await {
        Ok(image) => Ok(Some(image)),
        Err(ImageError::NotFound(_)) => Ok(None),
        Err(e) => Err(RuntimeError::from(e)),
    }
}

fn list(records: Vec<Record>) -> Value {
    Value::Array(records.into_iter().map(Value::Object).collect())
}
