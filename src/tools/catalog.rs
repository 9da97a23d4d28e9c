// ABOUTME: The fixed set of tools this server exposes and their input contracts.
// ABOUTME: Maps wire names to operations; create and run share one contract.

use super::contract::{Contract, Field, FieldType};
use serde_json::{Value, json};

/// Every tool the server answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListContainers,
    CreateContainer,
    RunContainer,
    StartContainer,
    StopContainer,
    RemoveContainer,
    FetchContainerLogs,
    ListImages,
    PullImage,
    PushImage,
    BuildImage,
    RemoveImage,
    ListNetworks,
    CreateNetwork,
    RemoveNetwork,
    ListVolumes,
    CreateVolume,
    RemoveVolume,
}

impl Operation {
    /// In `tools/list` order.
    pub const ALL: [Operation; 18] = [
        Operation::ListContainers,
        Operation::CreateContainer,
        Operation::RunContainer,
        Operation::StartContainer,
        Operation::FetchContainerLogs,
        Operation::StopContainer,
        Operation::RemoveContainer,
        Operation::ListImages,
        Operation::PullImage,
        Operation::PushImage,
        Operation::BuildImage,
        Operation::RemoveImage,
        Operation::ListNetworks,
        Operation::CreateNetwork,
        Operation::RemoveNetwork,
        Operation::ListVolumes,
        Operation::CreateVolume,
        Operation::RemoveVolume,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::ListContainers => "list_containers",
            Operation::CreateContainer => "create_container",
            Operation::RunContainer => "run_container",
            Operation::StartContainer => "start_container",
            Operation::StopContainer => "stop_container",
            Operation::RemoveContainer => "remove_container",
            Operation::FetchContainerLogs => "fetch_container_logs",
            Operation::ListImages => "list_images",
            Operation::PullImage => "pull_image",
            Operation::PushImage => "push_image",
            Operation::BuildImage => "build_image",
            Operation::RemoveImage => "remove_image",
            Operation::ListNetworks => "list_networks",
            Operation::CreateNetwork => "create_network",
            Operation::RemoveNetwork => "remove_network",
            Operation::ListVolumes => "list_volumes",
            Operation::CreateVolume => "create_volume",
            Operation::RemoveVolume => "remove_volume",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::ListContainers => "List all Docker containers",
            Operation::CreateContainer => "Create a new Docker container",
            Operation::RunContainer => "Run an image in a new Docker container",
            Operation::StartContainer => "Start a Docker container",
            Operation::StopContainer => "Stop a Docker container",
            Operation::RemoveContainer => "Remove a Docker container",
            Operation::FetchContainerLogs => "Fetch logs for a Docker container",
            Operation::ListImages => "List Docker images",
            Operation::PullImage => "Pull a Docker image",
            Operation::PushImage => "Push a Docker image",
            Operation::BuildImage => "Build a Docker image from a Dockerfile",
            Operation::RemoveImage => "Remove a Docker image",
            Operation::ListNetworks => "List Docker networks",
            Operation::CreateNetwork => "Create a Docker network",
            Operation::RemoveNetwork => "Remove a Docker network",
            Operation::ListVolumes => "List Docker volumes",
            Operation::CreateVolume => "Create a Docker volume",
            Operation::RemoveVolume => "Remove a Docker volume",
        }
    }

    pub fn contract(self) -> Contract {
        match self {
            Operation::ListContainers => list_containers(),
            Operation::CreateContainer | Operation::RunContainer => create_container(),
            Operation::StartContainer | Operation::StopContainer => container_action(),
            Operation::RemoveContainer => remove_container(),
            Operation::FetchContainerLogs => fetch_container_logs(),
            Operation::ListImages => list_images(),
            Operation::PullImage | Operation::PushImage => pull_push_image(),
            Operation::BuildImage => build_image(),
            Operation::RemoveImage => remove_image(),
            Operation::ListNetworks => Contract::new("ListNetworks", Vec::new()),
            Operation::CreateNetwork => create_network(),
            Operation::RemoveNetwork => remove_network(),
            Operation::ListVolumes => Contract::new("ListVolumes", Vec::new()),
            Operation::CreateVolume => create_volume(),
            Operation::RemoveVolume => remove_volume(),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Contracts
// =============================================================================

fn nullable_string(name: &'static str, default: Value, description: &'static str) -> Field {
    Field::optional(name, FieldType::String.nullable(), default, description)
}

fn force(description: &'static str) -> Field {
    Field::optional("force", FieldType::Boolean, json!(false), description)
}

fn container_id() -> Field {
    Field::required("container_id", FieldType::String, "Container ID or name")
}

fn string_map() -> FieldType {
    FieldType::map(FieldType::String)
}

fn list_containers() -> Contract {
    Contract::new(
        "ListContainers",
        vec![Field::optional(
            "all",
            FieldType::Boolean,
            json!(false),
            "Show all containers (default shows just running)",
        )],
    )
}

fn create_container() -> Contract {
    let port_target = FieldType::AnyOf(vec![
        FieldType::Integer,
        FieldType::list(FieldType::Integer),
        FieldType::Tuple(vec![FieldType::String, FieldType::Integer]),
        FieldType::Null,
    ]);
    let volumes = FieldType::AnyOf(vec![
        FieldType::map(string_map()),
        FieldType::list(FieldType::String),
    ])
    .nullable();

    Contract::new(
        "CreateContainer",
        vec![
            Field::required("image", FieldType::String, "Docker image name"),
            nullable_string("name", Value::Null, "Container name"),
            nullable_string("entrypoint", Value::Null, "Entrypoint to run in container"),
            nullable_string("command", Value::Null, "Command to run in container"),
            nullable_string("network", Value::Null, "Network to attach the container to"),
            Field::optional(
                "environment",
                string_map().nullable(),
                Value::Null,
                "Environment variables",
            ),
            Field::optional(
                "ports",
                FieldType::map(port_target).nullable(),
                Value::Null,
                "Port mappings: container port (optionally with /protocol) to a host port, \
                 a list of host ports, a [host_ip, host_port] pair, or null for a random port",
            ),
            Field::optional(
                "volumes",
                volumes,
                Value::Null,
                "Volume mappings: {host_path: {bind, mode}} or [\"host:container[:mode]\"]",
            ),
        ],
    )
}

fn container_action() -> Contract {
    Contract::new("ContainerAction", vec![container_id()])
}

fn remove_container() -> Contract {
    Contract::new(
        "RemoveContainer",
        vec![container_id(), force("Force remove the container")],
    )
}

fn fetch_container_logs() -> Contract {
    Contract::new(
        "FetchContainerLogs",
        vec![
            container_id(),
            Field::optional(
                "tail",
                FieldType::AnyOf(vec![FieldType::Integer, FieldType::Literal("all")]),
                json!(100),
                "Number of lines to show from the end",
            ),
        ],
    )
}

fn list_images() -> Contract {
    Contract::new(
        "ListImages",
        vec![
            nullable_string(
                "name",
                Value::Null,
                "Filter images by repository name, if desired",
            ),
            Field::optional(
                "all",
                FieldType::Boolean,
                json!(false),
                "Show all images (default hides intermediate)",
            ),
            Field::optional(
                "include_dangling",
                FieldType::Boolean.nullable(),
                Value::Null,
                "Show dangling images",
            ),
            Field::optional(
                "filter_labels",
                FieldType::list(FieldType::String).nullable(),
                Value::Null,
                "Filter by label, either `key` or `key=value` format",
            ),
        ],
    )
}

fn pull_push_image() -> Contract {
    Contract::new(
        "PullPushImage",
        vec![
            Field::required("repository", FieldType::String, "Image repository"),
            nullable_string("tag", json!("latest"), "Image tag"),
        ],
    )
}

fn build_image() -> Contract {
    Contract::new(
        "BuildImage",
        vec![
            Field::required("path", FieldType::String, "Path to build context"),
            Field::required("tag", FieldType::String, "Image tag"),
            nullable_string("dockerfile", Value::Null, "Path to Dockerfile"),
        ],
    )
}

fn remove_image() -> Contract {
    Contract::new(
        "RemoveImage",
        vec![
            Field::required("image", FieldType::String, "Image ID or name"),
            force("Force remove the image"),
        ],
    )
}

fn create_network() -> Contract {
    Contract::new(
        "CreateNetwork",
        vec![
            Field::required("name", FieldType::String, "Network name"),
            nullable_string("driver", json!("bridge"), "Network driver"),
            Field::optional(
                "internal",
                FieldType::Boolean,
                json!(false),
                "Create an internal network",
            ),
        ],
    )
}

fn remove_network() -> Contract {
    Contract::new(
        "RemoveNetwork",
        vec![Field::required(
            "network_id",
            FieldType::String,
            "Network ID or name",
        )],
    )
}

fn create_volume() -> Contract {
    Contract::new(
        "CreateVolume",
        vec![
            Field::required("name", FieldType::String, "Volume name"),
            nullable_string("driver", json!("local"), "Volume driver"),
            Field::optional(
                "labels",
                string_map().nullable(),
                Value::Null,
                "Volume labels",
            ),
        ],
    )
}

fn remove_volume() -> Contract {
    Contract::new(
        "RemoveVolume",
        vec![
            Field::required("volume_name", FieldType::String, "Volume name"),
            force("Force remove the volume"),
        ],
    )
}
