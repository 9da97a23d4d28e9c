// ABOUTME: Per-container MCP resources: recent logs and a stats snapshot.
// ABOUTME: Locators have the form docker://containers/{id}/{logs|stats}.

use crate::runtime::traits::{LogOptions, LogTail};
use crate::runtime::{FullRuntime, RuntimeError};
use crate::types::ContainerId;
use snafu::{ResultExt, Snafu};

/// Scheme and collection every locator starts with.
const LOCATOR_PREFIX: &str = "docker://containers/";

/// Lines of log output a logs resource returns.
pub const LOG_RESOURCE_TAIL: u64 = 100;

#[derive(Debug, Snafu)]
pub enum ResourceError {
    #[snafu(display("Invalid resource URI: {uri}"))]
    MalformedLocator { uri: String },

    #[snafu(display("Unknown container resource type: {kind}"))]
    UnknownResourceType { kind: String },

    #[snafu(display("{source}"))]
    Runtime { source: RuntimeError },
}

impl ResourceError {
    /// The underlying runtime failure, if that is what this is.
    pub fn runtime(&self) -> Option<&RuntimeError> {
        match self {
            ResourceError::Runtime { source } => Some(source),
            _ => None,
        }
    }
}

/// What a container resource exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubResource {
    Logs,
    Stats,
}

impl SubResource {
    pub fn as_str(self) -> &'static str {
        match self {
            SubResource::Logs => "logs",
            SubResource::Stats => "stats",
        }
    }

    fn parse(kind: &str) -> Option<Self> {
        match kind {
            "logs" => Some(SubResource::Logs),
            "stats" => Some(SubResource::Stats),
            _ => None,
        }
    }
}

/// A parsed resource locator.
///
/// The sub-resource stays raw until read so that a missing container is
/// reported ahead of an unknown kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocator {
    pub container_id: ContainerId,
    pub kind: String,
}

impl ResourceLocator {
    pub fn parse(uri: &str) -> Result<Self, ResourceError> {
        let malformed = || MalformedLocatorSnafu { uri }.build();
        if !uri.starts_with(LOCATOR_PREFIX) {
            return Err(malformed());
        }

        let parts: Vec<&str> = uri.split('/').collect();
        match parts.as_slice() {
            [_, _, _, id, kind] if !id.is_empty() => Ok(Self {
                container_id: ContainerId::new(*id),
                kind: (*kind).to_string(),
            }),
            _ => Err(malformed()),
        }
    }

    pub fn uri(container_id: &str, sub: SubResource) -> String {
        format!("{LOCATOR_PREFIX}{container_id}/{}", sub.as_str())
    }
}

/// One `resources/list` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

/// Contents of a read resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}

/// Two entries (logs, stats) for every running container.
pub async fn list_resources<R: FullRuntime + ?Sized>(
    runtime: &R,
) -> Result<Vec<ResourceDescriptor>, RuntimeError> {
    let containers = runtime.list_containers(false).await?;
    let mut descriptors = Vec::with_capacity(containers.len() * 2);
    for container in &containers {
        let (id, name) = (container.id(), container.name());
        descriptors.push(ResourceDescriptor {
            uri: ResourceLocator::uri(id, SubResource::Logs),
            name: format!("Logs for {name}"),
            description: format!("Live logs for container {name}"),
            mime_type: "text/plain".into(),
        });
        descriptors.push(ResourceDescriptor {
            uri: ResourceLocator::uri(id, SubResource::Stats),
            name: format!("Stats for {name}"),
            description: format!("Live resource usage stats for container {name}"),
            mime_type: "application/json".into(),
        });
    }
    Ok(descriptors)
}

/// Read the resource named by `uri`.
pub async fn read_resource<R: FullRuntime + ?Sized>(
    runtime: &R,
    uri: &str,
) -> Result<ResourceContent, ResourceError> {
    let locator = ResourceLocator::parse(uri)?;
    let container = runtime
        .inspect_container(&locator.container_id)
        .await
        .map_err(RuntimeError::from)
        .context(RuntimeSnafu)?;
    let id = ContainerId::new(container.id());

    let sub = SubResource::parse(&locator.kind).ok_or_else(|| {
        UnknownResourceTypeSnafu {
            kind: locator.kind.clone(),
        }
        .build()
    })?;

    let (mime_type, text) = match sub {
        SubResource::Logs => {
            let options = LogOptions::tail(LogTail::Lines(LOG_RESOURCE_TAIL));
            let logs = runtime
                .container_logs(&id, &options)
                .await
                .map_err(RuntimeError::from)
                .context(RuntimeSnafu)?;
            let lines: Vec<&str> = logs.split('\n').collect();
            ("text/plain", serde_json::Value::from(lines).to_string())
        }
        SubResource::Stats => {
            let stats = runtime
                .container_stats(&id)
                .await
                .map_err(RuntimeError::from)
                .context(RuntimeSnafu)?;
            let text = serde_json::to_string_pretty(&stats).unwrap_or_else(|_| stats.to_string());
            ("application/json", text)
        }
    };

    tracing::debug!(uri, "read resource");
    Ok(ResourceContent {
        uri: uri.to_string(),
        mime_type,
        text,
    })
}
