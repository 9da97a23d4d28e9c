// ABOUTME: Typed tool arguments, deserialized after the contract check has passed.
// ABOUTME: Converts loose agent-facing shapes (ports, volumes, commands) into runtime specs.

use super::contract::{ValidationError, Violation};
use crate::runtime::traits::{
    BuildSpec, ContainerSpec, ImageFilters, LogOptions, LogTail, NetworkSpec, PortMapping,
    VolumeSpec,
};
use crate::types::ImageReference;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Deserialize validated arguments into `T`.
///
/// The contract has already checked types and filled defaults, so a failure
/// here is reported as a single violation against the whole argument set.
/// Conversions after this point never fail; values the daemon will not
/// accept (port numbers, bind shapes, repository names) are its to reject.
pub fn parse<T: DeserializeOwned>(
    contract: &'static str,
    args: Map<String, Value>,
) -> Result<T, ValidationError> {
    serde_json::from_value(Value::Object(args)).map_err(|e| ValidationError {
        contract,
        violations: vec![Violation::new("arguments", e.to_string())],
    })
}

// =============================================================================
// Containers
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListContainersInput {
    pub all: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateContainerInput {
    pub image: String,
    pub name: Option<String>,
    pub entrypoint: Option<String>,
    pub command: Option<String>,
    pub network: Option<String>,
    pub environment: Option<BTreeMap<String, String>>,
    pub ports: Option<BTreeMap<String, Option<PortTarget>>>,
    pub volumes: Option<VolumeBinds>,
}

/// Host side of one published container port.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortTarget {
    Port(Number),
    Ports(Vec<Number>),
    Bound(String, Number),
}

/// Either `{host_path: {bind, mode}}` or a list of `host:container[:mode]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VolumeBinds {
    Map(BTreeMap<String, BTreeMap<String, String>>),
    List(Vec<String>),
}

impl CreateContainerInput {
    pub fn into_spec(self) -> ContainerSpec {
        let mut ports = Vec::new();
        for (key, target) in self.ports.unwrap_or_default() {
            port_mappings(&key, target, &mut ports);
        }

        ContainerSpec {
            image: self.image,
            name: self.name,
            command: split_field(self.command.as_deref()),
            entrypoint: split_field(self.entrypoint.as_deref()),
            network: self.network,
            env: self.environment.unwrap_or_default(),
            ports,
            binds: self.volumes.map(volume_binds).unwrap_or_default(),
        }
    }
}

fn split_field(value: Option<&str>) -> Option<Vec<String>> {
    let words = split_command(value?);
    (!words.is_empty()).then_some(words)
}

/// Split a command line the way a POSIX shell would, without expansion.
///
/// Single quotes are literal; inside double quotes a backslash escapes only
/// `"`, `\`, `$`, and `` ` ``; outside quotes it escapes any character.
/// An unclosed quote runs to the end of the input and a trailing backslash
/// is kept as is.
pub fn split_command(input: &str) -> Vec<String> {
    #[derive(PartialEq)]
    enum Mode {
        Plain,
        Single,
        Double,
    }

    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut mode = Mode::Plain;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match mode {
            Mode::Plain => match c {
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                '\'' => {
                    mode = Mode::Single;
                    in_word = true;
                }
                '"' => {
                    mode = Mode::Double;
                    in_word = true;
                }
                '\\' => {
                    in_word = true;
                    match chars.next() {
                        // Line continuation.
                        Some('\n') => {}
                        Some(escaped) => current.push(escaped),
                        None => current.push('\\'),
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            },
            Mode::Single => match c {
                '\'' => mode = Mode::Plain,
                c => current.push(c),
            },
            Mode::Double => match c {
                '"' => mode = Mode::Plain,
                '\\' => match chars.next() {
                    Some(escaped @ ('"' | '\\' | '$' | '`')) => current.push(escaped),
                    Some('\n') => {}
                    Some(other) => {
                        current.push('\\');
                        current.push(other);
                    }
                    None => current.push('\\'),
                },
                c => current.push(c),
            },
        }
    }

    if in_word {
        words.push(current);
    }
    words
}

fn port_mappings(key: &str, target: Option<PortTarget>, ports: &mut Vec<PortMapping>) {
    let mut push = |host_ip: Option<String>, host_port: Option<Number>| {
        ports.push(PortMapping::new(
            key,
            host_ip,
            host_port.map(|port| port.to_string()),
        ))
    };

    match target {
        None => push(None, None),
        Some(PortTarget::Port(port)) => push(None, Some(port)),
        Some(PortTarget::Ports(list)) => {
            for port in list {
                push(None, Some(port));
            }
        }
        Some(PortTarget::Bound(ip, port)) => push(Some(ip), Some(port)),
    }
}

/// Map entries become `host:bind:mode`; `mode` defaults to `rw` and other
/// option keys are ignored. List entries pass through untouched.
fn volume_binds(volumes: VolumeBinds) -> Vec<String> {
    match volumes {
        VolumeBinds::Map(map) => map
            .into_iter()
            .map(|(host, options)| {
                let bind = options.get("bind").map(String::as_str).unwrap_or_default();
                let mode = options.get("mode").map(String::as_str).unwrap_or("rw");
                format!("{host}:{bind}:{mode}")
            })
            .collect(),
        VolumeBinds::List(list) => list,
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerActionInput {
    pub container_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveContainerInput {
    pub container_id: String,
    pub force: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchContainerLogsInput {
    pub container_id: String,
    pub tail: TailArg,
}

/// `tail` as the agent sends it: a line count or `"all"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TailArg {
    Lines(Number),
    Keyword(String),
}

impl FetchContainerLogsInput {
    /// A negative count reads every line, as the daemon does.
    pub fn log_options(&self) -> LogOptions {
        let tail = match &self.tail {
            TailArg::Lines(n) => n.as_u64().map_or(LogTail::All, LogTail::Lines),
            TailArg::Keyword(_) => LogTail::All,
        };
        LogOptions::tail(tail)
    }
}

// =============================================================================
// Images
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListImagesInput {
    pub name: Option<String>,
    pub all: bool,
    pub include_dangling: Option<bool>,
    pub filter_labels: Option<Vec<String>>,
}

impl ListImagesInput {
    pub fn filters(self) -> ImageFilters {
        ImageFilters {
            all: self.all,
            reference: self.name,
            dangling: self.include_dangling,
            labels: self.filter_labels.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PullPushImageInput {
    pub repository: String,
    pub tag: Option<String>,
}

impl PullPushImageInput {
    /// The explicit tag wins over one embedded in `repository`, unless the
    /// repository is pinned by digest. Names that do not parse are handed to
    /// the daemon as written.
    pub fn reference(&self) -> ImageReference {
        ImageReference::parse(&self.repository)
            .unwrap_or_else(|_| ImageReference::verbatim(&self.repository))
            .with_tag(self.tag.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildImageInput {
    pub path: String,
    pub tag: String,
    pub dockerfile: Option<String>,
}

impl BuildImageInput {
    pub fn into_spec(self) -> BuildSpec {
        BuildSpec {
            context: PathBuf::from(self.path),
            tag: self.tag,
            dockerfile: self.dockerfile,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveImageInput {
    pub image: String,
    pub force: bool,
}

// =============================================================================
// Networks and volumes
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmptyInput {}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateNetworkInput {
    pub name: String,
    pub driver: Option<String>,
    pub internal: bool,
}

impl CreateNetworkInput {
    pub fn into_spec(self) -> NetworkSpec {
        NetworkSpec {
            name: self.name,
            driver: self.driver,
            internal: self.internal,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveNetworkInput {
    pub network_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateVolumeInput {
    pub name: String,
    pub driver: Option<String>,
    pub labels: Option<BTreeMap<String, String>>,
}

impl CreateVolumeInput {
    pub fn into_spec(self) -> VolumeSpec {
        VolumeSpec {
            name: self.name,
            driver: self.driver,
            labels: self.labels.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveVolumeInput {
    pub volume_name: String,
    pub force: bool,
}
