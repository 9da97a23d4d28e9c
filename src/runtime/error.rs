// ABOUTME: Runtime error types with SNAFU pattern.
// ABOUTME: Unifies detection, connection, and per-capability failures for programmatic handling.

use snafu::Snafu;

use super::detection::DetectionError;
use super::traits::{
    ContainerError, ImageError, LogError, NetworkError, RuntimeInfoError, StatsError, VolumeError,
};

/// Unified runtime error.
///
/// Operation failures display the daemon's message unchanged; the request
/// loop forwards that text to the client as-is.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RuntimeError {
    #[snafu(display("runtime detection failed: {source}"))]
    Detection { source: DetectionError },

    #[snafu(display("runtime connection failed: {source}"))]
    Connection { source: RuntimeInfoError },

    #[snafu(display("{source}"))]
    Container { source: ContainerError },

    #[snafu(display("{source}"))]
    Image { source: ImageError },

    #[snafu(display("{source}"))]
    Network { source: NetworkError },

    #[snafu(display("{source}"))]
    Volume { source: VolumeError },

    #[snafu(display("{source}"))]
    Logs { source: LogError },

    #[snafu(display("{source}"))]
    Stats { source: StatsError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// No container runtime found on the system.
    NoRuntimeFound,
    /// Failed to connect to runtime socket.
    ConnectionFailed,
    /// The referenced container, image, network, or volume does not exist.
    NotFound,
    /// The object already exists or is still in use.
    Conflict,
    /// Runtime operation error.
    RuntimeOperation,
}

impl RuntimeError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> RuntimeErrorKind {
        use RuntimeErrorKind::*;

        match self {
            RuntimeError::Detection { source } => match source {
                DetectionError::NoRuntimeFound => NoRuntimeFound,
            },
            RuntimeError::Connection { source } => match source {
                RuntimeInfoError::ConnectionFailed(_) => ConnectionFailed,
                RuntimeInfoError::Runtime(_) => RuntimeOperation,
            },
            RuntimeError::Container { source } => match source {
                ContainerError::NotFound(_) | ContainerError::ImageNotFound(_) => NotFound,
                ContainerError::AlreadyExists(_) => Conflict,
                ContainerError::Runtime(_) => RuntimeOperation,
            },
            RuntimeError::Image { source } => match source {
                ImageError::NotFound(_) => NotFound,
                ImageError::InUse(_) => Conflict,
                _ => RuntimeOperation,
            },
            RuntimeError::Network { source } => match source {
                NetworkError::NotFound(_) => NotFound,
                NetworkError::AlreadyExists(_) | NetworkError::InUse(_) => Conflict,
                NetworkError::Runtime(_) => RuntimeOperation,
            },
            RuntimeError::Volume { source } => match source {
                VolumeError::NotFound(_) => NotFound,
                VolumeError::InUse(_) => Conflict,
                VolumeError::Runtime(_) => RuntimeOperation,
            },
            RuntimeError::Logs { source } => match source {
                LogError::ContainerNotFound(_) => NotFound,
                LogError::StreamError(_) => RuntimeOperation,
            },
            RuntimeError::Stats { source } => match source {
                StatsError::ContainerNotFound(_) => NotFound,
                _ => RuntimeOperation,
            },
        }
    }

    /// Returns connection error details if this is a connection failure.
    pub fn connection_details(&self) -> Option<&str> {
        match self {
            RuntimeError::Connection {
                source: RuntimeInfoError::ConnectionFailed(msg),
            } => Some(msg),
            _ => None,
        }
    }
}

macro_rules! impl_from_source {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for RuntimeError {
                fn from(source: $source) -> Self {
                    RuntimeError::$variant { source }
                }
            }
        )*
    };
}

impl_from_source! {
    DetectionError => Detection,
    RuntimeInfoError => Connection,
    ContainerError => Container,
    ImageError => Image,
    NetworkError => Network,
    VolumeError => Volume,
    LogError => Logs,
    StatsError => Stats,
}
