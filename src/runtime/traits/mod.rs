// ABOUTME: Composable capability traits for container runtimes.
// ABOUTME: Defines ContainerOps, ImageOps, NetworkOps, VolumeOps, LogOps, StatsOps, RuntimeInfo.

mod container;
mod image;
mod logs;
mod network;
mod runtime_info;
pub(crate) mod sealed;
mod shared_types;
mod stats;
mod volume;

pub use container::{ContainerError, ContainerOps};
pub use image::{ImageError, ImageOps};
pub use logs::{LogError, LogOps, LogOptions, LogTail};
pub use network::{NetworkError, NetworkOps};
pub use runtime_info::{RuntimeInfo, RuntimeInfoError};
pub use shared_types::*;
pub use stats::{StatsError, StatsOps};
pub use volume::{VolumeError, VolumeOps};

/// Every capability the tool server needs from a runtime.
pub trait FullRuntime:
    ContainerOps + ImageOps + NetworkOps + VolumeOps + LogOps + StatsOps + RuntimeInfo
{
}

impl<T> FullRuntime for T where
    T: ContainerOps + ImageOps + NetworkOps + VolumeOps + LogOps + StatsOps + RuntimeInfo
{
}
