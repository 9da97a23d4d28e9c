// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod id;
mod reference;

pub use id::{ContainerId, Id, ImageId, NetworkId, VolumeName};
pub use reference::{DEFAULT_REGISTRY, ImageReference, ParseReferenceError};
