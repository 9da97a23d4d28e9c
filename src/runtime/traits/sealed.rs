// ABOUTME: Sealed trait pattern for runtime traits.
// ABOUTME: Prevents external implementations, allowing non-breaking evolution.

/// Sealed trait to prevent external implementations.
///
/// New methods can be added to the runtime traits without breaking semver,
/// since only types inside this crate can implement `Sealed`.
pub trait Sealed {}
