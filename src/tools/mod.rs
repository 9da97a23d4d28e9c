// ABOUTME: Tool layer: the catalog of operations, their argument contracts, and dispatch.
// ABOUTME: Contracts are checked before any runtime call is made.

mod catalog;
mod contract;
mod dispatch;
mod inputs;

pub use catalog::Operation;
pub use contract::{Contract, Field, FieldType, ValidationError, Violation};
pub use dispatch::{Dispatcher, Invocation};
pub use inputs::split_command;
