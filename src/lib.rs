// ABOUTME: Library root for docker-mcp - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod error;
pub mod mcp;
pub mod normalize;
pub mod resources;
pub mod runtime;
pub mod tools;
pub mod types;
