// ABOUTME: Model Context Protocol surface on rmcp: tools, container resources, client logging.
// ABOUTME: Speaks newline-delimited JSON-RPC 2.0 on stdio through rmcp's transport.

mod logging;
mod server;

pub use logging::{LOGGER, Threshold, severity};
pub use server::{DockerMcp, SERVER_NAME, serve_stdio, tool_list, tool_result};
