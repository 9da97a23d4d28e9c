// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Global connection flags plus the serve and tools subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "docker-mcp")]
#[command(about = "MCP server for managing Docker and Podman containers, images, networks, and volumes")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: docker-mcp.yml in the working directory)
    #[arg(short, long, global = true, env = "DOCKER_MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Runtime socket path, overriding the configuration file
    #[arg(short, long, global = true)]
    pub socket: Option<String>,

    /// Runtime request timeout, e.g. "30s" or "2m"
    #[arg(short, long, global = true, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Log at debug level (logs go to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (the default)
    Serve,

    /// Print the tool catalog and exit
    Tools {
        /// Print full descriptors with input schemas as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_duration(value: &str) -> Result<Duration, String> {
    humantime_serde::re::humantime::parse_duration(value).map_err(|e| e.to_string())
}
