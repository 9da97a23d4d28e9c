// ABOUTME: Entry point for the docker-mcp server.
// ABOUTME: Loads configuration, connects to the runtime, and serves MCP on stdio.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use docker_mcp::config::Config;
use docker_mcp::error::Result;
use docker_mcp::mcp::{self, DockerMcp};
use docker_mcp::runtime::traits::RuntimeInfo;
use docker_mcp::runtime::{BollardRuntime, RuntimeError, resolve_endpoint};
use docker_mcp::tools;
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // stdout carries protocol frames; logs go to stderr.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "docker-mcp exited with an error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Tools { json } => {
            print_tools(json);
            Ok(())
        }
        Commands::Serve => serve(&cli).await,
    }
}

fn print_tools(json: bool) {
    if json {
        match serde_json::to_string_pretty(&mcp::tool_list()) {
            Ok(text) => println!("{text}"),
            Err(e) => tracing::error!(error = %e, "failed to render tool list"),
        }
        return;
    }
    for op in tools::Operation::ALL {
        println!("{:<22} {}", op.name(), op.description());
    }
}

async fn serve(cli: &Cli) -> Result<()> {
    let cwd = env::current_dir()?;
    let mut config = Config::resolve(cli.config.as_deref(), &cwd)?;
    if let Some(socket) = &cli.socket {
        config.runtime.socket = Some(socket.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.runtime.timeout = timeout;
    }

    let credentials = config.credentials()?;
    tracing::debug!(registries = credentials.len(), "registry credentials loaded");

    let endpoint = resolve_endpoint(&config.runtime, env::var("DOCKER_HOST").ok())
        .map_err(RuntimeError::from)?;
    let runtime =
        BollardRuntime::connect(&endpoint, config.runtime.timeout).map_err(RuntimeError::from)?;

    // A daemon that is down now may be up by the first tool call.
    match runtime.ping().await {
        Ok(()) => tracing::info!(%endpoint, runtime = %runtime.runtime_type(), "connected"),
        Err(e) => tracing::warn!(%endpoint, error = %e, "runtime did not answer ping"),
    }

    let server = DockerMcp::new(Arc::new(runtime), Arc::new(credentials));
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "serving MCP on stdio");
    mcp::serve_stdio(server).await
}
