// ABOUTME: rmcp server handler exposing the Docker tools, container resources, and client logging.
// ABOUTME: A failed request becomes a JSON-RPC error response; the session keeps serving.

use super::logging::Threshold;
use crate::config::RegistryCredentials;
use crate::error::{Error, Result};
use crate::resources::{self, ResourceError};
use crate::runtime::{FullRuntime, RuntimeError};
use crate::tools::{Dispatcher, Invocation, Operation};
use rmcp::model::{
    AnnotateAble, CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject,
    ListPromptsResult, ListResourcesResult, ListToolsResult, LoggingLevel,
    LoggingMessageNotificationParam, PaginatedRequestParam, PromptsCapability, ProtocolVersion,
    RawResource, ReadResourceRequestParam, ReadResourceResult, Resource, ResourceContents,
    ResourcesCapability, ServerCapabilities, ServerInfo, SetLevelRequestParam, Tool,
    ToolsCapability,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData, ServerHandler, ServiceExt};
use serde_json::{Value, json};
use std::sync::Arc;

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "docker-mcp";

/// The `tools/list` entries in catalog order.
pub fn tool_list() -> Vec<Tool> {
    Operation::ALL
        .iter()
        .map(|op| {
            let schema = match op.contract().json_schema() {
                Value::Object(schema) => schema,
                _ => JsonObject::new(),
            };
            Tool::new(op.name(), op.description(), Arc::new(schema))
        })
        .collect()
}

/// Answers MCP requests against one runtime.
pub struct DockerMcp<R: FullRuntime + ?Sized> {
    runtime: Arc<R>,
    credentials: Arc<RegistryCredentials>,
    threshold: Threshold,
}

impl<R: FullRuntime + ?Sized> DockerMcp<R> {
    pub fn new(runtime: Arc<R>, credentials: Arc<RegistryCredentials>) -> Self {
        Self {
            runtime,
            credentials,
            threshold: Threshold::default(),
        }
    }

    pub fn log_level(&self) -> LoggingLevel {
        self.threshold.get()
    }

    pub fn set_log_level(&self, level: LoggingLevel) {
        self.threshold.set(level);
        tracing::debug!(?level, "client log level set");
    }

    /// Run one tool. Runtime failures become `-32603` carrying the error kind.
    pub async fn call(
        &self,
        name: &str,
        args: Option<&JsonObject>,
    ) -> std::result::Result<Invocation, ErrorData> {
        Dispatcher::new(&*self.runtime, &self.credentials)
            .invoke(name, args)
            .await
            .map_err(|e| runtime_failure(name, &e))
    }

    /// The client notification owed for `invocation`, if the threshold allows it.
    pub fn validation_notice(&self, invocation: &Invocation) -> Option<LoggingMessageNotificationParam> {
        let Invocation::InvalidInput { error, .. } = invocation else {
            return None;
        };
        self.threshold.message(
            LoggingLevel::Error,
            json!(format!("Failed to validate input provided by LLM: {error}")),
        )
    }

    /// Logs and stats entries for every running container.
    pub async fn resources(&self) -> std::result::Result<Vec<Resource>, ErrorData> {
        let descriptors = resources::list_resources(&*self.runtime)
            .await
            .map_err(|e| runtime_failure("resources/list", &e))?;
        Ok(descriptors
            .into_iter()
            .map(|descriptor| {
                let mut raw = RawResource::new(descriptor.uri, descriptor.name);
                raw.description = Some(descriptor.description);
                raw.mime_type = Some(descriptor.mime_type);
                raw.no_annotation()
            })
            .collect())
    }

    pub async fn read(&self, uri: &str) -> std::result::Result<ReadResourceResult, ErrorData> {
        match resources::read_resource(&*self.runtime, uri).await {
            Ok(content) => {
                let mut contents = ResourceContents::text(content.text, content.uri);
                if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
                    *mime_type = Some(content.mime_type.to_string());
                }
                Ok(ReadResourceResult {
                    contents: vec![contents],
                })
            }
            Err(ResourceError::Runtime { source }) => Err(runtime_failure(uri, &source)),
            Err(e) => {
                tracing::warn!(uri, error = %e, "resource read failed");
                Err(ErrorData::internal_error(e.to_string(), None))
            }
        }
    }
}

/// Tool output as MCP content; only contract violations are flagged as errors.
pub fn tool_result(invocation: &Invocation) -> CallToolResult {
    let content = vec![Content::text(invocation.to_text())];
    if invocation.is_error() {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

/// Map a runtime failure to `-32603`, keeping the daemon's message as-is.
fn runtime_failure(operation: &str, error: &RuntimeError) -> ErrorData {
    tracing::warn!(operation, error = %error, "runtime call failed");
    ErrorData::internal_error(
        error.to_string(),
        Some(json!({ "kind": format!("{:?}", error.kind()) })),
    )
}

impl<R: FullRuntime + ?Sized + 'static> ServerHandler for DockerMcp<R> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                logging: Some(JsonObject::new()),
                prompts: Some(PromptsCapability::default()),
                resources: Some(ResourcesCapability::default()),
                tools: Some(ToolsCapability::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(tool_list()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let invocation = self.call(&request.name, request.arguments.as_ref()).await?;
        if let Some(notice) = self.validation_notice(&invocation) {
            if let Err(e) = context.peer.notify_logging_message(notice).await {
                tracing::warn!(error = %e, "failed to send log notification");
            }
        }
        Ok(tool_result(&invocation))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult::with_all_items(self.resources().await?))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, ErrorData> {
        self.read(&request.uri).await
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, ErrorData> {
        Ok(ListPromptsResult::with_all_items(Vec::new()))
    }

    async fn set_level(
        &self,
        request: SetLevelRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<(), ErrorData> {
        self.set_log_level(request.level);
        Ok(())
    }
}

/// Serve one MCP session on the process's stdin and stdout until the client leaves.
pub async fn serve_stdio<R: FullRuntime + ?Sized + 'static>(handler: DockerMcp<R>) -> Result<()> {
    let session = handler
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| Error::Session(e.to_string()))?;
    let reason = session
        .waiting()
        .await
        .map_err(|e| Error::Session(e.to_string()))?;
    tracing::info!(?reason, "MCP session ended");
    Ok(())
}
