use anyhow::{Context, Result};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParam, CallToolResult, Content, GetPromptRequestParam, GetPromptResult,
        Implementation, JsonObject, ListPromptsResult, ListResourceTemplatesResult,
        ListResourcesResult, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ReadResourceRequestParam, ReadResourceResult, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    transport::{sse_server::SseServer, stdio},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::metadata::{
    MetricArgs, PullRequestArgs, ToolMetadata, all_tool_metadata, build_routing_table,
};
use crate::gateway::{MetricGateway, MetricRequest};

/// MCP server exposing one tool per Compass endpoint.
///
/// Tool metadata is static; every call is routed through the shared
/// [`MetricGateway`]. Cheap to clone, so transports that need one handler per
/// session can build it from a factory closure.
#[derive(Clone)]
pub struct CompassServer {
    gateway: MetricGateway,

    /// Routing table: tool_name -> metadata
    routing_table: Arc<HashMap<&'static str, &'static ToolMetadata>>,

    /// Enabled tool names (filtered by --tool/--tools/--toolset)
    enabled_tools: Option<Arc<HashSet<String>>>,
}

impl CompassServer {
    /// Create a new server
    ///
    /// # Arguments
    /// * `gateway` - Upstream gateway carrying the resolved configuration
    /// * `enabled_tools` - Individual tool names to enable, `None` for all
    pub fn new(gateway: MetricGateway, enabled_tools: Option<HashSet<String>>) -> Self {
        let routing_table = build_routing_table();

        log::info!(
            "Compass MCP server initialized with {} of {} tools",
            enabled_tools
                .as_ref()
                .map_or(routing_table.len(), |enabled| enabled.len()),
            routing_table.len()
        );

        Self {
            gateway,
            routing_table: Arc::new(routing_table),
            enabled_tools: enabled_tools.map(Arc::new),
        }
    }

    fn is_enabled(&self, tool_name: &str) -> bool {
        self.enabled_tools
            .as_ref()
            .is_none_or(|enabled| enabled.contains(tool_name))
    }

    /// Tool descriptors for every enabled tool.
    pub fn tools(&self) -> Vec<Tool> {
        all_tool_metadata()
            .iter()
            .filter(|tool_meta| self.is_enabled(tool_meta.name))
            .map(|tool_meta| {
                let schema_obj = match tool_meta.schema.clone() {
                    Value::Object(obj) => Arc::new(obj),
                    _ => Arc::new(JsonObject::new()),
                };
                Tool::new(tool_meta.name, tool_meta.description, schema_obj)
            })
            .collect()
    }

    /// Run one tool and return its JSON result string.
    ///
    /// Upstream failures come back as JSON envelopes inside `Ok`; `Err` is
    /// reserved for protocol faults (unknown or disabled tool, bad arguments).
    pub async fn dispatch(
        &self,
        tool_name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<String, McpError> {
        if !self.is_enabled(tool_name) {
            return Err(McpError::invalid_params(
                format!("Tool '{tool_name}' is not enabled"),
                None,
            ));
        }

        let tool = self
            .routing_table
            .get(tool_name)
            .copied()
            .ok_or_else(|| McpError::invalid_params(format!("Unknown tool: {tool_name}"), None))?;

        let args = Value::Object(arguments.unwrap_or_default());

        log::debug!("Calling tool '{}' -> {}", tool_name, tool.endpoint);

        let result = if tool.accepts_token_override {
            let PullRequestArgs {
                query,
                access_token,
            } = parse_args(tool_name, args)?;
            let request = MetricRequest::from(query);
            self.gateway
                .fetch_with_token(tool.endpoint, &request, access_token.as_deref())
                .await
        } else {
            let args: MetricArgs = parse_args(tool_name, args)?;
            self.gateway.fetch(tool.endpoint, &args.into()).await
        };

        Ok(result)
    }

    /// Serve over stdio until the peer disconnects.
    pub async fn serve_stdio(self) -> Result<()> {
        log::info!("Starting stdio server");

        let service = self.serve(stdio()).await.inspect_err(|e| {
            log::error!("serving error: {e:?}");
        })?;
        service.waiting().await?;

        log::info!("Stdio server stopped");
        Ok(())
    }

    /// Serve over SSE on `addr` until `shutdown_token` is cancelled.
    pub async fn serve_sse(self, addr: SocketAddr, shutdown_token: CancellationToken) -> Result<()> {
        log::info!("Starting SSE server on http://{addr}");

        let sse = SseServer::serve(addr)
            .await
            .with_context(|| format!("Failed to bind SSE server on {addr}"))?;
        let server_token = sse.with_service(move || self.clone());

        shutdown_token.cancelled().await;
        server_token.cancel();

        log::info!("SSE server stopped");
        Ok(())
    }
}

fn parse_args<T: DeserializeOwned>(tool_name: &str, args: Value) -> Result<T, McpError> {
    serde_json::from_value(args).map_err(|e| {
        McpError::invalid_params(format!("Invalid arguments for '{tool_name}': {e}"), None)
    })
}

impl ServerHandler for CompassServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "OSS Compass metrics tools. Each tool takes a repository URL (label) and a date range and returns the Compass API response as a JSON string; failures come back as {\"status\", \"error\", \"details\"} objects.".to_string(),
            ),
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.dispatch(&request.name, request.arguments).await?;
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self.tools();
        log::debug!("Serving {} tools from static metadata", tools.len());
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn get_prompt(
        &self,
        _request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        Err(McpError::invalid_request("Prompts not supported", None))
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(Vec::new()))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(Vec::new()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        Err(McpError::invalid_request(
            "Resources not supported",
            Some(json!({
                "message": "This server only supports tools.",
                "uri": request.uri
            })),
        ))
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult::with_all_items(Vec::new()))
    }
}
