use anyhow::Result;
use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer,
};
use std::sync::Arc;

use crate::config::Config;
use crate::registry::ToolRegistry;

/// MCP server that exposes a tool registry
#[derive(Clone)]
pub struct ToolServer {
    registry: Arc<ToolRegistry>,
    name: &'static str,
    instructions: &'static str,
}

impl ToolServer {
    /// Arithmetic tools only
    pub fn math() -> Self {
        Self {
            registry: Arc::new(ToolRegistry::math()),
            name: "math-server",
            instructions: "Basic arithmetic: add, subtract, multiply and divide two numbers.",
        }
    }

    /// Arithmetic, weather lookup and optional web search for agents
    pub fn agent(config: &Config) -> Result<Self> {
        let client = Arc::new(config.http_client()?);

        Ok(Self {
            registry: Arc::new(ToolRegistry::agent(config, client)),
            name: "agent-tools",
            instructions: "Arithmetic and current weather conditions for any location \
                worldwide, powered by Open-Meteo. Web search is available when configured.",
        })
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

impl ServerHandler for ToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(self.instructions.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.registry.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let output = self
            .registry
            .call(&request.name, request.arguments.unwrap_or_default())
            .await
            .map_err(|e| {
                tracing::warn!("Tool '{}' failed: {}", request.name, e);
                McpError::from(e)
            })?;

        let mut result = CallToolResult::success(vec![Content::text(output.text())]);
        result.structured_content = output.structured();
        Ok(result)
    }
}
