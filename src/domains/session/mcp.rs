//! MCP client session over the rmcp SDK.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rmcp::{
    RoleClient, ServiceExt,
    model::{CallToolRequestParam, CallToolResult, Content, RawContent, Tool},
    service::{RunningService, ServiceError},
    transport::{
        StreamableHttpClientTransport, streamable_http_client::StreamableHttpClientTransportConfig,
    },
};
use tracing::{info, instrument, warn};

use super::error::SessionError;
use super::manager::Connector;
use crate::core::config::{RemoteConfig, TransportMode};
use crate::domains::tools::{
    CallOutcome, ContentBlock, JsonObject, ToolDescriptor, ToolError, ToolSession,
};

/// Connects to the configured remote MCP server.
pub struct McpConnector {
    config: RemoteConfig,
}

impl McpConnector {
    /// Create a connector for `config`.
    pub fn new(config: RemoteConfig) -> Self {
        Self { config }
    }

    async fn connect_streamable_http(&self) -> Result<Arc<dyn ToolSession>, SessionError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(self.config.connect_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SessionError::connect(&self.config.endpoint, e.to_string()))?;

        let transport = StreamableHttpClientTransport::with_client(
            http_client,
            StreamableHttpClientTransportConfig::with_uri(self.config.endpoint.as_str()),
        );

        let handshake = ().serve(transport);
        let service = tokio::time::timeout(self.config.connect_timeout(), handshake)
            .await
            .map_err(|_| SessionError::timeout(&self.config.endpoint, self.config.connect_timeout()))?
            .map_err(|e| SessionError::connect(&self.config.endpoint, e.to_string()))?;

        Ok(Arc::new(McpSession::new(service)))
    }
}

#[async_trait::async_trait]
impl Connector for McpConnector {
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    async fn connect(&self) -> Result<Arc<dyn ToolSession>, SessionError> {
        info!(
            "Opening session to {} via {}",
            self.config.name,
            self.config.transport.as_str()
        );

        match self.config.transport {
            TransportMode::StreamableHttp => self.connect_streamable_http().await,
        }
    }

    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

/// A live rmcp client session.
pub struct McpSession {
    service: RunningService<RoleClient, ()>,
    healthy: AtomicBool,
}

impl McpSession {
    fn new(service: RunningService<RoleClient, ()>) -> Self {
        Self {
            service,
            healthy: AtomicBool::new(true),
        }
    }

    /// Record transport-level failures so the manager reconnects.
    fn observe(&self, err: &ServiceError) {
        if is_transport_failure(err) {
            warn!("MCP transport failed: {}", err);
            self.healthy.store(false, Ordering::SeqCst);
        }
    }
}

#[async_trait::async_trait]
impl ToolSession for McpSession {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolError> {
        let tools = self.service.list_all_tools().await.map_err(|e| {
            self.observe(&e);
            ToolError::connection(e.to_string())
        })?;

        Ok(tools.into_iter().map(descriptor_from_tool).collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallOutcome, ToolError> {
        let result = self
            .service
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments: Some(arguments),
            })
            .await
            .map_err(|e| {
                self.observe(&e);
                ToolError::invocation(name, e.to_string())
            })?;

        Ok(outcome_from_result(result))
    }

    fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

/// Whether `err` means the session itself is gone. Errors reported by the
/// remote tool leave the session usable.
fn is_transport_failure(err: &ServiceError) -> bool {
    matches!(
        err,
        ServiceError::TransportClosed | ServiceError::TransportSend(_)
    )
}

fn outcome_from_result(result: CallToolResult) -> CallOutcome {
    CallOutcome {
        content: result.content.into_iter().map(block_from_content).collect(),
        is_error: result.is_error.unwrap_or(false),
    }
}

fn descriptor_from_tool(tool: Tool) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.name.to_string(),
        description: tool.description.map(|d| d.to_string()),
        input_schema: tool.input_schema.as_ref().clone(),
    }
}

fn block_from_content(content: Content) -> ContentBlock {
    match content.raw {
        RawContent::Text(text) => ContentBlock::text(text.text),
        other => ContentBlock::other(content_kind(&other)),
    }
}

/// The wire `type` tag of a non-text block.
fn content_kind(raw: &RawContent) -> String {
    serde_json::to_value(raw)
        .ok()
        .and_then(|value| value.get("type").and_then(|t| t.as_str()).map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}
