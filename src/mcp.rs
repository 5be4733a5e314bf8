//! MCP front-end for [`DocsServer`] built on the rmcp tool macros.
//!
//! Tools are declared with `#[tool]` over typed argument structs. The listing
//! is adjusted at runtime so that `component` arguments carry the discovered
//! component keys as an `enum` and the name arguments are marked required.

use crate::error::Error;
use crate::server::{ComponentArgs, DocsServer, GenerateArgs, QueryArgs, ToolCall, ToolResponse};
use crate::types::Guide;
use crate::version::{SERVER_NAME, SERVER_VERSION};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult, PaginatedRequestParam,
        ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    tool, tool_router, ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde::de::IgnoredAny;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Arguments the tools cannot run without.
const REQUIRED_ARGUMENTS: [&str; 2] = ["component", "query"];

/// Capacity of the pipe between the input filter and the session.
const FRAME_BUFFER_BYTES: usize = 64 * 1024;

/// rmcp service exposing the nine documentation tools.
#[derive(Clone)]
pub struct DocsService {
    server: Arc<DocsServer>,
    tool_router: ToolRouter<DocsService>,
}

impl DocsService {
    pub fn new(server: Arc<DocsServer>) -> Self {
        Self {
            server,
            tool_router: Self::tool_router(),
        }
    }

    /// Tool definitions as listed to clients.
    pub fn tools(&self) -> Vec<Tool> {
        let components = self.server.components();
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| with_argument_rules(tool, components))
            .collect()
    }

    /// Serve one client session over stdin and stdout.
    pub async fn run_stdio(self) -> crate::Result<()> {
        self.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
    }

    /// Serve one client session reading newline-delimited frames from `reader`.
    ///
    /// Frames that are not valid UTF-8 JSON are logged and dropped before they
    /// reach the session, so a bad line costs only that line. Returns once the
    /// input closes.
    pub async fn run<R, W>(self, reader: R, writer: W) -> crate::Result<()>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (frames_in, frames_out) = tokio::io::duplex(FRAME_BUFFER_BYTES);
        let filter = tokio::spawn(async move {
            if let Err(e) = forward_frames(reader, frames_in).await {
                warn!(error = %e, "Input stream failed");
            }
        });

        let session = self
            .serve((frames_out, writer))
            .await
            .map_err(|e| Error::Protocol(format!("Failed to start session: {}", e)))?;
        info!("Client session started");

        let reason = session
            .waiting()
            .await
            .map_err(|e| Error::Protocol(format!("Session task failed: {}", e)))?;
        info!(reason = ?reason, "Client session closed");

        filter.abort();
        Ok(())
    }
}

#[tool_router]
impl DocsService {
    #[tool(description = "Get the full documentation of a PrimeNG component, including properties, events and methods")]
    async fn get_component_doc(&self, Parameters(args): Parameters<ComponentArgs>) -> Result<CallToolResult, McpError> {
        Ok(self.server.execute(ToolCall::ComponentDoc(args)).await.into())
    }

    #[tool(description = "Search PrimeNG components matching a query")]
    async fn search_components(&self, Parameters(args): Parameters<QueryArgs>) -> Result<CallToolResult, McpError> {
        Ok(self.server.execute(ToolCall::SearchComponents(args)).await.into())
    }

    #[tool(description = "List every available PrimeNG component grouped by category")]
    async fn list_all_components(&self) -> Result<CallToolResult, McpError> {
        Ok(self.server.execute(ToolCall::ListAllComponents).await.into())
    }

    #[tool(description = "Generate example code for a PrimeNG component with the given properties")]
    async fn generate_component_code(
        &self,
        Parameters(args): Parameters<GenerateArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.server.execute(ToolCall::GenerateComponentCode(args)).await.into())
    }

    #[tool(description = "Get practical usage examples for a specific component")]
    async fn get_component_examples(
        &self,
        Parameters(args): Parameters<ComponentArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.server.execute(ToolCall::ComponentExamples(args)).await.into())
    }

    #[tool(description = "Get the PrimeNG installation and initial setup guide")]
    async fn get_installation_guide(&self) -> Result<CallToolResult, McpError> {
        Ok(self.server.execute(ToolCall::Guide(Guide::Installation)).await.into())
    }

    #[tool(description = "Get the PrimeNG theming guide (themes, customization, dark mode)")]
    async fn get_theming_guide(&self) -> Result<CallToolResult, McpError> {
        Ok(self.server.execute(ToolCall::Guide(Guide::Theming)).await.into())
    }

    #[tool(description = "Get the PrimeIcons usage guide")]
    async fn get_icons_guide(&self) -> Result<CallToolResult, McpError> {
        Ok(self.server.execute(ToolCall::Guide(Guide::Icons)).await.into())
    }

    #[tool(description = "Get the guide for integrating PrimeNG with Tailwind CSS")]
    async fn get_tailwind_guide(&self) -> Result<CallToolResult, McpError> {
        Ok(self.server.execute(ToolCall::Guide(Guide::Tailwind)).await.into())
    }
}

impl ServerHandler for DocsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: SERVER_VERSION.into(),
                ..Default::default()
            },
            instructions: Some(
                "PrimeNG documentation: component docs, search, code generation, examples and setup guides.".into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let context = ToolCallContext::new(self, request, context);
        self.tool_router.call(context).await
    }
}

impl From<ToolResponse> for CallToolResult {
    fn from(response: ToolResponse) -> Self {
        let content = vec![Content::text(response.text)];
        if response.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

/// Restrict `component` to the known keys and mark the name arguments required.
fn with_argument_rules(mut tool: Tool, components: &[String]) -> Tool {
    let schema = Arc::make_mut(&mut tool.input_schema);

    let mut required = Vec::new();
    if let Some(Value::Object(properties)) = schema.get_mut("properties") {
        for name in REQUIRED_ARGUMENTS {
            let Some(Value::Object(property)) = properties.get_mut(name) else {
                continue;
            };
            property.remove("default");
            if name == "component" && !components.is_empty() {
                property.insert("enum".into(), json!(components));
            }
            required.push(json!(name));
        }
    }

    if !required.is_empty() {
        schema.insert("required".into(), Value::Array(required));
    }
    tool
}

/// Copy newline-delimited frames from `reader` to `writer`, dropping lines that
/// are not valid UTF-8 JSON. Blank lines are skipped.
async fn forward_frames<R, W>(mut reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }

        let frame = line.trim_ascii();
        if frame.is_empty() {
            continue;
        }

        match std::str::from_utf8(frame) {
            Err(e) => warn!(error = %e, bytes = frame.len(), "Dropping frame that is not valid UTF-8"),
            Ok(text) => match serde_json::from_str::<IgnoredAny>(text) {
                Err(e) => warn!(error = %e, bytes = frame.len(), "Dropping frame that is not valid JSON"),
                Ok(_) => {
                    writer.write_all(frame).await?;
                    writer.write_all(b"\n").await?;
                    writer.flush().await?;
                }
            },
        }
    }

    writer.shutdown().await
}
