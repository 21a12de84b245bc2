//! MCP server implementation.
//!
//! Serves the tool set over stdio. Framing is newline-delimited JSON-RPC 2.0;
//! logs go to stderr so stdout carries protocol messages only.

pub mod protocol;
pub mod stdio;

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::client::WorksApi;
use crate::tools::{self, McpTool, ToolContext};

/// MCP server for OpenAlex works.
pub struct McpServer {
    /// Tool execution context.
    ctx: ToolContext,

    /// Registered tools.
    tools: Vec<Box<dyn McpTool>>,
}

impl McpServer {
    /// Create a new MCP server backed by `client`.
    #[must_use]
    pub fn new(client: impl WorksApi + 'static) -> Self {
        Self::with_context(ToolContext::new(Arc::new(client)))
    }

    /// Create a server around an existing tool context.
    #[must_use]
    pub fn with_context(ctx: ToolContext) -> Self {
        Self { ctx, tools: tools::register_all_tools() }
    }

    /// Run the server in stdio mode.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in stdio mode");
        tracing::info!("Registered {} tools", self.tools.len());

        stdio::run_stdio(&self.tools, &self.ctx).await
    }

    /// Serve requests from an arbitrary reader/writer pair until EOF.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        stdio::serve(reader, writer, &self.tools, &self.ctx).await
    }

    /// Get tool by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// List all available tools.
    #[must_use]
    pub fn list_tools(&self) -> Vec<(&str, &str)> {
        self.tools.iter().map(|t| (t.name(), t.description())).collect()
    }

    /// Get tool context for execution.
    #[must_use]
    pub const fn context(&self) -> &ToolContext {
        &self.ctx
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.tools.len()).finish()
    }
}
