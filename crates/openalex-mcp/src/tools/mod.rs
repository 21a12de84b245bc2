//! MCP tool implementations.
//!
//! Each tool:
//! 1. Validates and defaults its parameters (`params`)
//! 2. Builds and runs a query against the works API
//! 3. Shapes the JSON payload, or reports an `ErrorEnvelope`

mod citations;
pub mod params;
mod search;
mod works;

pub use citations::*;
pub use search::*;
pub use works::*;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::client::WorksApi;
use crate::error::{ErrorEnvelope, ToolResult};

/// Tool execution context.
#[derive(Clone)]
pub struct ToolContext {
    /// Upstream works API.
    pub client: Arc<dyn WorksApi>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(client: Arc<dyn WorksApi>) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext").finish_non_exhaustive()
    }
}

/// Result of a tool call as seen by the caller: a payload or an error envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutcome {
    /// Documented success payload.
    Success(Value),
    /// `{"error": message}`.
    Failure(ErrorEnvelope),
}

impl ToolOutcome {
    /// Check if this outcome is an error envelope.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Convert into the JSON value sent to the caller.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Success(payload) => payload,
            Self::Failure(envelope) => {
                serde_json::json!({ "error": envelope.error })
            }
        }
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "search_works").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Value>;

    /// Execute and fold any error into an `ErrorEnvelope`.
    async fn call(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolOutcome {
        match self.execute(ctx, input).await {
            Ok(payload) => ToolOutcome::Success(payload),
            Err(err) => {
                tracing::warn!(
                    tool = self.name(),
                    kind = err.kind(),
                    error = %err,
                    "Tool call failed"
                );
                ToolOutcome::Failure(ErrorEnvelope::from(&err))
            }
        }
    }
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        // Search (1)
        Box::new(search::SearchWorksTool),

        // Single works (3)
        Box::new(works::GetWorkDetailsTool),
        Box::new(works::GetBatchWorkDetailsTool),
        Box::new(works::GetWorkNgramsTool),

        // Citation graph (2)
        Box::new(citations::GetReferencedWorksTool),
        Box::new(citations::GetCitingWorksTool),
    ]
}
