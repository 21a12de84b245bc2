//! Citation graph tools: get_referenced_works (outgoing), get_citing_works (incoming).

use serde_json::{Value, json};

use super::search::fetch_works_page;
use super::{McpTool, ToolContext, params};
use crate::client::WorksQuery;
use crate::config::fields;
use crate::error::{ToolError, ToolResult};
use crate::models::{GetCitingWorksInput, WorkIdInput, work_short_id};

/// Outgoing citations tool.
pub struct GetReferencedWorksTool;

#[async_trait::async_trait]
impl McpTool for GetReferencedWorksTool {
    fn name(&self) -> &'static str {
        "get_referenced_works"
    }

    fn description(&self) -> &'static str {
        "List the OpenAlex IDs of works cited BY a work (outgoing citations). \
         Returns only IDs; use get_work_details or get_batch_work_details for more."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "work_id": {
                    "type": "string",
                    "description": "Identifier of the citing work"
                }
            },
            "required": ["work_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Value> {
        params::require_text(&input, "work_id")?;
        let input: WorkIdInput = params::parse_input(input)?;
        let work_id = params::normalize_work_id(&input.work_id)?;

        tracing::info!(work_id = %work_id, "Fetching referenced works");

        let record = ctx
            .client
            .get_work(&work_id, &[fields::REFERENCED_WORKS.to_string()])
            .await
            .map_err(|e| ToolError::from_lookup(e, &input.work_id))?;

        let referenced: Vec<&str> = record
            .get(fields::REFERENCED_WORKS)
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        Ok(json!({ "referenced_work_ids": referenced }))
    }
}

/// Incoming citations tool.
pub struct GetCitingWorksTool;

#[async_trait::async_trait]
impl McpTool for GetCitingWorksTool {
    fn name(&self) -> &'static str {
        "get_citing_works"
    }

    fn description(&self) -> &'static str {
        "List works that CITE a work (incoming citations). Same result shape as \
         search_works, with cursor pagination via meta.next_cursor."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "work_id": {
                    "type": "string",
                    "description": "Identifier of the cited work"
                },
                "select_fields": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Root-level fields to return for each citing work"
                },
                "per_page": {
                    "type": "integer",
                    "default": 25,
                    "minimum": 1,
                    "maximum": 200
                },
                "cursor": {
                    "type": "string",
                    "default": "*",
                    "description": "Pagination cursor; '*' for the first page"
                },
                "summarize_results": {
                    "type": "boolean",
                    "default": false,
                    "description": "Return a condensed summary per work"
                }
            },
            "required": ["work_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Value> {
        params::require_text(&input, "work_id")?;
        let input: GetCitingWorksInput = params::parse_input(input)?;

        let work_id = params::normalize_work_id(&input.work_id)?;
        let per_page = params::validate_per_page(input.per_page)?;
        let cursor = params::resolve_cursor(input.cursor)?;
        let select = params::normalize_select_fields(input.select_fields)?;

        let cited = resolve_openalex_id(ctx, &work_id, &input.work_id).await?;

        tracing::info!(cited = %cited, per_page, "Fetching citing works");

        let mut query = WorksQuery::new().filter("cites", cited).per_page(per_page).cursor(cursor);

        if !input.summarize_results && !select.is_empty() {
            query = query.select(params::upstream_select(&select));
        }

        fetch_works_page(ctx, &query, &select, input.summarize_results).await
    }
}

/// Short OpenAlex ID for a normalized identifier.
///
/// The `cites` filter only takes OpenAlex IDs, so DOIs and other external
/// identifiers cost one lookup.
async fn resolve_openalex_id(
    ctx: &ToolContext,
    work_id: &str,
    raw_id: &str,
) -> ToolResult<String> {
    if params::is_openalex_work_id(work_id) {
        return Ok(work_id.to_string());
    }

    let record = ctx
        .client
        .get_work(work_id, &[fields::ID.to_string()])
        .await
        .map_err(|e| ToolError::from_lookup(e, raw_id))?;

    work_short_id(&record).map(str::to_string).ok_or_else(|| ToolError::not_found(raw_id))
}
