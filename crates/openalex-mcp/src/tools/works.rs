//! Single-work tools: get_work_details, get_batch_work_details, get_work_ngrams.

use serde_json::{Value, json};

use super::{McpTool, ToolContext, params};
use crate::client::WorksQuery;
use crate::config::{fields, paging};
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{GetBatchWorkDetailsInput, GetWorkDetailsInput, WorkIdInput, work_short_id};

/// Work details tool.
pub struct GetWorkDetailsTool;

#[async_trait::async_trait]
impl McpTool for GetWorkDetailsTool {
    fn name(&self) -> &'static str {
        "get_work_details"
    }

    fn description(&self) -> &'static str {
        "Retrieve detailed information for a specific work by its ID (OpenAlex ID or URL, \
         DOI URL, PMID URL, MAG ID). Request 'abstract' for the plaintext abstract; \
         there is no need to request abstract_inverted_index."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "work_id": {
                    "type": "string",
                    "description": "Work identifier, e.g. W2741809807 or https://doi.org/10.7717/peerj.4375"
                },
                "select_fields": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Root-level fields to return; omit for the full object"
                }
            },
            "required": ["work_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Value> {
        params::require_text(&input, "work_id")?;
        let input: GetWorkDetailsInput = params::parse_input(input)?;

        let work_id = params::normalize_work_id(&input.work_id)?;
        let select = params::normalize_select_fields(input.select_fields)?;

        tracing::info!(work_id = %work_id, fields = select.len(), "Fetching work details");

        let record = ctx
            .client
            .get_work(&work_id, &params::upstream_select(&select))
            .await
            .map_err(|e| ToolError::from_lookup(e, &input.work_id))?;

        Ok(formatters::shape_work(record, &select))
    }
}

/// Batch work details tool.
pub struct GetBatchWorkDetailsTool;

#[async_trait::async_trait]
impl McpTool for GetBatchWorkDetailsTool {
    fn name(&self) -> &'static str {
        "get_batch_work_details"
    }

    fn description(&self) -> &'static str {
        "Retrieve details for up to 50 works in one call, by OpenAlex ID. \
         IDs that do not resolve are listed under not_found."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "work_ids": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 1,
                    "maxItems": paging::MAX_BATCH_IDS,
                    "description": "OpenAlex work IDs (W... or https://openalex.org/W...)"
                },
                "select_fields": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Root-level fields to return for each work"
                }
            },
            "required": ["work_ids"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Value> {
        let input: GetBatchWorkDetailsInput = params::parse_input(input)?;

        if input.work_ids.is_empty() {
            return Err(ToolError::validation("work_ids", "cannot be empty"));
        }
        if input.work_ids.len() > paging::MAX_BATCH_IDS {
            return Err(ToolError::validation(
                "work_ids",
                format!(
                    "at most {} IDs per request, got {}",
                    paging::MAX_BATCH_IDS,
                    input.work_ids.len()
                ),
            ));
        }

        let mut ids: Vec<String> = Vec::with_capacity(input.work_ids.len());
        for raw in &input.work_ids {
            let id = params::normalize_work_id(raw)?;
            if !params::is_openalex_work_id(&id) {
                return Err(ToolError::validation(
                    "work_ids",
                    format!("'{raw}' is not an OpenAlex work ID"),
                ));
            }
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        let select = params::normalize_select_fields(input.select_fields)?;

        let mut query = WorksQuery::new()
            .filter("ids.openalex", ids.join("|"))
            .per_page(ids.len() as u32);

        if !select.is_empty() {
            let mut upstream = params::upstream_select(&select);
            // `id` is needed to report which IDs were not found
            if !upstream.iter().any(|f| f == fields::ID) {
                upstream.insert(0, fields::ID.to_string());
            }
            query = query.select(upstream);
        }

        tracing::info!(requested = ids.len(), "Fetching batch work details");

        let page = ctx.client.list_works(&query).await?;

        let mut found: Vec<String> = Vec::with_capacity(page.results.len());
        let mut works: Vec<Value> = Vec::with_capacity(page.results.len());
        for work in page.results {
            let Value::Object(record) = work else { continue };
            if let Some(short) = work_short_id(&record) {
                found.push(short.to_string());
            }
            works.push(formatters::shape_work(record, &select));
        }

        let not_found: Vec<&String> = ids.iter().filter(|id| !found.contains(id)).collect();

        Ok(json!({
            "works": works,
            "not_found": not_found,
        }))
    }
}

/// Work n-grams tool.
pub struct GetWorkNgramsTool;

#[async_trait::async_trait]
impl McpTool for GetWorkNgramsTool {
    fn name(&self) -> &'static str {
        "get_work_ngrams"
    }

    fn description(&self) -> &'static str {
        "Retrieve the n-grams (word and phrase counts from the full text) of a work. \
         Reports when the work exists but has no n-gram data."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "work_id": {
                    "type": "string",
                    "description": "Work identifier, e.g. W2741809807"
                }
            },
            "required": ["work_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Value> {
        params::require_text(&input, "work_id")?;
        let input: WorkIdInput = params::parse_input(input)?;
        let work_id = params::normalize_work_id(&input.work_id)?;

        tracing::info!(work_id = %work_id, "Fetching work n-grams");

        match ctx.client.get_work_ngrams(&work_id).await {
            Ok(ngrams) if has_ngrams(&ngrams) => Ok(ngrams),
            Ok(_) => Err(missing_ngrams(ctx, &work_id, &input.work_id).await),
            Err(e) if e.is_not_found() => Err(missing_ngrams(ctx, &work_id, &input.work_id).await),
            Err(e) => Err(ToolError::Upstream(e)),
        }
    }
}

/// An n-gram payload with an explicitly empty `ngrams` list carries no data.
fn has_ngrams(payload: &Value) -> bool {
    match payload.get("ngrams") {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Null) => false,
        _ => true,
    }
}

/// Tell "no such work" apart from "work without n-grams" with a work lookup.
async fn missing_ngrams(ctx: &ToolContext, work_id: &str, raw_id: &str) -> ToolError {
    match ctx.client.get_work(work_id, &[fields::ID.to_string()]).await {
        Ok(_) => ToolError::not_available("N-grams", raw_id),
        Err(e) => ToolError::from_lookup(e, raw_id),
    }
}
