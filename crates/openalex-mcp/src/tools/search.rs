//! Work search tool and the shared page-fetching path.

use serde_json::{Value, json};

use super::{McpTool, ToolContext, params};
use crate::client::WorksQuery;
use crate::error::ToolResult;
use crate::formatters;
use crate::models::{SearchField, SearchWorksInput};

/// Free-text work search tool.
pub struct SearchWorksTool;

#[async_trait::async_trait]
impl McpTool for SearchWorksTool {
    fn name(&self) -> &'static str {
        "search_works"
    }

    fn description(&self) -> &'static str {
        "Search OpenAlex works by keywords and filters, returning selected fields. \
         Supports OpenAlex boolean and proximity operators in the query (do not use \
         quotation marks). Uses cursor pagination: pass meta.next_cursor from a previous \
         response to get the next page. Requesting 'abstract' returns plaintext."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "search_query": {
                    "type": "string",
                    "description": "Search terms. Supports AND, OR, NOT and proximity operators"
                },
                "filters": {
                    "type": "object",
                    "description": "Filter field to value, e.g. {\"publication_year\": 2023}. \
                                    Strings pass through ('|' for OR, '!' for NOT), lists are ORed, \
                                    {\"from\": a, \"to\": b} and {\"gt\": a} / {\"lt\": b} express ranges"
                },
                "search_field": {
                    "type": "string",
                    "enum": ["title", "abstract", "fulltext", "title_and_abstract", "default"],
                    "default": "default",
                    "description": "Field to search within; default searches title, abstract and full text"
                },
                "select_fields": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Root-level fields to return, e.g. [\"id\", \"title\", \"abstract\"]"
                },
                "sort": {
                    "type": "object",
                    "description": "Sort field and direction, e.g. {\"cited_by_count\": \"desc\"} \
                                    or {\"field\": \"publication_date\", \"direction\": \"asc\"}"
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
                    "description": "Return a condensed summary per work (id, doi, title, year, \
                                    authors, citations, venue, oa_url, abstract)"
                }
            },
            "required": ["search_query"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Value> {
        params::require_text(&input, "search_query")?;
        let input: SearchWorksInput = params::parse_input(input)?;

        let per_page = params::validate_per_page(input.per_page)?;
        let cursor = params::resolve_cursor(input.cursor)?;
        let select = params::normalize_select_fields(input.select_fields)?;
        let search_query = input.search_query.trim();

        let mut query = WorksQuery::new().per_page(per_page).cursor(cursor);

        query = match input.search_field.filter_key() {
            None => query.search(search_query),
            Some(key) => query.filter(key, search_query),
        };

        if input.search_field == SearchField::Fulltext {
            tracing::debug!("fulltext search only covers works with indexed full text");
        }

        if let Some(ref filters) = input.filters {
            for (key, value) in params::render_filters(filters)? {
                query = query.filter(key, value);
            }
        }

        if let Some(ref sort) = input.sort {
            let (field, direction) = params::resolve_sort(sort)?;
            query = query.sort(field, direction);
        }

        if !input.summarize_results && !select.is_empty() {
            query = query.select(params::upstream_select(&select));
        }

        tracing::info!(
            search_field = ?input.search_field,
            filters = query.filters().len(),
            per_page,
            "Searching works"
        );

        fetch_works_page(ctx, &query, &select, input.summarize_results).await
    }
}

/// Run a works list query and shape it into `{results, meta}`.
///
/// The cursor in `meta.next_cursor` is relayed exactly as upstream sent it.
pub(crate) async fn fetch_works_page(
    ctx: &ToolContext,
    query: &WorksQuery,
    select: &[String],
    summarize: bool,
) -> ToolResult<Value> {
    let page = ctx.client.list_works(query).await?;

    let results: Vec<Value> = page
        .results
        .into_iter()
        .filter_map(|work| match work {
            Value::Object(record) if summarize => {
                Some(formatters::summarize_work(&record, select))
            }
            Value::Object(record) => Some(formatters::shape_work(record, select)),
            other => {
                tracing::warn!(kind = ?other, "Skipping non-object work in results");
                None
            }
        })
        .collect();

    tracing::debug!(
        returned = results.len(),
        count = ?page.meta.count,
        has_next = page.meta.next_cursor.is_some(),
        "Fetched works page"
    );

    Ok(json!({
        "results": results,
        "meta": {
            "count": page.meta.count,
            "per_page": page.meta.per_page.unwrap_or_else(|| query.page_size()),
            "next_cursor": page.meta.next_cursor,
        }
    }))
}
