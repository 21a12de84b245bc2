//! Parameter validation and normalization shared by the tools.
//!
//! Everything here runs before the first upstream call, so a rejected
//! argument never costs a request.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::{fields, paging};
use crate::error::{ToolError, ToolResult};
use crate::models::{SortDirection, SortInput};

static OPENALEX_WORK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[Ww]\d+$").expect("valid work id pattern"));

/// Range keys understood inside a filter object.
const RANGE_KEYS: &[&str] = &["from", "to", "gt", "lt"];

/// Deserialize tool arguments, reporting shape errors as validation errors.
pub fn parse_input<T: DeserializeOwned>(input: Value) -> ToolResult<T> {
    serde_json::from_value(input).map_err(|e| ToolError::validation("arguments", e.to_string()))
}

/// Require `field` to be a string with non-whitespace content.
///
/// Checked on the raw arguments so the failure does not depend on any other
/// parameter being well-formed.
pub fn require_text(input: &Value, field: &str) -> ToolResult<()> {
    match input.get(field) {
        None | Some(Value::Null) => Err(ToolError::validation(field, "is required")),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(ToolError::validation(field, "cannot be empty"))
        }
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(ToolError::validation(field, "must be a string")),
    }
}

/// Check `per_page` is within 1..=200.
pub fn validate_per_page(per_page: u32) -> ToolResult<u32> {
    if (1..=paging::MAX_PER_PAGE).contains(&per_page) {
        Ok(per_page)
    } else {
        Err(ToolError::validation(
            "per_page",
            format!("must be between 1 and {}, got {per_page}", paging::MAX_PER_PAGE),
        ))
    }
}

/// Resolve the cursor, defaulting to the first page.
pub fn resolve_cursor(cursor: Option<String>) -> ToolResult<String> {
    match cursor {
        None => Ok(paging::FIRST_PAGE_CURSOR.to_string()),
        Some(c) if c.trim().is_empty() => Err(ToolError::validation(
            "cursor",
            "cannot be empty; use '*' for the first page",
        )),
        Some(c) => Ok(c),
    }
}

/// Normalize a field selection into an ordered set of root-level names.
///
/// `abstract_inverted_index` is folded into `abstract`; duplicates keep their
/// first position. `None` and an empty list both mean "no selection".
pub fn normalize_select_fields(select: Option<Vec<String>>) -> ToolResult<Vec<String>> {
    let mut normalized: Vec<String> = Vec::new();

    for raw in select.unwrap_or_default() {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ToolError::validation("select_fields", "field names cannot be empty"));
        }
        if name.contains('.') {
            return Err(ToolError::validation(
                "select_fields",
                format!("'{name}' is nested; only root-level fields can be selected"),
            ));
        }

        let name =
            if name == fields::ABSTRACT_INVERTED_INDEX { fields::ABSTRACT } else { name };
        if !normalized.iter().any(|n| n == name) {
            normalized.push(name.to_string());
        }
    }

    Ok(normalized)
}

/// Upstream `select` list for a normalized selection.
///
/// The plaintext abstract is derived locally, so it is fetched as its
/// inverted index.
#[must_use]
pub fn upstream_select(select: &[String]) -> Vec<String> {
    select
        .iter()
        .map(|field| {
            if field == fields::ABSTRACT {
                fields::ABSTRACT_INVERTED_INDEX.to_string()
            } else {
                field.clone()
            }
        })
        .collect()
}

/// Resolve either sort shape to a single field and direction.
pub fn resolve_sort(sort: &SortInput) -> ToolResult<(String, SortDirection)> {
    let (field, direction) = match sort {
        SortInput::Explicit { field, direction } => (field.trim(), *direction),
        SortInput::Keyed(map) => {
            let mut entries = map.iter();
            match (entries.next(), entries.next()) {
                (Some((field, direction)), None) => (field.trim(), *direction),
                _ => {
                    return Err(ToolError::validation(
                        "sort",
                        "must name exactly one field, e.g. {\"cited_by_count\": \"desc\"}",
                    ));
                }
            }
        }
    };

    if field.is_empty() {
        return Err(ToolError::validation("sort", "field cannot be empty"));
    }

    Ok((field.to_string(), direction))
}

/// Render a filter mapping into OpenAlex `key:value` pairs.
///
/// - strings pass through verbatim, so `|` (OR) and `!` (NOT) work
/// - numbers and booleans are stringified
/// - arrays of scalars are ORed with `|`
/// - `{"from": a, "to": b}` becomes `a-b`; `{"gt": a}` / `{"lt": b}` become `>a` / `<b`
/// - any other object is flattened into dotted keys
pub fn render_filters(filters: &Map<String, Value>) -> ToolResult<Vec<(String, String)>> {
    let mut rendered = Vec::with_capacity(filters.len());
    for (key, value) in filters {
        render_filter(key.trim().to_string(), value, &mut rendered)?;
    }
    Ok(rendered)
}

fn render_filter(key: String, value: &Value, out: &mut Vec<(String, String)>) -> ToolResult<()> {
    if key.is_empty() || key.ends_with('.') {
        return Err(ToolError::validation("filters", "filter keys cannot be empty"));
    }

    match value {
        Value::Null => {
            return Err(ToolError::validation("filters", format!("filter '{key}' has no value")));
        }
        Value::Array(items) => {
            let parts = items.iter().map(scalar_text).collect::<Option<Vec<_>>>().ok_or_else(
                || {
                    ToolError::validation(
                        "filters",
                        format!("filter '{key}' list values must be strings, numbers or booleans"),
                    )
                },
            )?;
            if parts.is_empty() {
                return Err(ToolError::validation("filters", format!("filter '{key}' is empty")));
            }
            out.push((key, parts.join("|")));
        }
        Value::Object(map) => {
            if map.is_empty() {
                return Err(ToolError::validation("filters", format!("filter '{key}' is empty")));
            }
            if map.keys().all(|k| RANGE_KEYS.contains(&k.as_str())) {
                for bound in render_range(&key, map)? {
                    out.push((key.clone(), bound));
                }
            } else {
                for (child, nested) in map {
                    render_filter(format!("{key}.{}", child.trim()), nested, out)?;
                }
            }
        }
        scalar => {
            let text = scalar_text(scalar).unwrap_or_default();
            if text.trim().is_empty() {
                return Err(ToolError::validation("filters", format!("filter '{key}' is empty")));
            }
            out.push((key, text));
        }
    }

    Ok(())
}

fn render_range(key: &str, range: &Map<String, Value>) -> ToolResult<Vec<String>> {
    let bound = |name: &str| -> ToolResult<Option<String>> {
        range
            .get(name)
            .map(|v| {
                scalar_text(v).filter(|t| !t.is_empty()).ok_or_else(|| {
                    ToolError::validation(
                        "filters",
                        format!("filter '{key}' range bound '{name}' must be a scalar"),
                    )
                })
            })
            .transpose()
    };

    let mut values = Vec::new();
    match (bound("from")?, bound("to")?) {
        (Some(from), Some(to)) => values.push(format!("{from}-{to}")),
        (None, None) => {}
        _ => {
            return Err(ToolError::validation(
                "filters",
                format!("filter '{key}' range needs both 'from' and 'to'; use 'gt'/'lt' for open ranges"),
            ));
        }
    }
    if let Some(gt) = bound("gt")? {
        values.push(format!(">{gt}"));
    }
    if let Some(lt) = bound("lt")? {
        values.push(format!("<{lt}"));
    }

    Ok(values)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Check whether `id` is a short OpenAlex work ID such as `W2741809807`.
#[must_use]
pub fn is_openalex_work_id(id: &str) -> bool {
    OPENALEX_WORK_ID.is_match(id)
}

/// Normalize a caller-supplied work identifier for the `/works/{id}` path.
///
/// OpenAlex URLs are reduced to the short ID, bare DOIs get a `doi:` prefix,
/// and every other form (DOI URL, `pmid:`, `mag:`, PMID URL) is left for the
/// upstream to resolve.
pub fn normalize_work_id(raw: &str) -> ToolResult<String> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ToolError::validation("work_id", "cannot be empty"));
    }
    if id.contains(['?', '#']) || id.contains(char::is_whitespace) {
        return Err(ToolError::validation(
            "work_id",
            format!("'{id}' contains characters not allowed in an identifier"),
        ));
    }

    if let Ok(url) = url::Url::parse(id) {
        if matches!(url.host_str(), Some("openalex.org" | "api.openalex.org")) {
            let last = url.path_segments().and_then(|mut segments| {
                segments.rfind(|s| !s.is_empty()).map(str::to_string)
            });
            return match last {
                Some(short) => Ok(canonical_short_id(&short)),
                None => Err(ToolError::validation(
                    "work_id",
                    format!("'{id}' does not name a work"),
                )),
            };
        }
    }

    if is_openalex_work_id(id) {
        return Ok(canonical_short_id(id));
    }

    if id.starts_with("10.") {
        return Ok(format!("doi:{id}"));
    }

    Ok(id.to_string())
}

fn canonical_short_id(id: &str) -> String {
    if is_openalex_work_id(id) { id.to_ascii_uppercase() } else { id.to_string() }
}
