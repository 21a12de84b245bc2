//! Work records and list pages as returned by the OpenAlex works API.
//!
//! Works are kept as untyped JSON maps: the adapter only ever selects
//! root-level keys and never needs the full schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single work as a root-level key/value record.
pub type WorkRecord = Map<String, Value>;

/// Prefix of canonical OpenAlex entity URLs.
pub const OPENALEX_URL_PREFIX: &str = "https://openalex.org/";

/// One page of a works list query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorksPage {
    /// Pagination metadata.
    #[serde(default)]
    pub meta: PageMeta,

    /// Works on this page.
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Pagination metadata relayed to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of matching works.
    #[serde(default)]
    pub count: Option<u64>,

    /// Page size used upstream.
    #[serde(default)]
    pub per_page: Option<u32>,

    /// Cursor for the next page; absent on the last page.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Rebuild plaintext from an OpenAlex abstract inverted index.
///
/// The index maps each word to the positions it occupies. Words are placed
/// by position and joined with single spaces. Returns `None` when the index
/// is missing, null, or holds no positions.
#[must_use]
pub fn reconstruct_abstract(index: &Value) -> Option<String> {
    let index = index.as_object()?;

    let mut positioned: Vec<(u64, &str)> = index
        .iter()
        .filter_map(|(word, positions)| positions.as_array().map(|p| (word, p)))
        .flat_map(|(word, positions)| {
            positions.iter().filter_map(Value::as_u64).map(move |pos| (pos, word.as_str()))
        })
        .collect();

    if positioned.is_empty() {
        return None;
    }

    positioned.sort_by_key(|(pos, _)| *pos);
    Some(positioned.into_iter().map(|(_, word)| word).collect::<Vec<_>>().join(" "))
}

/// Short OpenAlex ID (`W123`) from a canonical URL or an already short ID.
#[must_use]
pub fn short_openalex_id(id: &str) -> &str {
    id.strip_prefix(OPENALEX_URL_PREFIX).unwrap_or(id)
}

/// The `id` of a work record in short form, if present.
#[must_use]
pub fn work_short_id(record: &WorkRecord) -> Option<&str> {
    record.get("id").and_then(Value::as_str).map(short_openalex_id)
}
