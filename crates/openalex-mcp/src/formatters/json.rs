//! JSON shaping of work records for tool output.

use serde_json::{Map, Value, json};

use crate::config::fields;
use crate::models::{WorkRecord, reconstruct_abstract};

/// Maximum author names kept in a summary.
const SUMMARY_MAX_AUTHORS: usize = 6;

/// Shape a work for output, restricted to `select` when it is non-empty.
///
/// With a selection, the result has exactly the selected keys; keys the
/// record lacks are `null`. `abstract` is always the plaintext rebuilt from
/// the inverted index, and the raw index is never emitted.
#[must_use]
pub fn shape_work(mut record: WorkRecord, select: &[String]) -> Value {
    let plain_abstract = record
        .remove(fields::ABSTRACT_INVERTED_INDEX)
        .and_then(|index| reconstruct_abstract(&index));

    if select.is_empty() {
        record.insert(fields::ABSTRACT.to_string(), json!(plain_abstract));
        return Value::Object(record);
    }

    let mut shaped = Map::with_capacity(select.len());
    for field in select {
        let value = if field == fields::ABSTRACT {
            json!(plain_abstract)
        } else {
            record.remove(field).unwrap_or(Value::Null)
        };
        shaped.insert(field.clone(), value);
    }

    Value::Object(shaped)
}

/// Condense a full work into a compact summary.
///
/// Summary keys are id, doi, title, publication_year, authors (display names,
/// first six), cited_by_count, venue, oa_url and abstract. A non-empty
/// `select` keeps only the summary keys it names. Null values are dropped.
#[must_use]
pub fn summarize_work(record: &WorkRecord, select: &[String]) -> Value {
    let authors: Vec<&str> = record
        .get("authorships")
        .and_then(Value::as_array)
        .map(|authorships| {
            authorships
                .iter()
                .filter_map(|a| a.pointer("/author/display_name").and_then(Value::as_str))
                .take(SUMMARY_MAX_AUTHORS)
                .collect()
        })
        .unwrap_or_default();

    let venue = record
        .get("primary_location")
        .and_then(|loc| loc.pointer("/source/display_name"))
        .cloned()
        .unwrap_or(Value::Null);

    let oa_url = record
        .get("best_oa_location")
        .and_then(|loc| loc.get("pdf_url"))
        .filter(|url| !url.is_null())
        .or_else(|| record.get("open_access").and_then(|oa| oa.get("oa_url")))
        .cloned()
        .unwrap_or(Value::Null);

    let abstract_text = record
        .get(fields::ABSTRACT_INVERTED_INDEX)
        .and_then(reconstruct_abstract)
        .map_or(Value::Null, Value::String);

    let get = |key: &str| record.get(key).cloned().unwrap_or(Value::Null);

    let candidates = [
        ("id", get("id")),
        ("doi", get("doi")),
        ("title", get("title")),
        ("publication_year", get("publication_year")),
        ("authors", if authors.is_empty() { Value::Null } else { json!(authors) }),
        ("cited_by_count", get("cited_by_count")),
        ("venue", venue),
        ("oa_url", oa_url),
        ("abstract", abstract_text),
    ];

    let summary: Map<String, Value> = candidates
        .into_iter()
        .filter(|(key, _)| select.is_empty() || select.iter().any(|s| s == key))
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.to_string(), value))
        .collect();

    Value::Object(summary)
}
