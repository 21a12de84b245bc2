//! Input models for MCP tool parameters.
//!
//! Field names follow the tool argument names agents send (snake_case).
//! Range and emptiness checks live in `tools::params`; these types only
//! describe shape and defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{SearchField, SortDirection};
use crate::config::paging;

/// Input for `search_works`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchWorksInput {
    /// Search terms; OpenAlex boolean and proximity operators are allowed.
    pub search_query: String,

    /// Filter field to value (scalar, boolean, list, range or nested object).
    #[serde(default)]
    pub filters: Option<Map<String, Value>>,

    /// Field the query is matched against.
    #[serde(default)]
    pub search_field: SearchField,

    /// Root-level fields to return.
    #[serde(default)]
    pub select_fields: Option<Vec<String>>,

    /// Sort field and direction.
    #[serde(default)]
    pub sort: Option<SortInput>,

    /// Results per page (1-200).
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Pagination cursor; `*` or absent for the first page.
    #[serde(default)]
    pub cursor: Option<String>,

    /// Condense each work into a short summary.
    #[serde(default)]
    pub summarize_results: bool,
}

fn default_per_page() -> u32 {
    paging::DEFAULT_PER_PAGE
}

/// Sort specification.
///
/// Accepts both `{"field": "cited_by_count", "direction": "desc"}` and the
/// shorthand `{"cited_by_count": "desc"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortInput {
    /// Explicit field and direction.
    Explicit {
        /// Field to sort by.
        field: String,
        /// Sort direction.
        #[serde(default)]
        direction: SortDirection,
    },
    /// Single-entry map of field to direction.
    Keyed(BTreeMap<String, SortDirection>),
}

/// Input for `get_work_details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetWorkDetailsInput {
    /// Work identifier (OpenAlex ID or URL, DOI, PMID, MAG ID).
    pub work_id: String,

    /// Root-level fields to return.
    #[serde(default)]
    pub select_fields: Option<Vec<String>>,
}

/// Input for `get_batch_work_details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBatchWorkDetailsInput {
    /// OpenAlex work IDs (at most 50).
    pub work_ids: Vec<String>,

    /// Root-level fields to return for each work.
    #[serde(default)]
    pub select_fields: Option<Vec<String>>,
}

/// Input for tools that take only a work identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkIdInput {
    /// Work identifier (OpenAlex ID or URL, DOI, PMID, MAG ID).
    pub work_id: String,
}

/// Input for `get_citing_works`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCitingWorksInput {
    /// Identifier of the cited work.
    pub work_id: String,

    /// Root-level fields to return.
    #[serde(default)]
    pub select_fields: Option<Vec<String>>,

    /// Results per page (1-200).
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Pagination cursor; `*` or absent for the first page.
    #[serde(default)]
    pub cursor: Option<String>,

    /// Condense each work into a short summary.
    #[serde(default)]
    pub summarize_results: bool,
}
