//! Works list query builder.
//!
//! Mirrors the OpenAlex `/works` query parameters: `search`, `filter`,
//! `sort`, `select`, `per-page` and `cursor`.

use crate::config::paging;
use crate::models::SortDirection;

/// A query against the OpenAlex works list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksQuery {
    search: Option<String>,
    filters: Vec<(String, String)>,
    sort: Option<(String, SortDirection)>,
    select: Vec<String>,
    per_page: u32,
    cursor: String,
}

impl Default for WorksQuery {
    fn default() -> Self {
        Self {
            search: None,
            filters: Vec::new(),
            sort: None,
            select: Vec::new(),
            per_page: paging::DEFAULT_PER_PAGE,
            cursor: paging::FIRST_PAGE_CURSOR.to_string(),
        }
    }
}

impl WorksQuery {
    /// Create an empty query for the first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default full-text search term.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Add a filter. Filters are ANDed in insertion order.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Set the sort field and direction.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some((field.into(), direction));
        self
    }

    /// Restrict upstream responses to these root-level fields.
    #[must_use]
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the pagination cursor (passed through untouched).
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }

    /// The free-text search term, if any.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Filters as `(key, value)` pairs.
    #[must_use]
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// Selected upstream fields.
    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.select
    }

    /// Page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.per_page
    }

    /// Pagination cursor.
    #[must_use]
    pub fn page_cursor(&self) -> &str {
        &self.cursor
    }

    /// Render as query parameters for the works endpoint.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(6);

        if let Some(ref search) = self.search {
            params.push(("search".to_string(), search.clone()));
        }

        if !self.filters.is_empty() {
            let filter = self
                .filters
                .iter()
                .map(|(k, v)| format!("{k}:{v}"))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("filter".to_string(), filter));
        }

        if let Some((ref field, direction)) = self.sort {
            params.push(("sort".to_string(), format!("{field}:{}", direction.as_str())));
        }

        if !self.select.is_empty() {
            params.push(("select".to_string(), self.select.join(",")));
        }

        params.push(("per-page".to_string(), self.per_page.to_string()));
        params.push(("cursor".to_string(), self.cursor.clone()));

        params
    }
}
