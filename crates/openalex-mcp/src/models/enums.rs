//! Enumeration types for tool parameters.

use serde::{Deserialize, Serialize};

/// Which part of a work a search query is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Title only (`display_name` is accepted as an alias).
    #[serde(alias = "display_name")]
    Title,
    /// Abstract only.
    Abstract,
    /// Full text, where OpenAlex has it.
    Fulltext,
    /// Title and abstract together.
    TitleAndAbstract,
    /// OpenAlex default search (title, abstract and full text).
    #[default]
    Default,
}

impl SearchField {
    /// Filter key for field-restricted search, `None` for the default search.
    #[must_use]
    pub const fn filter_key(self) -> Option<&'static str> {
        match self {
            Self::Title => Some("title.search"),
            Self::Abstract => Some("abstract.search"),
            Self::Fulltext => Some("fulltext.search"),
            Self::TitleAndAbstract => Some("title_and_abstract.search"),
            Self::Default => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Wire form used in the `sort` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}
