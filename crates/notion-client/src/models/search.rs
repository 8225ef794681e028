//! Search and query result lists.

use serde::Serialize;

use super::database::Database;
use super::page::Page;

/// One element of a result list; each element carries its own `object` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Database(Database),
    Page(Page),
}

/// A single page of results with its pagination cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub object: String,
    pub results: Vec<SearchResult>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl SearchResults {
    /// A complete (non-paginated) list, as produced by `list_databases`.
    pub fn complete(results: Vec<SearchResult>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: None,
            has_more: false,
        }
    }
}
