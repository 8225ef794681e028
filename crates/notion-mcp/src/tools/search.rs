//! Workspace search tool implementation.

use serde_json::Value;

use notion_client::{NotionClient, SearchQuery};

use super::helpers::{tool_error, to_pretty};
use super::params::SearchParams;

pub async fn search(client: &NotionClient, params: SearchParams) -> String {
    let query = SearchQuery {
        query: params.query,
        filter: params.filter.map(Value::Object),
        sort: params.sort.map(Value::Object),
        start_cursor: params.start_cursor,
        page_size: params.page_size,
    };
    match client.search(&query).await {
        Ok(results) => to_pretty(&results),
        Err(e) => tool_error("search", &e, None),
    }
}
