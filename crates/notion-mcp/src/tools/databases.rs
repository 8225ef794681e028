//! Database tool implementations.
//!
//! Async functions that take the shared `NotionClient` and param structs, returning
//! JSON strings. Errors never escape: every failure becomes an error payload.

use serde_json::Value;

use notion_client::conversions::decode_search_results;
use notion_client::{
    DatabaseQuery, DatabaseUpdate, NewDatabase, NotionClient, RichText, SearchResult,
    SearchResults,
};

use super::helpers::{tool_error, to_pretty, CREATE_DATABASE_CAUSES};
use super::params::{CreateDatabaseParams, QueryDatabaseParams, UpdateDatabaseParams};

pub async fn list_databases(client: &NotionClient) -> String {
    match client.list_databases().await {
        Ok(databases) => to_pretty(&SearchResults::complete(
            databases.into_iter().map(SearchResult::Database).collect(),
        )),
        Err(e) => tool_error("list_databases", &e, None),
    }
}

pub async fn query_database(client: &NotionClient, params: QueryDatabaseParams) -> String {
    let query = DatabaseQuery {
        database_id: params.database_id,
        filter: params.filter.map(Value::Object),
        sorts: params.sorts.map(Value::Array),
        start_cursor: params.start_cursor,
        page_size: params.page_size,
    };
    let raw = match client.query_database(&query).await {
        Ok(raw) => raw,
        Err(e) => return tool_error("query_database", &e, None),
    };
    match decode_search_results(&raw) {
        Ok(results) => to_pretty(&results),
        Err(e) => tool_error("query_database", &e, None),
    }
}

pub async fn create_database(client: &NotionClient, params: CreateDatabaseParams) -> String {
    let title = if params.title.trim().is_empty() {
        Vec::new()
    } else {
        vec![RichText::plain(params.title)]
    };
    let database = NewDatabase {
        parent_page_id: params.parent_id,
        title,
        properties: Value::Object(params.properties),
        icon: params.icon.map(Value::Object),
        cover: params.cover.map(Value::Object),
    };
    match client.create_database(&database).await {
        Ok(created) => to_pretty(&created),
        Err(e) => tool_error("create_database", &e, Some(&CREATE_DATABASE_CAUSES)),
    }
}

/// A supplied title or description replaces the current one; an empty string clears it.
pub async fn update_database(client: &NotionClient, params: UpdateDatabaseParams) -> String {
    let update = DatabaseUpdate {
        database_id: params.database_id,
        title: params.title.map(text_runs),
        description: params.description.map(text_runs),
        properties: params.properties.map(Value::Object),
    };
    match client.update_database(&update).await {
        Ok(updated) => to_pretty(&updated),
        Err(e) => tool_error("update_database", &e, None),
    }
}

fn text_runs(text: String) -> Vec<RichText> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![RichText::plain(text)]
    }
}
