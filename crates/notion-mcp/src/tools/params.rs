//! Parameter and response structs for all MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── query_database ──

/// Parameters for the `query_database` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryDatabaseParams {
    #[schemars(description = "ID of the database to query (with or without dashes)")]
    pub database_id: String,
    #[schemars(description = "Optional filter criteria in Notion API filter format. \
        Example: {\"property\": \"Done\", \"checkbox\": {\"equals\": true}}")]
    pub filter: Option<Map<String, Value>>,
    #[schemars(description = "Optional sort criteria. \
        Example: [{\"property\": \"Name\", \"direction\": \"ascending\"}]")]
    pub sorts: Option<Vec<Value>>,
    #[schemars(description = "Cursor from a previous response's next_cursor")]
    pub start_cursor: Option<String>,
    #[schemars(description = "Number of results to return (1-100, default 100)")]
    pub page_size: Option<u32>,
}

// ── create_database ──

/// Parameters for the `create_database` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateDatabaseParams {
    #[schemars(description = "ID of the parent page where the database will be created (with or without dashes)")]
    pub parent_id: String,
    #[schemars(description = "Title of the database")]
    pub title: String,
    #[schemars(description = "Schema definition for database properties. Must include one title property. Examples:\n\
        - Title: {\"Name\": {\"title\": {}}}\n\
        - Text: {\"Description\": {\"rich_text\": {}}}\n\
        - Select: {\"Status\": {\"select\": {\"options\": [{\"name\": \"To Do\", \"color\": \"blue\"}]}}}\n\
        - Number: {\"Price\": {\"number\": {\"format\": \"dollar\"}}}\n\
        - Checkbox: {\"Complete\": {\"checkbox\": {}}}\n\
        - Date: {\"Deadline\": {\"date\": {}}}")]
    pub properties: Map<String, Value>,
    #[schemars(description = "Optional icon. Example: {\"type\": \"emoji\", \"emoji\": \"📊\"}. \
        An emoji icon without a glyph gets 📄")]
    pub icon: Option<Map<String, Value>>,
    #[schemars(description = "Optional cover image. \
        Example: {\"type\": \"external\", \"external\": {\"url\": \"https://example.com/image.jpg\"}}")]
    pub cover: Option<Map<String, Value>>,
}

// ── update_database ──

/// Parameters for the `update_database` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateDatabaseParams {
    #[schemars(description = "ID of the database to update (with or without dashes)")]
    pub database_id: String,
    #[schemars(description = "New title (optional; an empty string clears it)")]
    pub title: Option<String>,
    #[schemars(description = "New description (optional; an empty string clears it)")]
    pub description: Option<String>,
    #[schemars(description = "Schema changes. Set a property to null to remove it. Examples:\n\
        - Add: {\"New Property\": {\"rich_text\": {}}}\n\
        - Remove: {\"Old Property\": null}")]
    pub properties: Option<Map<String, Value>>,
}

// ── create_page ──

/// Parameters for the `create_page` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreatePageParams {
    #[schemars(description = "ID of the database to create the page in (with or without dashes)")]
    pub database_id: String,
    #[schemars(description = "Page properties matching the database schema. \
        Example: {\"Name\": {\"title\": [{\"text\": {\"content\": \"New page title\"}}]}}")]
    pub properties: Map<String, Value>,
    #[schemars(description = "Optional page content blocks in Notion block format")]
    pub children: Option<Vec<Value>>,
}

// ── update_page ──

/// Parameters for the `update_page` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdatePageParams {
    #[schemars(description = "ID of the page to update (with or without dashes)")]
    pub page_id: String,
    #[schemars(description = "Updated page properties matching the database schema. \
        May be empty when only archiving or restoring")]
    pub properties: Map<String, Value>,
    #[schemars(description = "Archive the page (true) or restore it (false)")]
    pub archived: Option<bool>,
}

// ── get_page ──

/// Parameters for the `get_page` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetPageParams {
    #[schemars(description = "ID of the page to retrieve (with or without dashes)")]
    pub page_id: String,
}

// ── get_page_content / get_page_markdown ──

/// Parameters for the `get_page_content` and `get_page_markdown` tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PageContentParams {
    #[schemars(description = "ID of the page to read content from (with or without dashes)")]
    pub page_id: String,
    #[schemars(description = "Cursor from a previous response's next_cursor")]
    pub start_cursor: Option<String>,
    #[schemars(description = "Number of blocks to return (1-100, default 100)")]
    pub page_size: Option<u32>,
}

/// Response for the `get_page_markdown` tool.
#[derive(Debug, Serialize)]
pub struct PageMarkdownResponse {
    pub page_id: String,
    pub block_count: usize,
    pub markdown: String,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

// ── append_page_content ──

/// Parameters for the `append_page_content` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AppendPageContentParams {
    #[schemars(description = "ID of the page or block to add content to (with or without dashes)")]
    pub block_id: String,
    #[schemars(description = "Block objects to add, at most 100. Example: [{\"type\": \"paragraph\", \
        \"paragraph\": {\"rich_text\": [{\"type\": \"text\", \"text\": {\"content\": \"Hello world\"}}]}}]")]
    pub children: Vec<Value>,
    #[schemars(description = "Optional ID of an existing block to insert after; content goes to the end otherwise")]
    pub after: Option<String>,
}

// ── get_block ──

/// Parameters for the `get_block` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetBlockParams {
    #[schemars(description = "ID of the block to retrieve (with or without dashes)")]
    pub block_id: String,
}

// ── update_block ──

/// Parameters for the `update_block` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateBlockParams {
    #[schemars(description = "ID of the block to update (with or without dashes)")]
    pub block_id: String,
    #[schemars(description = "Type of the block (paragraph, heading_1, to_do, ...)")]
    pub block_type: String,
    #[schemars(description = "Content for the block type. Examples:\n\
        - Paragraph: {\"rich_text\": [{\"text\": {\"content\": \"Updated text\"}}]}\n\
        - To-do: {\"rich_text\": [{\"text\": {\"content\": \"Task\"}}], \"checked\": true}")]
    pub content: Map<String, Value>,
    #[schemars(description = "Archive (true) or restore (false) the block")]
    pub archived: Option<bool>,
}

// ── search ──

/// Parameters for the `search` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[serde(default)]
    #[schemars(description = "Text to find in page and database titles; empty matches everything")]
    pub query: String,
    #[schemars(description = "Limit results to one object type. \
        Example: {\"property\": \"object\", \"value\": \"page\"}")]
    pub filter: Option<Map<String, Value>>,
    #[schemars(description = "Sort criteria. \
        Example: {\"direction\": \"ascending\", \"timestamp\": \"last_edited_time\"}")]
    pub sort: Option<Map<String, Value>>,
    #[schemars(description = "Cursor from a previous response's next_cursor")]
    pub start_cursor: Option<String>,
    #[schemars(description = "Number of results to return (1-100, default 100)")]
    pub page_size: Option<u32>,
}
