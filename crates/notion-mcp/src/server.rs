//! MCP ServerHandler implementation for Notion.
//!
//! Every tool maps onto one `NotionClient` operation:
//!
//! **Databases**
//! - `list_databases` — Databases shared with the integration
//! - `query_database` — Pages of a database, with filter/sort/cursor
//! - `create_database` — New database under a parent page
//! - `update_database` — Title, description or schema changes
//!
//! **Pages**
//! - `create_page` — New page in a database
//! - `update_page` — Property changes, archive/restore
//! - `get_page` — Page metadata and properties
//! - `get_page_content` — Raw child blocks of a page
//! - `get_page_markdown` — Child blocks rendered as markdown
//!
//! **Blocks**
//! - `append_page_content` — Append up to 100 blocks to a page or block
//! - `get_block` — A single block
//! - `update_block` — Replace block content, archive/restore
//!
//! **Search**
//! - `search` — Pages and databases by title

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ServerHandler};

use notion_client::NotionClient;

use crate::tools::params::*;
use crate::tools::{blocks, databases, pages, search};

/// Notion MCP server handler.
#[derive(Debug, Clone)]
pub struct NotionMcpServer {
    tool_router: ToolRouter<Self>,
    client: NotionClient,
}

impl NotionMcpServer {
    pub fn new(client: NotionClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client,
        }
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for NotionMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "notion-mcp".to_string(),
                title: Some("Notion MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "MCP server exposing Notion pages, databases and content blocks".to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Notion workspace access for pages, databases and content blocks. \
                 IDs are accepted with or without dashes.\n\
                 Discover: search (or list_databases) to find IDs, then get_page / query_database.\n\
                 Read content: get_page_markdown for a readable rendering, get_page_content for raw \
                 blocks, get_block for a single block. Pass next_cursor back as start_cursor to page.\n\
                 Write: create_page/update_page for database rows, append_page_content (max 100 \
                 blocks per call) and update_block for content, create_database/update_database \
                 for schemas.\n\
                 Errors come back as JSON with an 'error' code, the HTTP 'status' when the API \
                 answered, and 'common_causes' hints for rejected writes."
                    .to_string(),
            ),
        }
    }
}

#[tool_router(router = tool_router)]
impl NotionMcpServer {
    // ── Databases ──

    /// List every database the integration can access.
    #[tool(
        name = "list_databases",
        description = "List all Notion databases the integration has access to, most recently edited first. Returns database IDs, titles and property schemas."
    )]
    pub async fn list_databases(&self) -> String {
        databases::list_databases(&self.client).await
    }

    #[tool(
        name = "query_database",
        description = "Query pages from a Notion database with optional filter, sorts and pagination cursor. Returns the matching pages with their properties plus next_cursor/has_more."
    )]
    pub async fn query_database(
        &self,
        Parameters(params): Parameters<QueryDatabaseParams>,
    ) -> String {
        databases::query_database(&self.client, params).await
    }

    #[tool(
        name = "create_database",
        description = "Create a new database under a parent page with a custom property schema. The schema must include one title property."
    )]
    pub async fn create_database(
        &self,
        Parameters(params): Parameters<CreateDatabaseParams>,
    ) -> String {
        databases::create_database(&self.client, params).await
    }

    #[tool(
        name = "update_database",
        description = "Update an existing database's title, description or property schema. Only the supplied fields change."
    )]
    pub async fn update_database(
        &self,
        Parameters(params): Parameters<UpdateDatabaseParams>,
    ) -> String {
        databases::update_database(&self.client, params).await
    }

    // ── Pages ──

    #[tool(
        name = "create_page",
        description = "Create a new page in a Notion database with properties matching the database schema and optional content blocks."
    )]
    pub async fn create_page(&self, Parameters(params): Parameters<CreatePageParams>) -> String {
        pages::create_page(&self.client, params).await
    }

    #[tool(
        name = "update_page",
        description = "Update properties of an existing Notion page, or archive/restore it."
    )]
    pub async fn update_page(&self, Parameters(params): Parameters<UpdatePageParams>) -> String {
        pages::update_page(&self.client, params).await
    }

    #[tool(
        name = "get_page",
        description = "Retrieve a Notion page by its ID: parent, timestamps, URL and properties. Use get_page_markdown or get_page_content for the page body."
    )]
    pub async fn get_page(&self, Parameters(params): Parameters<GetPageParams>) -> String {
        pages::get_page(&self.client, params).await
    }

    #[tool(
        name = "get_page_content",
        description = "Retrieve the raw content blocks of a Notion page (one page of up to 100 blocks, with next_cursor/has_more)."
    )]
    pub async fn get_page_content(
        &self,
        Parameters(params): Parameters<PageContentParams>,
    ) -> String {
        pages::get_page_content(&self.client, params).await
    }

    #[tool(
        name = "get_page_markdown",
        description = "Retrieve the content of a Notion page rendered as markdown (headings, lists, to-dos, code, quotes), with next_cursor/has_more for long pages."
    )]
    pub async fn get_page_markdown(
        &self,
        Parameters(params): Parameters<PageContentParams>,
    ) -> String {
        pages::get_page_markdown(&self.client, params).await
    }

    // ── Blocks ──

    #[tool(
        name = "append_page_content",
        description = "Add content blocks to a Notion page or block, optionally after an existing child block. Limited to 100 blocks per request."
    )]
    pub async fn append_page_content(
        &self,
        Parameters(params): Parameters<AppendPageContentParams>,
    ) -> String {
        blocks::append_page_content(&self.client, params).await
    }

    #[tool(
        name = "get_block",
        description = "Retrieve a single Notion block by its ID."
    )]
    pub async fn get_block(&self, Parameters(params): Parameters<GetBlockParams>) -> String {
        blocks::get_block(&self.client, params).await
    }

    #[tool(
        name = "update_block",
        description = "Update the content of a specific block for its block type, or archive/restore it."
    )]
    pub async fn update_block(&self, Parameters(params): Parameters<UpdateBlockParams>) -> String {
        blocks::update_block(&self.client, params).await
    }

    // ── Search ──

    #[tool(
        name = "search",
        description = "Search Notion pages and databases by title. Optionally filter to one object type and sort by last_edited_time."
    )]
    pub async fn search(&self, Parameters(params): Parameters<SearchParams>) -> String {
        search::search(&self.client, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::{json, Map, Value};

    use notion_client::{ApiRequest, NotionError, NotionResult, NotionTransport};

    #[derive(Debug, Default)]
    struct StubTransport {
        requests: Mutex<Vec<ApiRequest>>,
        responses: Mutex<VecDeque<NotionResult<Value>>>,
    }

    #[async_trait]
    impl NotionTransport for StubTransport {
        async fn execute(&self, request: ApiRequest) -> NotionResult<Value> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(NotionError::remote(500, "no response queued")))
        }
    }

    fn server_with(responses: Vec<NotionResult<Value>>) -> (NotionMcpServer, Arc<StubTransport>) {
        let transport = Arc::new(StubTransport {
            responses: Mutex::new(responses.into()),
            ..StubTransport::default()
        });
        let client = NotionClient::with_transport(transport.clone());
        (NotionMcpServer::new(client), transport)
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn database_json(id: &str) -> Value {
        json!({
            "object": "database",
            "id": id,
            "created_time": "2024-01-01T00:00:00Z",
            "title": [{"type": "text", "text": {"content": "Tasks"}}],
            "properties": {"Name": {"id": "title", "name": "Name", "type": "title", "title": {}}}
        })
    }

    fn page_json(id: &str) -> Value {
        json!({
            "object": "page",
            "id": id,
            "created_time": "2024-03-01T12:00:00.000Z",
            "parent": {"type": "database_id", "database_id": "db1"},
            "properties": {
                "Name": {"id": "title", "type": "title",
                         "title": [{"type": "text", "text": {"content": "Launch"}}]}
            }
        })
    }

    #[test]
    fn test_server_info() {
        let (server, _) = server_with(vec![]);
        let info = server.get_info();

        assert_eq!(info.server_info.name, "notion-mcp");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        let instructions = info.instructions.unwrap();
        assert!(instructions.contains("get_page_markdown"));
        assert!(instructions.contains("append_page_content"));
    }

    #[tokio::test]
    async fn test_list_databases_wraps_results() {
        let (server, _) = server_with(vec![Ok(json!({"results": [database_json("d1")]}))]);

        let result = server.list_databases().await;
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["object"], "list");
        assert_eq!(parsed["results"][0]["id"], "d1");
        assert_eq!(parsed["has_more"], false);
    }

    #[tokio::test]
    async fn test_get_page_returns_typed_page() {
        let (server, transport) = server_with(vec![Ok(page_json("p1"))]);

        let result = server
            .get_page(Parameters(GetPageParams {
                page_id: "p-1".to_string(),
            }))
            .await;
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["id"], "p1");
        assert_eq!(parsed["parent"]["type"], "database_id");
        assert_eq!(parsed["properties"]["Name"]["type"], "title");
        assert_eq!(transport.requests.lock().unwrap()[0].path, "/pages/p1");
    }

    #[tokio::test]
    async fn test_get_page_not_found_is_error_json() {
        let (server, _) = server_with(vec![Err(NotionError::remote(404, "object_not_found"))]);

        let result = server
            .get_page(Parameters(GetPageParams {
                page_id: "missing".to_string(),
            }))
            .await;
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["error"], "remote_error");
        assert_eq!(parsed["status"], 404);
    }

    #[tokio::test]
    async fn test_query_database_decodes_pages() {
        let (server, transport) = server_with(vec![Ok(json!({
            "object": "list",
            "results": [page_json("p1"), page_json("p2")],
            "next_cursor": "n2",
            "has_more": true
        }))]);

        let result = server
            .query_database(Parameters(QueryDatabaseParams {
                database_id: "db-1".to_string(),
                filter: None,
                sorts: Some(vec![json!({"property": "Name", "direction": "ascending"})]),
                start_cursor: None,
                page_size: Some(2),
            }))
            .await;
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["results"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["next_cursor"], "n2");

        let body = transport.requests.lock().unwrap()[0].body.clone().unwrap();
        assert_eq!(body["page_size"], 2);
        assert!(body.get("filter").is_none());
    }

    #[tokio::test]
    async fn test_create_page_requires_properties() {
        let (server, transport) = server_with(vec![]);

        let result = server
            .create_page(Parameters(CreatePageParams {
                database_id: "db1".to_string(),
                properties: Map::new(),
                children: None,
            }))
            .await;
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["error"], "validation_error");
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_reports_success_line() {
        let (server, transport) = server_with(vec![Ok(json!({"object": "list", "results": []}))]);

        let result = server
            .append_page_content(Parameters(AppendPageContentParams {
                block_id: "page-1".to_string(),
                children: vec![json!({"type": "divider", "divider": {}})],
                after: Some("blk-9".to_string()),
            }))
            .await;
        assert!(result.starts_with("Successfully appended 1 blocks to page-1 after block blk-9"));
        assert!(result.contains("Response:"));

        let body = transport.requests.lock().unwrap()[0].body.clone().unwrap();
        assert_eq!(body["after"], "blk9");
    }

    #[tokio::test]
    async fn test_append_too_many_children_is_rejected() {
        let (server, transport) = server_with(vec![]);

        let result = server
            .append_page_content(Parameters(AppendPageContentParams {
                block_id: "page1".to_string(),
                children: vec![json!({"type": "divider", "divider": {}}); 101],
                after: None,
            }))
            .await;
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["error"], "validation_error");
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_block_bad_request_lists_causes() {
        let (server, _) = server_with(vec![Err(NotionError::remote(400, "validation_error"))]);

        let result = server
            .update_block(Parameters(UpdateBlockParams {
                block_id: "b1".to_string(),
                block_type: "paragraph".to_string(),
                content: object(json!({"rich_text": []})),
                archived: None,
            }))
            .await;
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["status"], 400);
        assert!(parsed["common_causes"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c.as_str().unwrap().contains("block_type")));
    }

    #[tokio::test]
    async fn test_create_database_wraps_title_and_defaults_icon() {
        let (server, transport) = server_with(vec![Ok(database_json("d9"))]);

        let result = server
            .create_database(Parameters(CreateDatabaseParams {
                parent_id: "parent-page".to_string(),
                title: "Tasks".to_string(),
                properties: object(json!({"Name": {"title": {}}})),
                icon: Some(object(json!({"type": "emoji", "emoji": ""}))),
                cover: None,
            }))
            .await;
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["id"], "d9");

        let body = transport.requests.lock().unwrap()[0].body.clone().unwrap();
        assert_eq!(body["title"], json!([{"type": "text", "text": {"content": "Tasks"}}]));
        assert_eq!(body["icon"]["emoji"], "📄");
        assert_eq!(body["parent"]["page_id"], "parentpage");
    }

    #[tokio::test]
    async fn test_update_database_empty_description_clears() {
        let (server, transport) = server_with(vec![Ok(database_json("d1"))]);

        server
            .update_database(Parameters(UpdateDatabaseParams {
                database_id: "d1".to_string(),
                title: None,
                description: Some(String::new()),
                properties: None,
            }))
            .await;

        let body = transport.requests.lock().unwrap()[0].body.clone().unwrap();
        assert_eq!(body, json!({"description": []}));
    }

    #[tokio::test]
    async fn test_get_page_markdown_counts_rendered_blocks() {
        let (server, _) = server_with(vec![Ok(json!({
            "object": "list",
            "results": [
                {"type": "heading_1", "heading_1": {"rich_text": [
                    {"type": "text", "text": {"content": "Plan"}}
                ]}},
                {"object": "block", "id": "orphan"},
                {"type": "to_do", "to_do": {"checked": true, "rich_text": [
                    {"type": "text", "text": {"content": "Ship"},
                     "annotations": {"bold": true}}
                ]}}
            ],
            "next_cursor": null,
            "has_more": false
        }))]);

        let result = server
            .get_page_markdown(Parameters(PageContentParams {
                page_id: "p-1".to_string(),
                start_cursor: None,
                page_size: None,
            }))
            .await;
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["page_id"], "p1");
        assert_eq!(parsed["block_count"], 2);
        assert_eq!(parsed["markdown"], "# Plan\n\n[x] **Ship**\n");
        assert_eq!(parsed["has_more"], false);
    }

    #[tokio::test]
    async fn test_search_drops_unknown_objects() {
        let (server, _) = server_with(vec![Ok(json!({
            "results": [{"object": "block", "id": "b"}, database_json("d1")],
            "has_more": false
        }))]);

        let result = server
            .search(Parameters(SearchParams {
                query: String::new(),
                filter: None,
                sort: None,
                start_cursor: None,
                page_size: None,
            }))
            .await;
        let parsed: Value = serde_json::from_str(&result).unwrap();
        let results = parsed["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["id"], "d1");
    }
}
