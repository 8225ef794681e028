//! Page tool implementations.

use serde_json::Value;

use notion_client::conversions::decode_block_list;
use notion_client::{normalize_id, render_blocks, NewPage, NotionClient, PageUpdate};

use super::helpers::{tool_error, to_pretty};
use super::params::{
    CreatePageParams, GetPageParams, PageContentParams, PageMarkdownResponse, UpdatePageParams,
};

pub async fn create_page(client: &NotionClient, params: CreatePageParams) -> String {
    let page = NewPage {
        database_id: params.database_id,
        properties: Value::Object(params.properties),
        children: params.children,
    };
    match client.create_page(&page).await {
        Ok(created) => to_pretty(&created),
        Err(e) => tool_error("create_page", &e, None),
    }
}

pub async fn update_page(client: &NotionClient, params: UpdatePageParams) -> String {
    let update = PageUpdate {
        page_id: params.page_id,
        properties: Value::Object(params.properties),
        archived: params.archived,
    };
    match client.update_page(&update).await {
        Ok(updated) => to_pretty(&updated),
        Err(e) => tool_error("update_page", &e, None),
    }
}

pub async fn get_page(client: &NotionClient, params: GetPageParams) -> String {
    match client.get_page(&params.page_id).await {
        Ok(page) => to_pretty(&page),
        Err(e) => tool_error("get_page", &e, None),
    }
}

/// Raw child blocks of a page, one cursor page at a time.
pub async fn get_page_content(client: &NotionClient, params: PageContentParams) -> String {
    match client
        .list_block_children(
            &params.page_id,
            params.start_cursor.as_deref(),
            params.page_size,
        )
        .await
    {
        Ok(children) => to_pretty(&children),
        Err(e) => tool_error("get_page_content", &e, None),
    }
}

/// Child blocks of a page rendered as markdown, with the cursor for the next page.
pub async fn get_page_markdown(client: &NotionClient, params: PageContentParams) -> String {
    let children = match client
        .list_block_children(
            &params.page_id,
            params.start_cursor.as_deref(),
            params.page_size,
        )
        .await
    {
        Ok(children) => children,
        Err(e) => return tool_error("get_page_markdown", &e, None),
    };

    let blocks = match decode_block_list(&children) {
        Ok(blocks) => blocks,
        Err(e) => return tool_error("get_page_markdown", &e, None),
    };

    let response = PageMarkdownResponse {
        page_id: normalize_id(&params.page_id),
        block_count: blocks.len(),
        markdown: render_blocks(&blocks),
        next_cursor: children
            .get("next_cursor")
            .and_then(Value::as_str)
            .map(str::to_string),
        has_more: children
            .get("has_more")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    };
    to_pretty(&response)
}
