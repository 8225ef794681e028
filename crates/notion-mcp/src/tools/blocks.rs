//! Block tool implementations.
//!
//! Writes answer with a one-line summary followed by the raw response so the caller
//! can pick up the ids of newly created blocks.

use serde_json::Value;

use notion_client::{BlockAppend, BlockUpdate, NotionClient};

use super::helpers::{tool_error, to_pretty, APPEND_CAUSES, UPDATE_BLOCK_CAUSES};
use super::params::{AppendPageContentParams, GetBlockParams, UpdateBlockParams};

pub async fn append_page_content(client: &NotionClient, params: AppendPageContentParams) -> String {
    let count = params.children.len();
    let append = BlockAppend {
        block_id: params.block_id,
        children: params.children,
        after: params.after,
    };
    match client.append_block_children(&append).await {
        Ok(response) => {
            let after = append
                .after
                .as_deref()
                .map(|after| format!(" after block {after}"))
                .unwrap_or_default();
            format!(
                "Successfully appended {count} blocks to {}{after}\n\nResponse:\n{}",
                append.block_id,
                to_pretty(&response)
            )
        }
        Err(e) => tool_error("append_page_content", &e, Some(&APPEND_CAUSES)),
    }
}

pub async fn get_block(client: &NotionClient, params: GetBlockParams) -> String {
    match client.get_block(&params.block_id).await {
        Ok(block) => to_pretty(&block),
        Err(e) => tool_error("get_block", &e, None),
    }
}

pub async fn update_block(client: &NotionClient, params: UpdateBlockParams) -> String {
    let update = BlockUpdate {
        block_id: params.block_id,
        block_type: params.block_type,
        content: Value::Object(params.content),
        archived: params.archived,
    };
    match client.update_block(&update).await {
        Ok(response) => format!(
            "Successfully updated block {}\n\nResponse:\n{}",
            update.block_id,
            to_pretty(&response)
        ),
        Err(e) => tool_error("update_block", &e, Some(&UPDATE_BLOCK_CAUSES)),
    }
}
