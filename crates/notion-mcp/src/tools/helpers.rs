//! Shared helper functions for MCP tool implementations.

use serde::Serialize;
use serde_json::json;
use tracing::warn;

use notion_client::NotionError;

/// Build a structured error JSON string that LLMs can parse.
pub fn error_json(error_code: &str, message: &str) -> String {
    json!({
        "error": error_code,
        "message": message,
    })
    .to_string()
}

/// Likely causes of a failed write, keyed by the HTTP status that reports them.
#[derive(Debug, Clone, Copy)]
pub struct CommonCauses {
    pub bad_request: &'static [&'static str],
    pub not_found: &'static [&'static str],
}

const NOT_FOUND: &[&str] = &[
    "The ID does not exist",
    "The object has been archived",
    "The integration has not been shared with the page or database",
];

pub const APPEND_CAUSES: CommonCauses = CommonCauses {
    bad_request: &[
        "Invalid block_id format",
        "Invalid block structure in children",
        "Block nesting too deep (max 2 levels)",
        "Invalid 'after' block ID",
    ],
    not_found: NOT_FOUND,
};

pub const UPDATE_BLOCK_CAUSES: CommonCauses = CommonCauses {
    bad_request: &[
        "Invalid block_id format",
        "Incorrect block_type",
        "Invalid content structure for the block type",
        "Removing the toggle from a heading that has children",
    ],
    not_found: NOT_FOUND,
};

pub const CREATE_DATABASE_CAUSES: CommonCauses = CommonCauses {
    bad_request: &[
        "Invalid parent_id format (32 hex characters, dashes optional)",
        "Missing title property in properties",
        "Invalid property configuration",
    ],
    not_found: NOT_FOUND,
};

/// Convert a client error into the tool error payload.
///
/// `{"error": code, "message": ..., "status"?: ..., "common_causes"?: [...]}`
pub fn tool_error(tool: &str, err: &NotionError, causes: Option<&CommonCauses>) -> String {
    warn!(tool, error = %err, "Tool call failed");

    let mut body = json!({
        "error": err.code(),
        "message": err.to_string(),
    });
    if let Some(status) = err.status() {
        body["status"] = json!(status);
    }
    let hints = causes.and_then(|c| {
        if err.is_bad_request() {
            Some(c.bad_request)
        } else if err.is_not_found() {
            Some(c.not_found)
        } else {
            None
        }
    });
    if let Some(hints) = hints {
        body["common_causes"] = json!(hints);
    }
    body.to_string()
}

/// Pretty-print a tool result, falling back to an error payload.
pub fn to_pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| error_json("serialization_error", &e.to_string()))
}
