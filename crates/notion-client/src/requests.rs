//! Request shaping: one argument struct per operation, validated and turned into an
//! [`ApiRequest`] before anything touches the network.
//!
//! Optional arguments follow one rule: an absent or empty filter, sort, cursor or
//! child list is left out of the body entirely. The exception is
//! [`DatabaseUpdate`], where a supplied field is always sent, even when empty,
//! because an empty title or description is how a caller clears it.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::{NotionError, NotionResult};
use crate::identifier::{normalize_id, NotionId};
use crate::models::RichText;
use crate::transport::ApiRequest;

pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const MAX_PAGE_SIZE: u32 = 100;
/// Children accepted by a single append call.
pub const MAX_APPEND_CHILDREN: usize = 100;
/// Glyph used when an emoji icon is requested without one.
pub const DEFAULT_ICON_EMOJI: &str = "📄";

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`, defaulting to the maximum.
pub fn clamp_page_size(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

/// `None` for JSON that carries nothing: null, `{}`, `[]` or `""`.
fn non_empty(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

fn non_empty_str(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn require_object<'a>(value: &'a Value, what: &str) -> NotionResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| NotionError::validation(format!("{what} must be a JSON object")))
}

// ============================================================================
// Databases
// ============================================================================

/// Body of the `list_databases` search.
pub fn list_databases_request() -> ApiRequest {
    ApiRequest::post(
        "/search",
        json!({
            "filter": {"property": "object", "value": "database"},
            "page_size": MAX_PAGE_SIZE,
            "sort": {"direction": "descending", "timestamp": "last_edited_time"}
        }),
    )
}

#[derive(Debug, Clone, Default)]
pub struct DatabaseQuery {
    pub database_id: String,
    pub filter: Option<Value>,
    pub sorts: Option<Value>,
    pub start_cursor: Option<String>,
    pub page_size: Option<u32>,
}

#[derive(Serialize)]
struct DatabaseQueryBody<'a> {
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sorts: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

impl DatabaseQuery {
    pub fn to_request(&self) -> NotionResult<ApiRequest> {
        let id = NotionId::parse(&self.database_id, "database_id")?;
        let body = DatabaseQueryBody {
            page_size: clamp_page_size(self.page_size),
            filter: non_empty(self.filter.as_ref()),
            sorts: non_empty(self.sorts.as_ref()),
            start_cursor: non_empty_str(self.start_cursor.as_deref()),
        };
        Ok(ApiRequest::post(
            format!("/databases/{id}/query"),
            serde_json::to_value(body)?,
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewDatabase {
    pub parent_page_id: String,
    pub title: Vec<RichText>,
    /// Column definitions keyed by column name.
    pub properties: Value,
    pub icon: Option<Value>,
    pub cover: Option<Value>,
}

#[derive(Serialize)]
struct NewDatabaseBody<'a> {
    parent: Value,
    title: &'a [RichText],
    properties: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cover: Option<&'a Value>,
}

impl NewDatabase {
    pub fn to_request(&self) -> NotionResult<ApiRequest> {
        let parent = NotionId::parse(&self.parent_page_id, "parent_page_id")?;
        if self.title.is_empty() {
            return Err(NotionError::validation("title is required"));
        }
        if require_object(&self.properties, "properties")?.is_empty() {
            return Err(NotionError::validation(
                "properties must define at least one column",
            ));
        }

        let body = NewDatabaseBody {
            parent: json!({"type": "page_id", "page_id": parent}),
            title: &self.title,
            properties: &self.properties,
            icon: non_empty(self.icon.as_ref()).map(with_default_emoji),
            cover: non_empty(self.cover.as_ref()),
        };
        Ok(ApiRequest::post("/databases", serde_json::to_value(body)?))
    }
}

/// Fill in [`DEFAULT_ICON_EMOJI`] for an emoji icon with a missing or empty glyph.
fn with_default_emoji(icon: &Value) -> Value {
    let mut icon = icon.clone();
    let is_emoji = icon.get("type").and_then(Value::as_str) == Some("emoji");
    let has_glyph = icon
        .get("emoji")
        .and_then(Value::as_str)
        .is_some_and(|glyph| !glyph.is_empty());
    if is_emoji && !has_glyph {
        if let Some(fields) = icon.as_object_mut() {
            fields.insert("emoji".to_string(), Value::from(DEFAULT_ICON_EMOJI));
        }
    }
    icon
}

/// Partial database update. `None` fields are not sent; `Some(vec![])` clears.
#[derive(Debug, Clone, Default)]
pub struct DatabaseUpdate {
    pub database_id: String,
    pub title: Option<Vec<RichText>>,
    pub description: Option<Vec<RichText>>,
    pub properties: Option<Value>,
}

#[derive(Serialize)]
struct DatabaseUpdateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a [RichText]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a [RichText]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a Value>,
}

impl DatabaseUpdate {
    pub fn to_request(&self) -> NotionResult<ApiRequest> {
        let id = NotionId::parse(&self.database_id, "database_id")?;
        let body = DatabaseUpdateBody {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            properties: self.properties.as_ref(),
        };
        Ok(ApiRequest::patch(
            format!("/databases/{id}"),
            serde_json::to_value(body)?,
        ))
    }
}

// ============================================================================
// Pages
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct NewPage {
    pub database_id: String,
    pub properties: Value,
    pub children: Option<Vec<Value>>,
}

#[derive(Serialize)]
struct NewPageBody<'a> {
    parent: Value,
    properties: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<&'a [Value]>,
}

impl NewPage {
    pub fn to_request(&self) -> NotionResult<ApiRequest> {
        let database_id = NotionId::parse(&self.database_id, "database_id")?;
        if require_object(&self.properties, "properties")?.is_empty() {
            return Err(NotionError::validation("properties must not be empty"));
        }
        let body = NewPageBody {
            parent: json!({"database_id": database_id}),
            properties: &self.properties,
            children: self.children.as_deref().filter(|c| !c.is_empty()),
        };
        Ok(ApiRequest::post("/pages", serde_json::to_value(body)?))
    }
}

/// Property changes for a page. An empty property object is allowed so that a
/// caller can archive or restore without touching properties.
#[derive(Debug, Clone, Default)]
pub struct PageUpdate {
    pub page_id: String,
    pub properties: Value,
    pub archived: Option<bool>,
}

#[derive(Serialize)]
struct PageUpdateBody<'a> {
    properties: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    archived: Option<bool>,
}

impl PageUpdate {
    pub fn to_request(&self) -> NotionResult<ApiRequest> {
        let id = NotionId::parse(&self.page_id, "page_id")?;
        require_object(&self.properties, "properties")?;
        let body = PageUpdateBody {
            properties: &self.properties,
            archived: self.archived,
        };
        Ok(ApiRequest::patch(
            format!("/pages/{id}"),
            serde_json::to_value(body)?,
        ))
    }
}

// ============================================================================
// Blocks
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct BlockChildrenQuery {
    pub block_id: String,
    pub start_cursor: Option<String>,
    pub page_size: Option<u32>,
}

impl BlockChildrenQuery {
    pub fn to_request(&self) -> NotionResult<ApiRequest> {
        let id = NotionId::parse(&self.block_id, "block_id")?;
        let mut request = ApiRequest::get(format!("/blocks/{id}/children"))
            .with_query("page_size", clamp_page_size(self.page_size));
        if let Some(cursor) = non_empty_str(self.start_cursor.as_deref()) {
            request = request.with_query("start_cursor", cursor);
        }
        Ok(request)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlockAppend {
    pub block_id: String,
    pub children: Vec<Value>,
    /// Existing sibling to insert after; appended at the end when absent.
    pub after: Option<String>,
}

#[derive(Serialize)]
struct BlockAppendBody<'a> {
    children: &'a [Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<String>,
}

impl BlockAppend {
    pub fn to_request(&self) -> NotionResult<ApiRequest> {
        let id = NotionId::parse(&self.block_id, "block_id")?;
        if self.children.is_empty() {
            return Err(NotionError::validation("children must not be empty"));
        }
        if self.children.len() > MAX_APPEND_CHILDREN {
            return Err(NotionError::validation(format!(
                "at most {MAX_APPEND_CHILDREN} children can be appended at once, got {}",
                self.children.len()
            )));
        }
        let body = BlockAppendBody {
            children: &self.children,
            after: self
                .after
                .as_deref()
                .map(normalize_id)
                .filter(|after| !after.is_empty()),
        };
        Ok(ApiRequest::patch(
            format!("/blocks/{id}/children"),
            serde_json::to_value(body)?,
        ))
    }
}

/// Replace a block's type-specific payload and/or change its archived flag.
#[derive(Debug, Clone, Default)]
pub struct BlockUpdate {
    pub block_id: String,
    /// Block type key, e.g. `paragraph` or `to_do`.
    pub block_type: String,
    pub content: Value,
    pub archived: Option<bool>,
}

impl BlockUpdate {
    pub fn to_request(&self) -> NotionResult<ApiRequest> {
        let id = NotionId::parse(&self.block_id, "block_id")?;
        let block_type = self.block_type.trim();
        if block_type.is_empty() {
            return Err(NotionError::validation("block_type is required"));
        }
        // shares the body with the archived flag
        if block_type == "archived" {
            return Err(NotionError::validation("block_type 'archived' is not a block type"));
        }
        require_object(&self.content, "content")?;

        let mut body = Map::new();
        body.insert(block_type.to_string(), self.content.clone());
        if let Some(archived) = self.archived {
            body.insert("archived".to_string(), Value::Bool(archived));
        }
        Ok(ApiRequest::patch(
            format!("/blocks/{id}"),
            Value::Object(body),
        ))
    }
}

// ============================================================================
// Search
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub query: String,
    pub filter: Option<Value>,
    pub sort: Option<Value>,
    pub start_cursor: Option<String>,
    pub page_size: Option<u32>,
}

#[derive(Serialize)]
struct SearchBody<'a> {
    query: &'a str,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

impl SearchQuery {
    pub fn to_request(&self) -> NotionResult<ApiRequest> {
        let body = SearchBody {
            query: &self.query,
            page_size: clamp_page_size(self.page_size),
            filter: non_empty(self.filter.as_ref()),
            sort: non_empty(self.sort.as_ref()),
            start_cursor: non_empty_str(self.start_cursor.as_deref()),
        };
        Ok(ApiRequest::post("/search", serde_json::to_value(body)?))
    }
}
