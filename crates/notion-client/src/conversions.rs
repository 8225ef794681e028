//! Conversions from Notion API JSON to domain types.
//!
//! Decoding is explicit rather than `#[derive(Deserialize)]` so that a response that
//! breaks the document model is reported with the offending field path
//! (`properties.Status.type`, `results[3].created_time`) instead of a generic
//! serde message. Fields the service adds over time are ignored.
//!
//! Encoding is the `Serialize` impl of each model type; for property values
//! `decode_property_value(&serde_json::to_value(&p)?)` yields `p` again.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{NotionError, NotionResult};
use crate::models::{
    Annotations, ContentBlock, Database, DateRange, Page, Parent, PropertyKind, PropertySchema, PropertyType,
    PropertyValue, RichText, SearchResult, SearchResults, SelectOption, TextContent, TextLink,
};

type Object = Map<String, Value>;

// ============================================================================
// Field Helpers
// ============================================================================

fn as_object<'a>(value: &'a Value, field: &str) -> NotionResult<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| NotionError::decode(field, "expected a JSON object"))
}

fn required<'a>(obj: &'a Object, field: &str) -> NotionResult<&'a Value> {
    match obj.get(field) {
        Some(Value::Null) | None => Err(NotionError::decode(field, "missing required field")),
        Some(value) => Ok(value),
    }
}

fn required_str(obj: &Object, field: &str) -> NotionResult<String> {
    required(obj, field)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| NotionError::decode(field, "expected a string"))
}

fn optional_str(obj: &Object, field: &str) -> NotionResult<Option<String>> {
    match obj.get(field) {
        Some(Value::Null) | None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(NotionError::decode(field, "expected a string")),
    }
}

fn optional_bool(obj: &Object, field: &str) -> NotionResult<bool> {
    match obj.get(field) {
        Some(Value::Null) | None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(NotionError::decode(field, "expected a boolean")),
    }
}

fn parse_time(raw: &str, field: &str) -> NotionResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| NotionError::decode(field, format!("invalid timestamp '{raw}': {e}")))
}

fn required_time(obj: &Object, field: &str) -> NotionResult<DateTime<Utc>> {
    parse_time(&required_str(obj, field)?, field)
}

fn optional_time(obj: &Object, field: &str) -> NotionResult<Option<DateTime<Utc>>> {
    optional_str(obj, field)?
        .map(|raw| parse_time(&raw, field))
        .transpose()
}

/// Prefix the field path of a decode error with the enclosing field.
fn within(prefix: String) -> impl FnOnce(NotionError) -> NotionError {
    move |err| match err {
        NotionError::Decode { field, reason } => NotionError::Decode {
            field: format!("{prefix}.{field}"),
            reason,
        },
        other => other,
    }
}

fn from_payload<T: serde::de::DeserializeOwned>(payload: &Value, field: &str) -> NotionResult<T> {
    serde_json::from_value(payload.clone()).map_err(|e| NotionError::decode(field, e.to_string()))
}

// ============================================================================
// Rich Text
// ============================================================================

/// Decode one rich-text run. `type` and `text` are required.
pub fn decode_rich_text(value: &Value) -> NotionResult<RichText> {
    let obj = as_object(value, "rich_text")?;
    let kind = required_str(obj, "type")?;
    let text = as_object(required(obj, "text")?, "text")?;

    let link = match text.get("link") {
        Some(Value::Object(link)) => link
            .get("url")
            .and_then(Value::as_str)
            .map(|url| TextLink {
                url: url.to_string(),
            }),
        _ => None,
    };
    let annotations = match obj.get("annotations") {
        Some(Value::Null) | None => None,
        Some(raw) => Some(from_payload::<Annotations>(raw, "annotations")?),
    };

    Ok(RichText {
        kind,
        text: TextContent {
            content: optional_str(text, "content")
                .map_err(within("text".to_string()))?
                .unwrap_or_default(),
            link,
        },
        annotations,
        plain_text: optional_str(obj, "plain_text")?,
        href: optional_str(obj, "href")?,
    })
}

/// Decode an array of runs, reporting failures as `field[index].…`.
pub fn decode_rich_text_list(value: &Value, field: &str) -> NotionResult<Vec<RichText>> {
    let runs = value
        .as_array()
        .ok_or_else(|| NotionError::decode(field, "expected an array of rich text"))?;
    runs.iter()
        .enumerate()
        .map(|(i, run)| decode_rich_text(run).map_err(within(format!("{field}[{i}]"))))
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

/// Decode a page property value.
///
/// `id` and `type` are required and the field named by `type` must be present; a
/// value whose `type` names no payload field fails with `field = "type"`.
pub fn decode_property_value(value: &Value) -> NotionResult<PropertyValue> {
    let obj = as_object(value, "property")?;
    let id = required_str(obj, "id")?;
    let kind = required_str(obj, "type")?;

    let Some(payload) = obj.get(&kind) else {
        return Err(NotionError::decode(
            "type",
            format!("unsupported kind: '{kind}' has no matching '{kind}' field"),
        ));
    };

    let value = match PropertyType::from_wire(&kind) {
        PropertyType::Title => PropertyKind::Title(decode_rich_text_list(payload, &kind)?),
        PropertyType::RichText => PropertyKind::RichText(decode_rich_text_list(payload, &kind)?),
        PropertyType::Select => PropertyKind::Select(match payload {
            Value::Null => None,
            option => Some(from_payload::<SelectOption>(option, &kind)?),
        }),
        PropertyType::MultiSelect => PropertyKind::MultiSelect(from_payload(payload, &kind)?),
        PropertyType::Url => PropertyKind::Url(match payload {
            Value::Null => None,
            Value::String(url) => Some(url.clone()),
            _ => return Err(NotionError::decode(&kind, "expected a string or null")),
        }),
        PropertyType::Checkbox => PropertyKind::Checkbox(
            payload
                .as_bool()
                .ok_or_else(|| NotionError::decode(&kind, "expected a boolean"))?,
        ),
        PropertyType::Number => PropertyKind::Number(match payload {
            Value::Null => None,
            number => Some(
                number
                    .as_f64()
                    .ok_or_else(|| NotionError::decode(&kind, "expected a number or null"))?,
            ),
        }),
        PropertyType::Date => PropertyKind::Date(match payload {
            Value::Null => None,
            range => Some(from_payload::<DateRange>(range, &kind)?),
        }),
        PropertyType::Other(kind) => PropertyKind::Other {
            kind,
            value: payload.clone(),
        },
    };

    Ok(PropertyValue { id, value })
}

/// Decode a database column definition.
pub fn decode_property_schema(value: &Value) -> NotionResult<PropertySchema> {
    let obj = as_object(value, "property")?;
    let kind = PropertyType::from_wire(&required_str(obj, "type")?);
    let configuration = obj
        .get(kind.as_str())
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));

    Ok(PropertySchema {
        id: required_str(obj, "id")?,
        name: required_str(obj, "name")?,
        kind,
        configuration,
    })
}

fn decode_properties<T>(
    obj: &Object,
    decode: impl Fn(&Value) -> NotionResult<T>,
) -> NotionResult<BTreeMap<String, T>> {
    let properties = as_object(required(obj, "properties")?, "properties")?;
    properties
        .iter()
        .map(|(name, raw)| {
            decode(raw)
                .map(|decoded| (name.clone(), decoded))
                .map_err(within(format!("properties.{name}")))
        })
        .collect()
}

// ============================================================================
// Pages and Databases
// ============================================================================

pub fn decode_parent(value: &Value) -> NotionResult<Parent> {
    let obj = as_object(value, "parent")?;
    let kind = required_str(obj, "type").map_err(within("parent".to_string()))?;
    let parent = match kind.as_str() {
        "database_id" => Parent::DatabaseId {
            database_id: required_str(obj, "database_id")?,
        },
        "page_id" => Parent::PageId {
            page_id: required_str(obj, "page_id")?,
        },
        "block_id" => Parent::BlockId {
            block_id: required_str(obj, "block_id")?,
        },
        "workspace" => Parent::Workspace { workspace: true },
        other => {
            return Err(NotionError::decode(
                "parent.type",
                format!("unsupported parent kind: {other}"),
            ))
        }
    };
    Ok(parent)
}

/// Decode a page object.
pub fn decode_page(value: &Value) -> NotionResult<Page> {
    let obj = as_object(value, "page")?;
    Ok(Page {
        object: optional_str(obj, "object")?.unwrap_or_else(|| "page".to_string()),
        id: required_str(obj, "id")?,
        created_time: required_time(obj, "created_time")?,
        last_edited_time: optional_time(obj, "last_edited_time")?,
        url: optional_str(obj, "url")?,
        public_url: optional_str(obj, "public_url")?,
        parent: decode_parent(required(obj, "parent")?)?,
        archived: optional_bool(obj, "archived")?,
        properties: decode_properties(obj, decode_property_value)?,
    })
}

/// Decode a database object. `description` defaults to no runs.
pub fn decode_database(value: &Value) -> NotionResult<Database> {
    let obj = as_object(value, "database")?;
    let description = match obj.get("description") {
        Some(Value::Null) | None => Vec::new(),
        Some(runs) => decode_rich_text_list(runs, "description")?,
    };

    Ok(Database {
        object: optional_str(obj, "object")?.unwrap_or_else(|| "database".to_string()),
        id: required_str(obj, "id")?,
        created_time: required_time(obj, "created_time")?,
        last_edited_time: optional_time(obj, "last_edited_time")?,
        url: optional_str(obj, "url")?,
        public_url: optional_str(obj, "public_url")?,
        title: decode_rich_text_list(required(obj, "title")?, "title")?,
        description,
        properties: decode_properties(obj, decode_property_schema)?,
        archived: optional_bool(obj, "archived")?,
    })
}

// ============================================================================
// Result Lists
// ============================================================================

fn result_items(obj: &Object) -> NotionResult<&[Value]> {
    match obj.get("results") {
        Some(Value::Null) | None => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(NotionError::decode("results", "expected an array")),
    }
}

/// Decode a mixed page/database result list.
///
/// Each element is decoded by its own `object` discriminator. Elements that are
/// neither a page nor a database are dropped (and logged); the remaining order is
/// the service's order.
pub fn decode_search_results(value: &Value) -> NotionResult<SearchResults> {
    let obj = as_object(value, "response")?;
    let mut results = Vec::new();

    for (i, item) in result_items(obj)?.iter().enumerate() {
        let discriminator = item.get("object").and_then(Value::as_str);
        let decoded = match discriminator {
            Some("database") => SearchResult::Database(
                decode_database(item).map_err(within(format!("results[{i}]")))?,
            ),
            Some("page") => {
                SearchResult::Page(decode_page(item).map_err(within(format!("results[{i}]")))?)
            }
            other => {
                warn!(
                    index = i,
                    object = other.unwrap_or("<missing>"),
                    "Dropping search result with unrecognized object type"
                );
                continue;
            }
        };
        results.push(decoded);
    }

    Ok(SearchResults {
        object: "list".to_string(),
        results,
        next_cursor: optional_str(obj, "next_cursor")?,
        has_more: optional_bool(obj, "has_more")?,
    })
}

/// Decode a result list that must contain only databases.
pub fn decode_database_list(value: &Value) -> NotionResult<Vec<Database>> {
    let obj = as_object(value, "response")?;
    result_items(obj)?
        .iter()
        .enumerate()
        .map(|(i, item)| decode_database(item).map_err(within(format!("results[{i}]"))))
        .collect()
}

/// Blocks of a block-children response, in order.
///
/// Elements without a `type` discriminator are skipped, so the result holds exactly
/// the blocks a renderer can handle.
pub fn decode_block_list(value: &Value) -> NotionResult<Vec<ContentBlock>> {
    let obj = as_object(value, "response")?;
    Ok(result_items(obj)?
        .iter()
        .filter_map(|item| ContentBlock::from_value(item.clone()).ok())
        .collect())
}
