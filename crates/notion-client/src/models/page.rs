//! Pages.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::property::{PropertyKind, PropertyValue};
use super::rich_text::plain_text_of;

/// Where a page or database lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    DatabaseId { database_id: String },
    PageId { page_id: String },
    BlockId { block_id: String },
    Workspace { workspace: bool },
}

/// A Notion page. Pages are never cached; every read goes to the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub object: String,
    pub id: String,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub public_url: Option<String>,
    pub parent: Parent,
    pub archived: bool,
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Page {
    /// Plain text of the page's title property, if it has one.
    pub fn title(&self) -> Option<String> {
        self.properties.values().find_map(|p| match &p.value {
            PropertyKind::Title(runs) => Some(plain_text_of(runs)),
            _ => None,
        })
    }
}
