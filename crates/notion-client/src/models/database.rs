//! Databases (collections of pages sharing a property schema).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::property::PropertySchema;
use super::rich_text::{plain_text_of, RichText};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Database {
    pub object: String,
    pub id: String,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub public_url: Option<String>,
    pub title: Vec<RichText>,
    pub description: Vec<RichText>,
    pub properties: BTreeMap<String, PropertySchema>,
    pub archived: bool,
}

impl Database {
    pub fn title_text(&self) -> String {
        plain_text_of(&self.title)
    }
}
