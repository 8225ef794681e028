//! Page property values and database property schemas.
//!
//! Both are keyed by a kind discriminator. On the wire a value looks like
//! `{"id": "a%3Fb", "type": "checkbox", "checkbox": true}`: the field named by
//! `type` carries the payload. The Rust side models that as a sum type so a
//! value can never carry a payload that disagrees with its kind.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::rich_text::RichText;

/// Property kind discriminator shared by values and schemas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Title,
    RichText,
    Select,
    MultiSelect,
    Url,
    Checkbox,
    Number,
    Date,
    /// Any kind outside the modeled set (status, people, formula, relation, ...).
    Other(String),
}

impl PropertyType {
    pub fn from_wire(kind: &str) -> Self {
        match kind {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "select" => Self::Select,
            "multi_select" => Self::MultiSelect,
            "url" => Self::Url,
            "checkbox" => Self::Checkbox,
            "number" => Self::Number,
            "date" => Self::Date,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Select => "select",
            Self::MultiSelect => "multi_select",
            Self::Url => "url",
            Self::Checkbox => "checkbox",
            Self::Number => "number",
            Self::Date => "date",
            Self::Other(kind) => kind,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PropertyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An option of a select or multi-select property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A date or date range. Dates stay ISO-8601 strings: Notion mixes date-only and
/// date-time values in the same field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Payload of a property value, one variant per kind.
///
/// Select, url, number and date are nullable: Notion reports a cleared value as `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Select(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Url(Option<String>),
    Checkbox(bool),
    Number(Option<f64>),
    Date(Option<DateRange>),
    /// Kinds this crate does not model, kept verbatim.
    Other {
        kind: String,
        value: serde_json::Value,
    },
}

impl PropertyKind {
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Title(_) => PropertyType::Title,
            Self::RichText(_) => PropertyType::RichText,
            Self::Select(_) => PropertyType::Select,
            Self::MultiSelect(_) => PropertyType::MultiSelect,
            Self::Url(_) => PropertyType::Url,
            Self::Checkbox(_) => PropertyType::Checkbox,
            Self::Number(_) => PropertyType::Number,
            Self::Date(_) => PropertyType::Date,
            Self::Other { kind, .. } => PropertyType::Other(kind.clone()),
        }
    }
}

/// A property value on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    pub id: String,
    pub value: PropertyKind,
}

impl PropertyValue {
    pub fn new(id: impl Into<String>, value: PropertyKind) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }

    pub fn kind(&self) -> PropertyType {
        self.value.property_type()
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("type", kind.as_str())?;
        match &self.value {
            PropertyKind::Title(runs) | PropertyKind::RichText(runs) => {
                map.serialize_entry(kind.as_str(), runs)?
            }
            PropertyKind::Select(option) => map.serialize_entry(kind.as_str(), option)?,
            PropertyKind::MultiSelect(options) => map.serialize_entry(kind.as_str(), options)?,
            PropertyKind::Url(url) => map.serialize_entry(kind.as_str(), url)?,
            PropertyKind::Checkbox(checked) => map.serialize_entry(kind.as_str(), checked)?,
            PropertyKind::Number(number) => map.serialize_entry(kind.as_str(), number)?,
            PropertyKind::Date(date) => map.serialize_entry(kind.as_str(), date)?,
            PropertyKind::Other { value, .. } => map.serialize_entry(kind.as_str(), value)?,
        }
        map.end()
    }
}

/// A column definition in a database schema.
///
/// `configuration` is the kind-specific object (select options, number format, ...)
/// and is kept as the service sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    pub id: String,
    pub name: String,
    pub kind: PropertyType,
    pub configuration: serde_json::Value,
}

impl Serialize for PropertySchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.kind)?;
        map.serialize_entry(self.kind.as_str(), &self.configuration)?;
        map.end()
    }
}
