//! Rich-text runs.

use serde::{Deserialize, Serialize};

/// One run of rich text as carried in titles, descriptions and text properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichText {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: TextContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TextContent {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<TextLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLink {
    pub url: String,
}

/// Formatting flags of a run. Absent flags read as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RichText {
    /// An unformatted `text` run, as sent in create/update payloads.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: TextContent {
                content: content.into(),
                link: None,
            },
            annotations: None,
            plain_text: None,
            href: None,
        }
    }

    /// The run's text, preferring the authored content over the service-computed plain text.
    pub fn content(&self) -> &str {
        if self.text.content.is_empty() {
            self.plain_text.as_deref().unwrap_or_default()
        } else {
            &self.text.content
        }
    }
}

/// Concatenate the unformatted text of a run list.
pub fn plain_text_of(runs: &[RichText]) -> String {
    runs.iter().map(RichText::content).collect()
}
