//! Notion object identifiers.
//!
//! Notion accepts ids with or without the UUID hyphens (`1429989f-e8ac-4eff-bc8f-57f56486db54`
//! and `1429989fe8ac4effbc8f57f56486db54` name the same object). Every id that reaches a
//! request path goes through [`normalize_id`] first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NotionError, NotionResult};

/// Strip separator characters and surrounding whitespace from an identifier.
///
/// Idempotent: `normalize_id(&normalize_id(x)) == normalize_id(x)`.
pub fn normalize_id(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != '-').collect()
}

/// A normalized (hyphen-free) Notion object id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotionId(String);

impl NotionId {
    /// Normalize `raw` and reject ids that are empty afterwards or that contain
    /// anything other than ASCII letters and digits.
    ///
    /// The id becomes a single request path segment, so `/`, `.`, `?` and `#` never
    /// reach the URL. `what` names the argument in the validation message (e.g. `"page_id"`).
    pub fn parse(raw: &str, what: &str) -> NotionResult<Self> {
        let normalized = normalize_id(raw);
        if normalized.is_empty() {
            return Err(NotionError::validation(format!("{what} is required")));
        }
        if let Some(bad) = normalized.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(NotionError::validation(format!(
                "{what} contains invalid character {bad:?}"
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NotionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
