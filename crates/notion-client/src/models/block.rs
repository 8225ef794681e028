//! Content blocks.
//!
//! The block vocabulary grows independently of this crate, so a block is its
//! `type` discriminator plus the untouched JSON object. Only the markdown renderer
//! looks inside.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{NotionError, NotionResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContentBlock {
    #[serde(skip)]
    block_type: String,
    raw: Map<String, Value>,
}

impl ContentBlock {
    /// Wrap a block object; the `type` discriminator is required.
    pub fn from_value(value: Value) -> NotionResult<Self> {
        let Value::Object(raw) = value else {
            return Err(NotionError::decode("block", "expected a JSON object"));
        };
        let block_type = raw
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| NotionError::decode("type", "missing block type"))?
            .to_string();
        Ok(Self { block_type, raw })
    }

    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    /// The type-specific payload, e.g. the `paragraph` object of a paragraph block.
    pub fn content(&self) -> Option<&Map<String, Value>> {
        self.raw.get(&self.block_type).and_then(Value::as_object)
    }

    /// Rich-text runs of the payload; empty for blocks without text.
    pub fn rich_text(&self) -> &[Value] {
        self.content()
            .and_then(|c| c.get("rich_text"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_requires_type() {
        let err = ContentBlock::from_value(json!({"id": "b1"})).unwrap_err();
        assert!(matches!(err, NotionError::Decode { ref field, .. } if field == "type"));
    }

    #[test]
    fn test_block_rejects_non_object() {
        assert!(ContentBlock::from_value(json!(["paragraph"])).is_err());
    }

    #[test]
    fn test_block_accessors() {
        let block = ContentBlock::from_value(json!({
            "object": "block",
            "id": "b1",
            "type": "to_do",
            "to_do": {"rich_text": [{"type": "text", "text": {"content": "ship"}}], "checked": true}
        }))
        .unwrap();
        assert_eq!(block.block_type(), "to_do");
        assert_eq!(block.rich_text().len(), 1);
        assert_eq!(block.content().unwrap()["checked"], json!(true));
    }

    #[test]
    fn test_block_serializes_verbatim() {
        let raw = json!({"type": "divider", "divider": {}, "id": "d"});
        let block = ContentBlock::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&block).unwrap(), raw);
    }
}
