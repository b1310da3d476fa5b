//! Notion record value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Notion record: block, collection or collection view.
///
/// Only the envelope used to rebuild the page hierarchy is typed. Everything
/// else (`type`, `properties`, `format`, timestamps, `query`, ...) stays in
/// `payload` and is serialized back flat, so unknown fields survive.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Block {
    /// Record id (dashed form).
    pub id: String,
    /// Id of the parent record, which may be absent from the fetched set.
    #[serde(default)]
    pub parent_id: String,
    /// Whether the record is live. Deleted blocks come back with `false`.
    #[serde(default)]
    pub alive: bool,
    /// Remaining record fields, uninterpreted.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Block {
    /// Create a live record with an empty payload.
    pub fn new(id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            alive: true,
            payload: Map::new(),
        }
    }

    /// Block type (`page`, `text`, `header`, `image`, ...).
    pub fn block_type(&self) -> Option<&str> {
        self.payload.get("type").and_then(Value::as_str)
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn created_time(&self) -> Option<i64> {
        self.payload.get("created_time").and_then(Value::as_i64)
    }

    /// Last edit time in milliseconds since the Unix epoch.
    pub fn last_edited_time(&self) -> Option<i64> {
        self.payload.get("last_edited_time").and_then(Value::as_i64)
    }

    /// Plain text of the `title` property.
    pub fn title(&self) -> Option<String> {
        self.property_text("title")
    }

    /// Plain text of a property, with formatting dropped.
    ///
    /// Property values are rich text: `[["Hello "], ["world", [["b"]]]]`.
    /// Returns `None` when the property is absent or not rich text.
    pub fn property_text(&self, key: &str) -> Option<String> {
        let segments = self.payload.get("properties")?.get(key)?.as_array()?;
        Some(
            segments
                .iter()
                .filter_map(|segment| segment.get(0).and_then(Value::as_str))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn text_block() -> Block {
        serde_json::from_value(json!({
            "id": "b1",
            "version": 12,
            "type": "text",
            "properties": {
                "title": [["Hello "], ["world", [["b"]]], ["!"]],
                "caption": "not rich text"
            },
            "created_time": 1_546_300_800_000_i64,
            "last_edited_time": 1_546_387_200_000_i64,
            "parent_id": "p1",
            "parent_table": "block",
            "alive": true
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_envelope() {
        let block = text_block();
        assert_eq!(block.id, "b1");
        assert_eq!(block.parent_id, "p1");
        assert!(block.alive);
        assert_eq!(block.payload.get("version"), Some(&json!(12)));
        assert!(!block.payload.contains_key("id"));
    }

    #[test]
    fn test_missing_fields_default() {
        let block: Block = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert_eq!(block.parent_id, "");
        assert!(!block.alive);
        assert!(block.payload.is_empty());
    }

    #[test]
    fn test_accessors() {
        let block = text_block();
        assert_eq!(block.block_type(), Some("text"));
        assert_eq!(block.created_time(), Some(1_546_300_800_000));
        assert_eq!(block.last_edited_time(), Some(1_546_387_200_000));
        assert_eq!(block.title().as_deref(), Some("Hello world!"));
        assert_eq!(block.property_text("caption"), None);
        assert_eq!(block.property_text("missing"), None);
    }

    #[test]
    fn test_serialize_keeps_payload_flat() {
        let value = serde_json::to_value(text_block()).unwrap();
        assert_eq!(value["type"], json!("text"));
        assert_eq!(value["parent_table"], json!("block"));
        assert_eq!(value["id"], json!("b1"));
    }
}
