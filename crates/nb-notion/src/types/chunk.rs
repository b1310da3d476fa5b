//! `loadPageChunk` request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RecordMap;

/// Continuation token returned by `loadPageChunk`.
///
/// The frames are owned by the remote service and passed back verbatim.
/// The default value (empty stack) requests the first chunk.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Cursor {
    /// Opaque stack frames.
    #[serde(default)]
    pub stack: Vec<Value>,
}

impl Cursor {
    /// Whether the remote has no more records for this page.
    pub fn is_exhausted(&self) -> bool {
        self.stack.is_empty()
    }
}

/// One page of records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageChunk {
    /// Cursor for the next request.
    #[serde(default)]
    pub cursor: Cursor,
    /// Records contained in this chunk.
    #[serde(rename = "recordMap", default)]
    pub record_map: RecordMap,
}

/// Body of `POST /loadPageChunk`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoadPageChunkRequest<'a> {
    pub page_id: &'a str,
    pub limit: usize,
    pub cursor: &'a Cursor,
    pub vertical_columns: bool,
}
