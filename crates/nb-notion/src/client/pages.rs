//! Page content operations for Notion API.

use tracing::info;

use super::NotionClient;
use crate::error::NotionError;
use crate::id::to_canonical;
use crate::types::{
    Cursor, GetRecordValuesRequest, LoadPageChunkRequest, PageChunk, RecordRequest, RecordValues,
};

impl NotionClient {
    /// Load one chunk of a page's records.
    ///
    /// `page_id` may be compact or dashed. `limit` is a hint; the server
    /// decides how many records it actually returns.
    pub fn load_page_chunk(
        &self,
        page_id: &str,
        limit: usize,
        cursor: &Cursor,
    ) -> Result<PageChunk, NotionError> {
        let page_id = to_canonical(page_id);
        info!(
            "Loading chunk of page {} (limit {}, cursor depth {})",
            page_id,
            limit,
            cursor.stack.len()
        );

        self.post(
            "loadPageChunk",
            &LoadPageChunkRequest {
                page_id: &page_id,
                limit,
                cursor,
                vertical_columns: false,
            },
        )
    }

    /// Fetch block records by id.
    ///
    /// Results come back in request order; inaccessible ids yield entries
    /// without a value.
    pub fn get_record_values(&self, block_ids: &[&str]) -> Result<RecordValues, NotionError> {
        info!("Getting {} record values", block_ids.len());

        let body = GetRecordValuesRequest {
            requests: block_ids
                .iter()
                .map(|id| RecordRequest {
                    id: to_canonical(id).into_owned(),
                    table: "block",
                })
                .collect(),
        };
        self.post("getRecordValues", &body)
    }
}
