//! Paginated record source.

use crate::client::NotionClient;
use crate::error::NotionError;
use crate::types::{Cursor, PageChunk};

/// One page of records at a time, continued by an opaque cursor.
///
/// Implementations make a single request per call and report failures as
/// they happen. Retrying is left to the caller.
pub trait PageSource: Send + Sync {
    /// Fetch the chunk of `page_id` that follows `cursor`.
    ///
    /// Pass [`Cursor::default`] for the first chunk. `limit` bounds the
    /// number of records requested; the source may return fewer or more.
    fn load_page_chunk(
        &self,
        page_id: &str,
        limit: usize,
        cursor: &Cursor,
    ) -> Result<PageChunk, NotionError>;
}

impl PageSource for NotionClient {
    fn load_page_chunk(
        &self,
        page_id: &str,
        limit: usize,
        cursor: &Cursor,
    ) -> Result<PageChunk, NotionError> {
        NotionClient::load_page_chunk(self, page_id, limit, cursor)
    }
}
