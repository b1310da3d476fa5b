//! In-memory page source for testing.
//!
//! Provides [`MockPageSource`] for exercising collection logic without HTTP.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::json;

use crate::error::NotionError;
use crate::source::PageSource;
use crate::types::{Block, Cursor, PageChunk, RecordValue};

/// A request observed by [`MockPageSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// Requested page id, as passed by the caller.
    pub page_id: String,
    /// Requested limit.
    pub limit: usize,
    /// Cursor sent with the request.
    pub cursor: Cursor,
}

/// Scripted page source.
///
/// Responses are served in the order they were queued. Once the queue is
/// empty every request fails with a 404.
///
/// # Example
///
/// ```ignore
/// use nb_notion::{Block, MockPageSource, RecordCollector};
///
/// let source = MockPageSource::new()
///     .with_page(vec![Block::new("b", "a")])
///     .with_last_page(vec![Block::new("a", "root")]);
/// let blocks = RecordCollector::new(&source, 100).collect_all("root")?;
/// assert_eq!(blocks.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockPageSource {
    responses: Mutex<VecDeque<Result<PageChunk, NotionError>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl MockPageSource {
    /// Create a source with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a chunk whose cursor points at a further chunk.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, blocks: Vec<Block>) -> Self {
        let index = self.responses.lock().unwrap().len();
        let cursor = Cursor {
            stack: vec![json!([{"table": "block", "id": "mock", "index": index}])],
        };
        self.with_chunk(chunk_of(blocks, cursor))
    }

    /// Queue a chunk with an exhausted cursor.
    #[must_use]
    pub fn with_last_page(self, blocks: Vec<Block>) -> Self {
        self.with_chunk(chunk_of(blocks, Cursor::default()))
    }

    /// Queue an arbitrary chunk.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_chunk(self, chunk: PageChunk) -> Self {
        self.responses.lock().unwrap().push_back(Ok(chunk));
        self
    }

    /// Queue an HTTP error response.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(NotionError::HttpResponse {
                status,
                body: body.into(),
            }));
        self
    }

    /// Requests received so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PageSource for MockPageSource {
    fn load_page_chunk(
        &self,
        page_id: &str,
        limit: usize,
        cursor: &Cursor,
    ) -> Result<PageChunk, NotionError> {
        self.requests.lock().unwrap().push(PageRequest {
            page_id: page_id.to_owned(),
            limit,
            cursor: cursor.clone(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(NotionError::HttpResponse {
                    status: 404,
                    body: "no more mock pages".to_owned(),
                })
            })
    }
}

fn chunk_of(blocks: Vec<Block>, cursor: Cursor) -> PageChunk {
    let mut chunk = PageChunk {
        cursor,
        ..PageChunk::default()
    };
    for block in blocks {
        chunk.record_map.block.insert(
            block.id.clone(),
            RecordValue {
                role: "reader".to_owned(),
                value: Some(block),
            },
        );
    }
    chunk
}
