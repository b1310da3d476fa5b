//! Full-page record collection.

use tracing::{debug, info};

use crate::error::NotionError;
use crate::source::PageSource;
use crate::types::{Block, Cursor};

/// Default cap on requests per page.
const DEFAULT_MAX_PAGES: usize = 10_000;

/// Pages through a [`PageSource`] and gathers every live block of a page.
pub struct RecordCollector<'a, S: PageSource + ?Sized> {
    source: &'a S,
    page_size: usize,
    max_pages: usize,
}

impl<'a, S: PageSource + ?Sized> RecordCollector<'a, S> {
    /// Create a collector requesting `page_size` records per chunk.
    pub fn new(source: &'a S, page_size: usize) -> Self {
        Self {
            source,
            page_size,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Limit the number of requests made for one page.
    #[must_use]
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Collect all live blocks of `page_id`.
    ///
    /// Chunks are requested one after another, each with the cursor returned
    /// by the previous one, until the cursor comes back empty. Blocks keep the
    /// order of their chunk's `block` table, chunks are concatenated in fetch
    /// order. Blocks with `alive = false` and entries without a value are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Any failed chunk fails the whole collection. Returns
    /// [`NotionError::PageLimit`] if the cursor is still not exhausted after
    /// `max_pages` requests.
    pub fn collect_all(&self, page_id: &str) -> Result<Vec<Block>, NotionError> {
        let mut blocks = Vec::new();
        let mut cursor = Cursor::default();
        let mut pages = 0;

        loop {
            if pages == self.max_pages {
                return Err(NotionError::PageLimit {
                    page_id: page_id.to_owned(),
                    pages,
                });
            }

            let chunk = self
                .source
                .load_page_chunk(page_id, self.page_size, &cursor)?;
            pages += 1;

            let received = chunk.record_map.block.len();
            let before = blocks.len();
            for (id, record) in chunk.record_map.block {
                match record.value {
                    Some(block) if block.alive => blocks.push(block),
                    Some(_) => debug!("Skipping deleted block {}", id),
                    None => debug!("Skipping block {} without value (role {})", id, record.role),
                }
            }
            debug!(
                "Chunk {} of page {}: kept {} of {} blocks",
                pages,
                page_id,
                blocks.len() - before,
                received
            );

            cursor = chunk.cursor;
            if cursor.is_exhausted() {
                break;
            }
        }

        info!(
            "Collected {} blocks of page {} in {} request(s)",
            blocks.len(),
            page_id,
            pages
        );
        Ok(blocks)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::MockPageSource;

    fn dead(id: &str, parent_id: &str) -> Block {
        Block {
            alive: false,
            ..Block::new(id, parent_id)
        }
    }

    fn ids(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_single_page() {
        let source = MockPageSource::new()
            .with_last_page(vec![Block::new("page", "space"), Block::new("a", "page")]);

        let blocks = RecordCollector::new(&source, 100).collect_all("page").unwrap();

        assert_eq!(ids(&blocks), vec!["page", "a"]);
        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].limit, 100);
        assert!(requests[0].cursor.is_exhausted());
    }

    #[test]
    fn test_pages_concatenated_in_fetch_order() {
        let source = MockPageSource::new()
            .with_page(vec![Block::new("c", "b"), Block::new("a", "page")])
            .with_page(vec![Block::new("b", "a")])
            .with_last_page(vec![Block::new("page", "space")]);

        let blocks = RecordCollector::new(&source, 2).collect_all("page").unwrap();

        assert_eq!(ids(&blocks), vec!["c", "a", "b", "page"]);
    }

    #[test]
    fn test_cursor_passed_to_next_request() {
        let source = MockPageSource::new()
            .with_page(vec![Block::new("a", "page")])
            .with_last_page(vec![]);

        RecordCollector::new(&source, 10).collect_all("page").unwrap();

        let requests = source.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].cursor.is_exhausted());
        assert!(!requests[1].cursor.is_exhausted());
        assert_eq!(requests[1].page_id, "page");
    }

    #[test]
    fn test_dead_blocks_and_missing_values_dropped() {
        let mut chunk = crate::types::PageChunk::default();
        chunk.record_map.block.insert(
            "hidden",
            crate::types::RecordValue {
                role: "none".to_owned(),
                value: None,
            },
        );
        let source = MockPageSource::new()
            .with_page(vec![Block::new("a", "page"), dead("gone", "page")])
            .with_chunk(chunk);

        let blocks = RecordCollector::new(&source, 10).collect_all("page").unwrap();

        assert_eq!(ids(&blocks), vec!["a"]);
    }

    #[test]
    fn test_child_of_dead_block_becomes_root() {
        let source = MockPageSource::new()
            .with_last_page(vec![Block::new("c", "p"), dead("p", "page")]);

        let blocks = RecordCollector::new(&source, 10).collect_all("page").unwrap();
        let forest = crate::tree::build_forest(blocks);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest.roots()[0].value.id, "c");
        assert_eq!(forest.roots()[0].value.parent_id, "p");
        assert!(forest.find("p").is_none());
    }

    #[test]
    fn test_failed_page_fails_collection() {
        let source = MockPageSource::new()
            .with_page(vec![Block::new("a", "page")])
            .with_failure(502, "bad gateway");

        let err = RecordCollector::new(&source, 10)
            .collect_all("page")
            .unwrap_err();

        assert!(matches!(err, NotionError::HttpResponse { status: 502, .. }));
        assert_eq!(source.requests().len(), 2);
    }

    #[test]
    fn test_page_limit() {
        let source = MockPageSource::new()
            .with_page(vec![Block::new("a", "page")])
            .with_page(vec![Block::new("b", "page")])
            .with_page(vec![Block::new("c", "page")]);

        let err = RecordCollector::new(&source, 10)
            .max_pages(2)
            .collect_all("page")
            .unwrap_err();

        assert!(matches!(err, NotionError::PageLimit { pages: 2, .. }));
        assert_eq!(source.requests().len(), 2);
    }
}
