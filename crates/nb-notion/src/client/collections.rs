//! Collection (database table) operations for Notion API.

use serde_json::Value;
use tracing::{debug, info};

use super::NotionClient;
use crate::error::NotionError;
use crate::id::to_canonical;
use crate::types::{Block, CollectionQuery, Cursor, Loader, QueryCollectionRequest};

/// Records requested when loading the page that hosts a table.
const TABLE_PAGE_LIMIT: usize = 100;

impl NotionClient {
    /// Query a collection through one of its views.
    ///
    /// `query` is the view's stored query (filters, sorts); `None` lets the
    /// server apply its defaults.
    pub fn query_collection(
        &self,
        collection_id: &str,
        view_id: &str,
        query: Option<&Value>,
    ) -> Result<CollectionQuery, NotionError> {
        info!("Querying collection {} via view {}", collection_id, view_id);

        let body = QueryCollectionRequest {
            collection_id: to_canonical(collection_id).into_owned(),
            collection_view_id: to_canonical(view_id).into_owned(),
            loader: Loader {
                loader_type: "table",
            },
            query,
        };
        self.post("queryCollection", &body)
    }

    /// Load the rows of the table embedded in `page_id`, in view order.
    ///
    /// Reads the first chunk of the hosting page to find the view's stored
    /// query and the collection behind it, then queries that collection.
    /// When the chunk carries several collections the last one is used.
    /// Rows missing from the query's record map or without a value are skipped.
    pub fn load_table_page_blocks(
        &self,
        page_id: &str,
        view_id: &str,
    ) -> Result<Vec<Block>, NotionError> {
        let chunk = self.load_page_chunk(page_id, TABLE_PAGE_LIMIT, &Cursor::default())?;
        let record_map = chunk.record_map;

        let view_id = to_canonical(view_id);
        let view = record_map
            .collection_view
            .get(&view_id)
            .and_then(|record| record.value.as_ref())
            .ok_or_else(|| NotionError::MissingRecord {
                table: "collection_view",
                id: (*view_id).to_owned(),
            })?;
        let query = view.payload.get("query");

        let collection = record_map
            .collection
            .iter()
            .rev()
            .find_map(|(_, record)| record.value.as_ref())
            .ok_or_else(|| NotionError::MissingRecord {
                table: "collection",
                id: page_id.to_owned(),
            })?;

        let result = self.query_collection(&collection.id, &view_id, query)?;
        let rows = &result.record_map.block;

        let blocks: Vec<Block> = result
            .result
            .block_ids
            .iter()
            .filter_map(|id| {
                let row = rows.get(id).and_then(|record| record.value.clone());
                if row.is_none() {
                    debug!("Row {} missing from query result", id);
                }
                row
            })
            .collect();

        info!(
            "Loaded {} of {} rows from collection {}",
            blocks.len(),
            result.result.total,
            collection.id
        );
        Ok(blocks)
    }
}
