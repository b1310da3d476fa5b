//! Notion API wire types.

mod block;
mod chunk;
mod collection;
mod record_map;

pub use block::Block;
pub use chunk::{Cursor, PageChunk};
pub use collection::{CollectionQuery, QueryResult, RecordValues};
pub use record_map::{RecordMap, RecordTable, RecordValue};

pub(crate) use chunk::LoadPageChunkRequest;
pub(crate) use collection::{GetRecordValuesRequest, Loader, QueryCollectionRequest, RecordRequest};
