//! Notion block fetching and tree reconstruction.
//!
//! Notion returns the blocks of a page as flat, paginated records that only
//! point at their parent. This crate pages through them and rebuilds the
//! document hierarchy:
//!
//! - [`id`]: conversion between compact and dashed block identifiers
//! - [`PageSource`]: one paginated `loadPageChunk` request at a time
//! - [`RecordCollector`]: drives a [`PageSource`] until the cursor is exhausted
//! - [`build_forest`]: rebuilds parent/child structure from records in any order
//!
//! [`NotionClient`] implements [`PageSource`] over HTTP and also exposes the
//! table queries used to list blog posts ([`list_posts`]). [`NameCache`] keeps
//! the process-wide post name to block id mapping.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use nb_config::NotionConfig;
//! use nb_notion::{NotionClient, RecordCollector, build_forest};
//!
//! let client = NotionClient::from_config(&NotionConfig::default());
//! let blocks = RecordCollector::new(&client, 100).collect_all("5b1a3c2e9f0d4e7a8b6c1d2e3f4a5b6c")?;
//! let forest = build_forest(blocks);
//! for (depth, node) in forest.iter() {
//!     tracing::info!("{}{}", "  ".repeat(depth), node.value.id);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod collector;
mod error;
pub mod id;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod names;
mod posts;
mod source;
mod tree;
mod types;

pub use client::NotionClient;
pub use collector::RecordCollector;
pub use error::NotionError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockPageSource, PageRequest};
pub use names::NameCache;
pub use posts::{Post, list_posts};
pub use source::PageSource;
pub use tree::{BlockNode, Forest, ForestIter, build_forest};
pub use types::{
    Block, CollectionQuery, Cursor, PageChunk, QueryResult, RecordMap, RecordTable, RecordValue,
    RecordValues,
};
