//! CLI command implementations.

pub(crate) mod id;
pub(crate) mod posts;
pub(crate) mod render;
pub(crate) mod tree;

pub(crate) use id::IdArgs;
pub(crate) use posts::{PostArgs, PostsArgs};
pub(crate) use tree::TreeArgs;

use std::path::PathBuf;

use clap::Args;
use nb_config::{CliSettings, Config};
use nb_notion::{Forest, PageSource, RecordCollector, build_forest};
use tracing::info;

use crate::error::CliError;

/// Connection options shared by commands that talk to Notion.
#[derive(Args)]
pub(crate) struct ConnectionArgs {
    /// Path to configuration file (default: auto-discover nb.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Notion API base URL (overrides config).
    #[arg(long, env = "NB_BASE_URL")]
    base_url: Option<String>,

    /// Records requested per chunk (overrides config).
    #[arg(long)]
    page_size: Option<usize>,
}

impl ConnectionArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
            page_size: self.page_size,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Collect a page and rebuild its hierarchy.
pub(crate) fn fetch_forest<S: PageSource + ?Sized>(
    source: &S,
    config: &Config,
    page_id: &str,
) -> Result<Forest, CliError> {
    let blocks = RecordCollector::new(source, config.notion.page_size)
        .max_pages(config.notion.max_pages)
        .collect_all(page_id)?;
    let records = blocks.len();
    let forest = build_forest(blocks);
    info!(
        "Page {page_id}: {records} records, {} roots",
        forest.roots().len()
    );
    Ok(forest)
}

#[cfg(test)]
mod tests {
    use nb_notion::{Block, MockPageSource, NotionError};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fetch_forest_uses_config_limits() {
        let mut config = Config::default();
        config.notion.page_size = 7;
        let source = MockPageSource::new()
            .with_page(vec![Block::new("b", "a")])
            .with_last_page(vec![Block::new("a", "page")]);

        let forest = fetch_forest(&source, &config, "a").unwrap();

        assert_eq!(forest.len(), 2);
        assert_eq!(forest.roots()[0].value.id, "a");
        assert_eq!(forest.roots()[0].children[0].value.id, "b");
        assert!(source.requests().iter().all(|r| r.limit == 7));
    }

    #[test]
    fn test_fetch_forest_respects_max_pages() {
        let mut config = Config::default();
        config.notion.max_pages = 1;
        let source = MockPageSource::new()
            .with_page(vec![Block::new("a", "page")])
            .with_last_page(vec![]);

        let err = fetch_forest(&source, &config, "page").unwrap_err();

        assert!(matches!(
            err,
            CliError::Notion(NotionError::PageLimit { pages: 1, .. })
        ));
    }
}
