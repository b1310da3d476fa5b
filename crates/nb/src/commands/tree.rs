//! `nb tree` command implementation.

use clap::Args;
use nb_notion::{Forest, NotionClient};
use rayon::prelude::*;
use tracing::info;

use super::render::{Format, print_forest};
use super::{ConnectionArgs, fetch_forest};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Page ids, compact or dashed.
    #[arg(required = true)]
    page_ids: Vec<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// Pages are fetched in parallel; results are printed in argument order.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.connection.load_config()?;
        let client = NotionClient::from_config(&config.notion);
        info!(
            "Fetching {} page(s) from {}",
            self.page_ids.len(),
            config.notion.base_url
        );

        let forests: Vec<Result<Forest, CliError>> = self
            .page_ids
            .par_iter()
            .map(|page_id| fetch_forest(&client, &config, page_id))
            .collect();

        let several = self.page_ids.len() > 1;
        for (page_id, forest) in self.page_ids.iter().zip(forests) {
            let forest = forest?;
            if several {
                output.highlight(&format!("\n{page_id} ({} blocks)", forest.len()));
            }
            if forest.is_empty() {
                output.warning(&format!("Page {page_id} has no live blocks"));
            }
            print_forest(&output, &forest, self.format)?;
        }

        Ok(())
    }
}
