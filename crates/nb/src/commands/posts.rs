//! `nb posts` and `nb post` command implementations.

use clap::Args;
use nb_notion::{NameCache, NotionClient, Post, list_posts};
use tracing::info;

use super::render::{Format, print_forest};
use super::{ConnectionArgs, fetch_forest};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the posts command.
#[derive(Args)]
pub(crate) struct PostsArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl PostsArgs {
    /// Execute the posts command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.connection.load_config()?;
        let blog = config.require_blog()?;
        let client = NotionClient::from_config(&config.notion);

        let posts = list_posts(&client, blog)?;
        info!("Found {} posts in table {}", posts.len(), blog.page_id);
        match self.format {
            Format::Json => output.data(&serde_json::to_string_pretty(&posts)?),
            Format::Outline => {
                for post in &posts {
                    output.data(&format!(
                        "{} {} {}",
                        post.name,
                        output.dimmed(&post.id),
                        post.title
                    ));
                }
            }
        }
        if posts.is_empty() {
            output.warning("No posts found");
        }
        Ok(())
    }
}

/// Arguments for the post command.
#[derive(Args)]
pub(crate) struct PostArgs {
    /// Post names, as listed by `nb posts`.
    #[arg(required = true)]
    names: Vec<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl PostArgs {
    /// Execute the post command.
    ///
    /// Names are resolved through one [`NameCache`], so the blog table is
    /// queried once per distinct unresolved name at most.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.connection.load_config()?;
        let blog = config.require_blog()?;
        let client = NotionClient::from_config(&config.notion);
        let names = NameCache::new();

        for name in &self.names {
            let page_id = names
                .resolve(name, || name_pairs(&client, blog))?
                .ok_or_else(|| CliError::Validation(format!("no post named '{name}'")))?;
            info!("Resolved post '{name}' to {page_id}");

            if self.names.len() > 1 {
                output.highlight(&format!("\n{name} ({page_id})"));
            }
            let forest = fetch_forest(&client, &config, &page_id)?;
            print_forest(&output, &forest, self.format)?;
        }

        Ok(())
    }
}

fn name_pairs(
    client: &NotionClient,
    blog: &nb_config::BlogConfig,
) -> Result<Vec<(String, String)>, CliError> {
    Ok(list_posts(client, blog)?
        .into_iter()
        .map(|Post { name, id, .. }| (name, id))
        .collect())
}
