//! nb CLI - Notion block trees.
//!
//! Provides commands for:
//! - `tree`: Fetch pages and print their block hierarchy
//! - `id`: Convert a block id between compact and dashed form
//! - `posts`: List the posts of the configured blog table
//! - `post`: Print the block hierarchy of a post looked up by name

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{IdArgs, PostArgs, PostsArgs, TreeArgs};
use output::Output;

/// nb - Notion block trees.
#[derive(Parser)]
#[command(name = "nb", version, about)]
struct Cli {
    /// Log progress at INFO level (otherwise RUST_LOG applies).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch pages and print their block hierarchy.
    Tree(TreeArgs),
    /// Print compact and dashed forms of a block id.
    Id(IdArgs),
    /// List blog posts.
    Posts(PostsArgs),
    /// Print the block hierarchy of blog posts looked up by name.
    Post(PostArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Tree(args) => args.execute(),
        Commands::Id(args) => {
            args.execute();
            Ok(())
        }
        Commands::Posts(args) => args.execute(),
        Commands::Post(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
