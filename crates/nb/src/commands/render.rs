//! Forest presentation.

use clap::ValueEnum;
use nb_notion::{Forest, id};

use crate::error::CliError;
use crate::output::Output;

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Indented outline, one block per line.
    #[default]
    Outline,
    /// Pretty-printed JSON.
    Json,
}

/// Print a forest in the requested format.
pub(crate) fn print_forest(output: &Output, forest: &Forest, format: Format) -> Result<(), CliError> {
    match format {
        Format::Json => output.data(&serde_json::to_string_pretty(forest)?),
        Format::Outline => {
            for line in outline(forest) {
                output.data(&line);
            }
        }
    }
    Ok(())
}

/// Outline lines: `<indent><type> <compact id> <title>`.
pub(crate) fn outline(forest: &Forest) -> Vec<String> {
    forest
        .iter()
        .map(|(depth, node)| {
            let block = &node.value;
            let mut line = format!(
                "{}{} {}",
                "  ".repeat(depth),
                block.block_type().unwrap_or("?"),
                id::to_compact(&block.id)
            );
            if let Some(title) = block.title().filter(|t| !t.is_empty()) {
                line.push(' ');
                line.push_str(&title);
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use nb_notion::{Block, build_forest};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn typed(id: &str, parent_id: &str, block_type: &str, title: Option<&str>) -> Block {
        let mut block = Block::new(id, parent_id);
        block.payload.insert("type".to_owned(), json!(block_type));
        if let Some(title) = title {
            block
                .payload
                .insert("properties".to_owned(), json!({"title": [[title]]}));
        }
        block
    }

    #[test]
    fn test_outline() {
        let forest = build_forest(vec![
            typed("5b1a3c2e-9f0d-4e7a-8b6c-1d2e3f4a5b6c", "space", "page", Some("Post")),
            typed("b", "5b1a3c2e-9f0d-4e7a-8b6c-1d2e3f4a5b6c", "text", Some("Hello")),
            typed("c", "b", "divider", None),
            Block::new("d", "5b1a3c2e-9f0d-4e7a-8b6c-1d2e3f4a5b6c"),
        ]);

        assert_eq!(
            outline(&forest),
            vec![
                "page 5b1a3c2e9f0d4e7a8b6c1d2e3f4a5b6c Post".to_owned(),
                "  text b Hello".to_owned(),
                "    divider c".to_owned(),
                "  ? d".to_owned(),
            ]
        );
    }
}
