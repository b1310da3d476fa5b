//! Blog posts listed in a Notion table.

use nb_config::BlogConfig;
use serde::Serialize;

use crate::client::NotionClient;
use crate::error::NotionError;
use crate::id::to_compact;
use crate::types::Block;

/// A row of the blog table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Page block id, compact form.
    pub id: String,
    /// Name used to look the post up (plain text of the name property).
    pub name: String,
    /// Post title.
    pub title: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_time: Option<i64>,
}

impl Post {
    /// Build a post from a table row, reading its name from `name_property`.
    pub fn from_block(block: &Block, name_property: &str) -> Self {
        Self {
            id: to_compact(&block.id).into_owned(),
            name: block.property_text(name_property).unwrap_or_default(),
            title: block.title().unwrap_or_default(),
            created_time: block.created_time(),
        }
    }
}

/// List the live posts of the configured blog table, in view order.
pub fn list_posts(client: &NotionClient, blog: &BlogConfig) -> Result<Vec<Post>, NotionError> {
    let rows = client.load_table_page_blocks(&blog.page_id, &blog.view_id)?;
    Ok(rows
        .iter()
        .filter(|row| row.alive)
        .map(|row| Post::from_block(row, &blog.name_property))
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_post_from_row() {
        let row: Block = serde_json::from_value(json!({
            "id": "5b1a3c2e-9f0d-4e7a-8b6c-1d2e3f4a5b6c",
            "parent_id": "c1",
            "alive": true,
            "type": "page",
            "created_time": 1_546_300_800_000_i64,
            "properties": {
                "title": [["Hello, "], ["Notion", [["i"]]]],
                "s~lg": [["hello-notion"]]
            }
        }))
        .unwrap();

        assert_eq!(
            Post::from_block(&row, "s~lg"),
            Post {
                id: "5b1a3c2e9f0d4e7a8b6c1d2e3f4a5b6c".to_owned(),
                name: "hello-notion".to_owned(),
                title: "Hello, Notion".to_owned(),
                created_time: Some(1_546_300_800_000),
            }
        );
    }

    #[test]
    fn test_post_missing_properties() {
        let post = Post::from_block(&Block::new("abc", "c1"), "title");
        assert_eq!(post.id, "abc");
        assert_eq!(post.name, "");
        assert_eq!(post.title, "");
        assert_eq!(post.created_time, None);
    }
}
