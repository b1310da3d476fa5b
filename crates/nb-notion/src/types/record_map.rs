//! Record map returned by most Notion endpoints.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::Block;

/// Record envelope: the caller's role and the record itself.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordValue {
    /// Access role of the requesting user (`reader`, `editor`, `none`).
    #[serde(default)]
    pub role: String,
    /// Record value. Absent when the caller has no access.
    #[serde(default)]
    pub value: Option<Block>,
}

/// Records of one category, keyed by id, in the order the server sent them.
///
/// JSON object order is the only ordering signal a chunk carries, so it is
/// kept instead of being lost to a hash or sorted map.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    entries: Vec<(String, RecordValue)>,
    positions: HashMap<String, usize>,
}

impl RecordTable {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a record by its key.
    pub fn get(&self, id: &str) -> Option<&RecordValue> {
        self.positions.get(id).map(|&position| &self.entries[position].1)
    }

    /// Iterate `(id, record)` pairs in server order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &RecordValue)> {
        self.entries
            .iter()
            .map(|(key, record)| (key.as_str(), record))
    }

    /// Append a record. An existing key is replaced in place.
    pub fn insert(&mut self, id: impl Into<String>, record: RecordValue) {
        let id = id.into();
        if let Some(&position) = self.positions.get(&id) {
            self.entries[position].1 = record;
        } else {
            self.positions.insert(id.clone(), self.entries.len());
            self.entries.push((id, record));
        }
    }
}

impl IntoIterator for RecordTable {
    type Item = (String, RecordValue);
    type IntoIter = std::vec::IntoIter<(String, RecordValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'de> Deserialize<'de> for RecordTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RecordTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of record ids to records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RecordTable, A::Error> {
                let capacity = access.size_hint().unwrap_or(0);
                let mut table = RecordTable {
                    entries: Vec::with_capacity(capacity),
                    positions: HashMap::with_capacity(capacity),
                };
                while let Some((id, record)) = access.next_entry::<String, RecordValue>()? {
                    table.insert(id, record);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Records grouped by category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordMap {
    /// Page content blocks.
    #[serde(default)]
    pub block: RecordTable,
    /// Collections (database tables).
    #[serde(default)]
    pub collection: RecordTable,
    /// Collection views, carrying the stored table query.
    #[serde(default)]
    pub collection_view: RecordTable,
}
