//! `getRecordValues` and `queryCollection` types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{RecordMap, RecordValue};

/// `getRecordValues` response: one entry per requested id, in request order.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordValues {
    /// Requested records.
    #[serde(default)]
    pub results: Vec<RecordValue>,
}

/// `queryCollection` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionQuery {
    /// Rows and related records.
    #[serde(rename = "recordMap", default)]
    pub record_map: RecordMap,
    /// Ordered row ids.
    pub result: QueryResult,
}

/// Ordered result of a collection query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResult {
    /// Row block ids, in view order.
    #[serde(rename = "blockIds", default)]
    pub block_ids: Vec<String>,
    /// Total number of rows matching the query.
    #[serde(default)]
    pub total: u64,
    /// Loader type echoed by the server (`table`).
    #[serde(rename = "type", default)]
    pub result_type: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetRecordValuesRequest<'a> {
    pub requests: Vec<RecordRequest<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecordRequest<'a> {
    pub id: String,
    pub table: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryCollectionRequest<'a> {
    pub collection_id: String,
    pub collection_view_id: String,
    pub loader: Loader<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Loader<'a> {
    #[serde(rename = "type")]
    pub loader_type: &'a str,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_collection_query_response() {
        let response: CollectionQuery = serde_json::from_value(json!({
            "recordMap": {
                "block": {
                    "r1": {"role": "reader", "value": {"id": "r1", "parent_id": "c1", "alive": true}}
                }
            },
            "result": {"blockIds": ["r1"], "total": 1, "type": "table"}
        }))
        .unwrap();
        assert_eq!(response.result.block_ids, vec!["r1".to_owned()]);
        assert_eq!(response.result.total, 1);
        assert_eq!(response.result.result_type, "table");
        assert_eq!(response.record_map.block.len(), 1);
    }

    #[test]
    fn test_query_request_omits_missing_query() {
        let body = serde_json::to_value(QueryCollectionRequest {
            collection_id: "c".to_owned(),
            collection_view_id: "v".to_owned(),
            loader: Loader { loader_type: "table" },
            query: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"collectionId": "c", "collectionViewId": "v", "loader": {"type": "table"}})
        );
    }

    #[test]
    fn test_record_values_request() {
        let body = serde_json::to_value(GetRecordValuesRequest {
            requests: vec![RecordRequest {
                id: "a".to_owned(),
                table: "block",
            }],
        })
        .unwrap();
        assert_eq!(body, json!({"requests": [{"id": "a", "table": "block"}]}));
    }
}
