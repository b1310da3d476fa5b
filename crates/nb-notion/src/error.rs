//! Error types for Notion integration.

/// Error from Notion API operations.
#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// A record the response was expected to contain is absent.
    #[error("{table} record {id} missing from response")]
    MissingRecord {
        /// Record map table (`block`, `collection`, `collection_view`).
        table: &'static str,
        /// Requested record id.
        id: String,
    },

    /// The remote kept returning continuation cursors past the page limit.
    #[error("page {page_id} not exhausted after {pages} requests")]
    PageLimit {
        /// Page being collected.
        page_id: String,
        /// Number of requests made.
        pages: usize,
    },
}
