//! Notion API client.
//!
//! Provides a sync HTTP client for the unofficial Notion `api/v3` endpoints.
//! Every endpoint is a JSON `POST`.

mod collections;
mod pages;

use std::time::Duration;

use nb_config::NotionConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::error::NotionError;

/// Notion API client.
pub struct NotionClient {
    agent: Agent,
    base_url: String,
}

impl NotionClient {
    /// Create a client for the given API base URL.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://www.notion.so/api/v3`
    /// * `timeout` - Global timeout applied to each request
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Create client from config values.
    pub fn from_config(config: &NotionConfig) -> Self {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Full URL of an API endpoint.
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// POST a JSON body and decode the JSON response.
    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, NotionError> {
        let url = self.endpoint_url(endpoint);
        debug!("POST {}", url);

        let response = self
            .agent
            .post(&url)
            .header("Accept", "application/json")
            .send_json(body)?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(NotionError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let text = body_reader.read_to_string()?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let client = NotionClient::new("https://www.notion.so/api/v3/", Duration::from_secs(1));
        assert_eq!(
            client.endpoint_url("loadPageChunk"),
            "https://www.notion.so/api/v3/loadPageChunk"
        );
    }

    #[test]
    fn test_from_config() {
        let config = NotionConfig {
            base_url: "http://localhost:3000/api/v3".to_owned(),
            ..NotionConfig::default()
        };
        let client = NotionClient::from_config(&config);
        assert_eq!(
            client.endpoint_url("getRecordValues"),
            "http://localhost:3000/api/v3/getRecordValues"
        );
    }
}
