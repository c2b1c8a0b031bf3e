//! Reverse-image-search client.
//!
//! Sends the encoded image to the custom-search collaborator and returns
//! its heterogeneous result items (titles, snippets, links) untouched;
//! title extraction and voting happen downstream.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::{SignalError, SignalResult};
use crate::image::ImagePayload;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Configuration for the reverse-image-search client.
#[derive(Debug, Clone)]
pub struct ReverseImageConfig {
    pub api_key: String,
    /// Search engine ID
    pub cx: String,
    pub base_url: String,
}

impl ReverseImageConfig {
    pub fn new(api_key: impl Into<String>, cx: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            cx: cx.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> SignalResult<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| SignalError::config_error("GOOGLE_API_KEY not set"))?;
        let cx = std::env::var("GOOGLE_CX")
            .map_err(|_| SignalError::config_error("GOOGLE_CX not set"))?;
        Ok(Self::new(api_key, cx))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// One raw result item. Every text field is independently a title source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// Reverse-image-search service client.
pub struct ReverseImageClient {
    config: ReverseImageConfig,
    client: Client,
}

impl ReverseImageClient {
    /// Create a new client from configuration.
    pub fn new(config: ReverseImageConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> SignalResult<Self> {
        Ok(Self::new(ReverseImageConfig::from_env()?))
    }

    /// Search by image, returning raw result items.
    pub async fn search(&self, payload: &ImagePayload) -> SignalResult<Vec<SearchItem>> {
        debug!(
            mime_type = payload.mime_type(),
            raw_len = payload.raw_len(),
            "Reverse image search"
        );

        let response = self
            .client
            .post(&self.config.base_url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.cx.as_str()),
                ("searchType", "image"),
            ])
            .json(&json!({
                "image": { "image": payload.encoded() }
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect::<String>();
            return Err(SignalError::api("reverse-image-search", status, body));
        }

        let parsed: SearchResponse = response.json().await?;
        debug!(items = parsed.items.len(), "Reverse image search returned");
        Ok(parsed.items)
    }
}
