//! Vision-annotation client.
//!
//! Requests web detection (best-guess labels, web entities) plus text
//! detection for an image and returns the annotations raw; the best-guess
//! reconciliation strategy works over them downstream.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{SignalError, SignalResult};
use crate::image::ImagePayload;

const DEFAULT_BASE_URL: &str = "https://vision.googleapis.com/v1";

const WEB_DETECTION_MAX_RESULTS: u32 = 5;

/// Configuration for the vision client.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub api_key: String,
    pub base_url: String,
}

impl VisionConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> SignalResult<Self> {
        let api_key = std::env::var("VISION_API_KEY")
            .map_err(|_| SignalError::config_error("VISION_API_KEY not set"))?;
        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Raw annotations for one image.
#[derive(Debug, Clone, Default)]
pub struct VisionAnnotations {
    /// Best-guess labels, highest priority title source
    pub best_guess_labels: Vec<String>,
    /// Web entity descriptions with relevance scores
    pub web_entities: Vec<WebEntity>,
    /// OCR text annotations
    pub text_annotations: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebEntity {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateResult {
    #[serde(default)]
    web_detection: Option<WebDetection>,
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebDetection {
    #[serde(default)]
    best_guess_labels: Vec<BestGuessLabel>,
    #[serde(default)]
    web_entities: Vec<WebEntity>,
}

#[derive(Debug, Deserialize)]
struct BestGuessLabel {
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    description: String,
}

/// Vision-annotation service client.
pub struct VisionClient {
    config: VisionConfig,
    client: Client,
}

impl VisionClient {
    /// Create a new client from configuration.
    pub fn new(config: VisionConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> SignalResult<Self> {
        Ok(Self::new(VisionConfig::from_env()?))
    }

    /// Annotate an image with web detection and text detection.
    pub async fn annotate(&self, payload: &ImagePayload) -> SignalResult<VisionAnnotations> {
        debug!(
            mime_type = payload.mime_type(),
            raw_len = payload.raw_len(),
            "Requesting vision annotations"
        );

        let url = format!(
            "{}/images:annotate?key={}",
            self.config.base_url, self.config.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "requests": [{
                    "image": { "content": payload.encoded() },
                    "features": [
                        { "type": "WEB_DETECTION", "maxResults": WEB_DETECTION_MAX_RESULTS },
                        { "type": "TEXT_DETECTION" }
                    ]
                }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect::<String>();
            return Err(SignalError::api("vision", status, body));
        }

        let parsed: AnnotateResponse = response.json().await?;
        let result = parsed
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| SignalError::malformed("vision", "empty responses array"))?;

        let web = result.web_detection.unwrap_or_default();
        Ok(VisionAnnotations {
            best_guess_labels: web.best_guess_labels.into_iter().map(|l| l.label).collect(),
            web_entities: web.web_entities,
            text_annotations: result
                .text_annotations
                .into_iter()
                .map(|t| t.description)
                .collect(),
        })
    }
}
