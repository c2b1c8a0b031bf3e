//! Generative-text client.
//!
//! Two entry points: movie suggestions from a free-text description (the
//! prompt imposes a strict numbered-list grammar the pipeline parses
//! downstream), and a single-title guess for a poster or still image.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use cine_match::clean_model_title;

use crate::error::{SignalError, SignalResult};
use crate::image::ImagePayload;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Models tried in order; the first success wins.
const MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.5-flash-lite", "gemini-2.5-pro"];

/// Configuration for the generative-text client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> SignalResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| SignalError::config_error("GEMINI_API_KEY not set"))?;
        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Generative-text API request.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inline_data", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn image(payload: &ImagePayload) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: payload.mime_type().to_string(),
                data: payload.encoded().to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Generative-text API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Generative-text service client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a new client from configuration.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> SignalResult<Self> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    /// Suggest movies matching a free-text description.
    ///
    /// Returns the raw model text; the prompt imposes the strict
    /// `<rank>. <title> (<year>) - <confidence>% - <explanation>` grammar
    /// and deviation is handled downstream by dropping the line.
    pub async fn suggest_movies(&self, description: &str) -> SignalResult<String> {
        let prompt = format!(
            "Analyze this movie description and suggest 5-7 relevant movies: \"{}\".\n\
             Return only a numbered list, one movie per line, in exactly this format:\n\
             <rank>. <title> (<year>) - <confidence>% - <one-sentence explanation>\n\
             Example: 1. Inception (2010) - 92% - A thief who steals secrets through dreams.\n\
             No other text. Exclude adult content and R-rated movies.",
            description
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt)],
            }],
        };
        self.generate(&request).await
    }

    /// Guess the movie title shown in a poster or film still.
    ///
    /// An unusable answer (the model's "unknown" sentinel, an implausibly
    /// short string) yields `Ok(None)`, not an error.
    pub async fn identify_image(&self, payload: &ImagePayload) -> SignalResult<Option<String>> {
        let prompt = "Analyze this image strictly as a movie poster or film still.\n\
                      Identify the exact official English title. Follow these rules:\n\
                      1. Respond ONLY with the movie title\n\
                      2. No punctuation or explanations\n\
                      3. If unsure, respond with 'unknown'\n\
                      4. Ignore text overlays or watermarks";

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt), Part::image(payload)],
            }],
        };

        let text = self.generate(&request).await?;
        let title = clean_model_title(&text);
        if title.is_none() {
            info!(
                raw = %text.chars().take(80).collect::<String>(),
                "Image identification produced no usable title"
            );
        }
        Ok(title)
    }

    /// Run a request through the model fallback chain.
    async fn generate(&self, request: &GeminiRequest) -> SignalResult<String> {
        let mut last_error = None;

        for model in MODELS {
            debug!(model, "Calling generative-text service");
            match self.call_model(model, request).await {
                Ok(text) => {
                    info!(model, "Generative-text call succeeded");
                    return Ok(text);
                }
                Err(e) => {
                    warn!(model, error = %e, "Generative-text model failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| SignalError::malformed("gemini", "no models configured")))
    }

    async fn call_model(&self, model: &str, request: &GeminiRequest) -> SignalResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, model, self.config.api_key
        );

        let response = self.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect::<String>();
            return Err(SignalError::api("gemini", status, body));
        }

        let parsed: GeminiResponse = response.json().await?;
        parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| SignalError::malformed("gemini", "no content in response"))
    }
}
