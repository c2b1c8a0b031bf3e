//! Pipeline configuration.

use std::time::Duration;

use cine_signals::{GeminiConfig, ReverseImageConfig, VisionConfig};
use cine_tmdb::TmdbConfig;

use crate::error::PipelineResult;

/// Policy values governing reconciliation and verification.
#[derive(Debug, Clone)]
pub struct MatchPolicy {
    /// Verified results must exceed this popularity. The canonical value
    /// is 1.0 across all call sites.
    pub popularity_floor: f64,
    /// Bounded retry count for the random-movie draw.
    pub random_max_attempts: u32,
    /// Random pages are drawn from 1..=this.
    pub random_page_span: u32,
    /// Quiet period before a live-suggestion query fires.
    pub suggest_debounce: Duration,
    /// Queries shorter than this are ignored.
    pub suggest_min_chars: usize,
    /// Suggestion list cap.
    pub max_suggestions: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            popularity_floor: 1.0,
            random_max_attempts: 3,
            random_page_span: 20,
            suggest_debounce: Duration::from_millis(300),
            suggest_min_chars: 3,
            max_suggestions: 5,
        }
    }
}

/// Full pipeline configuration: one config per collaborator plus policy.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub tmdb: TmdbConfig,
    pub gemini: GeminiConfig,
    pub reverse_image: ReverseImageConfig,
    pub vision: VisionConfig,
    pub policy: MatchPolicy,
}

impl PipelineConfig {
    /// Create config from environment variables.
    ///
    /// Requires `TMDB_API_KEY`, `GEMINI_API_KEY`, `GOOGLE_API_KEY`,
    /// `GOOGLE_CX`, and `VISION_API_KEY`. A `.env` file is honored when
    /// present.
    pub fn from_env() -> PipelineResult<Self> {
        dotenvy::dotenv().ok();
        Ok(Self {
            tmdb: TmdbConfig::from_env()?,
            gemini: GeminiConfig::from_env()?,
            reverse_image: ReverseImageConfig::from_env()?,
            vision: VisionConfig::from_env()?,
            policy: MatchPolicy::default(),
        })
    }

    /// Override the policy values.
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }
}
