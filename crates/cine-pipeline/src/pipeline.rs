//! The match pipeline: signal producers feeding one shared
//! reconciliation stage, followed by metadata verification.
//!
//! Three entry points map to the three named strategies:
//! - description text -> strict-parse
//! - reverse image search -> frequency vote
//! - vision labels -> best-guess
//!
//! `identify_from_image` chains them: vote first, then vision, then the
//! generative-image guess, mirroring the product's fallback behavior.

use tracing::{debug, info};

use cine_match::{extract_title, strict_parse, vote};
use cine_models::{Candidate, MatchStrategy, ReconciledMatch, VerifiedMovie};
use cine_signals::{
    GeminiClient, ImagePayload, ReverseImageClient, SearchItem, VisionAnnotations, VisionClient,
};
use cine_tmdb::TmdbClient;

use crate::config::{MatchPolicy, PipelineConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::verify::verify_matches;

/// Confidence attached to a generative-image title guess, which arrives
/// without a score of its own.
const IMAGE_GUESS_CONFIDENCE: u8 = 60;

/// The movie-identification pipeline.
///
/// Owns one client per collaborator; all of them are injected through
/// [`PipelineConfig`] rather than constructed from ambient globals.
pub struct MatchPipeline {
    tmdb: TmdbClient,
    gemini: GeminiClient,
    reverse_image: ReverseImageClient,
    vision: VisionClient,
    policy: MatchPolicy,
}

impl MatchPipeline {
    /// Wire up the pipeline from configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            tmdb: TmdbClient::new(config.tmdb),
            gemini: GeminiClient::new(config.gemini),
            reverse_image: ReverseImageClient::new(config.reverse_image),
            vision: VisionClient::new(config.vision),
            policy: config.policy,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        Ok(Self::new(PipelineConfig::from_env()?))
    }

    pub fn tmdb(&self) -> &TmdbClient {
        &self.tmdb
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Recommend movies matching a free-text description.
    ///
    /// Every grammar-conforming line of the model's answer becomes its own
    /// verification candidate, preserving the model's ranking order. A
    /// candidate that fails verification shortens the list; it never
    /// aborts the batch.
    pub async fn recommend_from_description(
        &self,
        description: &str,
    ) -> PipelineResult<Vec<VerifiedMovie>> {
        let description = description.trim();
        if description.is_empty() {
            return Err(PipelineError::validation("description must not be empty"));
        }

        let text = self.gemini.suggest_movies(description).await?;
        let matches = strict_parse(&text);
        if matches.is_empty() {
            return Err(PipelineError::no_candidate(
                "the description produced no recommendations; try more specific wording",
            ));
        }

        info!(candidates = matches.len(), "Verifying description matches");
        Ok(verify_matches(&self.tmdb, &matches, self.policy.popularity_floor).await)
    }

    /// Identify the movie shown in an image.
    ///
    /// Tries reverse-image voting first, then vision best-guess, then the
    /// generative-image guess; the first strategy yielding a candidate is
    /// sent to verification.
    pub async fn identify_from_image(
        &self,
        payload: &ImagePayload,
    ) -> PipelineResult<Vec<VerifiedMovie>> {
        if let Some(reconciled) = self.reverse_image_match(payload).await? {
            return Ok(self.verify_single(reconciled).await);
        }

        debug!("Reverse-image vote produced no candidate; trying vision");
        if let Some(reconciled) = self.vision_match(payload).await? {
            return Ok(self.verify_single(reconciled).await);
        }

        debug!("Vision produced no candidate; trying generative image guess");
        if let Some(reconciled) = self.gemini_image_match(payload).await? {
            return Ok(self.verify_single(reconciled).await);
        }

        Err(PipelineError::no_candidate(
            "could not read a movie title from this image; try a clearer poster or still",
        ))
    }

    /// Reverse-image strategy only: frequency vote over search fragments.
    pub async fn identify_with_vote(
        &self,
        payload: &ImagePayload,
    ) -> PipelineResult<Vec<VerifiedMovie>> {
        match self.reverse_image_match(payload).await? {
            Some(reconciled) => Ok(self.verify_single(reconciled).await),
            None => Err(PipelineError::no_candidate(
                "reverse image search found no usable title",
            )),
        }
    }

    /// Vision strategy only: best-guess over labels and entities.
    pub async fn identify_with_vision(
        &self,
        payload: &ImagePayload,
    ) -> PipelineResult<Vec<VerifiedMovie>> {
        match self.vision_match(payload).await? {
            Some(reconciled) => Ok(self.verify_single(reconciled).await),
            None => Err(PipelineError::no_candidate(
                "vision labels contained no usable title",
            )),
        }
    }

    /// Generative-image strategy only: single title guess.
    pub async fn identify_with_gemini(
        &self,
        payload: &ImagePayload,
    ) -> PipelineResult<Vec<VerifiedMovie>> {
        match self.gemini_image_match(payload).await? {
            Some(reconciled) => Ok(self.verify_single(reconciled).await),
            None => Err(PipelineError::no_candidate(
                "the model could not name this movie",
            )),
        }
    }

    async fn reverse_image_match(
        &self,
        payload: &ImagePayload,
    ) -> PipelineResult<Option<ReconciledMatch>> {
        let items = self.reverse_image.search(payload).await?;
        let candidates = candidates_from_items(&items);
        debug!(
            items = items.len(),
            candidates = candidates.len(),
            "Extracted reverse-image candidates"
        );
        Ok(vote(&candidates))
    }

    async fn vision_match(
        &self,
        payload: &ImagePayload,
    ) -> PipelineResult<Option<ReconciledMatch>> {
        let annotations = self.vision.annotate(payload).await?;
        let candidates = candidates_from_annotations(&annotations);
        debug!(candidates = candidates.len(), "Collected vision candidates");
        Ok(cine_match::best_guess(&candidates))
    }

    async fn gemini_image_match(
        &self,
        payload: &ImagePayload,
    ) -> PipelineResult<Option<ReconciledMatch>> {
        let Some(title) = self.gemini.identify_image(payload).await? else {
            return Ok(None);
        };
        Ok(Some(ReconciledMatch {
            title,
            year: None,
            confidence: IMAGE_GUESS_CONFIDENCE,
            explanation: None,
            source_candidate_count: 1,
            strategy: MatchStrategy::BestGuess,
        }))
    }

    async fn verify_single(&self, reconciled: ReconciledMatch) -> Vec<VerifiedMovie> {
        verify_matches(&self.tmdb, &[reconciled], self.policy.popularity_floor).await
    }
}

/// Extract a candidate from every text field of every result item; the
/// title, snippet, and link each pass through the extractor independently.
pub fn candidates_from_items(items: &[SearchItem]) -> Vec<Candidate> {
    items
        .iter()
        .flat_map(|item| {
            [
                item.title.as_deref(),
                item.snippet.as_deref(),
                item.link.as_deref(),
            ]
        })
        .flatten()
        .filter_map(|text| {
            let extracted = extract_title(text)?;
            let mut candidate = Candidate::new(text, extracted.title);
            candidate.year = extracted.year;
            Some(candidate)
        })
        .collect()
}

/// Collect vision candidates in source priority order: best-guess labels,
/// then web entities that mention movie or film, then OCR text.
pub fn candidates_from_annotations(annotations: &VisionAnnotations) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for label in &annotations.best_guess_labels {
        candidates.push(Candidate::new(label.clone(), label.clone()));
    }

    for entity in &annotations.web_entities {
        if let Some(description) = &entity.description {
            let lower = description.to_lowercase();
            if lower.contains("movie") || lower.contains("film") {
                candidates.push(Candidate::new(description.clone(), description.clone()));
            }
        }
    }

    for text in &annotations.text_annotations {
        candidates.push(Candidate::new(text.clone(), text.clone()));
    }

    candidates
}
