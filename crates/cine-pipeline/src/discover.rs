//! Discovery flows: random draws, mood browsing, detail bundles.

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::{debug, warn};

use cine_models::Mood;
use cine_tmdb::{CastMember, DiscoverPage, MovieDetails, MovieSummary, WatchProvider};

use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::MatchPipeline;

/// Cast members surfaced in a detail bundle.
const BUNDLE_CAST_LIMIT: usize = 5;

/// Everything the detail view needs for one movie.
#[derive(Debug, Clone)]
pub struct MovieBundle {
    pub details: MovieDetails,
    pub cast: Vec<CastMember>,
    pub trailer_url: Option<String>,
    pub providers: Vec<WatchProvider>,
}

impl MatchPipeline {
    /// Draw a random eligible popular movie.
    ///
    /// Each attempt draws a fresh random page; a page with no eligible
    /// entries (non-adult, poster present, above the popularity floor)
    /// costs one attempt. Gives up after the configured attempt budget.
    pub async fn random_movie(&self) -> PipelineResult<MovieSummary> {
        let policy = self.policy();

        for attempt in 1..=policy.random_max_attempts {
            // ThreadRng is not Send; keep it out of scope across awaits.
            let page = rand::rng().random_range(1..=policy.random_page_span);
            debug!(attempt, page, "Random movie draw");

            let candidates: Vec<MovieSummary> = match self.tmdb().popular(page).await {
                Ok(listing) => listing
                    .results
                    .into_iter()
                    .filter(|m| {
                        !m.adult
                            && m.poster_path.is_some()
                            && m.popularity > policy.popularity_floor
                    })
                    .collect(),
                Err(e) => {
                    warn!(attempt, error = %e, "Popular page fetch failed");
                    continue;
                }
            };

            if let Some(pick) = candidates.choose(&mut rand::rng()) {
                return Ok(pick.clone());
            }
            debug!(attempt, "Drawn page had no eligible movies");
        }

        Err(PipelineError::no_candidate(
            "could not find a movie to recommend right now; try again in a moment",
        ))
    }

    /// Movies matching a mood, filtered to displayable entries.
    pub async fn movies_for_mood(&self, mood: Mood, page: u32) -> PipelineResult<DiscoverPage> {
        let mut listing = self.tmdb().discover_by_genre(mood.genre_ids(), page).await?;
        listing
            .results
            .retain(|m| !m.adult && m.poster_path.is_some());
        Ok(listing)
    }

    /// Movies similar to the given one, filtered to displayable entries.
    pub async fn similar_movies(&self, id: u64) -> PipelineResult<Vec<MovieSummary>> {
        let mut results = self.tmdb().similar_movies(id).await?;
        results.retain(|m| !m.adult && m.poster_path.is_some());
        Ok(results)
    }

    /// Fetch the full detail bundle for one movie.
    ///
    /// Adult-flagged records are rejected here, uniformly with the
    /// verification boundary.
    pub async fn movie_bundle(&self, id: u64) -> PipelineResult<MovieBundle> {
        let details = self.tmdb().movie_details(id).await?;
        if details.adult {
            return Err(PipelineError::no_match("this title is not available"));
        }

        let mut cast = self.tmdb().movie_credits(id).await?;
        cast.truncate(BUNDLE_CAST_LIMIT);

        let videos = self.tmdb().movie_videos(id).await?;
        let trailer_url = cine_tmdb::TmdbClient::trailer_url(&videos);

        let providers = self.tmdb().watch_providers(id, "US").await?;

        Ok(MovieBundle {
            details,
            cast,
            trailer_url,
            providers,
        })
    }
}
