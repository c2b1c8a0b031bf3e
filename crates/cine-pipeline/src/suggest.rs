//! Debounced live title suggestions.
//!
//! As a user types, every keystroke submits a query; only the query still
//! current after a quiet period reaches the metadata service. A newer
//! submission supersedes an older in-flight one (last-write-wins), and
//! queries below the minimum length are ignored outright.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use cine_tmdb::{MovieSummary, TmdbClient};

use crate::config::MatchPolicy;
use crate::error::PipelineResult;

/// Debouncing front-end for suggestion lookups.
pub struct SuggestionDebouncer {
    tmdb: TmdbClient,
    policy: MatchPolicy,
    generation: AtomicU64,
}

impl SuggestionDebouncer {
    pub fn new(tmdb: TmdbClient, policy: MatchPolicy) -> Self {
        Self {
            tmdb,
            policy,
            generation: AtomicU64::new(0),
        }
    }

    /// Submit the current query text.
    ///
    /// Returns `Ok(None)` when the query was ignored (too short) or
    /// superseded by a newer submission before its quiet period elapsed;
    /// `Ok(Some(_))` carries the filtered suggestion list.
    pub async fn query(&self, query: &str) -> PipelineResult<Option<Vec<MovieSummary>>> {
        // Every submission bumps the generation so it also cancels any
        // pending older query.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = query.trim();
        if query.len() < self.policy.suggest_min_chars {
            return Ok(None);
        }

        tokio::time::sleep(self.policy.suggest_debounce).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(query, "Suggestion query superseded during quiet period");
            return Ok(None);
        }

        let results = self.tmdb.search_movies(query).await?;
        let suggestions: Vec<MovieSummary> = results
            .into_iter()
            .filter(|m| {
                !m.adult
                    && m.poster_path.is_some()
                    && m.popularity > self.policy.popularity_floor
            })
            .take(self.policy.max_suggestions)
            .collect();

        debug!(query, count = suggestions.len(), "Suggestions fetched");
        Ok(Some(suggestions))
    }
}
