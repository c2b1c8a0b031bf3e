//! Metadata verification of reconciled matches.
//!
//! Each candidate is confirmed independently against the metadata
//! service's title search. One candidate failing (transport error, no
//! acceptable result) drops that candidate with a warning and never aborts
//! its siblings. Output order mirrors input order; there is no re-sort by
//! popularity.

use futures::future::join_all;
use tracing::{debug, warn};

use cine_models::{ReconciledMatch, VerifiedMovie};
use cine_tmdb::{MovieSummary, TmdbClient};

/// Verify a batch of matches concurrently, preserving input order.
pub async fn verify_matches(
    tmdb: &TmdbClient,
    matches: &[ReconciledMatch],
    popularity_floor: f64,
) -> Vec<VerifiedMovie> {
    let futures: Vec<_> = matches
        .iter()
        .map(|m| verify_one(tmdb, m, popularity_floor))
        .collect();

    join_all(futures).await.into_iter().flatten().collect()
}

/// Verify a single match; `None` means "candidate dropped".
pub async fn verify_one(
    tmdb: &TmdbClient,
    candidate: &ReconciledMatch,
    popularity_floor: f64,
) -> Option<VerifiedMovie> {
    let results = match tmdb.search_movies(&candidate.title).await {
        Ok(results) => results,
        Err(e) => {
            warn!(title = %candidate.title, error = %e, "Verification lookup failed; dropping candidate");
            return None;
        }
    };

    if results.is_empty() {
        debug!(title = %candidate.title, "No metadata results; dropping candidate");
        return None;
    }

    let selected = select_result(candidate, &results);

    if !is_acceptable(selected, popularity_floor) {
        debug!(
            title = %candidate.title,
            selected = %selected.title,
            adult = selected.adult,
            popularity = selected.popularity,
            "Selected result rejected by verification policy"
        );
        return None;
    }

    Some(VerifiedMovie {
        id: selected.id,
        title: selected.title.clone(),
        poster_path: selected.poster_path.clone(),
        release_date: selected.release_date.clone(),
        overview: selected.overview.clone(),
        popularity: selected.popularity,
        adult: selected.adult,
        confidence: candidate.confidence,
        explanation: candidate.explanation.clone(),
        strategy: candidate.strategy,
    })
}

/// Prefer the first result whose title matches case-insensitively and,
/// when the candidate carries a year hint, whose release year equals it;
/// otherwise the service's first result.
fn select_result<'a>(
    candidate: &ReconciledMatch,
    results: &'a [MovieSummary],
) -> &'a MovieSummary {
    results
        .iter()
        .find(|r| {
            let title_matches = r.title.eq_ignore_ascii_case(&candidate.title);
            let year_matches = match (candidate.year, r.release_year()) {
                (Some(wanted), Some(actual)) => wanted == actual,
                (Some(_), None) => false,
                (None, _) => true,
            };
            title_matches && year_matches
        })
        .unwrap_or(&results[0])
}

/// Uniform acceptance policy: never adult, must have a poster, and must
/// exceed the popularity floor.
fn is_acceptable(result: &MovieSummary, popularity_floor: f64) -> bool {
    !result.adult && result.poster_path.is_some() && result.popularity > popularity_floor
}
