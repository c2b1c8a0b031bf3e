//! Candidate reconciliation strategies.
//!
//! Three strategies turn extracted candidates into matches, one per signal
//! producer:
//! - [`vote`] — frequency voting over reverse-image-search fragments
//! - [`strict_parse`] — one match per grammar-conforming generative-text line
//! - [`best_guess`] — shape-heuristic pick over vision labels
//!
//! None of them panic; no usable candidate yields `None` or an empty list,
//! which callers treat as "no recommendation" rather than an error.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use cine_models::{Candidate, MatchStrategy, ReconciledMatch};

use crate::grammar::parse_ranked_list;

/// Confidence assigned when a producer gave none and voting is degenerate.
const DEFAULT_CONFIDENCE: u8 = 50;

/// Frequency voting: the most common title wins, ties break first-seen.
///
/// Confidence defaults to the winner's vote share when the winning
/// candidates carried no hint of their own.
pub fn vote(candidates: &[Candidate]) -> Option<ReconciledMatch> {
    if candidates.is_empty() {
        return None;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for candidate in candidates {
        *counts.entry(candidate.title.as_str()).or_insert(0) += 1;
    }

    // Scan in first-seen order so ties keep the earliest title.
    let mut winner: Option<(&Candidate, usize)> = None;
    let mut seen: HashSet<&str> = HashSet::new();
    for candidate in candidates {
        if !seen.insert(candidate.title.as_str()) {
            continue;
        }
        let count = counts[candidate.title.as_str()];
        if winner.map_or(true, |(_, best)| count > best) {
            winner = Some((candidate, count));
        }
    }

    let (candidate, count) = winner?;
    let share = (count * 100 / candidates.len()).min(100) as u8;
    debug!(
        title = %candidate.title,
        votes = count,
        total = candidates.len(),
        "Frequency vote winner"
    );

    Some(ReconciledMatch {
        title: candidate.title.clone(),
        year: candidate.year,
        confidence: candidate.confidence_hint.unwrap_or(share.max(1)),
        explanation: candidate.explanation.clone(),
        source_candidate_count: count,
        strategy: MatchStrategy::Vote,
    })
}

/// Strict parse: every grammar-conforming line becomes its own match,
/// confidence and explanation taken verbatim, model order preserved.
pub fn strict_parse(text: &str) -> Vec<ReconciledMatch> {
    parse_ranked_list(text)
        .into_iter()
        .map(|line| ReconciledMatch {
            title: line.title,
            year: Some(line.year),
            confidence: line.confidence,
            explanation: Some(line.explanation),
            source_candidate_count: 1,
            strategy: MatchStrategy::StrictParse,
        })
        .collect()
}

/// "Looks like a proper title" shape: a capitalized word sequence.
static TITLE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]+)(?:\s+[A-Z][a-z]+)*").unwrap());

/// Best-guess selection over candidates ordered by source priority.
///
/// The first candidate reaching the highest shape score wins; ties keep
/// the earliest. Candidates matching no shape at all are never selected.
pub fn best_guess(candidates: &[Candidate]) -> Option<ReconciledMatch> {
    let mut best: Option<(&Candidate, u32)> = None;
    for candidate in candidates {
        let score = title_shape_score(&candidate.title);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((candidate, score));
        }
    }

    let (candidate, score) = best?;
    debug!(title = %candidate.title, score, "Best-guess selection");

    Some(ReconciledMatch {
        title: candidate.title.clone(),
        year: candidate.year,
        confidence: candidate.confidence_hint.unwrap_or(DEFAULT_CONFIDENCE),
        explanation: candidate.explanation.clone(),
        source_candidate_count: 1,
        strategy: MatchStrategy::BestGuess,
    })
}

fn title_shape_score(text: &str) -> u32 {
    if TITLE_SHAPE.is_match(text) {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str) -> Candidate {
        Candidate::new(title, title)
    }

    #[test]
    fn test_vote_returns_mode() {
        let candidates = vec![
            candidate("Inception"),
            candidate("Tenet"),
            candidate("Inception"),
            candidate("Inception"),
        ];
        let m = vote(&candidates).unwrap();
        assert_eq!(m.title, "Inception");
        assert_eq!(m.source_candidate_count, 3);
        assert_eq!(m.strategy, MatchStrategy::Vote);
        assert_eq!(m.confidence, 75);
    }

    #[test]
    fn test_vote_tie_keeps_first_seen() {
        let candidates = vec![
            candidate("Tenet"),
            candidate("Inception"),
            candidate("Inception"),
            candidate("Tenet"),
        ];
        let m = vote(&candidates).unwrap();
        assert_eq!(m.title, "Tenet");
    }

    #[test]
    fn test_vote_empty_is_none() {
        assert!(vote(&[]).is_none());
    }

    #[test]
    fn test_vote_carries_year() {
        let candidates = vec![candidate("Heat").with_year(1995), candidate("Heat")];
        let m = vote(&candidates).unwrap();
        assert_eq!(m.year, Some(1995));
    }

    #[test]
    fn test_strict_parse_verbatim_fields() {
        let matches =
            strict_parse("1. Inception (2010) - 92% - A thief who steals secrets\ngarbage line");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Inception");
        assert_eq!(matches[0].year, Some(2010));
        assert_eq!(matches[0].confidence, 92);
        assert_eq!(
            matches[0].explanation.as_deref(),
            Some("A thief who steals secrets")
        );
        assert_eq!(matches[0].strategy, MatchStrategy::StrictParse);
    }

    #[test]
    fn test_strict_parse_preserves_model_order() {
        let matches = strict_parse(
            "1. Arrival (2016) - 90% - first contact\n2. Her (2013) - 70% - lonely writer",
        );
        assert_eq!(matches[0].title, "Arrival");
        assert_eq!(matches[1].title, "Her");
    }

    #[test]
    fn test_best_guess_picks_first_shaped_candidate() {
        let candidates = vec![
            candidate("asdf 1234"),
            candidate("The Godfather"),
            candidate("Pulp Fiction"),
        ];
        let m = best_guess(&candidates).unwrap();
        assert_eq!(m.title, "The Godfather");
        assert_eq!(m.strategy, MatchStrategy::BestGuess);
    }

    #[test]
    fn test_best_guess_no_shaped_candidate_is_none() {
        let candidates = vec![candidate("lowercase only"), candidate("123 456")];
        assert!(best_guess(&candidates).is_none());
    }

    #[test]
    fn test_best_guess_empty_is_none() {
        assert!(best_guess(&[]).is_none());
    }
}
