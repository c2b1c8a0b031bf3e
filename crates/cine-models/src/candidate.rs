//! Candidate and match models.
//!
//! A search flows through three shapes: a [`Candidate`] extracted from one
//! noisy signal fragment, a [`ReconciledMatch`] built from one or more
//! candidates by a reconciliation strategy, and a [`VerifiedMovie`] once the
//! metadata service confirmed the identity. All three are request-scoped
//! and immutable once constructed.

use serde::{Deserialize, Serialize};

/// Reconciliation strategy that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Frequency voting over reverse-image-search fragments.
    Vote,
    /// Strict line-grammar parse of generative-text output.
    StrictParse,
    /// Shape-heuristic selection over vision labels.
    BestGuess,
}

/// An unverified title extracted from a single signal fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The fragment the title was extracted from
    pub raw_text: String,

    /// Cleaned title string
    pub title: String,

    /// Release year, when the fragment carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Confidence hint from the producer (0-100), when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_hint: Option<u8>,

    /// Producer-supplied explanation, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Candidate {
    /// Create a bare candidate carrying only an extracted title.
    pub fn new(raw_text: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            title: title.into(),
            year: None,
            confidence_hint: None,
            explanation: None,
        }
    }

    /// Attach a release year hint.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// A candidate after reconciliation, carrying a confidence score.
///
/// Invariants: `confidence` is always present (defaulted when the producer
/// gave none) and `title` is non-empty, trimmed of quoting artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledMatch {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Confidence score, 0-100
    pub confidence: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Number of candidates that contributed to this match
    pub source_candidate_count: usize,

    /// Strategy that produced this match
    pub strategy: MatchStrategy,
}

/// A reconciled match confirmed against the metadata service.
///
/// Never constructed for adult-flagged or zero-result lookups; those are
/// filtered out at the verification boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedMovie {
    /// Canonical movie ID in the metadata service
    pub id: u64,

    /// Canonical title from the metadata service
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    pub popularity: f64,

    pub adult: bool,

    /// Confidence carried over from reconciliation, 0-100
    pub confidence: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Strategy that produced the underlying match
    pub strategy: MatchStrategy,
}

impl VerifiedMovie {
    /// Release year parsed from the canonical release date.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_builder() {
        let c = Candidate::new("Inception (2010) still", "Inception").with_year(2010);
        assert_eq!(c.title, "Inception");
        assert_eq!(c.year, Some(2010));
        assert!(c.confidence_hint.is_none());
    }

    #[test]
    fn test_release_year() {
        let movie = VerifiedMovie {
            id: 27205,
            title: "Inception".to_string(),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: Some("2010-07-15".to_string()),
            overview: None,
            popularity: 80.5,
            adult: false,
            confidence: 92,
            explanation: None,
            strategy: MatchStrategy::StrictParse,
        };
        assert_eq!(movie.release_year(), Some(2010));
    }

    #[test]
    fn test_release_year_missing() {
        let movie = VerifiedMovie {
            id: 1,
            title: "Untitled".to_string(),
            poster_path: None,
            release_date: None,
            overview: None,
            popularity: 2.0,
            adult: false,
            confidence: 50,
            explanation: None,
            strategy: MatchStrategy::Vote,
        };
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_strategy_serde() {
        let json = serde_json::to_string(&MatchStrategy::BestGuess).unwrap();
        assert_eq!(json, "\"best_guess\"");
    }
}
