//! Pipeline error taxonomy.
//!
//! Transport failures for an individual candidate are handled inside
//! verification (the candidate is dropped, siblings proceed); the variants
//! here are the failures a caller actually sees.

use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Caller input rejected before any network call.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The pipeline produced zero usable titles; terminal for this search.
    #[error("No candidates found: {0}")]
    NoCandidate(String),

    /// A lookup verified with zero acceptable results.
    #[error("No match: {0}")]
    NoMatch(String),

    #[error("Metadata service error: {0}")]
    Tmdb(#[from] cine_tmdb::TmdbError),

    #[error("Signal service error: {0}")]
    Signal(#[from] cine_signals::SignalError),
}

impl PipelineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn no_candidate(msg: impl Into<String>) -> Self {
        Self::NoCandidate(msg.into())
    }

    pub fn no_match(msg: impl Into<String>) -> Self {
        Self::NoMatch(msg.into())
    }

    /// Whether the message is safe and useful to show directly to a user.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            PipelineError::Validation(_)
                | PipelineError::NoCandidate(_)
                | PipelineError::NoMatch(_)
        )
    }
}
