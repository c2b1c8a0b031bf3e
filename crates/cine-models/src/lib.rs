//! Shared data models for the CinePredict match pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Extracted title candidates and reconciled matches
//! - Verified movies with canonical metadata attached
//! - Reconciliation strategy variants
//! - Mood-to-genre mappings for discovery flows

pub mod candidate;
pub mod mood;

// Re-export common types
pub use candidate::{Candidate, MatchStrategy, ReconciledMatch, VerifiedMovie};
pub use mood::Mood;
