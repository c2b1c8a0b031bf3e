//! Match pipeline orchestration.
//!
//! Wires the signal producers, the extraction/reconciliation core, and the
//! metadata verifier into the flows the frontend calls:
//! - Description-based recommendations (strict-parse strategy)
//! - Image identification (vote, vision best-guess, generative fallback)
//! - Debounced live title suggestions
//! - Random draws, mood browsing, similar titles, and detail bundles
//!
//! Everything is request-scoped; clients are injected via
//! [`PipelineConfig`] and there is no shared mutable state between
//! searches.

pub mod config;
pub mod discover;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod suggest;
pub mod verify;

pub use config::{MatchPolicy, PipelineConfig};
pub use discover::MovieBundle;
pub use error::{PipelineError, PipelineResult};
pub use logging::init_tracing;
pub use pipeline::MatchPipeline;
pub use suggest::SuggestionDebouncer;
pub use verify::{verify_matches, verify_one};
