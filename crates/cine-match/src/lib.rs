//! Title extraction and reconciliation logic.
//!
//! This crate turns noisy signal fragments (search-result titles, snippets,
//! links, vision labels, generative-text output) into clean movie
//! candidates and reconciles them into confident matches:
//! - Pattern-rule extraction of titles from known noisy formats
//! - Strict line-grammar parsing of generative-text recommendation lists
//! - Frequency voting, strict-parse, and best-guess reconciliation
//!
//! Everything here is pure string logic; no IO, no panics on malformed
//! input. Absence of a usable candidate is a normal outcome, not an error.

pub mod extract;
pub mod grammar;
pub mod reconcile;

pub use extract::{clean_model_title, extract_title, ExtractedTitle};
pub use grammar::{parse_ranked_line, parse_ranked_list, RankedLine};
pub use reconcile::{best_guess, strict_parse, vote};
