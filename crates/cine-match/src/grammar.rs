//! Strict line grammar for generative-text recommendations.
//!
//! The description flow prompts the generative-text service for a numbered
//! list, one movie per line:
//!
//! ```text
//! 1. Inception (2010) - 92% - A thief who steals secrets through dreams
//! ```
//!
//! Lines that deviate from the grammar are discarded silently; the pipeline
//! proceeds with whatever parsed.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// `<rank>. <title> (<year>) - <confidence>% - <explanation>`
static RANKED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\.\s+(.+?)\s+\((\d{4})\)\s*-\s*(\d{1,3})%\s*-\s*(.+?)\s*$").unwrap()
});

/// One successfully parsed recommendation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedLine {
    pub rank: u32,
    pub title: String,
    pub year: i32,
    /// 0-100, clamped
    pub confidence: u8,
    pub explanation: String,
}

/// Parse a single line against the strict grammar.
///
/// Returns `None` for any deviation; a dropped line is a normal outcome.
pub fn parse_ranked_line(line: &str) -> Option<RankedLine> {
    let caps = RANKED_LINE.captures(line)?;

    let rank = caps[1].parse().ok()?;
    let year = caps[3].parse().ok()?;
    let confidence: u32 = caps[4].parse().ok()?;

    Some(RankedLine {
        rank,
        title: caps[2].trim().to_string(),
        year,
        confidence: confidence.min(100) as u8,
        explanation: caps[5].trim().to_string(),
    })
}

/// Parse a whole model response, preserving the model's own ordering.
///
/// Non-matching lines (blank lines, prose preambles, malformed entries)
/// are dropped without affecting their siblings.
pub fn parse_ranked_list(text: &str) -> Vec<RankedLine> {
    let parsed: Vec<RankedLine> = text.lines().filter_map(parse_ranked_line).collect();
    debug!(
        total_lines = text.lines().count(),
        parsed = parsed.len(),
        "Parsed ranked recommendation list"
    );
    parsed
}
