//! Title extraction from noisy signal fragments.
//!
//! Reverse-image-search results and vision labels bury movie titles in
//! known noisy formats ("Inception" screenshot, screenshot from Heat
//! (1995), ...). An ordered list of pattern rules tries each format in
//! priority order; the first rule that matches wins. Fragments matching no
//! rule fall back to the first separator-delimited segment.

use std::sync::LazyLock;

use regex::Regex;

/// Pattern rules in priority order. Group 1 is always the title; rules
/// that know the year capture it as group 2.
static TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // "TITLE" screenshot
        Regex::new(r#"(?i)"([^"]+)"\s+screenshot"#).unwrap(),
        // screenshot from TITLE (YEAR)
        Regex::new(r"(?i)screenshot from (.+?)\s*\((\d{4})\)").unwrap(),
        // TITLE movie|film clip|scene
        Regex::new(r"(?i)(.+?)\s+(?:movie|film)\s+(?:clip|scene)").unwrap(),
        // TITLE (YEAR), or TITLE with a trailing scene/screenshot marker
        Regex::new(r"(?i)^(.*?)(?:\s*\((\d{4})\)|\s*-?\s*scene|screenshot)").unwrap(),
    ]
});

/// A title pulled out of one raw fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTitle {
    pub title: String,
    pub year: Option<i32>,
}

/// Extract a movie title from a noisy text fragment.
///
/// Applies the pattern rules in priority order; the first matching rule's
/// capture group is trimmed and returned. If no rule matches, the fragment
/// is split on common separator glyphs and the first segment is returned.
/// Empty or whitespace-only results are `None`, never an empty string.
pub fn extract_title(text: &str) -> Option<ExtractedTitle> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for pattern in TITLE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let title = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            if title.is_empty() {
                return None;
            }
            let year = caps.get(2).and_then(|m| m.as_str().parse().ok());
            return Some(ExtractedTitle {
                title: title.to_string(),
                year,
            });
        }
    }

    // Fallback: first segment before a common separator glyph
    let first = text
        .split(['•', '|', '-', '—', '·'])
        .next()
        .unwrap_or("")
        .trim();
    if first.is_empty() {
        return None;
    }
    Some(ExtractedTitle {
        title: first.to_string(),
        year: None,
    })
}

/// Trailing year parenthetical, e.g. `Inception (2010)`.
static TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{4}\)\s*$").unwrap());

/// Clean a title returned verbatim by a generative model.
///
/// Strips quoting artifacts and a trailing year parenthetical, then
/// rejects the model's "unknown" sentinel and implausibly short strings.
pub fn clean_model_title(raw: &str) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| *c != '"' && *c != '\'').collect();
    let cleaned = TRAILING_YEAR.replace(&cleaned, "");
    let cleaned = cleaned.trim();

    if cleaned.len() < 2 || cleaned.eq_ignore_ascii_case("unknown") {
        return None;
    }
    Some(cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_screenshot_rule() {
        let t = extract_title(r#"Amazing "Inception" screenshot in 4k"#).unwrap();
        assert_eq!(t.title, "Inception");
        assert_eq!(t.year, None);
    }

    #[test]
    fn test_screenshot_from_rule_captures_year() {
        let t = extract_title("screenshot from Heat (1995) opening").unwrap();
        assert_eq!(t.title, "Heat");
        assert_eq!(t.year, Some(1995));
    }

    #[test]
    fn test_movie_clip_rule() {
        let t = extract_title("The Matrix movie clip lobby shootout").unwrap();
        assert_eq!(t.title, "The Matrix");
    }

    #[test]
    fn test_film_scene_rule() {
        let t = extract_title("Blade Runner film scene rooftop").unwrap();
        assert_eq!(t.title, "Blade Runner");
    }

    #[test]
    fn test_generic_year_rule() {
        let t = extract_title("Arrival (2016) ending explained").unwrap();
        assert_eq!(t.title, "Arrival");
        assert_eq!(t.year, Some(2016));
    }

    #[test]
    fn test_priority_order() {
        // Both rule 1 and rule 4 could fire; rule 1 wins.
        let t = extract_title(r#""Dune" screenshot (2021)"#).unwrap();
        assert_eq!(t.title, "Dune");
    }

    #[test]
    fn test_separator_fallback() {
        let t = extract_title("Interstellar • watch online • HD").unwrap();
        assert_eq!(t.title, "Interstellar");
        assert_eq!(t.year, None);
    }

    #[test]
    fn test_pipe_fallback() {
        let t = extract_title("Whiplash | full review").unwrap();
        assert_eq!(t.title, "Whiplash");
    }

    #[test]
    fn test_empty_input_is_none() {
        assert_eq!(extract_title(""), None);
        assert_eq!(extract_title("   "), None);
    }

    #[test]
    fn test_marker_with_no_title_is_none() {
        // Rule 4 matches with an empty capture; that is "no candidate".
        assert_eq!(extract_title("screenshot gallery"), None);
    }

    #[test]
    fn test_clean_model_title() {
        assert_eq!(
            clean_model_title("\"The Dark Knight\""),
            Some("The Dark Knight".to_string())
        );
        assert_eq!(
            clean_model_title("Inception (2010)"),
            Some("Inception".to_string())
        );
        assert_eq!(clean_model_title("unknown"), None);
        assert_eq!(clean_model_title("Unknown"), None);
        assert_eq!(clean_model_title("x"), None);
        assert_eq!(clean_model_title("  "), None);
    }
}
