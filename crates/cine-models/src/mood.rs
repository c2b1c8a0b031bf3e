//! Mood-to-genre mappings for discovery flows.

use serde::{Deserialize, Serialize};

/// A viewer mood, mapped to metadata-service genre IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Horror
    Tense,
    /// Comedy
    LightHearted,
    /// Romance
    Passionate,
    /// Action
    Thrilling,
    /// Drama
    Emotional,
    /// Science fiction
    Imaginative,
    /// Fantasy
    Magical,
    /// Mystery
    Intriguing,
    /// Thriller
    Nervous,
}

impl Mood {
    /// Genre IDs in the metadata service's taxonomy.
    pub fn genre_ids(&self) -> &'static [u32] {
        match self {
            Mood::Tense => &[27],
            Mood::LightHearted => &[35],
            Mood::Passionate => &[10749],
            Mood::Thrilling => &[28],
            Mood::Emotional => &[18],
            Mood::Imaginative => &[878],
            Mood::Magical => &[14],
            Mood::Intriguing => &[9648],
            Mood::Nervous => &[53],
        }
    }

    /// All moods, in display order.
    pub fn all() -> &'static [Mood] {
        &[
            Mood::Tense,
            Mood::LightHearted,
            Mood::Passionate,
            Mood::Thrilling,
            Mood::Emotional,
            Mood::Imaginative,
            Mood::Magical,
            Mood::Intriguing,
            Mood::Nervous,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_ids() {
        assert_eq!(Mood::Tense.genre_ids(), &[27]);
        assert_eq!(Mood::Imaginative.genre_ids(), &[878]);
    }

    #[test]
    fn test_all_moods_have_genres() {
        for mood in Mood::all() {
            assert!(!mood.genre_ids().is_empty());
        }
    }
}
