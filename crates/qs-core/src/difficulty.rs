//! The closed set of difficulty tiers a theme is split into.

use serde::{Deserialize, Serialize};

/// A difficulty tier. Every theme has exactly these five tiers, any of which
/// may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    /// Document key `facil`.
    Easy,
    /// Document key `medio`.
    Medium,
    /// Document key `dificil`.
    Hard,
    /// Document key `muitodificil`.
    VeryHard,
    /// Document key `impossivel`.
    Impossible,
}

impl Difficulty {
    /// All tiers in board order, easiest first.
    pub const ALL: [Difficulty; 5] = [
        Self::Easy,
        Self::Medium,
        Self::Hard,
        Self::VeryHard,
        Self::Impossible,
    ];

    /// Parse a tier from user input or a document key.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match normalized.as_str() {
            "easy" | "facil" | "fácil" => Some(Self::Easy),
            "medium" | "medio" | "médio" => Some(Self::Medium),
            "hard" | "dificil" | "difícil" => Some(Self::Hard),
            "veryhard" | "muitodificil" | "muitodifícil" => Some(Self::VeryHard),
            "impossible" | "impossivel" | "impossível" => Some(Self::Impossible),
            _ => None,
        }
    }

    /// The key this tier uses in the quiz document.
    pub fn key(self) -> &'static str {
        match self {
            Self::Easy => "facil",
            Self::Medium => "medio",
            Self::Hard => "dificil",
            Self::VeryHard => "muitodificil",
            Self::Impossible => "impossivel",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
            Self::VeryHard => write!(f, "Very Hard"),
            Self::Impossible => write!(f, "Impossible"),
        }
    }
}
