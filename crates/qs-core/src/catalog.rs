use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::{CoreError, CoreResult};
use crate::question::Question;

/// A (theme, difficulty) pair: the unit a moderator picks from the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    /// Theme name.
    pub theme: String,
    /// Difficulty tier within the theme.
    pub difficulty: Difficulty,
}

impl Slot {
    /// Create a slot.
    pub fn new(theme: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            theme: theme.into(),
            difficulty,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.theme, self.difficulty)
    }
}

/// A named theme with questions grouped by difficulty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name, unique within a catalog.
    pub name: String,
    questions: BTreeMap<Difficulty, Vec<Question>>,
}

impl Theme {
    /// Create a theme with every tier empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            questions: BTreeMap::new(),
        }
    }

    /// Builder-style: set the questions of one tier.
    pub fn with_questions(mut self, difficulty: Difficulty, questions: Vec<Question>) -> Self {
        self.set_questions(difficulty, questions);
        self
    }

    /// Replace the questions of one tier.
    pub fn set_questions(&mut self, difficulty: Difficulty, questions: Vec<Question>) {
        if questions.is_empty() {
            self.questions.remove(&difficulty);
        } else {
            self.questions.insert(difficulty, questions);
        }
    }

    /// The questions of one tier, possibly empty.
    pub fn questions(&self, difficulty: Difficulty) -> &[Question] {
        self.questions
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of questions across all tiers.
    pub fn question_count(&self) -> usize {
        self.questions.values().map(Vec::len).sum()
    }
}

/// The immutable quiz bank for a session: an ordered list of themes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    themes: Vec<Theme>,
}

impl Catalog {
    /// Create a catalog from themes, keeping their order. Theme names must
    /// be unique.
    pub fn new(themes: Vec<Theme>) -> CoreResult<Self> {
        for (i, t) in themes.iter().enumerate() {
            if themes[..i].iter().any(|other| other.name == t.name) {
                return Err(CoreError::DuplicateTheme(t.name.clone()));
            }
        }
        Ok(Self { themes })
    }

    /// All themes in document order.
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Theme names in document order.
    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }

    /// Find a theme by exact name.
    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    /// Find a theme by name, ignoring case.
    pub fn find_theme(&self, name: &str) -> Option<&Theme> {
        self.theme(name).or_else(|| {
            let lower = name.to_lowercase();
            self.themes.iter().find(|t| t.name.to_lowercase() == lower)
        })
    }

    /// The questions of a slot, or `None` if the theme does not exist.
    pub fn slot(&self, theme: &str, difficulty: Difficulty) -> Option<&[Question]> {
        self.theme(theme).map(|t| t.questions(difficulty))
    }

    /// Every slot that holds at least one question, in board order.
    pub fn non_empty_slots(&self) -> Vec<Slot> {
        self.themes
            .iter()
            .flat_map(|t| {
                Difficulty::ALL
                    .into_iter()
                    .filter(|d| !t.questions(*d).is_empty())
                    .map(|d| Slot::new(t.name.clone(), d))
            })
            .collect()
    }

    /// Total number of questions in the catalog.
    pub fn question_count(&self) -> usize {
        self.themes.iter().map(Theme::question_count).sum()
    }

    /// Whether the catalog has no themes.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
