//! Answered-slot history and bomb budget.

use qs_core::Difficulty;
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// How many bombs a session may use, and how many have gone off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombBudget {
    allowed: u32,
    used: u32,
}

impl BombBudget {
    /// Create a budget. Negative counts are rejected; counts above
    /// `u32::MAX` saturate.
    pub fn new(allowed: i64) -> SessionResult<Self> {
        if allowed < 0 {
            return Err(SessionError::InvalidBombBudget(allowed));
        }
        let allowed = u32::try_from(allowed).unwrap_or(u32::MAX);
        Ok(Self { allowed, used: 0 })
    }

    /// Configured number of bombs.
    pub fn allowed(&self) -> u32 {
        self.allowed
    }

    /// Bombs recorded so far.
    pub fn used(&self) -> u32 {
        self.used
    }

    /// Bombs still available. Never negative.
    pub fn remaining(&self) -> u32 {
        self.allowed - self.used
    }

    /// Whether another bomb may still be drawn.
    pub fn has_remaining(&self) -> bool {
        self.used < self.allowed
    }

    fn spend(&mut self) -> SessionResult<()> {
        if !self.has_remaining() {
            return Err(SessionError::BombBudgetExhausted {
                allowed: self.allowed,
            });
        }
        self.used += 1;
        Ok(())
    }
}

/// One played slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredRecord {
    /// Theme of the slot.
    pub theme: String,
    /// Difficulty of the slot.
    pub difficulty: Difficulty,
    /// Index of the question drawn within the slot.
    pub question_index: usize,
    /// Whether the draw was a bomb.
    pub was_bomb: bool,
}

/// Append-only history of played slots plus the bomb budget.
///
/// At most one record exists per (theme, difficulty) and `used <= allowed`
/// holds after every call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionTracker {
    records: Vec<AnsweredRecord>,
    budget: BombBudget,
}

impl SessionTracker {
    /// Create a tracker with no history.
    pub fn new(budget: BombBudget) -> Self {
        Self {
            records: Vec::new(),
            budget,
        }
    }

    /// Record a played slot, spending a bomb if it was one.
    pub fn record_answer(
        &mut self,
        theme: &str,
        difficulty: Difficulty,
        question_index: usize,
        was_bomb: bool,
    ) -> SessionResult<&AnsweredRecord> {
        self.check_record(theme, difficulty, was_bomb)?;
        if was_bomb {
            self.budget.spend()?;
        }
        self.records.push(AnsweredRecord {
            theme: theme.to_string(),
            difficulty,
            question_index,
            was_bomb,
        });
        Ok(&self.records[self.records.len() - 1])
    }

    /// Check that [`SessionTracker::record_answer`] would accept a record,
    /// without making it.
    pub fn check_record(
        &self,
        theme: &str,
        difficulty: Difficulty,
        was_bomb: bool,
    ) -> SessionResult<()> {
        if self.is_answered(theme, difficulty) {
            return Err(SessionError::DuplicateRecord {
                theme: theme.to_string(),
                difficulty,
            });
        }
        if was_bomb && !self.budget.has_remaining() {
            return Err(SessionError::BombBudgetExhausted {
                allowed: self.budget.allowed,
            });
        }
        Ok(())
    }

    /// Whether the slot has been played.
    pub fn is_answered(&self, theme: &str, difficulty: Difficulty) -> bool {
        self.find(theme, difficulty).is_some()
    }

    /// Whether the slot was played as a bomb.
    pub fn was_bomb(&self, theme: &str, difficulty: Difficulty) -> bool {
        self.find(theme, difficulty).is_some_and(|r| r.was_bomb)
    }

    /// Bombs still available.
    pub fn remaining_bombs(&self) -> u32 {
        self.budget.remaining()
    }

    /// The bomb budget.
    pub fn budget(&self) -> &BombBudget {
        &self.budget
    }

    /// All records in the order they were made.
    pub fn records(&self) -> &[AnsweredRecord] {
        &self.records
    }

    fn find(&self, theme: &str, difficulty: Difficulty) -> Option<&AnsweredRecord> {
        self.records
            .iter()
            .find(|r| r.theme == theme && r.difficulty == difficulty)
    }
}
