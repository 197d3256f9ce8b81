//! Question selection with random bomb injection.
//!
//! A draw from a requested slot may be hijacked by a bomb while the budget
//! allows it. Bomb draws sample uniformly from every unplayed non-empty slot
//! of the catalog, then uniformly within that slot. Selection never touches
//! session state; the slot is only consumed when the answer is recorded.

use qs_core::{Catalog, Difficulty, Question, Slot, Theme};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};
use crate::tracker::SessionTracker;

/// The outcome of a draw: the question and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedQuestion {
    /// The drawn question.
    pub question: Question,
    /// Theme of the slot actually drawn.
    pub theme: String,
    /// Difficulty of the slot actually drawn.
    pub difficulty: Difficulty,
    /// Index of the question within its slot.
    pub question_index: usize,
    /// Whether this draw is a bomb.
    pub is_bomb: bool,
}

impl SelectedQuestion {
    /// The slot this question was drawn from.
    pub fn slot(&self) -> Slot {
        Slot::new(self.theme.clone(), self.difficulty)
    }
}

/// Draw a question for the requested slot.
///
/// Fails with [`SessionError::AlreadyAnswered`] or
/// [`SessionError::NoQuestionsAvailable`] before any randomness is used.
pub fn select_slot<R: Rng + ?Sized>(
    catalog: &Catalog,
    tracker: &SessionTracker,
    theme: &str,
    difficulty: Difficulty,
    bomb_chance: f64,
    rng: &mut R,
) -> SessionResult<SelectedQuestion> {
    if tracker.is_answered(theme, difficulty) {
        return Err(SessionError::AlreadyAnswered {
            theme: theme.to_string(),
            difficulty,
        });
    }

    let questions = catalog
        .slot(theme, difficulty)
        .filter(|qs| !qs.is_empty())
        .ok_or_else(|| SessionError::NoQuestionsAvailable {
            theme: theme.to_string(),
            difficulty,
        })?;

    let bomb_chance = if bomb_chance.is_nan() {
        0.0
    } else {
        bomb_chance.clamp(0.0, 1.0)
    };
    if tracker.budget().has_remaining() && rng.random_bool(bomb_chance) {
        match bomb_draw(catalog, tracker, rng) {
            Some(selected) => {
                log::debug!(
                    "bomb override: requested {theme} / {difficulty}, drew {}",
                    selected.slot()
                );
                return Ok(selected);
            }
            None => log::debug!("bomb triggered but no unplayed slot is left; drawing normally"),
        }
    }

    let question_index = rng.random_range(0..questions.len());
    Ok(SelectedQuestion {
        question: questions[question_index].clone(),
        theme: theme.to_string(),
        difficulty,
        question_index,
        is_bomb: false,
    })
}

/// Slots a bomb can land on: non-empty and not yet played.
pub fn bomb_candidates(catalog: &Catalog, tracker: &SessionTracker) -> Vec<Slot> {
    bomb_pool(catalog, tracker)
        .into_iter()
        .map(|(theme, difficulty)| Slot::new(theme.name.clone(), difficulty))
        .collect()
}

fn bomb_pool<'a>(catalog: &'a Catalog, tracker: &SessionTracker) -> Vec<(&'a Theme, Difficulty)> {
    catalog
        .themes()
        .iter()
        .flat_map(|theme| {
            Difficulty::ALL
                .into_iter()
                .filter(move |&d| {
                    !theme.questions(d).is_empty() && !tracker.is_answered(&theme.name, d)
                })
                .map(move |d| (theme, d))
        })
        .collect()
}

fn bomb_draw<R: Rng + ?Sized>(
    catalog: &Catalog,
    tracker: &SessionTracker,
    rng: &mut R,
) -> Option<SelectedQuestion> {
    let pool = bomb_pool(catalog, tracker);
    if pool.is_empty() {
        return None;
    }
    let (theme, difficulty) = pool[rng.random_range(0..pool.len())];
    let questions = theme.questions(difficulty);
    let question_index = rng.random_range(0..questions.len());

    Some(SelectedQuestion {
        question: questions[question_index].clone(),
        theme: theme.name.clone(),
        difficulty,
        question_index,
        is_bomb: true,
    })
}
