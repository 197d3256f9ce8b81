//! Error types for the session engine.

use qs_core::{CoreError, Difficulty};
use thiserror::Error;

use crate::phase::Phase;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors a moderator action can be rejected with.
///
/// Every variant is recoverable: the session is left exactly as it was
/// before the rejected call.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The slot has already been played this session.
    #[error("{theme} / {difficulty} has already been answered")]
    AlreadyAnswered {
        /// Requested theme.
        theme: String,
        /// Requested difficulty.
        difficulty: Difficulty,
    },

    /// The theme does not exist or the slot has no questions.
    #[error("no questions available for {theme} / {difficulty}")]
    NoQuestionsAvailable {
        /// Requested theme.
        theme: String,
        /// Requested difficulty.
        difficulty: Difficulty,
    },

    /// No player with that name is on the roster.
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    /// A record for the slot already exists.
    #[error("{theme} / {difficulty} is already recorded")]
    DuplicateRecord {
        /// Theme of the rejected record.
        theme: String,
        /// Difficulty of the rejected record.
        difficulty: Difficulty,
    },

    /// The bomb count is negative.
    #[error("invalid bomb budget: {0} (must be zero or more)")]
    InvalidBombBudget(i64),

    /// Recording another bomb would exceed the budget.
    #[error("bomb budget exhausted ({allowed} allowed)")]
    BombBudgetExhausted {
        /// Configured number of bombs.
        allowed: u32,
    },

    /// The catalog has no slot with a question in it.
    #[error("the quiz has no questions to play")]
    EmptyCatalog,

    /// The roster has no players.
    #[error("the roster has no players")]
    EmptyRoster,

    /// The action is not allowed in the current phase.
    #[error("cannot {action} while {actual} (only while {expected})")]
    InvalidPhase {
        /// What the moderator tried to do.
        action: &'static str,
        /// The phase the action requires.
        expected: Phase,
        /// The phase the session is in.
        actual: Phase,
    },

    /// A bomb effect was requested for a normal question.
    #[error("this is not a bomb question")]
    NotABomb,

    /// Normal scoring or a plain record was requested for a bomb question.
    #[error("bomb questions only take a bomb effect")]
    IsABomb,

    /// No more answers to reveal.
    #[error("all answers have been revealed")]
    NothingToReveal,

    /// Loading or converting input documents failed.
    #[error("{0}")]
    Core(#[from] CoreError),
}
