//! Session engine for Quizshow.
//!
//! Provides question selection with random bomb injection, the scoring
//! policies (normal judgements with a 1x-3x multiplier and the bomb rule),
//! the answered-slot tracker with its bomb budget, and the [`Session`] state
//! machine a moderator drives turn by turn.

pub mod config;
pub mod error;
pub mod journal;
pub mod phase;
pub mod scoring;
pub mod selector;
pub mod session;
pub mod tracker;
pub mod turn;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use phase::Phase;
pub use scoring::{BombOutcome, Multiplier, ScoreChange, ScorePolicy};
pub use selector::SelectedQuestion;
pub use session::{Session, SessionBuilder};
pub use tracker::{AnsweredRecord, BombBudget, SessionTracker};
pub use turn::TurnRotation;
