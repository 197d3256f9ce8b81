//! Core types for Quizshow: the quiz catalog, questions, and the player roster.
//!
//! This crate is pure data. It knows how to read the quiz and players
//! documents and exposes lookups over them; selection, scoring and the
//! session state machine live in `qs-session`.

/// Themes, slots, and the catalog that owns them.
pub mod catalog;
/// Difficulty tiers.
pub mod difficulty;
/// JSON document shapes and loaders.
pub mod document;
/// Error types used throughout the crate.
pub mod error;
/// Quiz questions.
pub mod question;
/// Players and the ordered roster.
pub mod roster;

/// Re-export catalog types.
pub use catalog::{Catalog, Slot, Theme};
/// Re-export the difficulty enum.
pub use difficulty::Difficulty;
/// Re-export document loaders.
pub use document::{load_catalog, load_roster, parse_catalog, parse_roster, sample_catalog};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the question type.
pub use question::Question;
/// Re-export roster types.
pub use roster::{Player, Roster};
