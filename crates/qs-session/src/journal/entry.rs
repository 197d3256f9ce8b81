//! Journal entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the session journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// The session left bomb configuration and started.
    SessionStarted {
        /// Identifier of the session.
        session_id: Uuid,
        /// Number of themes in the catalog.
        themes: usize,
        /// Number of players on the roster.
        players: usize,
        /// Configured bomb count.
        bombs_allowed: u32,
        /// When the session started.
        timestamp: DateTime<Utc>,
    },
    /// A question was drawn for the moderator.
    QuestionDrawn {
        /// The slot the moderator asked for.
        requested: String,
        /// The slot the question came from.
        drawn: String,
        /// Index of the question within the drawn slot.
        question_index: usize,
        /// Point value of the question.
        points: u32,
        /// Whether the draw was a bomb.
        is_bomb: bool,
        /// When drawn.
        timestamp: DateTime<Utc>,
    },
    /// A normal judgement changed a score.
    ScoreApplied {
        /// Player scored.
        player: String,
        /// "Correct" or "Incorrect".
        policy: String,
        /// Multiplier in effect.
        multiplier: u8,
        /// Score before.
        before: i64,
        /// Score after.
        after: i64,
        /// When applied.
        timestamp: DateTime<Utc>,
    },
    /// A bomb went off on a player.
    BombDetonated {
        /// Player hit.
        player: String,
        /// Which branch of the bomb rule applied.
        outcome: String,
        /// Score before.
        before: i64,
        /// Score after.
        after: i64,
        /// When applied.
        timestamp: DateTime<Utc>,
    },
    /// A slot was committed as played.
    AnswerRecorded {
        /// The played slot.
        slot: String,
        /// Index of the question within the slot.
        question_index: usize,
        /// Whether it was a bomb.
        was_bomb: bool,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
    /// The moderator left a question without recording it.
    QuestionAbandoned {
        /// The slot the question came from.
        slot: String,
        /// When abandoned.
        timestamp: DateTime<Utc>,
    },
}
