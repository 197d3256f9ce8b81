//! Score policies: normal correct/incorrect deltas and the bomb rule.
//!
//! Every function here touches exactly one player and reports the change it
//! made as a [`ScoreChange`], so a session can keep an audit trail.

use qs_core::{Question, Roster};
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// How the moderator judged an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScorePolicy {
    /// Award `points * multiplier`.
    Correct,
    /// Deduct `points * multiplier`.
    Incorrect,
}

impl std::fmt::Display for ScorePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => write!(f, "Correct"),
            Self::Incorrect => write!(f, "Incorrect"),
        }
    }
}

/// Score multiplier toggled by the moderator: 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multiplier(u8);

impl Multiplier {
    /// The smallest multiplier.
    pub const ONE: Multiplier = Multiplier(1);

    /// Create a multiplier from 1, 2 or 3.
    pub fn new(value: u8) -> Option<Self> {
        matches!(value, 1..=3).then_some(Self(value))
    }

    /// Current value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Advance 1 -> 2 -> 3 -> 1.
    pub fn toggle(&mut self) {
        self.0 = self.0 % 3 + 1;
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl std::fmt::Display for Multiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Which branch of the bomb rule applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombOutcome {
    /// A positive score is wiped to zero.
    Reset,
    /// A negative score is doubled.
    Doubled,
    /// A zero score takes twice the question's points as a penalty.
    Penalized,
}

impl std::fmt::Display for BombOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reset => write!(f, "score reset to zero"),
            Self::Doubled => write!(f, "negative score doubled"),
            Self::Penalized => write!(f, "penalized twice the points"),
        }
    }
}

/// What kind of mutation produced a [`ScoreChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    /// A normal judgement with its multiplier.
    Judged {
        /// Correct or incorrect.
        policy: ScorePolicy,
        /// Multiplier in effect.
        multiplier: Multiplier,
    },
    /// The bomb rule.
    Bomb(BombOutcome),
}

/// A single applied score mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreChange {
    /// Player whose score changed.
    pub player: String,
    /// Score before the change.
    pub before: i64,
    /// Score after the change.
    pub after: i64,
    /// The rule that produced it.
    pub kind: ChangeKind,
}

impl ScoreChange {
    /// Signed difference `after - before`.
    pub fn delta(&self) -> i64 {
        self.after.saturating_sub(self.before)
    }
}

/// The delta a normal judgement produces.
pub fn score_delta(points: u32, policy: ScorePolicy, multiplier: Multiplier) -> i64 {
    let magnitude = i64::from(points) * i64::from(multiplier.value());
    match policy {
        ScorePolicy::Correct => magnitude,
        ScorePolicy::Incorrect => -magnitude,
    }
}

/// Compute the bomb rule for a score without applying it.
pub fn preview_bomb(score: i64, points: u32) -> (BombOutcome, i64) {
    match score.signum() {
        1 => (BombOutcome::Reset, 0),
        -1 => (BombOutcome::Doubled, score.saturating_mul(2)),
        _ => (BombOutcome::Penalized, -(i64::from(points) * 2)),
    }
}

/// Apply a normal judgement to one player.
pub fn apply_score(
    roster: &mut Roster,
    player: &str,
    question: &Question,
    policy: ScorePolicy,
    multiplier: Multiplier,
) -> SessionResult<ScoreChange> {
    let before = current_score(roster, player)?;
    let after = before.saturating_add(score_delta(question.points, policy, multiplier));
    write_score(roster, player, after)?;
    Ok(ScoreChange {
        player: player.to_string(),
        before,
        after,
        kind: ChangeKind::Judged { policy, multiplier },
    })
}

/// Apply the bomb rule to one player, based on their current score.
pub fn apply_bomb_effect(
    roster: &mut Roster,
    player: &str,
    question: &Question,
) -> SessionResult<(ScoreChange, BombOutcome)> {
    let before = current_score(roster, player)?;
    let (outcome, after) = preview_bomb(before, question.points);
    write_score(roster, player, after)?;
    let change = ScoreChange {
        player: player.to_string(),
        before,
        after,
        kind: ChangeKind::Bomb(outcome),
    };
    Ok((change, outcome))
}

fn current_score(roster: &Roster, player: &str) -> SessionResult<i64> {
    roster
        .get(player)
        .map(|p| p.score)
        .ok_or_else(|| SessionError::UnknownPlayer(player.to_string()))
}

fn write_score(roster: &mut Roster, player: &str, score: i64) -> SessionResult<()> {
    roster
        .set_score(player, score)
        .map(|_| ())
        .ok_or_else(|| SessionError::UnknownPlayer(player.to_string()))
}
