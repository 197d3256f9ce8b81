//! The moderator flow as an explicit state machine.

use serde::{Deserialize, Serialize};

/// Where the moderator is in the turn loop.
///
/// `Setup -> BombConfiguring -> Selecting -> Revealing -> Resolving ->
/// Selecting -> ...`, with a manual reset back to `Setup`. There is no
/// terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Documents are being loaded.
    Setup,
    /// The moderator is choosing how many bombs to allow.
    BombConfiguring,
    /// Waiting for the moderator to pick a theme and difficulty.
    Selecting,
    /// A question is on screen, its answer still hidden.
    Revealing,
    /// The answer is shown and scores are being assigned.
    Resolving,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup => write!(f, "setting up"),
            Self::BombConfiguring => write!(f, "configuring bombs"),
            Self::Selecting => write!(f, "selecting a question"),
            Self::Revealing => write!(f, "showing a question"),
            Self::Resolving => write!(f, "scoring a question"),
        }
    }
}
