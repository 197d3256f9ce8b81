//! Round-robin turn suggestion.
//!
//! Scoring never consults this; it only tells the moderator whose turn it
//! would be under a strict rotation.

use qs_core::{Player, Roster};

/// Cycles through the roster in order.
#[derive(Debug, Clone, Default)]
pub struct TurnRotation {
    current: usize,
}

impl TurnRotation {
    /// Start with the first player.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the player whose turn it is.
    pub fn index(&self) -> usize {
        self.current
    }

    /// The player whose turn it is, or `None` for an empty roster.
    pub fn current<'a>(&self, roster: &'a Roster) -> Option<&'a Player> {
        if roster.is_empty() {
            return None;
        }
        roster.players().get(self.current % roster.len())
    }

    /// Move to the next player, wrapping around.
    pub fn advance<'a>(&mut self, roster: &'a Roster) -> Option<&'a Player> {
        if roster.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % roster.len();
        self.current(roster)
    }
}
