use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A player and their running score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name, unique within a roster.
    pub name: String,
    /// Current score. May go negative.
    pub score: i64,
}

impl Player {
    /// Create a player with the given starting score.
    pub fn new(name: impl Into<String>, score: i64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// The ordered list of players in a session.
///
/// Order is turn order and is never changed. Scores are only written through
/// [`Roster::set_score`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster, rejecting duplicate names.
    pub fn new(players: Vec<Player>) -> CoreResult<Self> {
        for (i, p) in players.iter().enumerate() {
            if players[..i].iter().any(|other| other.name == p.name) {
                return Err(CoreError::DuplicatePlayer(p.name.clone()));
            }
        }
        Ok(Self { players })
    }

    /// Players in roster order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by exact name.
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Resolve user input to a roster name: exact match first, then
    /// case-insensitive.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.get(name)
            .or_else(|| {
                let lower = name.to_lowercase();
                self.players.iter().find(|p| p.name.to_lowercase() == lower)
            })
            .map(|p| p.name.as_str())
    }

    /// Overwrite a player's score. Returns the previous score, or `None` if
    /// no player has that name.
    pub fn set_score(&mut self, name: &str, score: i64) -> Option<i64> {
        let player = self.players.iter_mut().find(|p| p.name == name)?;
        Some(std::mem::replace(&mut player.score, score))
    }

    /// Players sorted by score, highest first. Ties keep roster order.
    pub fn standings(&self) -> Vec<&Player> {
        let mut sorted: Vec<&Player> = self.players.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
    }

    /// The player currently in the lead.
    pub fn leader(&self) -> Option<&Player> {
        self.standings().into_iter().next()
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster has no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roster() -> Roster {
        Roster::new(vec![
            Player::new("Ana", 10),
            Player::new("Bruno", 30),
            Player::new("Caio", 10),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = Roster::new(vec![Player::new("Ana", 0), Player::new("Ana", 5)]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicatePlayer(name) if name == "Ana"));
    }

    #[test]
    fn set_score_returns_previous() {
        let mut r = roster();
        assert_eq!(r.set_score("Ana", -4), Some(10));
        assert_eq!(r.get("Ana").unwrap().score, -4);
        assert_eq!(r.set_score("Nobody", 1), None);
    }

    #[test]
    fn standings_sorted_stable() {
        let r = roster();
        let names: Vec<&str> = r.standings().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bruno", "Ana", "Caio"]);
        // roster order itself is untouched
        assert_eq!(r.players()[0].name, "Ana");
    }

    #[test]
    fn leader() {
        assert_eq!(roster().leader().unwrap().name, "Bruno");
        assert!(Roster::default().leader().is_none());
    }

    #[test]
    fn resolve_case_insensitive() {
        let r = roster();
        assert_eq!(r.resolve("bruno"), Some("Bruno"));
        assert_eq!(r.resolve(" Caio "), Some("Caio"));
        assert_eq!(r.resolve("Dora"), None);
    }

    proptest! {
        #[test]
        fn standings_are_a_sorted_permutation(scores in proptest::collection::vec(-1000i64..1000, 0..12)) {
            let players = scores
                .iter()
                .enumerate()
                .map(|(i, s)| Player::new(format!("P{i}"), *s))
                .collect();
            let r = Roster::new(players).unwrap();
            let standings = r.standings();

            prop_assert_eq!(standings.len(), r.len());
            for pair in standings.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
            if let Some(leader) = r.leader() {
                prop_assert_eq!(leader.score, scores.iter().copied().max().unwrap());
            }
        }
    }
}
