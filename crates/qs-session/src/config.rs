//! Configuration for a quiz session.

/// Probability that an eligible draw turns into a bomb.
pub const DEFAULT_BOMB_CHANCE: f64 = 0.3;

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    seed: u64,
    bomb_chance: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bomb_chance: DEFAULT_BOMB_CHANCE,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the bomb chance (clamped to 0.0-1.0; NaN becomes 0.0).
    pub fn with_bomb_chance(mut self, chance: f64) -> Self {
        self.bomb_chance = if chance.is_nan() {
            0.0
        } else {
            chance.clamp(0.0, 1.0)
        };
        self
    }

    /// RNG seed for reproducible question draws.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Chance (0.0-1.0) that a draw becomes a bomb while bombs remain.
    pub fn bomb_chance(&self) -> f64 {
        self.bomb_chance
    }
}
