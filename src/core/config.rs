//! Engine configuration.
//!
//! Deployments configure the engine at construction by providing an
//! `EngineConfig`:
//! - `StatRange`: Bounds for synthesized enemy health and attack
//! - `RewardConfig`: Token amounts minted for win streaks
//! - `EngineConfig`: Combines all configuration
//!
//! The defaults reproduce the reference game: 3-card decks, enemy stats in
//! `1..=10`, 100 tokens per win and a 1000-token bonus every 5th win.

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};
use crate::cards::Ability;

/// Inclusive bounds for a synthesized stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: u32,
    pub max: u32,
}

impl StatRange {
    /// Create a new range `min..=max`.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// A range holding a single value.
    #[must_use]
    pub const fn exactly(value: u32) -> Self {
        Self::new(value, value)
    }

    /// Check if `value` lies in the range.
    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Reward amounts, in token base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Minted on every win.
    pub base: u128,

    /// Minted on top of `base` when the streak reaches a multiple of
    /// `bonus_interval`.
    pub streak_bonus: u128,

    /// Streak length that pays the bonus (and every multiple of it).
    pub bonus_interval: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            base: 100,
            streak_bonus: 1000,
            bonus_interval: 5,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of cards a player may bring to a battle.
    pub max_deck_size: usize,

    /// Number of cards in every synthesized enemy deck.
    pub enemy_deck_size: usize,

    /// Health bounds for enemy cards.
    pub enemy_health: StatRange,

    /// Attack bounds for enemy cards.
    pub enemy_attack: StatRange,

    /// Rounds after which the battle is decided on points.
    pub max_rounds: u32,

    /// Streak rewards.
    pub rewards: RewardConfig,

    /// Priorities applied by `ArenaBuilder::with_default_priorities`.
    pub default_priorities: Vec<(Ability, u32)>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_deck_size: 3,
            enemy_deck_size: 3,
            enemy_health: StatRange::new(1, 10),
            enemy_attack: StatRange::new(1, 10),
            max_rounds: 32,
            rewards: RewardConfig::default(),
            default_priorities: vec![
                (Ability::Roulette, 1),
                (Ability::Freeze, 2),
                (Ability::Shield, 3),
            ],
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set enemy health bounds.
    #[must_use]
    pub fn with_enemy_health(mut self, range: StatRange) -> Self {
        self.enemy_health = range;
        self
    }

    /// Set enemy attack bounds.
    #[must_use]
    pub fn with_enemy_attack(mut self, range: StatRange) -> Self {
        self.enemy_attack = range;
        self
    }

    /// Set the round cap.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the reward amounts.
    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    /// Set the priorities applied at deployment.
    #[must_use]
    pub fn with_default_priorities(mut self, priorities: Vec<(Ability, u32)>) -> Self {
        self.default_priorities = priorities;
        self
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> GameResult<()> {
        if self.max_deck_size == 0 {
            return Err(invalid("max_deck_size must be at least 1"));
        }
        if self.enemy_deck_size == 0 {
            return Err(invalid("enemy_deck_size must be at least 1"));
        }
        for (name, range) in [("enemy_health", self.enemy_health), ("enemy_attack", self.enemy_attack)] {
            if range.min == 0 {
                return Err(invalid(&format!("{name} must start at 1 or more")));
            }
            if range.min > range.max {
                return Err(invalid(&format!("{name} is empty ({}..={})", range.min, range.max)));
            }
        }
        if self.max_rounds == 0 {
            return Err(invalid("max_rounds must be at least 1"));
        }
        if self.rewards.bonus_interval == 0 {
            return Err(invalid("rewards.bonus_interval must be at least 1"));
        }
        for (i, (ability, priority)) in self.default_priorities.iter().enumerate() {
            let clash = self.default_priorities[..i]
                .iter()
                .any(|(other, p)| p == priority && other != ability);
            if clash {
                return Err(invalid(&format!("default priority {priority} assigned twice")));
            }
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> GameError {
    GameError::InvalidConfig(reason.to_string())
}
