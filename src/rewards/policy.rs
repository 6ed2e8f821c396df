//! Reward amounts per streak length.

use serde::{Deserialize, Serialize};

use crate::core::RewardConfig;

/// Tokens earned by one win.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Paid on every win.
    pub base: u128,
    /// Paid when the streak reaches a multiple of the bonus interval.
    pub bonus: u128,
}

impl Reward {
    /// Total amount to mint.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.base.saturating_add(self.bonus)
    }

    /// Check if nothing is paid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Computes the reward for a streak.
///
/// The bonus stacks on top of the base reward: with the default
/// configuration the 5th consecutive win pays 100 + 1000.
///
/// ```
/// use card_arena::core::RewardConfig;
/// use card_arena::rewards::RewardPolicy;
///
/// let policy = RewardPolicy::new(RewardConfig::default());
/// assert_eq!(policy.reward_for(0).total(), 0);
/// assert_eq!(policy.reward_for(1).total(), 100);
/// assert_eq!(policy.reward_for(5).total(), 1100);
/// assert_eq!(policy.reward_for(6).total(), 100);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPolicy {
    config: RewardConfig,
}

impl RewardPolicy {
    #[must_use]
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    /// Reward for reaching `streak` consecutive wins.
    #[must_use]
    pub fn reward_for(&self, streak: u32) -> Reward {
        if streak == 0 {
            return Reward::default();
        }
        let bonus = if streak % self.config.bonus_interval.max(1) == 0 {
            self.config.streak_bonus
        } else {
            0
        };
        Reward {
            base: self.config.base,
            bonus,
        }
    }
}
