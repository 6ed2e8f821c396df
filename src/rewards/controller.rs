//! Streak tracking and reward issuance.

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::policy::{Reward, RewardPolicy};
use crate::core::{Address, CallContext, GameResult};
use crate::token::TokenLedger;

/// Result of applying one battle outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    /// Streak after the update.
    pub streak: u32,
    /// Tokens minted to the player.
    pub reward: Reward,
}

/// Per-player win streaks and the minting they trigger.
///
/// Streaks change only through `on_battle_resolved`. The update is
/// all-or-nothing: if the mint fails, the streak is left untouched.
#[derive(Clone, Debug)]
pub struct RewardController {
    policy: RewardPolicy,
    streaks: ImHashMap<Address, u32>,
}

impl RewardController {
    #[must_use]
    pub fn new(policy: RewardPolicy) -> Self {
        Self {
            policy,
            streaks: ImHashMap::new(),
        }
    }

    /// Current win streak of `player`.
    #[must_use]
    pub fn win_streak(&self, player: Address) -> u32 {
        self.streaks.get(&player).copied().unwrap_or(0)
    }

    /// The reward policy in force.
    #[must_use]
    pub fn policy(&self) -> &RewardPolicy {
        &self.policy
    }

    /// Apply a finalized battle outcome.
    ///
    /// A win increments the streak and mints the reward through `ledger`,
    /// calling as `ctx.caller`. A loss resets the streak to 0.
    pub fn on_battle_resolved<L>(
        &mut self,
        ctx: &CallContext,
        ledger: &mut L,
        player: Address,
        won: bool,
    ) -> GameResult<StreakUpdate>
    where
        L: TokenLedger + ?Sized,
    {
        if !won {
            if self.streaks.remove(&player).is_some() {
                info!(%player, "win streak reset");
            }
            return Ok(StreakUpdate {
                streak: 0,
                reward: Reward::default(),
            });
        }

        let streak = self.win_streak(player).saturating_add(1);
        let reward = self.policy.reward_for(streak);
        if !reward.is_empty() {
            ledger.mint_token(ctx, player, reward.total())?;
        }
        self.streaks.insert(player, streak);

        info!(%player, streak, base = reward.base, bonus = reward.bonus, "win streak extended");
        Ok(StreakUpdate { streak, reward })
    }
}
