//! The deployed game: registry, engine and reward token together.
//!
//! `Arena` is the surface external callers use. Each entry point runs as
//! one transaction: the arena snapshots its state (cheap, since every
//! component stores its data in `im` collections), runs the call, and
//! restores the snapshot if the call fails.
//!
//! ## Example
//!
//! ```
//! use card_arena::arena::ArenaBuilder;
//! use card_arena::core::{Address, CallContext};
//!
//! let deployer = Address::from_low_u64(1);
//! let player = Address::from_low_u64(2);
//! let mut arena = ArenaBuilder::new(deployer)
//!     .with_default_priorities()
//!     .build()
//!     .unwrap();
//!
//! let admin = CallContext::new(deployer);
//! let ids: Vec<_> = (0..3)
//!     .map(|_| arena.mint_card(&admin, player, 10, 10, 1).unwrap())
//!     .collect();
//!
//! let outcome = arena.battle(&CallContext::new(player).at(1), &ids).unwrap();
//! assert_eq!(arena.history().battles_of(player), vec![outcome.battle_id]);
//! ```

mod builder;

pub use builder::ArenaBuilder;

use crate::battle::{BattleEngine, BattleLog, BattleOutcome};
use crate::cards::{AbilityPriority, Card, CardId, CardRegistry, Role};
use crate::core::{Address, CallContext, GameResult};
use crate::token::{RewardToken, TokenLedger};

/// A deployed arena.
#[derive(Clone, Debug)]
pub struct Arena {
    registry_address: Address,
    registry: CardRegistry,
    engine: BattleEngine,
    token: RewardToken,
}

impl Arena {
    /// Run `call` atomically: on error every component is rolled back.
    fn transact<T>(&mut self, call: impl FnOnce(&mut Self) -> GameResult<T>) -> GameResult<T> {
        let snapshot = self.clone();
        call(self).map_err(|err| {
            *self = snapshot;
            err
        })
    }

    // === Components ===

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn registry_address(&self) -> Address {
        self.registry_address
    }

    #[must_use]
    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    #[must_use]
    pub fn token(&self) -> &RewardToken {
        &self.token
    }

    // === Card Registry ===

    pub fn mint_card(
        &mut self,
        ctx: &CallContext,
        owner: Address,
        health: u32,
        attack: u32,
        ability: u8,
    ) -> GameResult<CardId> {
        self.transact(|a| a.registry.mint_card(ctx, owner, health, attack, ability))
    }

    pub fn transfer_card(&mut self, ctx: &CallContext, to: Address, id: CardId) -> GameResult<()> {
        self.transact(|a| a.registry.transfer_card(ctx, to, id))
    }

    pub fn grant_role(&mut self, ctx: &CallContext, role: Role, account: Address) -> GameResult<()> {
        self.transact(|a| a.registry.grant_role(ctx, role, account))
    }

    pub fn revoke_role(&mut self, ctx: &CallContext, role: Role, account: Address) -> GameResult<()> {
        self.transact(|a| a.registry.revoke_role(ctx, role, account))
    }

    pub fn set_ability_priority(&mut self, ctx: &CallContext, ability: u8, priority: u32) -> GameResult<()> {
        self.transact(|a| a.registry.set_ability_priority(ctx, ability, priority))
    }

    pub fn ability_priority(&self, ability: u8) -> GameResult<AbilityPriority> {
        self.registry.ability_priority(ability)
    }

    pub fn nft_data(&self, id: CardId) -> GameResult<Card> {
        self.registry.nft_data(id)
    }

    pub fn owner_of(&self, id: CardId) -> GameResult<Address> {
        self.registry.owner_of(id)
    }

    #[must_use]
    pub fn cards_of(&self, owner: Address) -> Vec<CardId> {
        self.registry.cards_of(owner)
    }

    #[must_use]
    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.registry.has_role(role, account)
    }

    // === Battle Engine ===

    /// Fight a battle with the caller's cards.
    pub fn battle(&mut self, ctx: &CallContext, card_ids: &[CardId]) -> GameResult<BattleOutcome> {
        self.transact(|a| a.engine.battle(ctx, &a.registry, &mut a.token, card_ids))
    }

    #[must_use]
    pub fn get_win_streak(&self, player: Address) -> u32 {
        self.engine.get_win_streak(player)
    }

    #[must_use]
    pub fn history(&self) -> &BattleLog {
        self.engine.history()
    }

    // === Reward Token ===

    #[must_use]
    pub fn balance_of(&self, account: Address) -> u128 {
        self.token.balance_of(account)
    }

    pub fn mint_token(&mut self, ctx: &CallContext, to: Address, amount: u128) -> GameResult<()> {
        self.transact(|a| a.token.mint_token(ctx, to, amount))
    }

    pub fn transfer_token(&mut self, ctx: &CallContext, to: Address, amount: u128) -> GameResult<()> {
        self.transact(|a| a.token.transfer(ctx, to, amount))
    }
}
