//! Reward token ledger.
//!
//! The battle engine never touches balances directly. It mints through the
//! `TokenLedger` trait, which any fungible-token implementation can provide.
//! `RewardToken` is the in-memory ledger used by the `Arena` deployment.
//!
//! ## Minting Authorization
//!
//! The token owner (the deploying account) and the `initial_minter` fixed
//! at construction (the battle engine's address) may mint. No other
//! account can ever be authorized.

mod ledger;

pub use ledger::RewardToken;

use crate::core::{Address, CallContext, GameResult};

/// Fungible token ledger interface used for battle rewards.
pub trait TokenLedger {
    /// Address of this ledger. The engine is wired to exactly one.
    fn address(&self) -> Address;

    /// The minter fixed at construction, kept for provenance.
    fn initial_minter(&self) -> Address;

    /// Check if `account` may mint.
    fn is_minter(&self, account: Address) -> bool;

    /// Mint `amount` to `to`.
    ///
    /// Fails with `Unauthorized` unless `ctx.caller` is a minter.
    fn mint_token(&mut self, ctx: &CallContext, to: Address, amount: u128) -> GameResult<()>;

    /// Balance of `account`.
    fn balance_of(&self, account: Address) -> u128;

    /// Move `amount` from `ctx.caller` to `to`.
    fn transfer(&mut self, ctx: &CallContext, to: Address, amount: u128) -> GameResult<()>;

    /// Sum of all balances.
    fn total_supply(&self) -> u128;
}
