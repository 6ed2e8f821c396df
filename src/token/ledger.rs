//! In-memory reward token.

use im::HashMap as ImHashMap;
use tracing::{debug, info, warn};

use super::TokenLedger;
use crate::core::{Address, CallContext, GameError, GameResult};

/// Fungible reward token minted only by its owner and one fixed minter.
///
/// ```
/// use card_arena::core::{Address, CallContext};
/// use card_arena::token::{RewardToken, TokenLedger};
///
/// let owner = Address::from_low_u64(1);
/// let engine = Address::from_low_u64(2);
/// let player = Address::from_low_u64(3);
/// let mut token = RewardToken::new(Address::from_low_u64(9), owner, engine);
///
/// token.mint_token(&CallContext::new(engine), player, 100).unwrap();
/// assert_eq!(token.balance_of(player), 100);
/// assert!(token.mint_token(&CallContext::new(player), player, 1).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct RewardToken {
    address: Address,
    owner: Address,
    initial_minter: Address,
    balances: ImHashMap<Address, u128>,
    total_supply: u128,
}

impl RewardToken {
    /// Create a token at `address` owned by `owner`.
    ///
    /// `owner` and `initial_minter` are the only accounts allowed to mint,
    /// for the lifetime of the token.
    #[must_use]
    pub fn new(address: Address, owner: Address, initial_minter: Address) -> Self {
        Self {
            address,
            owner,
            initial_minter,
            balances: ImHashMap::new(),
            total_supply: 0,
        }
    }

    /// The deploying account.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }
}

impl TokenLedger for RewardToken {
    fn address(&self) -> Address {
        self.address
    }

    fn initial_minter(&self) -> Address {
        self.initial_minter
    }

    fn is_minter(&self, account: Address) -> bool {
        account == self.owner || account == self.initial_minter
    }

    fn mint_token(&mut self, ctx: &CallContext, to: Address, amount: u128) -> GameResult<()> {
        if !self.is_minter(ctx.caller) {
            warn!(caller = %ctx.caller, "mint rejected");
            return Err(GameError::Unauthorized(ctx.caller));
        }
        // Supply bounds every balance, so only the supply can overflow.
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(GameError::SupplyOverflow { amount })?;
        *self.balances.entry(to).or_insert(0) += amount;
        self.total_supply = supply;

        info!(%to, amount, minter = %ctx.caller, "tokens minted");
        Ok(())
    }

    fn balance_of(&self, account: Address) -> u128 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    fn transfer(&mut self, ctx: &CallContext, to: Address, amount: u128) -> GameResult<()> {
        let have = self.balance_of(ctx.caller);
        if have < amount {
            return Err(GameError::InsufficientBalance { have, need: amount });
        }
        self.balances.insert(ctx.caller, have - amount);
        *self.balances.entry(to).or_insert(0) += amount;

        debug!(from = %ctx.caller, %to, amount, "tokens transferred");
        Ok(())
    }

    fn total_supply(&self) -> u128 {
        self.total_supply
    }
}
