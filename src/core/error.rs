//! Error types for arena operations.
//!
//! Every entry point returns `GameResult<T>`. A failed call leaves no
//! partial state behind; the error is the only observable effect.

use thiserror::Error;

use super::address::Address;
use crate::cards::{Ability, CardId};

/// Errors surfaced to callers of arena entry points.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Raw ability value outside the `Ability` enum.
    #[error("Ability must be between 0 and 2 (got {0})")]
    InvalidAbility(u8),

    /// Priority already held by a different ability.
    #[error("Ability priority already set: priority {priority} is held by {holder}")]
    PriorityConflict { priority: u32, holder: Ability },

    /// Lookup of an unassigned card id.
    #[error("{0} not found")]
    NotFound(CardId),

    /// Caller tried to use a card it does not own.
    #[error("Player does not own this card: {card} is not owned by {player}")]
    NotCardOwner { card: CardId, player: Address },

    /// Caller lacks the role or minting authority for this call.
    #[error("Caller is not authorized: {0}")]
    Unauthorized(Address),

    /// Health and attack must both be positive.
    #[error("card stats must be positive (health {health}, attack {attack})")]
    InvalidStats { health: u32, attack: u32 },

    /// Battle deck is empty or too large.
    #[error("a battle deck holds 1 to {max} cards, got {got}")]
    InvalidDeckSize { got: usize, max: usize },

    /// The deployer's roles are permanent.
    #[error("cannot revoke roles held by the deployer {0}")]
    DeployerRole(Address),

    /// `Address::ZERO` cannot own cards or start a battle.
    #[error("the zero address cannot own cards or battle")]
    ZeroAddress,

    /// The engine has no reward token wired, or was handed a different one.
    #[error("reward token is not configured")]
    TokenNotConfigured,

    /// `set_token_address` is a one-time operation.
    #[error("reward token already configured at {0}")]
    TokenAlreadyConfigured(Address),

    /// Token transfer larger than the sender's balance.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },

    /// Minting would overflow the token supply.
    #[error("minting {amount} would overflow the token supply")]
    SupplyOverflow { amount: u128 },

    /// Engine configuration rejected by `EngineConfig::validate`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Battle history could not be encoded or decoded.
    #[error("history codec error: {0}")]
    Codec(String),
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Codec(err.to_string())
    }
}

/// Result type alias for arena operations.
pub type GameResult<T> = Result<T, GameError>;
