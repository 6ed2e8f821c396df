//! # card-arena
//!
//! A deterministic card battle and reward engine.
//!
//! Players own cards minted by a registry. They fight synthesized enemy
//! decks; every win extends a streak and mints reward tokens, and every
//! battle is recorded in an append-only history.
//!
//! ## Design Principles
//!
//! 1. **Atomic Calls**: Every entry point either applies fully or returns
//!    an error and changes nothing.
//!
//! 2. **Explicit Context**: Caller, block timestamp and block entropy are
//!    passed in a `CallContext`, never read from ambient state.
//!
//! 3. **Configuration Over Convention**: Enemy stat ranges, reward amounts
//!    and round caps come from `EngineConfig`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so the
//!   `Arena` can snapshot before each call and roll back on failure.
//!
//! - **Event-Sourced History**: Battles are not stored; their start and
//!   end events are, and queries reconstruct everything else.
//!
//! ## Modules
//!
//! - `core`: Addresses, call context, configuration, errors, RNG
//! - `cards`: Abilities, cards, roles and the card registry
//! - `battle`: Enemy synthesis, combat resolution, history
//! - `rewards`: Win streaks and reward amounts
//! - `token`: Reward token ledger
//! - `arena`: The deployed game, wiring everything together

pub mod core;
pub mod cards;
pub mod battle;
pub mod rewards;
pub mod token;
pub mod arena;

// Re-export commonly used types
pub use crate::core::{
    Address, CallContext,
    EngineConfig, RewardConfig, StatRange,
    GameError, GameResult, GameRng,
};

pub use crate::cards::{
    Ability, AbilityPriority, PriorityTable,
    Card, CardId, CardRegistry,
    Role, DEFAULT_ADMIN_ROLE, MINTING_ROLE,
};

pub use crate::battle::{
    BattleEngine, BattleOutcome, Resolution, Decision, Side,
    BattleEvent, BattleId, BattleLog, BattleSummary, EventFilter, EventKind,
};

pub use crate::rewards::{Reward, RewardController, RewardPolicy, StreakUpdate};

pub use crate::token::{RewardToken, TokenLedger};

pub use crate::arena::{Arena, ArenaBuilder};
