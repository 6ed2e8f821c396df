//! Core types: addresses, call context, configuration, errors, RNG.
//!
//! Everything here is shared by the registry, the battle engine, the reward
//! controller and the token ledger.

pub mod address;
pub mod config;
pub mod context;
pub mod error;
pub mod rng;

pub use address::Address;
pub use config::{EngineConfig, RewardConfig, StatRange};
pub use context::CallContext;
pub use error::{GameError, GameResult};
pub use rng::GameRng;
