//! Win streaks and token rewards.
//!
//! - [`RewardPolicy`]: How many tokens a given streak earns
//! - [`RewardController`]: Per-player streaks; mints through a
//!   [`TokenLedger`](crate::token::TokenLedger) on every win

mod controller;
mod policy;

pub use controller::{RewardController, StreakUpdate};
pub use policy::{Reward, RewardPolicy};
