//! Battles: deck synthesis, combat resolution and history.
//!
//! - [`BattleEngine`]: The `battle` entry point and per-player streaks
//! - [`resolve`]: Pure round-by-round combat between two decks
//! - [`BattleLog`]: Append-only history, queried with [`EventFilter`]

mod combatant;
mod engine;
mod filter;
mod history;
mod resolver;

pub use combatant::{front, synthesize_enemy_deck, total_health, Combatant, Deck, Side};
pub use engine::{BattleEngine, BattleOutcome};
pub use filter::EventFilter;
pub use history::{BattleEvent, BattleId, BattleLog, BattleSummary, EventKind};
pub use resolver::{resolve, AbilityUse, Decision, Resolution, RoundReport};
