//! History query predicates.
//!
//! Filters select battle events by kind, participant, battle id or winner,
//! and compose with `All`, `Any` and `Not`.
//!
//! ```
//! use card_arena::battle::{BattleId, EventFilter, EventKind};
//! use card_arena::core::Address;
//!
//! let alice = Address::from_low_u64(1);
//! let alice_wins = EventFilter::kind(EventKind::Ended).and(EventFilter::Winner(alice));
//! let not_first = EventFilter::Battle(BattleId::new(0)).negate();
//! # let _ = (alice_wins, not_first);
//! ```

use serde::{Deserialize, Serialize};

use super::history::{BattleEvent, BattleId, EventKind};
use crate::core::Address;

/// A predicate over battle events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventFilter {
    // === Field Matching ===

    /// Match a specific event kind.
    Kind(EventKind),

    /// Event must be for the specified player.
    Player(Address),

    /// Event must belong to the specified battle.
    Battle(BattleId),

    /// `Ended` event won by the specified address. `Address::ZERO`
    /// selects enemy wins.
    Winner(Address),

    // === Combinators ===

    /// All filters must match.
    All(Vec<EventFilter>),

    /// At least one filter must match.
    Any(Vec<EventFilter>),

    /// Filter must not match.
    Not(Box<EventFilter>),

    /// Matches every event.
    Always,
}

impl EventFilter {
    /// Create an event kind filter.
    pub fn kind(kind: EventKind) -> Self {
        Self::Kind(kind)
    }

    /// Create a filter for events involving a specific player.
    pub fn for_player(player: Address) -> Self {
        Self::Player(player)
    }

    /// Create an AND filter.
    pub fn all(filters: impl IntoIterator<Item = EventFilter>) -> Self {
        Self::All(filters.into_iter().collect())
    }

    /// Create an OR filter.
    pub fn any(filters: impl IntoIterator<Item = EventFilter>) -> Self {
        Self::Any(filters.into_iter().collect())
    }

    /// Negate this filter.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another filter with AND.
    #[must_use]
    pub fn and(self, other: EventFilter) -> Self {
        match self {
            Self::All(mut filters) => {
                filters.push(other);
                Self::All(filters)
            }
            _ => Self::All(vec![self, other]),
        }
    }

    /// Add another filter with OR.
    #[must_use]
    pub fn or(self, other: EventFilter) -> Self {
        match self {
            Self::Any(mut filters) => {
                filters.push(other);
                Self::Any(filters)
            }
            _ => Self::Any(vec![self, other]),
        }
    }

    /// Check if `event` satisfies this filter.
    #[must_use]
    pub fn matches(&self, event: &BattleEvent) -> bool {
        match self {
            Self::Kind(kind) => event.kind() == *kind,
            Self::Player(player) => event.player() == *player,
            Self::Battle(id) => event.battle_id() == *id,
            Self::Winner(winner) => event.winner() == Some(*winner),
            Self::All(filters) => filters.iter().all(|f| f.matches(event)),
            Self::Any(filters) => filters.iter().any(|f| f.matches(event)),
            Self::Not(inner) => !inner.matches(event),
            Self::Always => true,
        }
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::Always
    }
}
