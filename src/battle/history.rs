//! Append-only battle history.
//!
//! Battles are not stored as objects. Each battle appends a `Started` and
//! an `Ended` event, and everything else (a player's battles, their
//! results) is reconstructed from those events.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::filter::EventFilter;
use crate::core::{Address, GameResult};

/// Unique battle identifier, assigned sequentially from 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BattleId(pub u64);

impl BattleId {
    /// Create a new battle ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The id after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for BattleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Battle({})", self.0)
    }
}

/// Kind of a history event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Started,
    Ended,
}

/// A history record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// A battle began.
    Started {
        battle_id: BattleId,
        player: Address,
        timestamp: u64,
    },
    /// A battle was resolved. `winner` is the player's address, or
    /// `Address::ZERO` when the enemy won.
    Ended {
        battle_id: BattleId,
        player: Address,
        winner: Address,
    },
}

impl BattleEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Started { .. } => EventKind::Started,
            Self::Ended { .. } => EventKind::Ended,
        }
    }

    #[must_use]
    pub fn battle_id(&self) -> BattleId {
        match self {
            Self::Started { battle_id, .. } | Self::Ended { battle_id, .. } => *battle_id,
        }
    }

    #[must_use]
    pub fn player(&self) -> Address {
        match self {
            Self::Started { player, .. } | Self::Ended { player, .. } => *player,
        }
    }

    /// Winner of an `Ended` event.
    #[must_use]
    pub fn winner(&self) -> Option<Address> {
        match self {
            Self::Started { .. } => None,
            Self::Ended { winner, .. } => Some(*winner),
        }
    }
}

/// One battle reconstructed from its events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub battle_id: BattleId,
    pub player: Address,
    pub timestamp: u64,
    /// `None` if the `Ended` event is missing.
    pub winner: Option<Address>,
}

impl BattleSummary {
    /// Check if the player won this battle.
    #[must_use]
    pub fn player_won(&self) -> bool {
        self.winner == Some(self.player)
    }
}

/// Append-only event log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    events: Vector<BattleEvent>,
}

impl BattleLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: BattleEvent) {
        self.events.push_back(event);
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter()
    }

    /// Events matching `filter`, in emission order.
    #[must_use]
    pub fn query(&self, filter: &EventFilter) -> Vec<BattleEvent> {
        self.events
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    /// Ids of every battle `player` started, in order.
    #[must_use]
    pub fn battles_of(&self, player: Address) -> Vec<BattleId> {
        let filter = EventFilter::kind(EventKind::Started).and(EventFilter::Player(player));
        self.events
            .iter()
            .filter(|e| filter.matches(e))
            .map(BattleEvent::battle_id)
            .collect()
    }

    /// Start and end events of each of `player`'s battles, joined.
    #[must_use]
    pub fn summaries_of(&self, player: Address) -> Vec<BattleSummary> {
        let mut summaries: Vec<BattleSummary> = Vec::new();
        for event in self.events.iter().filter(|e| e.player() == player) {
            match *event {
                BattleEvent::Started {
                    battle_id,
                    player,
                    timestamp,
                } => summaries.push(BattleSummary {
                    battle_id,
                    player,
                    timestamp,
                    winner: None,
                }),
                BattleEvent::Ended {
                    battle_id, winner, ..
                } => {
                    if let Some(s) = summaries.iter_mut().rev().find(|s| s.battle_id == battle_id) {
                        s.winner = Some(winner);
                    }
                }
            }
        }
        summaries
    }

    /// Serialize the log for off-chain storage.
    pub fn export(&self) -> GameResult<Vec<u8>> {
        let events: Vec<&BattleEvent> = self.events.iter().collect();
        Ok(bincode::serialize(&events)?)
    }

    /// Rebuild a log from `export` output.
    pub fn import(bytes: &[u8]) -> GameResult<Self> {
        let events: Vec<BattleEvent> = bincode::deserialize(bytes)?;
        Ok(Self {
            events: events.into_iter().collect(),
        })
    }
}
