//! Card entities.
//!
//! A `Card` is an owned asset with fixed combat attributes. Attributes never
//! change after mint; only `owner` moves, through `CardRegistry::transfer_card`.

use serde::{Deserialize, Serialize};

use super::ability::Ability;
use crate::core::Address;

/// Unique identifier for a minted card.
///
/// Ids are assigned sequentially from 0 and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A minted card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub owner: Address,
    pub health: u32,
    pub attack: u32,
    pub ability: Ability,
}

impl Card {
    /// Check if `account` owns this card.
    #[must_use]
    pub fn is_owned_by(&self, account: Address) -> bool {
        self.owner == account
    }
}
