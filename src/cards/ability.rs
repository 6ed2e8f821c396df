//! Card abilities and their resolution priorities.
//!
//! Every card carries exactly one `Ability`. Within a battle round the two
//! fighting cards' abilities resolve in ascending priority: the ability
//! with the numerically lower priority acts first.
//!
//! ## Uniqueness
//!
//! No two abilities may hold the same priority at the same time. The
//! `PriorityTable` enforces this on every write; an ability may always be
//! moved to a new priority or re-set to the one it already holds.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameResult};

/// The fixed set of card abilities.
///
/// Raw values are `0..=2`; anything else is rejected with
/// `GameError::InvalidAbility`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Ability {
    /// Takes no damage this round.
    Shield = 0,
    /// Multiplies this round's outgoing damage by a roll of 0, 1 or 2.
    Roulette = 1,
    /// The opposing card deals no damage this round and loses its ability
    /// if it has not resolved yet.
    Freeze = 2,
}

impl Ability {
    /// All abilities in raw-value order.
    pub const ALL: [Ability; 3] = [Ability::Shield, Ability::Roulette, Ability::Freeze];

    /// Parse a raw ability value.
    ///
    /// ```
    /// use card_arena::cards::Ability;
    ///
    /// assert_eq!(Ability::from_raw(2).unwrap(), Ability::Freeze);
    /// assert!(Ability::from_raw(3).is_err());
    /// ```
    pub fn from_raw(raw: u8) -> GameResult<Self> {
        match raw {
            0 => Ok(Ability::Shield),
            1 => Ok(Ability::Roulette),
            2 => Ok(Ability::Freeze),
            other => Err(GameError::InvalidAbility(other)),
        }
    }

    /// Raw value of this ability.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Ability {
    type Error = GameError;

    fn try_from(raw: u8) -> GameResult<Self> {
        Self::from_raw(raw)
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Ability::Shield => "Shield",
            Ability::Roulette => "Roulette",
            Ability::Freeze => "Freeze",
        };
        f.write_str(name)
    }
}

/// Result of an `ability_priority` lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityPriority {
    pub ability: Ability,
    /// `None` until a configurer assigns one.
    pub priority: Option<u32>,
}

/// Ability → priority mapping with unique priorities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityTable {
    slots: [Option<u32>; 3],
}

impl PriorityTable {
    /// Create an empty table (no ability configured).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Priority of `ability`, if configured.
    #[must_use]
    pub fn get(&self, ability: Ability) -> Option<u32> {
        self.slots[ability.index()]
    }

    /// The ability currently holding `priority`.
    #[must_use]
    pub fn holder_of(&self, priority: u32) -> Option<Ability> {
        Ability::ALL
            .into_iter()
            .find(|a| self.slots[a.index()] == Some(priority))
    }

    /// Assign `priority` to `ability`.
    ///
    /// Fails with `PriorityConflict` if a different ability holds it.
    pub fn set(&mut self, ability: Ability, priority: u32) -> GameResult<()> {
        match self.holder_of(priority) {
            Some(holder) if holder != ability => {
                Err(GameError::PriorityConflict { priority, holder })
            }
            _ => {
                self.slots[ability.index()] = Some(priority);
                Ok(())
            }
        }
    }

    /// Lookup in the registry's public shape.
    #[must_use]
    pub fn lookup(&self, ability: Ability) -> AbilityPriority {
        AbilityPriority {
            ability,
            priority: self.get(ability),
        }
    }

    /// Sort key for resolution order.
    ///
    /// Configured abilities come first in ascending priority; unconfigured
    /// ones follow in raw-value order.
    #[must_use]
    pub fn resolution_key(&self, ability: Ability) -> (bool, u32, u8) {
        match self.get(ability) {
            Some(priority) => (false, priority, ability.raw()),
            None => (true, 0, ability.raw()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        for ability in Ability::ALL {
            assert_eq!(Ability::from_raw(ability.raw()).unwrap(), ability);
        }
        assert_eq!(Ability::from_raw(4), Err(GameError::InvalidAbility(4)));
        assert_eq!(Ability::try_from(1u8), Ok(Ability::Roulette));
    }

    #[test]
    fn test_display() {
        assert_eq!(Ability::Shield.to_string(), "Shield");
        assert_eq!(Ability::Freeze.to_string(), "Freeze");
    }

    #[test]
    fn test_set_and_get() {
        let mut table = PriorityTable::new();
        assert_eq!(table.get(Ability::Roulette), None);

        table.set(Ability::Roulette, 1).unwrap();
        assert_eq!(table.get(Ability::Roulette), Some(1));
        assert_eq!(table.holder_of(1), Some(Ability::Roulette));
    }

    #[test]
    fn test_reset_same_ability() {
        let mut table = PriorityTable::new();
        table.set(Ability::Roulette, 1).unwrap();
        table.set(Ability::Roulette, 1).unwrap();
        table.set(Ability::Roulette, 2).unwrap();

        assert_eq!(table.get(Ability::Roulette), Some(2));
        assert_eq!(table.holder_of(1), None);
    }

    #[test]
    fn test_conflict() {
        let mut table = PriorityTable::new();
        table.set(Ability::Roulette, 1).unwrap();

        let err = table.set(Ability::Freeze, 1).unwrap_err();
        assert_eq!(
            err,
            GameError::PriorityConflict {
                priority: 1,
                holder: Ability::Roulette
            }
        );
        assert_eq!(table.get(Ability::Freeze), None);
    }

    #[test]
    fn test_freed_priority_can_be_reused() {
        let mut table = PriorityTable::new();
        table.set(Ability::Shield, 1).unwrap();
        table.set(Ability::Shield, 5).unwrap();

        assert!(table.set(Ability::Freeze, 1).is_ok());
    }

    #[test]
    fn test_resolution_key_orders_unconfigured_last() {
        let mut table = PriorityTable::new();
        table.set(Ability::Freeze, 7).unwrap();

        let mut abilities = Ability::ALL.to_vec();
        abilities.sort_by_key(|a| table.resolution_key(*a));

        assert_eq!(abilities, vec![Ability::Freeze, Ability::Shield, Ability::Roulette]);
    }
}
