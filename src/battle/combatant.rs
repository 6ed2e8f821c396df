//! Battle-time card state and enemy deck synthesis.
//!
//! A `Combatant` is a card as it exists inside one battle: its health
//! drops as it takes damage. Player combatants are copied from registry
//! cards; enemy combatants are synthesized per battle and never persisted.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Ability, Card, CardId};
use crate::core::{EngineConfig, GameRng};

/// Which side of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// A card fighting in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// Registry card this combatant was copied from. `None` for enemies.
    pub source: Option<CardId>,
    pub health: u32,
    pub attack: u32,
    pub ability: Ability,
}

impl Combatant {
    /// Copy a registry card into battle.
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        Self {
            source: Some(card.id),
            health: card.health,
            attack: card.attack,
            ability: card.ability,
        }
    }

    /// A synthesized enemy card.
    #[must_use]
    pub const fn enemy(health: u32, attack: u32, ability: Ability) -> Self {
        Self {
            source: None,
            health,
            attack,
            ability,
        }
    }

    /// Check if the combatant still has health.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Subtract `damage` from health, stopping at 0.
    pub fn take_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }
}

/// A battle deck. Decks hold at most 3 cards, so they stay on the stack.
pub type Deck = SmallVec<[Combatant; 3]>;

/// Index of the first surviving combatant.
#[must_use]
pub fn front(deck: &[Combatant]) -> Option<usize> {
    deck.iter().position(Combatant::is_alive)
}

/// Sum of surviving health.
#[must_use]
pub fn total_health(deck: &[Combatant]) -> u64 {
    deck.iter().map(|c| u64::from(c.health)).sum()
}

/// Synthesize an enemy deck from `rng` within the configured ranges.
#[must_use]
pub fn synthesize_enemy_deck(rng: &mut GameRng, config: &EngineConfig) -> Deck {
    (0..config.enemy_deck_size)
        .map(|_| {
            let health = rng.gen_range(config.enemy_health.min..=config.enemy_health.max);
            let attack = rng.gen_range(config.enemy_attack.min..=config.enemy_attack.max);
            let ability = rng.choose(&Ability::ALL).copied().unwrap_or(Ability::Shield);
            Combatant::enemy(health, attack, ability)
        })
        .collect()
}
