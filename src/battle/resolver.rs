//! Round-by-round combat resolution.
//!
//! ## Round structure
//!
//! 1. The front surviving player card faces the front surviving enemy card.
//! 2. Both abilities resolve in ascending configured priority. Abilities
//!    with no configured priority resolve after all configured ones; an
//!    exact tie resolves the player's card first.
//! 3. Damage is exchanged simultaneously.
//!
//! The battle ends when a side has no surviving cards or the round cap
//! is reached.
//!
//! ## Deciding the winner
//!
//! If exactly one side has survivors, it wins by elimination. Otherwise
//! (mutual wipe-out or round cap) the sides are compared on total
//! remaining health, then on total attack of surviving cards. The player
//! must be strictly ahead; a full tie goes to the enemy.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::combatant::{front, total_health, Combatant, Deck, Side};
use crate::cards::{Ability, PriorityTable};
use crate::core::GameRng;

/// One ability's effect within a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityUse {
    pub side: Side,
    pub ability: Ability,
    /// Frozen before it could resolve.
    pub cancelled: bool,
    /// Roulette multiplier, if one was rolled.
    pub roll: Option<u32>,
}

/// What happened in one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// 1-based round number.
    pub round: u32,
    /// Deck slot of the fighting player card.
    pub player_slot: usize,
    /// Deck slot of the fighting enemy card.
    pub enemy_slot: usize,
    /// Abilities in resolution order.
    pub abilities: SmallVec<[AbilityUse; 2]>,
    pub damage_to_enemy: u32,
    pub damage_to_player: u32,
}

/// How the winner was determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// One side ran out of cards.
    Elimination,
    /// Both sides wiped out or the round cap was hit.
    TieBreak,
}

/// Result of a full battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub winner: Side,
    pub decision: Decision,
    pub rounds: Vec<RoundReport>,
    /// Player deck after the last round.
    pub player: Deck,
    /// Enemy deck after the last round.
    pub enemy: Deck,
}

impl Resolution {
    /// Check if the player won.
    #[must_use]
    pub fn player_won(&self) -> bool {
        self.winner == Side::Player
    }
}

/// Per-side state while a round's abilities resolve.
#[derive(Clone, Copy, Debug)]
struct Stance {
    outgoing: u32,
    immune: bool,
    cancelled: bool,
}

impl Stance {
    fn new(attacker: &Combatant) -> Self {
        Self {
            outgoing: attacker.attack,
            immune: false,
            cancelled: false,
        }
    }
}

const fn slot(side: Side) -> usize {
    match side {
        Side::Player => 0,
        Side::Enemy => 1,
    }
}

/// Resolve a battle between two decks.
///
/// Roulette rolls are drawn from `rolls`, so the same decks and the same
/// stream always produce the same result.
pub fn resolve(
    mut player: Deck,
    mut enemy: Deck,
    priorities: &PriorityTable,
    rolls: &mut GameRng,
    max_rounds: u32,
) -> Resolution {
    let mut rounds = Vec::new();

    for round in 1..=max_rounds {
        let (Some(p), Some(e)) = (front(&player), front(&enemy)) else {
            break;
        };

        let report = fight_round(round, p, e, &mut player, &mut enemy, priorities, rolls);
        debug!(
            round,
            player_slot = p,
            enemy_slot = e,
            damage_to_enemy = report.damage_to_enemy,
            damage_to_player = report.damage_to_player,
            "round resolved"
        );
        rounds.push(report);
    }

    let (winner, decision) = decide(&player, &enemy);
    Resolution {
        winner,
        decision,
        rounds,
        player,
        enemy,
    }
}

fn fight_round(
    round: u32,
    p: usize,
    e: usize,
    player: &mut Deck,
    enemy: &mut Deck,
    priorities: &PriorityTable,
    rolls: &mut GameRng,
) -> RoundReport {
    let mut stances = [Stance::new(&player[p]), Stance::new(&enemy[e])];

    // Stable sort keeps the player first on equal keys.
    let mut order = [(Side::Player, player[p].ability), (Side::Enemy, enemy[e].ability)];
    order.sort_by_key(|(_, ability)| priorities.resolution_key(*ability));

    let mut abilities = SmallVec::new();
    for (side, ability) in order {
        let me = slot(side);
        let them = slot(side.opponent());

        if stances[me].cancelled {
            abilities.push(AbilityUse {
                side,
                ability,
                cancelled: true,
                roll: None,
            });
            continue;
        }

        let mut roll = None;
        match ability {
            Ability::Freeze => {
                stances[them].outgoing = 0;
                stances[them].cancelled = true;
            }
            Ability::Shield => stances[me].immune = true,
            Ability::Roulette => {
                let r = rolls.gen_range(0..=2);
                stances[me].outgoing = stances[me].outgoing.saturating_mul(r);
                roll = Some(r);
            }
        }
        abilities.push(AbilityUse {
            side,
            ability,
            cancelled: false,
            roll,
        });
    }

    let [ps, es] = stances;
    let damage_to_enemy = if es.immune { 0 } else { ps.outgoing };
    let damage_to_player = if ps.immune { 0 } else { es.outgoing };
    enemy[e].take_damage(damage_to_enemy);
    player[p].take_damage(damage_to_player);

    RoundReport {
        round,
        player_slot: p,
        enemy_slot: e,
        abilities,
        damage_to_enemy,
        damage_to_player,
    }
}

fn decide(player: &[Combatant], enemy: &[Combatant]) -> (Side, Decision) {
    match (front(player).is_some(), front(enemy).is_some()) {
        (true, false) => (Side::Player, Decision::Elimination),
        (false, true) => (Side::Enemy, Decision::Elimination),
        _ => {
            let winner = if standing(player) > standing(enemy) {
                Side::Player
            } else {
                Side::Enemy
            };
            (winner, Decision::TieBreak)
        }
    }
}

fn standing(deck: &[Combatant]) -> (u64, u64) {
    let attack = deck
        .iter()
        .filter(|c| c.is_alive())
        .map(|c| u64::from(c.attack))
        .sum();
    (total_health(deck), attack)
}
