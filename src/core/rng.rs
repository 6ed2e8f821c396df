//! Deterministic random number generation for battles.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Battle-seeded**: A battle's seed folds together the battle id, the
//!   caller, the block timestamp and block entropy, so decks cannot be
//!   predicted before the block is known but can be replayed afterwards
//! - **Context streams**: Independent sequences for different purposes
//!   (enemy deck synthesis vs. roulette rolls)
//!
//! ```
//! use card_arena::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut deck = rng.for_context("deck");
//! let mut rolls = rng.for_context("roulette");
//!
//! let mut deck2 = GameRng::new(42).for_context("deck");
//! assert_eq!(deck.gen_range(1..=10), deck2.gen_range(1..=10));
//! # let _ = rolls.gen_range(0..=2);
//! ```

use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

use super::address::Address;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed for one battle.
    ///
    /// Folds every input into the seed; changing any of them changes
    /// the enemy deck.
    #[must_use]
    pub fn battle_seed(battle_id: u64, caller: Address, timestamp: u64, entropy: u64) -> u64 {
        let mut hasher = FxHasher::default();
        battle_id.hash(&mut hasher);
        caller.hash(&mut hasher);
        timestamp.hash(&mut hasher);
        entropy.hash(&mut hasher);
        hasher.finish()
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given inclusive range.
    pub fn gen_range(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
