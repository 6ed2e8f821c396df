//! Account addresses.
//!
//! Every actor in the arena (players, the deployer, the battle engine and
//! the reward token) is identified by a 20-byte `Address`.
//!
//! ## Sentinel
//!
//! `Address::ZERO` is never a valid caller. Battle history uses it as the
//! winner of battles the enemy deck won.
//!
//! ```
//! use card_arena::core::Address;
//!
//! let alice = Address::from_low_u64(1);
//! assert!(!alice.is_zero());
//! assert!(Address::ZERO.is_zero());
//! assert_eq!(alice.to_string(), "0x0000000000000000000000000000000000000001");
//! ```

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// A 20-byte account address.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address. Used as the "enemy" winner sentinel.
    pub const ZERO: Self = Self([0; 20]);

    /// Create an address from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Create an address whose low 8 bytes hold `value` (big-endian).
    ///
    /// Handy for tests and fixtures.
    #[must_use]
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Derive the address of a component created by `creator`.
    ///
    /// The same `(creator, nonce)` pair always yields the same address.
    #[must_use]
    pub fn derive(creator: Address, nonce: u64) -> Self {
        let mut bytes = [0u8; 20];
        for (salt, chunk) in bytes.chunks_mut(8).enumerate() {
            let mut hasher = FxHasher::default();
            creator.hash(&mut hasher);
            nonce.hash(&mut hasher);
            (salt as u64).hash(&mut hasher);
            let word = hasher.finish().to_be_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
        // A derived address must never collide with the sentinel.
        if bytes == [0u8; 20] {
            bytes[19] = 1;
        }
        Self(bytes)
    }

    /// Check if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert!(Address::ZERO.is_zero());
        assert!(Address::default().is_zero());
        assert!(!Address::from_low_u64(7).is_zero());
    }

    #[test]
    fn test_from_low_u64() {
        let addr = Address::from_low_u64(0x0102);
        assert_eq!(addr.0[18], 0x01);
        assert_eq!(addr.0[19], 0x02);
        assert_eq!(addr.0[..12], [0u8; 12]);
    }

    #[test]
    fn test_derive_is_deterministic() {
        let creator = Address::from_low_u64(1);
        assert_eq!(Address::derive(creator, 0), Address::derive(creator, 0));
        assert_ne!(Address::derive(creator, 0), Address::derive(creator, 1));
        assert_ne!(
            Address::derive(creator, 0),
            Address::derive(Address::from_low_u64(2), 0)
        );
        assert!(!Address::derive(creator, 0).is_zero());
    }

    #[test]
    fn test_display() {
        let addr = Address::from_low_u64(255);
        assert_eq!(format!("{addr}"), "0x00000000000000000000000000000000000000ff");
    }

    #[test]
    fn test_serialization() {
        let addr = Address::from_low_u64(42);
        let json = serde_json::to_string(&addr).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }
}
