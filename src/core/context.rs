//! Call context: who is calling, and when.
//!
//! Every state-changing entry point takes a `CallContext`. It carries what
//! the execution environment would otherwise provide implicitly: the
//! caller's address, the block timestamp, and block-level entropy used to
//! seed enemy deck synthesis.

use serde::{Deserialize, Serialize};

use super::address::Address;

/// Execution context of a single entry-point call.
///
/// ```
/// use card_arena::core::{Address, CallContext};
///
/// let ctx = CallContext::new(Address::from_low_u64(1))
///     .at(1_700_000_000)
///     .with_entropy(0xfeed);
///
/// assert_eq!(ctx.timestamp, 1_700_000_000);
/// assert_eq!(ctx.entropy, 0xfeed);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Address of the account making the call.
    pub caller: Address,

    /// Block timestamp (seconds).
    pub timestamp: u64,

    /// Block-level entropy (e.g. previous block hash folded to 64 bits).
    pub entropy: u64,
}

impl CallContext {
    /// Create a context for `caller` at timestamp 0 with no entropy.
    #[must_use]
    pub const fn new(caller: Address) -> Self {
        Self {
            caller,
            timestamp: 0,
            entropy: 0,
        }
    }

    /// Set the timestamp (builder pattern).
    #[must_use]
    pub const fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the block entropy (builder pattern).
    #[must_use]
    pub const fn with_entropy(mut self, entropy: u64) -> Self {
        self.entropy = entropy;
        self
    }

    /// The same block, but a different caller.
    ///
    /// Used when one component calls another on its own behalf.
    #[must_use]
    pub const fn as_caller(self, caller: Address) -> Self {
        Self { caller, ..self }
    }
}
