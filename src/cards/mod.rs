//! Card system: abilities, cards, roles and the registry.
//!
//! ## Key Types
//!
//! - `CardId`: Sequential identifier of a minted card
//! - `Card`: Owned asset with health, attack and one `Ability`
//! - `PriorityTable`: Ability → priority with unique priorities
//! - `Role`: Access-control roles (`MINTING_ROLE`, `DEFAULT_ADMIN_ROLE`)
//! - `CardRegistry`: Owns cards, roles and priorities

pub mod ability;
pub mod card;
pub mod registry;
pub mod role;

pub use ability::{Ability, AbilityPriority, PriorityTable};
pub use card::{Card, CardId};
pub use registry::CardRegistry;
pub use role::{Role, RoleSet, DEFAULT_ADMIN_ROLE, MINTING_ROLE};
