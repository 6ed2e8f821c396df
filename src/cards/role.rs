//! Role-based access control for the card registry.
//!
//! Roles are an explicit grant set checked at the top of each restricted
//! operation. The deployer holds both roles at construction.

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};

use crate::core::Address;

/// Registry roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Grants and revokes roles, configures ability priorities.
    Admin,
    /// May mint cards.
    Minter,
}

/// Identifier of the role that may mint cards.
pub const MINTING_ROLE: Role = Role::Minter;

/// Identifier of the role that administers the registry.
pub const DEFAULT_ADMIN_ROLE: Role = Role::Admin;

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => f.write_str("DEFAULT_ADMIN_ROLE"),
            Role::Minter => f.write_str("MINTING_ROLE"),
        }
    }
}

/// Set of `(role, account)` grants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleSet {
    grants: ImHashSet<(Role, Address)>,
}

impl RoleSet {
    /// A role set where `account` holds every role.
    #[must_use]
    pub fn with_superuser(account: Address) -> Self {
        let mut set = Self::default();
        set.grant(Role::Admin, account);
        set.grant(Role::Minter, account);
        set
    }

    /// Check if `account` holds `role`.
    #[must_use]
    pub fn has(&self, role: Role, account: Address) -> bool {
        self.grants.contains(&(role, account))
    }

    /// Grant `role` to `account`. Returns `false` if already held.
    pub fn grant(&mut self, role: Role, account: Address) -> bool {
        self.grants.insert((role, account)).is_none()
    }

    /// Revoke `role` from `account`. Returns `false` if not held.
    pub fn revoke(&mut self, role: Role, account: Address) -> bool {
        self.grants.remove(&(role, account)).is_some()
    }

    /// Number of accounts holding `role`.
    #[must_use]
    pub fn count(&self, role: Role) -> usize {
        self.grants.iter().filter(|(r, _)| *r == role).count()
    }

    /// Accounts holding `role`, sorted.
    #[must_use]
    pub fn members(&self, role: Role) -> Vec<Address> {
        let mut members: Vec<_> = self
            .grants
            .iter()
            .filter(|(r, _)| *r == role)
            .map(|(_, account)| *account)
            .collect();
        members.sort();
        members
    }
}
