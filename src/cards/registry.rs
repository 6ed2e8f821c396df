//! Card registry: minted cards, roles and ability priorities.
//!
//! The `CardRegistry` owns every minted card and is the only component
//! that mutates them. Other components read cards through `nft_data` and
//! `owner_of`, and read priorities through `priorities`.
//!
//! Storage uses `im` persistent structures so a whole registry can be
//! snapshotted in O(1) before an entry point runs.

use im::Vector;
use tracing::{info, warn};

use super::ability::{Ability, AbilityPriority, PriorityTable};
use super::card::{Card, CardId};
use super::role::{Role, RoleSet};
use crate::core::{Address, CallContext, GameError, GameResult};

/// Registry of minted cards.
///
/// ## Example
///
/// ```
/// use card_arena::cards::{CardRegistry, CardId};
/// use card_arena::core::{Address, CallContext};
///
/// let deployer = Address::from_low_u64(1);
/// let player = Address::from_low_u64(2);
/// let mut registry = CardRegistry::new(deployer);
///
/// let ctx = CallContext::new(deployer);
/// let id = registry.mint_card(&ctx, player, 10, 10, 1).unwrap();
///
/// assert_eq!(id, CardId::new(0));
/// assert_eq!(registry.owner_of(id).unwrap(), player);
/// ```
#[derive(Clone, Debug)]
pub struct CardRegistry {
    deployer: Address,
    /// Index is the card id.
    cards: Vector<Card>,
    roles: RoleSet,
    priorities: PriorityTable,
}

impl CardRegistry {
    /// Create an empty registry. `deployer` holds every role, permanently.
    #[must_use]
    pub fn new(deployer: Address) -> Self {
        Self {
            deployer,
            cards: Vector::new(),
            roles: RoleSet::with_superuser(deployer),
            priorities: PriorityTable::new(),
        }
    }

    /// The account that created this registry.
    #[must_use]
    pub fn deployer(&self) -> Address {
        self.deployer
    }

    // === Cards ===

    /// Mint a new card to `owner`.
    ///
    /// Caller must hold `MINTING_ROLE`. `ability` is the raw enum value and
    /// must be `0..=2`. `owner` cannot be `Address::ZERO`.
    pub fn mint_card(
        &mut self,
        ctx: &CallContext,
        owner: Address,
        health: u32,
        attack: u32,
        ability: u8,
    ) -> GameResult<CardId> {
        self.require_role(Role::Minter, ctx.caller)?;
        let ability = Ability::from_raw(ability)?;
        if health == 0 || attack == 0 {
            return Err(GameError::InvalidStats { health, attack });
        }
        if owner.is_zero() {
            return Err(GameError::ZeroAddress);
        }

        let id = CardId::new(self.cards.len() as u32);
        self.cards.push_back(Card {
            id,
            owner,
            health,
            attack,
            ability,
        });

        info!(card = %id, %owner, health, attack, %ability, minter = %ctx.caller, "card minted");
        Ok(id)
    }

    /// Look up a card by id.
    pub fn nft_data(&self, id: CardId) -> GameResult<Card> {
        self.cards.get(id.index()).cloned().ok_or(GameError::NotFound(id))
    }

    /// Current owner of a card.
    pub fn owner_of(&self, id: CardId) -> GameResult<Address> {
        self.cards
            .get(id.index())
            .map(|card| card.owner)
            .ok_or(GameError::NotFound(id))
    }

    /// Move a card to a new owner. Only the current owner may transfer.
    pub fn transfer_card(&mut self, ctx: &CallContext, to: Address, id: CardId) -> GameResult<()> {
        if to.is_zero() {
            return Err(GameError::ZeroAddress);
        }
        let card = self
            .cards
            .get_mut(id.index())
            .ok_or(GameError::NotFound(id))?;
        if !card.is_owned_by(ctx.caller) {
            return Err(GameError::NotCardOwner {
                card: id,
                player: ctx.caller,
            });
        }
        card.owner = to;

        info!(card = %id, from = %ctx.caller, %to, "card transferred");
        Ok(())
    }

    /// Ids of every card owned by `owner`, ascending.
    #[must_use]
    pub fn cards_of(&self, owner: Address) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|card| card.is_owned_by(owner))
            .map(|card| card.id)
            .collect()
    }

    /// Number of cards ever minted.
    #[must_use]
    pub fn total_supply(&self) -> usize {
        self.cards.len()
    }

    // === Roles ===

    /// Grant `role` to `account`. Only the deployer may grant.
    pub fn grant_role(&mut self, ctx: &CallContext, role: Role, account: Address) -> GameResult<()> {
        self.require_deployer(ctx.caller)?;
        if self.roles.grant(role, account) {
            info!(%role, %account, admin = %ctx.caller, "role granted");
        }
        Ok(())
    }

    /// Revoke `role` from `account`. Only the deployer may revoke, and
    /// never from itself.
    pub fn revoke_role(&mut self, ctx: &CallContext, role: Role, account: Address) -> GameResult<()> {
        self.require_deployer(ctx.caller)?;
        if account == self.deployer {
            return Err(GameError::DeployerRole(account));
        }
        if self.roles.revoke(role, account) {
            info!(%role, %account, admin = %ctx.caller, "role revoked");
        }
        Ok(())
    }

    /// Check if `account` holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.roles.has(role, account)
    }

    /// Accounts holding `role`.
    #[must_use]
    pub fn role_members(&self, role: Role) -> Vec<Address> {
        self.roles.members(role)
    }

    // === Priorities ===

    /// Assign a resolution priority to an ability. Caller must be an admin.
    pub fn set_ability_priority(&mut self, ctx: &CallContext, ability: u8, priority: u32) -> GameResult<()> {
        self.require_role(Role::Admin, ctx.caller)?;
        let ability = Ability::from_raw(ability)?;
        self.priorities.set(ability, priority)?;

        info!(%ability, priority, "ability priority set");
        Ok(())
    }

    /// Look up the priority of a raw ability value.
    pub fn ability_priority(&self, ability: u8) -> GameResult<AbilityPriority> {
        let ability = Ability::from_raw(ability)?;
        Ok(self.priorities.lookup(ability))
    }

    /// The full priority table, as read by the battle engine.
    #[must_use]
    pub fn priorities(&self) -> &PriorityTable {
        &self.priorities
    }

    fn require_deployer(&self, account: Address) -> GameResult<()> {
        if account == self.deployer {
            Ok(())
        } else {
            warn!(%account, "deployer check failed");
            Err(GameError::Unauthorized(account))
        }
    }

    fn require_role(&self, role: Role, account: Address) -> GameResult<()> {
        if self.roles.has(role, account) {
            Ok(())
        } else {
            warn!(%role, %account, "role check failed");
            Err(GameError::Unauthorized(account))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::MINTING_ROLE;

    fn deployer() -> Address {
        Address::from_low_u64(1)
    }

    fn alice() -> Address {
        Address::from_low_u64(2)
    }

    fn bob() -> Address {
        Address::from_low_u64(3)
    }

    fn as_deployer() -> CallContext {
        CallContext::new(deployer())
    }

    #[test]
    fn test_mint_assigns_sequential_ids() {
        let mut registry = CardRegistry::new(deployer());

        let id0 = registry.mint_card(&as_deployer(), alice(), 10, 10, 1).unwrap();
        let id1 = registry.mint_card(&as_deployer(), alice(), 3, 4, 2).unwrap();

        assert_eq!(id0, CardId::new(0));
        assert_eq!(id1, CardId::new(1));
        assert_eq!(registry.total_supply(), 2);
    }

    #[test]
    fn test_nft_data_returns_attributes() {
        let mut registry = CardRegistry::new(deployer());
        let id = registry.mint_card(&as_deployer(), alice(), 2, 4, 0).unwrap();

        let card = registry.nft_data(id).unwrap();
        assert_eq!(card.owner, alice());
        assert_eq!(card.health, 2);
        assert_eq!(card.attack, 4);
        assert_eq!(card.ability, Ability::Shield);
    }

    #[test]
    fn test_lookup_unassigned_id() {
        let registry = CardRegistry::new(deployer());

        assert_eq!(registry.nft_data(CardId::new(0)), Err(GameError::NotFound(CardId::new(0))));
        assert_eq!(registry.owner_of(CardId::new(7)), Err(GameError::NotFound(CardId::new(7))));
    }

    #[test]
    fn test_mint_requires_minting_role() {
        let mut registry = CardRegistry::new(deployer());

        let err = registry
            .mint_card(&CallContext::new(alice()), bob(), 1, 2, 1)
            .unwrap_err();
        assert_eq!(err, GameError::Unauthorized(alice()));
        assert_eq!(registry.total_supply(), 0);
    }

    #[test]
    fn test_granted_minter_can_mint() {
        let mut registry = CardRegistry::new(deployer());
        registry.grant_role(&as_deployer(), MINTING_ROLE, alice()).unwrap();

        let id = registry
            .mint_card(&CallContext::new(alice()), bob(), 1, 2, 1)
            .unwrap();
        assert_eq!(registry.owner_of(id).unwrap(), bob());
    }

    #[test]
    fn test_only_admin_grants() {
        let mut registry = CardRegistry::new(deployer());

        let err = registry
            .grant_role(&CallContext::new(alice()), MINTING_ROLE, alice())
            .unwrap_err();
        assert_eq!(err, GameError::Unauthorized(alice()));
        assert!(!registry.has_role(MINTING_ROLE, alice()));
    }

    #[test]
    fn test_revoke_minter() {
        let mut registry = CardRegistry::new(deployer());
        registry.grant_role(&as_deployer(), MINTING_ROLE, alice()).unwrap();
        registry.revoke_role(&as_deployer(), MINTING_ROLE, alice()).unwrap();

        assert!(registry
            .mint_card(&CallContext::new(alice()), bob(), 1, 1, 0)
            .is_err());
    }

    #[test]
    fn test_deployer_roles_permanent() {
        let mut registry = CardRegistry::new(deployer());

        for role in [Role::Admin, Role::Minter] {
            let err = registry.revoke_role(&as_deployer(), role, deployer()).unwrap_err();
            assert_eq!(err, GameError::DeployerRole(deployer()));
            assert!(registry.has_role(role, deployer()));
        }
    }

    #[test]
    fn test_granted_admin_cannot_delegate() {
        let mut registry = CardRegistry::new(deployer());
        registry.grant_role(&as_deployer(), Role::Admin, alice()).unwrap();
        let as_alice = CallContext::new(alice());

        assert_eq!(
            registry.grant_role(&as_alice, MINTING_ROLE, bob()),
            Err(GameError::Unauthorized(alice()))
        );
        assert_eq!(
            registry.revoke_role(&as_alice, Role::Admin, deployer()),
            Err(GameError::Unauthorized(alice()))
        );
        assert!(registry.mint_card(&CallContext::new(bob()), bob(), 1, 1, 0).is_err());
        assert!(registry.has_role(Role::Admin, deployer()));

        // Admin still configures priorities.
        registry.set_ability_priority(&as_alice, 0, 4).unwrap();
    }

    #[test]
    fn test_zero_address_cannot_own() {
        let mut registry = CardRegistry::new(deployer());

        assert_eq!(
            registry.mint_card(&as_deployer(), Address::ZERO, 1, 1, 0),
            Err(GameError::ZeroAddress)
        );
        let id = registry.mint_card(&as_deployer(), alice(), 1, 1, 0).unwrap();
        assert_eq!(
            registry.transfer_card(&CallContext::new(alice()), Address::ZERO, id),
            Err(GameError::ZeroAddress)
        );
        assert_eq!(registry.owner_of(id).unwrap(), alice());
        assert_eq!(registry.total_supply(), 1);
    }

    #[test]
    fn test_invalid_ability_rejected() {
        let mut registry = CardRegistry::new(deployer());

        let err = registry.mint_card(&as_deployer(), alice(), 1, 2, 4).unwrap_err();
        assert_eq!(err, GameError::InvalidAbility(4));
        assert_eq!(registry.total_supply(), 0);
    }

    #[test]
    fn test_zero_stats_rejected() {
        let mut registry = CardRegistry::new(deployer());

        assert!(matches!(
            registry.mint_card(&as_deployer(), alice(), 0, 2, 1),
            Err(GameError::InvalidStats { .. })
        ));
        assert!(matches!(
            registry.mint_card(&as_deployer(), alice(), 2, 0, 1),
            Err(GameError::InvalidStats { .. })
        ));
    }

    #[test]
    fn test_transfer_card() {
        let mut registry = CardRegistry::new(deployer());
        let id = registry.mint_card(&as_deployer(), alice(), 5, 5, 2).unwrap();

        let err = registry
            .transfer_card(&CallContext::new(bob()), bob(), id)
            .unwrap_err();
        assert_eq!(err, GameError::NotCardOwner { card: id, player: bob() });

        registry.transfer_card(&CallContext::new(alice()), bob(), id).unwrap();
        assert_eq!(registry.owner_of(id).unwrap(), bob());
        assert_eq!(registry.cards_of(bob()), vec![id]);
        assert!(registry.cards_of(alice()).is_empty());
    }

    #[test]
    fn test_set_and_read_priority() {
        let mut registry = CardRegistry::new(deployer());

        registry.set_ability_priority(&as_deployer(), 1, 1).unwrap();
        assert_eq!(registry.ability_priority(1).unwrap().priority, Some(1));

        registry.set_ability_priority(&as_deployer(), 1, 2).unwrap();
        assert_eq!(registry.ability_priority(1).unwrap().priority, Some(2));
        assert_eq!(registry.ability_priority(0).unwrap().priority, None);
    }

    #[test]
    fn test_priority_conflict() {
        let mut registry = CardRegistry::new(deployer());
        registry.set_ability_priority(&as_deployer(), 1, 1).unwrap();

        let err = registry.set_ability_priority(&as_deployer(), 2, 1).unwrap_err();
        assert!(err.to_string().starts_with("Ability priority already set"));
    }

    #[test]
    fn test_priority_requires_admin_and_valid_ability() {
        let mut registry = CardRegistry::new(deployer());

        assert_eq!(
            registry.set_ability_priority(&CallContext::new(alice()), 1, 1),
            Err(GameError::Unauthorized(alice()))
        );
        assert_eq!(
            registry.set_ability_priority(&as_deployer(), 10, 1),
            Err(GameError::InvalidAbility(10))
        );
        assert_eq!(registry.ability_priority(3), Err(GameError::InvalidAbility(3)));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut registry = CardRegistry::new(deployer());
        registry.mint_card(&as_deployer(), alice(), 1, 1, 0).unwrap();

        let snapshot = registry.clone();
        registry.mint_card(&as_deployer(), alice(), 1, 1, 0).unwrap();

        assert_eq!(snapshot.total_supply(), 1);
        assert_eq!(registry.total_supply(), 2);
    }
}
