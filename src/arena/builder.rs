//! Arena deployment.

use tracing::info;

use super::Arena;
use crate::battle::BattleEngine;
use crate::cards::CardRegistry;
use crate::core::{Address, CallContext, EngineConfig, GameResult};
use crate::token::RewardToken;

/// Builder for deploying an `Arena`.
///
/// The registry, engine and token get addresses derived from the deployer
/// (nonces 0, 1 and 2). The engine is the token's initial minter and is
/// wired to it before `build` returns.
///
/// ```
/// use card_arena::arena::ArenaBuilder;
/// use card_arena::core::Address;
///
/// let arena = ArenaBuilder::new(Address::from_low_u64(1))
///     .with_default_priorities()
///     .build()
///     .unwrap();
/// assert_eq!(arena.ability_priority(1).unwrap().priority, Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct ArenaBuilder {
    deployer: Address,
    config: EngineConfig,
    default_priorities: bool,
}

impl ArenaBuilder {
    #[must_use]
    pub fn new(deployer: Address) -> Self {
        Self {
            deployer,
            config: EngineConfig::default(),
            default_priorities: false,
        }
    }

    /// Use `config` instead of the defaults.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply `config.default_priorities` to the registry at deployment.
    #[must_use]
    pub fn with_default_priorities(mut self) -> Self {
        self.default_priorities = true;
        self
    }

    /// Deploy and wire every component.
    pub fn build(self) -> GameResult<Arena> {
        let deployer = self.deployer;
        let ctx = CallContext::new(deployer);

        let registry_addr = Address::derive(deployer, 0);
        let engine_addr = Address::derive(deployer, 1);
        let token_addr = Address::derive(deployer, 2);

        let mut engine = BattleEngine::new(deployer, engine_addr, self.config)?;

        let mut registry = CardRegistry::new(deployer);
        if self.default_priorities {
            for &(ability, priority) in &engine.config().default_priorities {
                registry.set_ability_priority(&ctx, ability.raw(), priority)?;
            }
        }

        let token = RewardToken::new(token_addr, deployer, engine_addr);
        engine.set_token_address(&ctx, token_addr)?;

        info!(
            %deployer,
            registry = %registry_addr,
            engine = %engine_addr,
            token = %token_addr,
            "arena deployed"
        );

        Ok(Arena {
            registry_address: registry_addr,
            registry,
            engine,
            token,
        })
    }
}
