//! The battle engine.
//!
//! `BattleEngine::battle` runs one complete battle inside a single call:
//! it checks the player's deck, synthesizes an enemy deck, resolves
//! combat, settles the win streak and reward, then appends the battle to
//! the history log.
//!
//! ## Atomicity
//!
//! Every check and the reward mint happen before the engine touches its
//! own state. A failing call leaves the battle counter, streaks and
//! history exactly as they were.

use tracing::{info, warn};

use super::combatant::{synthesize_enemy_deck, Combatant, Deck};
use super::history::{BattleEvent, BattleId, BattleLog};
use super::resolver::{resolve, Resolution};
use crate::cards::{CardId, CardRegistry};
use crate::core::{Address, CallContext, EngineConfig, GameError, GameResult, GameRng};
use crate::rewards::{RewardController, RewardPolicy, StreakUpdate};
use crate::token::TokenLedger;

/// Everything observable about one finished battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleOutcome {
    pub battle_id: BattleId,
    pub player: Address,
    pub timestamp: u64,
    /// Seed the enemy deck and roulette rolls were derived from.
    pub seed: u64,
    /// The player's deck as it entered the battle.
    pub player_deck: Deck,
    /// The synthesized enemy deck as it entered the battle.
    pub enemy_deck: Deck,
    pub resolution: Resolution,
    /// The player's address, or `Address::ZERO` if the enemy won.
    pub winner: Address,
    pub streak: StreakUpdate,
}

impl BattleOutcome {
    /// Check if the player won.
    #[must_use]
    pub fn player_won(&self) -> bool {
        self.resolution.player_won()
    }
}

/// Battle resolution, streak bookkeeping and history.
#[derive(Clone, Debug)]
pub struct BattleEngine {
    address: Address,
    deployer: Address,
    config: EngineConfig,
    next_battle_id: BattleId,
    token: Option<Address>,
    rewards: RewardController,
    log: BattleLog,
}

impl BattleEngine {
    /// Deploy an engine at `address`.
    ///
    /// Fails with `InvalidConfig` if `config` does not validate.
    pub fn new(deployer: Address, address: Address, config: EngineConfig) -> GameResult<Self> {
        config.validate()?;
        Ok(Self {
            address,
            deployer,
            rewards: RewardController::new(RewardPolicy::new(config.rewards)),
            config,
            next_battle_id: BattleId::new(0),
            token: None,
            log: BattleLog::new(),
        })
    }

    /// The engine's own address. Reward mints are made as this account.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Wire the reward token. Deployer only, once.
    pub fn set_token_address(&mut self, ctx: &CallContext, token: Address) -> GameResult<()> {
        if ctx.caller != self.deployer {
            warn!(caller = %ctx.caller, "token wiring rejected");
            return Err(GameError::Unauthorized(ctx.caller));
        }
        if let Some(existing) = self.token {
            return Err(GameError::TokenAlreadyConfigured(existing));
        }
        self.token = Some(token);
        info!(%token, "reward token configured");
        Ok(())
    }

    /// Address of the wired reward token.
    #[must_use]
    pub fn token_address(&self) -> Option<Address> {
        self.token
    }

    /// Current win streak of `player`.
    #[must_use]
    pub fn get_win_streak(&self, player: Address) -> u32 {
        self.rewards.win_streak(player)
    }

    /// The battle history.
    #[must_use]
    pub fn history(&self) -> &BattleLog {
        &self.log
    }

    /// Id the next battle will receive.
    #[must_use]
    pub fn next_battle_id(&self) -> BattleId {
        self.next_battle_id
    }

    /// Fight a battle with the caller's cards.
    ///
    /// `card_ids` must hold 1 to `max_deck_size` cards, all owned by
    /// `ctx.caller`, which cannot be `Address::ZERO`. An unminted id fails
    /// with `NotCardOwner`. The same card may appear more than once. On a win the
    /// reward is minted through `ledger`, which must be the wired token.
    pub fn battle<L>(
        &mut self,
        ctx: &CallContext,
        registry: &CardRegistry,
        ledger: &mut L,
        card_ids: &[CardId],
    ) -> GameResult<BattleOutcome>
    where
        L: TokenLedger + ?Sized,
    {
        let player = ctx.caller;
        if player.is_zero() {
            warn!("battle rejected: zero address caller");
            return Err(GameError::ZeroAddress);
        }
        let max = self.config.max_deck_size;
        if card_ids.is_empty() || card_ids.len() > max {
            warn!(%player, got = card_ids.len(), "battle rejected: deck size");
            return Err(GameError::InvalidDeckSize {
                got: card_ids.len(),
                max,
            });
        }
        if self.token != Some(ledger.address()) {
            warn!(%player, "battle rejected: reward token not configured");
            return Err(GameError::TokenNotConfigured);
        }

        let player_deck = card_ids
            .iter()
            .map(|&id| -> GameResult<Combatant> {
                // Unminted ids are not owned by anyone.
                match registry.nft_data(id) {
                    Ok(card) if card.is_owned_by(player) => Ok(Combatant::from_card(&card)),
                    _ => {
                        warn!(%player, card = %id, "battle rejected: not card owner");
                        Err(GameError::NotCardOwner { card: id, player })
                    }
                }
            })
            .collect::<GameResult<Deck>>()?;

        let battle_id = self.next_battle_id;
        let seed = GameRng::battle_seed(battle_id.raw(), player, ctx.timestamp, ctx.entropy);
        let rng = GameRng::new(seed);
        let enemy_deck = synthesize_enemy_deck(&mut rng.for_context("deck"), &self.config);

        let resolution = resolve(
            player_deck.clone(),
            enemy_deck.clone(),
            registry.priorities(),
            &mut rng.for_context("roulette"),
            self.config.max_rounds,
        );
        let won = resolution.player_won();

        let minter = ctx.as_caller(self.address);
        let streak = self.rewards.on_battle_resolved(&minter, ledger, player, won)?;

        let winner = if won { player } else { Address::ZERO };
        self.next_battle_id = battle_id.next();
        self.log.push(BattleEvent::Started {
            battle_id,
            player,
            timestamp: ctx.timestamp,
        });
        self.log.push(BattleEvent::Ended {
            battle_id,
            player,
            winner,
        });

        info!(
            battle = %battle_id,
            %player,
            won,
            rounds = resolution.rounds.len(),
            streak = streak.streak,
            reward = streak.reward.total(),
            "battle resolved"
        );

        Ok(BattleOutcome {
            battle_id,
            player,
            timestamp: ctx.timestamp,
            seed,
            player_deck,
            enemy_deck,
            resolution,
            winner,
            streak,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Role, MINTING_ROLE};
    use crate::core::StatRange;
    use crate::token::RewardToken;

    fn deployer() -> Address {
        Address::from_low_u64(1)
    }

    fn engine_addr() -> Address {
        Address::from_low_u64(2)
    }

    fn token_addr() -> Address {
        Address::from_low_u64(3)
    }

    fn player() -> Address {
        Address::from_low_u64(10)
    }

    struct Fixture {
        registry: CardRegistry,
        engine: BattleEngine,
        token: RewardToken,
    }

    fn fixture(config: EngineConfig) -> Fixture {
        let mut registry = CardRegistry::new(deployer());
        let admin = CallContext::new(deployer());
        for (ability, priority) in config.default_priorities.clone() {
            registry
                .set_ability_priority(&admin, ability.raw(), priority)
                .unwrap();
        }
        let mut engine = BattleEngine::new(deployer(), engine_addr(), config).unwrap();
        engine.set_token_address(&admin, token_addr()).unwrap();
        let token = RewardToken::new(token_addr(), deployer(), engine_addr());
        Fixture {
            registry,
            engine,
            token,
        }
    }

    fn mint(f: &mut Fixture, owner: Address, health: u32, attack: u32, ability: u8) -> CardId {
        f.registry
            .mint_card(&CallContext::new(deployer()), owner, health, attack, ability)
            .unwrap()
    }

    #[test]
    fn test_winning_battle() {
        let mut f = fixture(EngineConfig::default());
        let ids: Vec<_> = (0..3).map(|_| mint(&mut f, player(), 1000, 1000, 2)).collect();

        let ctx = CallContext::new(player()).at(500);
        let out = f
            .engine
            .battle(&ctx, &f.registry, &mut f.token, &ids)
            .unwrap();

        assert!(out.player_won());
        assert_eq!(out.winner, player());
        assert_eq!(out.battle_id, BattleId::new(0));
        assert_eq!(out.enemy_deck.len(), 3);
        assert_eq!(out.streak.streak, 1);
        assert_eq!(f.token.balance_of(player()), 100);
        assert_eq!(f.engine.get_win_streak(player()), 1);
        assert_eq!(f.engine.history().len(), 2);
        assert_eq!(f.engine.next_battle_id(), BattleId::new(1));
    }

    #[test]
    fn test_losing_battle() {
        let config = EngineConfig::new()
            .with_enemy_health(StatRange::exactly(1000))
            .with_enemy_attack(StatRange::exactly(1000));
        let mut f = fixture(config);
        let id = mint(&mut f, player(), 1, 1, 1);

        let out = f
            .engine
            .battle(&CallContext::new(player()), &f.registry, &mut f.token, &[id])
            .unwrap();

        assert!(!out.player_won());
        assert_eq!(out.winner, Address::ZERO);
        assert_eq!(f.token.balance_of(player()), 0);
        assert_eq!(f.engine.get_win_streak(player()), 0);
    }

    #[test]
    fn test_not_owner() {
        let mut f = fixture(EngineConfig::default());
        let id = mint(&mut f, Address::from_low_u64(11), 5, 5, 0);

        let err = f
            .engine
            .battle(&CallContext::new(player()), &f.registry, &mut f.token, &[id])
            .unwrap_err();
        assert_eq!(err, GameError::NotCardOwner { card: id, player: player() });
        assert!(err.to_string().contains("Player does not own this card"));
        assert!(f.engine.history().is_empty());
    }

    #[test]
    fn test_unminted_card_not_owned() {
        let mut f = fixture(EngineConfig::default());
        let id = mint(&mut f, player(), 5, 5, 0);

        let err = f
            .engine
            .battle(&CallContext::new(player()), &f.registry, &mut f.token, &[id, CardId::new(9)])
            .unwrap_err();
        assert_eq!(
            err,
            GameError::NotCardOwner {
                card: CardId::new(9),
                player: player(),
            }
        );
        assert_eq!(f.engine.next_battle_id(), BattleId::new(0));
        assert!(f.engine.history().is_empty());
    }

    #[test]
    fn test_zero_address_cannot_battle() {
        let mut f = fixture(EngineConfig::default());
        let id = mint(&mut f, player(), 5, 5, 0);

        let err = f
            .engine
            .battle(&CallContext::new(Address::ZERO), &f.registry, &mut f.token, &[id])
            .unwrap_err();
        assert_eq!(err, GameError::ZeroAddress);
        assert!(f.engine.history().is_empty());
        assert_eq!(f.token.total_supply(), 0);
    }

    #[test]
    fn test_deck_size() {
        let mut f = fixture(EngineConfig::default());
        let id = mint(&mut f, player(), 5, 5, 0);
        let ctx = CallContext::new(player());

        let err = f.engine.battle(&ctx, &f.registry, &mut f.token, &[]).unwrap_err();
        assert_eq!(err, GameError::InvalidDeckSize { got: 0, max: 3 });

        let err = f
            .engine
            .battle(&ctx, &f.registry, &mut f.token, &[id; 4])
            .unwrap_err();
        assert_eq!(err, GameError::InvalidDeckSize { got: 4, max: 3 });
    }

    #[test]
    fn test_duplicate_ids_allowed() {
        let mut f = fixture(EngineConfig::default());
        let id = mint(&mut f, player(), 5, 5, 0);

        let out = f
            .engine
            .battle(&CallContext::new(player()), &f.registry, &mut f.token, &[id, id, id])
            .unwrap();
        assert_eq!(out.player_deck.len(), 3);
    }

    #[test]
    fn test_token_wiring() {
        let mut engine = BattleEngine::new(deployer(), engine_addr(), EngineConfig::default()).unwrap();
        let registry = CardRegistry::new(deployer());
        let mut token = RewardToken::new(token_addr(), deployer(), engine_addr());

        let err = engine
            .battle(&CallContext::new(player()), &registry, &mut token, &[CardId::new(0)])
            .unwrap_err();
        assert_eq!(err, GameError::TokenNotConfigured);

        let stranger = CallContext::new(player());
        assert_eq!(
            engine.set_token_address(&stranger, token_addr()),
            Err(GameError::Unauthorized(player()))
        );

        let admin = CallContext::new(deployer());
        engine.set_token_address(&admin, token_addr()).unwrap();
        assert_eq!(
            engine.set_token_address(&admin, token_addr()),
            Err(GameError::TokenAlreadyConfigured(token_addr()))
        );
        assert_eq!(engine.token_address(), Some(token_addr()));
    }

    #[test]
    fn test_wrong_ledger_rejected() {
        let mut f = fixture(EngineConfig::default());
        let id = mint(&mut f, player(), 5, 5, 0);
        let mut other = RewardToken::new(Address::from_low_u64(77), deployer(), engine_addr());

        let err = f
            .engine
            .battle(&CallContext::new(player()), &f.registry, &mut other, &[id])
            .unwrap_err();
        assert_eq!(err, GameError::TokenNotConfigured);
    }

    #[test]
    fn test_failed_mint_leaves_no_trace() {
        let mut f = fixture(EngineConfig::default());
        // Token whose minters exclude the engine.
        f.token = RewardToken::new(token_addr(), deployer(), deployer());
        let ids: Vec<_> = (0..3).map(|_| mint(&mut f, player(), 1000, 1000, 2)).collect();

        let err = f
            .engine
            .battle(&CallContext::new(player()), &f.registry, &mut f.token, &ids)
            .unwrap_err();
        assert_eq!(err, GameError::Unauthorized(engine_addr()));
        assert_eq!(f.engine.get_win_streak(player()), 0);
        assert!(f.engine.history().is_empty());
        assert_eq!(f.engine.next_battle_id(), BattleId::new(0));
    }

    #[test]
    fn test_same_context_same_enemies() {
        let mut f = fixture(EngineConfig::default());
        let id = mint(&mut f, player(), 5, 5, 0);
        let ctx = CallContext::new(player()).at(42).with_entropy(9);

        let snapshot = f.engine.clone();
        let a = f.engine.battle(&ctx, &f.registry, &mut f.token, &[id]).unwrap();
        f.engine = snapshot;
        let b = f.engine.battle(&ctx, &f.registry, &mut f.token, &[id]).unwrap();

        assert_eq!(a.seed, b.seed);
        assert_eq!(a.enemy_deck, b.enemy_deck);
        assert_eq!(a.resolution, b.resolution);
    }

    #[test]
    fn test_minting_role_unrelated_to_battles() {
        // Battles need only card ownership, not any registry role.
        let mut f = fixture(EngineConfig::default());
        let id = mint(&mut f, player(), 5, 5, 0);
        assert!(!f.registry.has_role(MINTING_ROLE, player()));
        assert!(!f.registry.has_role(Role::Admin, player()));

        f.engine
            .battle(&CallContext::new(player()), &f.registry, &mut f.token, &[id])
            .unwrap();
    }
}
