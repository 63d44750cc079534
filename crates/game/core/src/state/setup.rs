//! Battle setup: boss selection, class dealing and entering the active phase.

use crate::catalog::CatalogError;
use crate::env::{BattleEnv, compute_seed, seed_context, shuffle};
use crate::error::{ErrorSeverity, GameError};

use super::{BattlePhase, Enemy, GameState, PlayerCharacter, PlayerId};

/// Errors raised while creating a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("a battle needs at least one player")]
    EmptyParty,

    #[error("party of {size} exceeds the maximum of {max}")]
    PartyTooLarge { size: usize, max: usize },

    #[error("player '{0}' appears more than once")]
    DuplicatePlayer(PlayerId),

    #[error("unknown boss '{0}'")]
    UnknownBoss(String),

    #[error("unknown class '{0}'")]
    UnknownClass(String),

    #[error("no unused class left for player '{0}'")]
    ClassPoolExhausted(PlayerId),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Catalog(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyParty => "SETUP_EMPTY_PARTY",
            Self::PartyTooLarge { .. } => "SETUP_PARTY_TOO_LARGE",
            Self::DuplicatePlayer(_) => "SETUP_DUPLICATE_PLAYER",
            Self::UnknownBoss(_) => "SETUP_UNKNOWN_BOSS",
            Self::UnknownClass(_) => "SETUP_UNKNOWN_CLASS",
            Self::ClassPoolExhausted(_) => "SETUP_CLASS_POOL_EXHAUSTED",
            Self::Catalog(err) => err.error_code(),
        }
    }
}

impl GameState {
    /// Creates an active battle for `player_ids`.
    ///
    /// The boss is `boss` when given, otherwise drawn from the catalog with
    /// `seed`. Playable classes are shuffled with the same seed and dealt in
    /// join order, so the same `(catalog, player_ids, seed, boss)` always
    /// yields the same state.
    pub fn setup(
        env: BattleEnv<'_>,
        player_ids: &[PlayerId],
        seed: u64,
        boss: Option<&str>,
    ) -> Result<Self, SetupError> {
        let catalog = env.catalog();
        let config = env.config();

        if player_ids.is_empty() {
            return Err(SetupError::EmptyParty);
        }
        if player_ids.len() > config.max_party_size {
            return Err(SetupError::PartyTooLarge {
                size: player_ids.len(),
                max: config.max_party_size,
            });
        }
        for (i, id) in player_ids.iter().enumerate() {
            if player_ids[..i].contains(id) {
                return Err(SetupError::DuplicatePlayer(id.clone()));
            }
        }

        let boss = match boss {
            Some(id) => catalog
                .boss(id)
                .ok_or_else(|| SetupError::UnknownBoss(id.to_string()))?,
            None => {
                let bosses = catalog.bosses();
                let draw = compute_seed(seed, 0, seed_context::BOSS_SELECTION);
                let index = env.rng().range(draw, 0, bosses.len().saturating_sub(1) as u32);
                bosses
                    .get(index as usize)
                    .ok_or(SetupError::Catalog(CatalogError::NoBosses))?
            }
        };

        let mut state = GameState::new(Enemy::from_boss(boss, catalog)?);
        state.seed = seed;
        state.class_pool = catalog.playable_classes().map(|c| c.id.clone()).collect();
        shuffle(&mut state.class_pool, env.rng(), seed, seed_context::CLASS_POOL);

        for player_id in player_ids {
            let class_id = state
                .class_pool
                .pop()
                .ok_or_else(|| SetupError::ClassPoolExhausted(player_id.clone()))?;
            let class = catalog
                .class(&class_id)
                .ok_or_else(|| SetupError::UnknownClass(class_id.clone()))?;
            let slot = state.players.len();
            state
                .players
                .push(PlayerCharacter::from_class(slot, player_id.clone(), class, catalog)?);
        }

        state.enter_battle(config.enemy_bonus_health);

        tracing::info!(
            boss = %state.enemy.base.class_id,
            players = state.players.len(),
            enemy_health = state.enemy.base.health,
            seed,
            "battle started"
        );

        Ok(state)
    }

    /// Moves the battle from setup to active and scales the enemy to the party.
    pub fn enter_battle(&mut self, bonus_health: u32) {
        self.phase = BattlePhase::Active;
        self.current_turn = 0;
        self.enemy_target = 0;
        self.events.clear();
        for _ in 1..self.players.len() {
            self.enemy.grant_bonus(bonus_health);
        }
    }
}
