//! Battle session: validation, resolution pipeline and turn order.
//!
//! [`BattleSession`] is the only writer of a [`GameState`]. Every entry point
//! either rejects without touching the state or runs to completion: the
//! player's skill, the enemy's reaction, end-of-turn ticking and rotation.
//! The outcome is reported in the [`ActionReport`] of the action that ended
//! the battle and never again.

mod errors;
mod party;
mod turns;

pub use errors::{ActionError, ExecuteError, PartyError};

use crate::ai;
use crate::effect::{self, SkillRef};
use crate::env::BattleEnv;
use crate::state::{BattleEvent, BattleOutcome, BattlePhase, CharacterId, GameState, PlayerId};
use crate::threat;

/// What a resolved action produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionReport {
    /// Events in the order they happened.
    pub events: Vec<BattleEvent>,
    /// Set only by the action that ended the battle.
    pub outcome: Option<BattleOutcome>,
}

impl ActionReport {
    pub fn is_final(&self) -> bool {
        self.outcome.is_some()
    }
}

/// A validated player action, ready to resolve.
struct PlannedAction {
    slot: usize,
    skill: SkillRef,
    threat: i32,
    /// `None` when the player is stunned and forfeits the turn.
    targets: Option<Vec<CharacterId>>,
}

/// Drives one battle.
///
/// The session borrows the state; the read-only environment is passed to each
/// call so hosts can keep a single catalog for many sessions.
pub struct BattleSession<'a> {
    state: &'a mut GameState,
}

impl<'a> BattleSession<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Owned copy of the current state, for hosts that broadcast or roll back.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Resolves one skill use by `player_id`.
    ///
    /// `target_index` names a player slot for single-target modes and is
    /// ignored otherwise.
    pub fn use_skill(
        &mut self,
        env: BattleEnv<'_>,
        player_id: &PlayerId,
        skill_index: usize,
        target_index: usize,
    ) -> Result<ActionReport, ExecuteError> {
        let planned = self.plan(env, player_id, skill_index, target_index)?;

        self.state.events.clear();
        let acting = CharacterId::Player(planned.slot);

        match &planned.targets {
            Some(targets) => {
                effect::resolve_skill(self.state, env.catalog(), acting, planned.skill, targets)?;
                threat::update_threat(
                    self.state,
                    planned.slot,
                    planned.threat,
                    env.config().threat_decay_divisor,
                );
                if let Some(outcome) = self.settle() {
                    return Ok(self.report(Some(outcome)));
                }
            }
            None => {
                tracing::debug!(player = %player_id, "player is stunned and loses the turn");
            }
        }

        self.enemy_reaction(env)?;
        if let Some(outcome) = self.settle() {
            return Ok(self.report(Some(outcome)));
        }

        self.end_of_turn();
        if let Some(outcome) = self.settle() {
            return Ok(self.report(Some(outcome)));
        }

        self.advance_turn();
        Ok(self.report(None))
    }

    /// Validates an action without mutating anything.
    fn plan(
        &self,
        env: BattleEnv<'_>,
        player_id: &PlayerId,
        skill_index: usize,
        target_index: usize,
    ) -> Result<PlannedAction, ExecuteError> {
        let state = &*self.state;
        if state.outcome.is_some() || (state.phase == BattlePhase::Active && state.is_over()) {
            return Err(ActionError::BattleOver.into());
        }
        if state.phase != BattlePhase::Active {
            return Err(ActionError::BattleNotActive.into());
        }

        let slot = state
            .player_slot(player_id)
            .ok_or_else(|| ActionError::UnknownPlayer(player_id.clone()))?;
        if slot != state.current_turn {
            return Err(ActionError::NotPlayersTurn {
                player: player_id.clone(),
                current_turn: state.current_turn,
            }
            .into());
        }

        let character = &state.players[slot].base;
        let instance =
            character
                .skills
                .get(skill_index)
                .ok_or(ActionError::SkillIndexOutOfRange {
                    index: skill_index,
                    available: character.skills.len(),
                })?;
        if !instance.is_ready() {
            return Err(ActionError::SkillOnCooldown {
                index: skill_index,
                wait: instance.wait,
            }
            .into());
        }

        let acting = CharacterId::Player(slot);
        let skill = SkillRef::Slot(skill_index);
        let definition = effect::definition_of(state, env.catalog(), acting, skill)?;

        let targets = if character.effects.is_stunned() {
            None
        } else {
            let targets = effect::get_target(state, acting, definition.target, target_index)
                .map_err(ActionError::from)?;
            Some(targets)
        };

        Ok(PlannedAction {
            slot,
            skill,
            threat: definition.threat,
            targets,
        })
    }

    /// Lets the enemy act against its favored target.
    fn enemy_reaction(&mut self, env: BattleEnv<'_>) -> Result<(), ExecuteError> {
        let turns = self.state.turns;
        let favored = self.state.enemy_target;
        let Some(choice) = ai::choose_skill(&mut self.state.enemy, turns, favored, env.config())
        else {
            return Ok(());
        };

        let definition =
            effect::definition_of(self.state, env.catalog(), CharacterId::Enemy, choice.skill)?;
        let targets = match effect::get_target(
            self.state,
            CharacterId::Enemy,
            definition.target,
            choice.target,
        ) {
            Ok(targets) => targets,
            Err(err) => {
                tracing::debug!(%err, "enemy reaction has no valid target");
                return Ok(());
            }
        };

        effect::resolve_skill(
            self.state,
            env.catalog(),
            CharacterId::Enemy,
            choice.skill,
            &targets,
        )?;
        Ok(())
    }

    /// Records the outcome once the battle has ended.
    fn settle(&mut self) -> Option<BattleOutcome> {
        if self.state.outcome.is_some() {
            return None;
        }
        let result = self.state.terminal_result()?;
        let outcome = self.state.outcome_for(result);
        tracing::info!(%result, turns = self.state.turns, "battle ended");
        self.state.outcome = Some(outcome.clone());
        Some(outcome)
    }

    fn report(&self, outcome: Option<BattleOutcome>) -> ActionReport {
        ActionReport {
            events: self.state.events.clone(),
            outcome,
        }
    }
}
