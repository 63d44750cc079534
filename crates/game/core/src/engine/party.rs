//! Mid-battle joins and leaves.

use crate::env::BattleEnv;
use crate::state::{PlayerCharacter, PlayerId};
use crate::threat;

use super::{ActionReport, BattleSession, PartyError};

impl BattleSession<'_> {
    /// Adds `player_id` to the party with the next pooled class and scales the
    /// enemy up by one bonus.
    pub fn player_joined(
        &mut self,
        env: BattleEnv<'_>,
        player_id: PlayerId,
    ) -> Result<ActionReport, PartyError> {
        let state = &*self.state;
        let max = env.config().max_party_size;
        if state.outcome.is_some() || state.is_over() {
            return Err(PartyError::BattleOver);
        }
        if state.player_slot(&player_id).is_some() {
            return Err(PartyError::AlreadyJoined(player_id));
        }
        if state.players.len() >= max {
            return Err(PartyError::PartyFull { max });
        }
        let Some(class_id) = state.class_pool.last() else {
            return Err(PartyError::NoClassAvailable(player_id));
        };
        let class = env
            .catalog()
            .class(class_id)
            .ok_or_else(|| PartyError::UnknownClass(class_id.clone()))?;
        let slot = state.players.len();
        let player = PlayerCharacter::from_class(slot, player_id, class, env.catalog())?;

        let state = &mut *self.state;
        state.events.clear();
        state.class_pool.pop();
        tracing::info!(
            player = %player.player_id,
            class = %player.base.class_id,
            slot,
            "player joined"
        );
        state.players.push(player);
        state.enemy.grant_bonus(env.config().enemy_bonus_health);

        Ok(self.report(None))
    }

    /// Removes `player_id` from the battle.
    ///
    /// The class goes back to the pool and the enemy loses one bonus. Turn and
    /// target pointers keep following the same surviving players; if the
    /// leaver held the turn, the turn is finished on their behalf.
    pub fn player_left(
        &mut self,
        env: BattleEnv<'_>,
        player_id: &PlayerId,
    ) -> Result<ActionReport, PartyError> {
        if self.state.outcome.is_some() {
            return Err(PartyError::BattleOver);
        }
        let slot = self
            .state
            .player_slot(player_id)
            .ok_or_else(|| PartyError::UnknownPlayer(player_id.clone()))?;

        let state = &mut *self.state;
        state.events.clear();
        let was_turn = state.current_turn == slot;

        let class_id = state.players[slot].base.class_id.clone();
        if env.catalog().class(&class_id).is_some_and(|c| c.playable) {
            state.class_pool.push(class_id);
        }
        state.players[slot].kill();

        // The outcome names the leaver too, so it is taken before removal.
        let outcome = self.settle();

        let state = &mut *self.state;
        state.enemy.take_bonus(env.config().enemy_bonus_health);
        state.players.remove(slot);
        state.renumber_slots();

        if state.current_turn > slot {
            state.current_turn -= 1;
        }
        if state.enemy_target > slot {
            state.enemy_target -= 1;
        } else if state.enemy_target == slot {
            threat::retarget(state);
            state.enemy_target = state.enemy_target.min(state.players.len().saturating_sub(1));
        }

        tracing::info!(player = %player_id, slot, remaining = state.players.len(), "player left");

        if outcome.is_some() {
            return Ok(self.report(outcome));
        }

        if was_turn && !self.state.players.is_empty() {
            self.end_of_turn();
            if let Some(outcome) = self.settle() {
                return Ok(self.report(Some(outcome)));
            }
            self.advance_from(slot);
        }

        Ok(self.report(None))
    }
}
