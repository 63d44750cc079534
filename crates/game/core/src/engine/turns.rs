use crate::catalog::DamageSchool;
use crate::effect::{damage, healing};
use crate::state::{CharacterId, GameState};

use super::BattleSession;

/// Applies one character's regen and poison, then counts its durations and
/// cooldowns down by one.
fn tick_character(state: &mut GameState, id: CharacterId) {
    let Some(effects) = state.character(id).map(|c| c.effects) else {
        return;
    };

    if effects.healing > 0 {
        if let Some(event) = healing::heal(state, id, effects.healing) {
            state.events.push(event);
        }
    }
    if effects.poison > 0 {
        if let Some(event) = damage::deal_damage(state, id, effects.poison, DamageSchool::Poison) {
            state.events.push(event);
        }
    }

    if let Some(character) = state.character_mut(id) {
        character.effects.tick_durations();
        character.tick_cooldowns();
    }
}

/// Turn scheduling methods for BattleSession.
impl BattleSession<'_> {
    /// End-of-turn ticking: the enemy first, then every player in slot order.
    /// Dead players hold no effects, so only their cooldowns move.
    pub(super) fn end_of_turn(&mut self) {
        tick_character(self.state, CharacterId::Enemy);
        for slot in 0..self.state.players.len() {
            tick_character(self.state, CharacterId::Player(slot));
        }
    }

    /// Moves the turn to the next living player after the current one,
    /// wrapping around, and counts the turn.
    pub(super) fn advance_turn(&mut self) {
        let start = self.state.current_turn + 1;
        self.advance_from(start);
    }

    /// Gives the turn to the first living player at or after `start` in
    /// rotation order. With nobody alive the turn stays put.
    pub(super) fn advance_from(&mut self, start: usize) {
        let state = &mut *self.state;
        state.turns += 1;

        let count = state.players.len();
        if let Some(next) = (0..count)
            .map(|step| (start + step) % count)
            .find(|&slot| state.players[slot].is_alive())
        {
            state.current_turn = next;
        }

        tracing::debug!(
            current_turn = state.current_turn,
            turns = state.turns,
            "turn advanced"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BattleEvent, Character, Enemy, PlayerCharacter, SkillInstance};

    fn party(size: usize) -> GameState {
        let attack = SkillInstance::new("attack".into(), 0);
        let mut state = GameState::new(Enemy::new(
            Character::new(CharacterId::Enemy, "boss", 200, 10),
            attack.clone(),
            attack,
        ));
        for slot in 0..size {
            let base = Character::new(CharacterId::Player(slot), "ranger", 20, 10)
                .with_skill(SkillInstance::new("volley".into(), 2))
                .unwrap();
            state
                .players
                .push(PlayerCharacter::new(base, format!("p{slot}").as_str().into()));
        }
        state
    }

    #[test]
    fn rotation_skips_the_dead_and_wraps() {
        let mut state = party(4);
        state.current_turn = 1;
        state.players[2].kill();
        state.players[3].kill();

        let mut session = BattleSession::new(&mut state);
        session.advance_turn();
        assert_eq!(session.state().current_turn, 0);
        assert_eq!(session.state().turns, 1);
    }

    #[test]
    fn lone_survivor_keeps_the_turn() {
        let mut state = party(3);
        state.current_turn = 1;
        state.players[0].kill();
        state.players[2].kill();

        let mut session = BattleSession::new(&mut state);
        session.advance_turn();
        assert_eq!(session.state().current_turn, 1);
    }

    #[test]
    fn ticking_applies_regen_then_poison_and_counts_down() {
        let mut state = party(1);
        let effects = &mut state.players[0].base.effects;
        effects.healing = 3;
        effects.poison = 5;
        effects.stunned = 1;
        effects.healing_modifier = 2;
        state.players[0].base.current_health = 10;

        let mut session = BattleSession::new(&mut state);
        session.end_of_turn();
        let state = session.state();

        assert!(matches!(
            state.events[0],
            BattleEvent::Heal { value: 2, final_health: 12, .. }
        ));
        assert!(matches!(
            state.events[1],
            BattleEvent::Damage { value: 5, final_health: 7, school: DamageSchool::Poison, .. }
        ));
        let player = &state.players[0].base;
        assert_eq!(player.effects.stunned, 0);
        assert_eq!(player.effects.healing_modifier, 1);
        assert_eq!(player.effects.poison, 5);
        assert_eq!(player.skills[0].wait, 1);
    }

    #[test]
    fn dead_players_still_cool_down() {
        let mut state = party(2);
        state.players[1].base.skills[0].wait = 2;
        state.players[1].kill();

        let mut session = BattleSession::new(&mut state);
        session.end_of_turn();
        let state = session.state();

        assert!(state.events.is_empty());
        let dead = &state.players[1];
        assert_eq!(dead.base.skills[0].wait, 1);
        assert_eq!(dead.base.current_health, 0);
        assert!(!dead.is_alive());
    }

    #[test]
    fn enemy_ticks_before_players() {
        let mut state = party(1);
        state.enemy.base.effects.poison = 1;
        state.players[0].base.effects.poison = 1;

        let mut session = BattleSession::new(&mut state);
        session.end_of_turn();
        let subjects: Vec<_> = session.state().events.iter().map(|e| e.subject()).collect();
        assert_eq!(subjects, vec![CharacterId::Enemy, CharacterId::Player(0)]);
    }
}
