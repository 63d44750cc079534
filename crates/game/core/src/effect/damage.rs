//! Damage application: invulnerability, armor, shield, health, death.

use crate::catalog::DamageSchool;
use crate::config::BattleConfig;
use crate::state::{BattleEvent, CharacterId, GameState};
use crate::threat;

/// Deals `amount` to `target` and returns the resulting event.
///
/// Order matters for balance:
/// 1. an invulnerable target takes nothing (shield untouched)
/// 2. an armor modifier raises the amount to 150%, rounded down
/// 3. the shield pool absorbs as much as it can
/// 4. the remainder comes off health, clamped at zero
/// 5. a player brought to zero dies (effects reset, threat cleared)
pub fn deal_damage(
    state: &mut GameState,
    target: CharacterId,
    amount: u32,
    school: DamageSchool,
) -> Option<BattleEvent> {
    let character = state.character_mut(target)?;
    let starting_health = character.current_health;
    let effects = &mut character.effects;

    let mut value = 0;
    if !effects.is_invulnerable() {
        let mut incoming = amount;
        if effects.has_armor_modifier() {
            incoming = incoming * BattleConfig::ARMOR_DAMAGE_PERCENT / 100;
        }
        let absorbed = incoming.min(effects.shield);
        effects.shield -= absorbed;
        value = incoming - absorbed;
        character.current_health = character.current_health.saturating_sub(value);
    }

    let died = value > 0 && character.current_health == 0;
    let final_health = character.current_health;
    let final_shield = character.effects.shield;

    if died {
        if let CharacterId::Player(slot) = target {
            kill_player(state, slot);
        } else {
            tracing::debug!("enemy defeated");
        }
    }

    Some(BattleEvent::Damage {
        target,
        value,
        starting_health,
        final_health,
        final_shield,
        school,
    })
}

/// Marks the player in `slot` dead and moves the enemy's aim off them.
pub fn kill_player(state: &mut GameState, slot: usize) {
    let Some(player) = state.players.get_mut(slot) else {
        return;
    };
    player.kill();
    tracing::debug!(slot, player = %player.player_id, "player character died");
    threat::retarget(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Character, Enemy, PlayerCharacter, SkillInstance};

    fn state() -> GameState {
        let attack = SkillInstance::new("attack".into(), 0);
        let enemy = Enemy::new(
            Character::new(CharacterId::Enemy, "boss", 200, 10),
            attack.clone(),
            attack,
        );
        let mut state = GameState::new(enemy);
        for (slot, name) in ["a", "b"].into_iter().enumerate() {
            state.players.push(PlayerCharacter::new(
                Character::new(CharacterId::Player(slot), "ranger", 20, 10),
                name.into(),
            ));
        }
        state
    }

    fn damage_fields(event: Option<BattleEvent>) -> (u32, u32, u32, u32) {
        match event {
            Some(BattleEvent::Damage {
                value,
                starting_health,
                final_health,
                final_shield,
                ..
            }) => (value, starting_health, final_health, final_shield),
            other => panic!("expected damage event, got {other:?}"),
        }
    }

    #[test]
    fn plain_damage_reduces_health() {
        let mut state = state();
        let event = deal_damage(&mut state, CharacterId::Enemy, 10, DamageSchool::Physical);
        assert_eq!(damage_fields(event), (10, 200, 190, 0));
    }

    #[test]
    fn shield_absorbs_before_health() {
        let mut state = state();
        state.enemy.base.effects.shield = 6;
        let event = deal_damage(&mut state, CharacterId::Enemy, 10, DamageSchool::Physical);
        assert_eq!(damage_fields(event), (4, 200, 196, 0));

        state.enemy.base.effects.shield = 15;
        let event = deal_damage(&mut state, CharacterId::Enemy, 10, DamageSchool::Physical);
        assert_eq!(damage_fields(event), (0, 196, 196, 5));
    }

    #[test]
    fn armor_modifier_multiplies_before_shield() {
        let mut state = state();
        state.enemy.base.effects.armor_modifier = 2;
        state.enemy.base.effects.shield = 5;
        // 11 * 1.5 = 16 (floored), 5 absorbed
        let event = deal_damage(&mut state, CharacterId::Enemy, 11, DamageSchool::Fire);
        assert_eq!(damage_fields(event), (11, 200, 189, 0));
    }

    #[test]
    fn invulnerability_ignores_armor_and_keeps_shield() {
        let mut state = state();
        let effects = &mut state.enemy.base.effects;
        effects.invulnerable = 1;
        effects.armor_modifier = 3;
        effects.shield = 4;
        let event = deal_damage(&mut state, CharacterId::Enemy, 50, DamageSchool::Physical);
        assert_eq!(damage_fields(event), (0, 200, 200, 4));
    }

    #[test]
    fn lethal_damage_kills_player_and_clamps_health() {
        let mut state = state();
        state.players[0].base.effects.poison = 2;
        state.players[0].threat = 30;
        state.players[1].threat = 5;
        state.enemy_target = 0;

        let event = deal_damage(&mut state, CharacterId::Player(0), 25, DamageSchool::Physical);

        assert_eq!(damage_fields(event), (25, 20, 0, 0));
        let player = &state.players[0];
        assert!(player.dead);
        assert_eq!(player.base.effects.poison, 0);
        assert_eq!(player.threat, 0);
        assert_eq!(state.enemy_target, 1);
    }

    #[test]
    fn unknown_target_yields_no_event() {
        let mut state = state();
        assert!(deal_damage(&mut state, CharacterId::Player(9), 5, DamageSchool::Physical).is_none());
    }
}
