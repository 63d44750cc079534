//! Status and stat modifiers: pools, durations and power.

use crate::state::{BattleEvent, CharacterId, GameState, ModifierKind, StatusEffects};

/// Writes one status field and reports it.
fn apply(
    state: &mut GameState,
    target: CharacterId,
    kind: ModifierKind,
    value: u32,
    update: impl FnOnce(&mut StatusEffects, u32),
) -> Option<BattleEvent> {
    let character = state.character_mut(target)?;
    update(&mut character.effects, value);
    Some(BattleEvent::Modifier {
        target,
        kind,
        value,
    })
}

/// Replaces any existing poison with `amount` per tick.
pub fn poison(state: &mut GameState, target: CharacterId, amount: u32) -> Option<BattleEvent> {
    apply(state, target, ModifierKind::Poison, amount, |e, v| e.poison = v)
}

/// Replaces any existing regen with `amount` per tick.
pub fn heal_over_time(
    state: &mut GameState,
    target: CharacterId,
    amount: u32,
) -> Option<BattleEvent> {
    apply(state, target, ModifierKind::HealOverTime, amount, |e, v| {
        e.healing = v
    })
}

/// Adds `amount` to the shield pool.
pub fn shield(state: &mut GameState, target: CharacterId, amount: u32) -> Option<BattleEvent> {
    apply(state, target, ModifierKind::Shield, amount, |e, v| {
        e.shield = e.shield.saturating_add(v)
    })
}

pub fn stun(state: &mut GameState, target: CharacterId, duration: u32) -> Option<BattleEvent> {
    apply(state, target, ModifierKind::Stun, duration, |e, v| e.stunned = v)
}

pub fn armor_break(
    state: &mut GameState,
    target: CharacterId,
    duration: u32,
) -> Option<BattleEvent> {
    apply(state, target, ModifierKind::Armor, duration, |e, v| {
        e.armor_modifier = v
    })
}

pub fn invulnerable(
    state: &mut GameState,
    target: CharacterId,
    duration: u32,
) -> Option<BattleEvent> {
    apply(state, target, ModifierKind::Invulnerable, duration, |e, v| {
        e.invulnerable = v
    })
}

/// Raises power by a flat `value`.
pub fn boost_power(state: &mut GameState, target: CharacterId, value: u32) -> Option<BattleEvent> {
    let character = state.character_mut(target)?;
    let starting_power = character.power;
    character.power = character.power.saturating_add(value);
    Some(BattleEvent::PowerChanged {
        target,
        value,
        starting_power,
        final_power: character.power,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Character, Enemy, SkillInstance};

    fn state() -> GameState {
        let attack = SkillInstance::new("attack".into(), 0);
        GameState::new(Enemy::new(
            Character::new(CharacterId::Enemy, "boss", 100, 7),
            attack.clone(),
            attack,
        ))
    }

    #[test]
    fn shield_stacks_while_poison_overwrites() {
        let mut state = state();
        shield(&mut state, CharacterId::Enemy, 10);
        shield(&mut state, CharacterId::Enemy, 5);
        poison(&mut state, CharacterId::Enemy, 6);
        poison(&mut state, CharacterId::Enemy, 3);

        let effects = state.enemy.base.effects;
        assert_eq!(effects.shield, 15);
        assert_eq!(effects.poison, 3);
    }

    #[test]
    fn durations_are_set_not_added() {
        let mut state = state();
        stun(&mut state, CharacterId::Enemy, 2);
        let event = stun(&mut state, CharacterId::Enemy, 1);
        assert_eq!(state.enemy.base.effects.stunned, 1);
        assert_eq!(
            event,
            Some(BattleEvent::Modifier {
                target: CharacterId::Enemy,
                kind: ModifierKind::Stun,
                value: 1,
            })
        );
    }

    #[test]
    fn power_boost_reports_before_and_after() {
        let mut state = state();
        let event = boost_power(&mut state, CharacterId::Enemy, 4);
        assert_eq!(
            event,
            Some(BattleEvent::PowerChanged {
                target: CharacterId::Enemy,
                value: 4,
                starting_power: 7,
                final_power: 11,
            })
        );
    }
}
