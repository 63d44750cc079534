//! One handler per mechanic.
//!
//! Handlers receive an already resolved, non-empty target list and never
//! fail. Every produced event is appended to the state's event log.

use crate::catalog::DamageSchool;
use crate::state::{BattleEvent, CharacterId, GameState};

use super::{damage, healing, modifiers};

/// The acting side of one resolution pass.
#[derive(Clone, Copy, Debug)]
pub struct Cast {
    pub user: CharacterId,
    pub school: DamageSchool,
}

fn push(state: &mut GameState, event: Option<BattleEvent>) {
    if let Some(event) = event {
        state.events.push(event);
    }
}

fn power_of(state: &GameState, id: CharacterId) -> u32 {
    state.character(id).map_or(0, |c| c.power)
}

/// `floor(power * percent / 100)`, at least 1.
pub fn scaled(power: u32, percent: u32) -> u32 {
    (power.saturating_mul(percent) / 100).max(1)
}

/// One exchange of blows: the target takes `power`, then hits back with its own.
fn strike(state: &mut GameState, cast: Cast, target: CharacterId, power: u32) {
    let hit = damage::deal_damage(state, target, power, cast.school);
    push(state, hit);
    let reaction = power_of(state, target);
    let counter = damage::deal_damage(state, cast.user, reaction, DamageSchool::Physical);
    push(state, counter);
}

pub fn attack(state: &mut GameState, cast: Cast, targets: &[CharacterId]) {
    let power = power_of(state, cast.user);
    for &target in targets {
        strike(state, cast, target, power);
    }
}

pub fn damage_by_factor(state: &mut GameState, cast: Cast, targets: &[CharacterId], percent: u32) {
    let amount = scaled(power_of(state, cast.user), percent);
    for &target in targets {
        let event = damage::deal_damage(state, target, amount, cast.school);
        push(state, event);
    }
}

pub fn heal_by_factor(state: &mut GameState, cast: Cast, targets: &[CharacterId], percent: u32) {
    let amount = scaled(power_of(state, cast.user), percent);
    for &target in targets {
        let event = healing::heal(state, target, amount);
        push(state, event);
    }
}

/// Heals each target by a share of its own maximum health.
pub fn heal_by_percent(state: &mut GameState, targets: &[CharacterId], permille: u32) {
    for &target in targets {
        let max = state.character(target).map_or(0, |c| c.health);
        let amount = (max.saturating_mul(permille) / 1000).max(1);
        let event = healing::heal(state, target, amount);
        push(state, event);
    }
}

pub fn poison(state: &mut GameState, cast: Cast, targets: &[CharacterId]) {
    let amount = (power_of(state, cast.user) / 2).max(1);
    for &target in targets {
        let event = modifiers::poison(state, target, amount);
        push(state, event);
    }
}

/// Attacks each target, with boosted power against targets already poisoned.
pub fn attack_bonus_if_poisoned(
    state: &mut GameState,
    cast: Cast,
    targets: &[CharacterId],
    percent: u32,
) {
    let power = power_of(state, cast.user);
    for &target in targets {
        let poisoned = state
            .character(target)
            .is_some_and(|c| c.effects.is_poisoned());
        let power = if poisoned {
            power.saturating_mul(percent) / 100
        } else {
            power
        };
        strike(state, cast, target, power);
    }
}

pub fn stun(state: &mut GameState, targets: &[CharacterId], duration: u32) {
    for &target in targets {
        let event = modifiers::stun(state, target, duration);
        push(state, event);
    }
}

pub fn invulnerable(state: &mut GameState, targets: &[CharacterId], duration: u32) {
    for &target in targets {
        let event = modifiers::invulnerable(state, target, duration);
        push(state, event);
    }
}

pub fn armor_break(state: &mut GameState, targets: &[CharacterId], duration: u32) {
    for &target in targets {
        let event = modifiers::armor_break(state, target, duration);
        push(state, event);
    }
}

pub fn shield(state: &mut GameState, cast: Cast, targets: &[CharacterId], percent: u32) {
    let amount = scaled(power_of(state, cast.user), percent);
    for &target in targets {
        let event = modifiers::shield(state, target, amount);
        push(state, event);
    }
}

pub fn buff_power(state: &mut GameState, targets: &[CharacterId], value: u32) {
    for &target in targets {
        let event = modifiers::boost_power(state, target, value);
        push(state, event);
    }
}

pub fn heal_over_time(state: &mut GameState, cast: Cast, targets: &[CharacterId], percent: u32) {
    let amount = scaled(power_of(state, cast.user), percent);
    for &target in targets {
        let event = modifiers::heal_over_time(state, target, amount);
        push(state, event);
    }
}

/// Converts each target's pending regen into an immediate heal.
pub fn consume_heal_over_time(state: &mut GameState, targets: &[CharacterId], multiplier: u32) {
    for &target in targets {
        let Some(character) = state.character_mut(target) else {
            continue;
        };
        let amount = character.effects.healing.saturating_mul(multiplier).max(1);
        character.effects.healing = 0;
        let event = healing::heal(state, target, amount);
        push(state, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Character, Enemy, PlayerCharacter, SkillInstance};

    fn state() -> GameState {
        let attack = SkillInstance::new("attack".into(), 0);
        let mut state = GameState::new(Enemy::new(
            Character::new(CharacterId::Enemy, "boss", 200, 8),
            attack.clone(),
            attack,
        ));
        for (slot, name) in ["a", "b"].into_iter().enumerate() {
            state.players.push(PlayerCharacter::new(
                Character::new(CharacterId::Player(slot), "ranger", 50, 10),
                name.into(),
            ));
        }
        state
    }

    fn cast(user: CharacterId) -> Cast {
        Cast {
            user,
            school: DamageSchool::Physical,
        }
    }

    #[test]
    fn attack_trades_blows_with_each_target() {
        let mut state = state();
        attack(&mut state, cast(CharacterId::Player(0)), &[CharacterId::Enemy]);

        assert_eq!(state.events.len(), 2);
        assert_eq!(state.enemy.base.current_health, 190);
        assert_eq!(state.players[0].base.current_health, 42);
    }

    #[test]
    fn scaled_amounts_never_drop_below_one() {
        assert_eq!(scaled(10, 150), 15);
        assert_eq!(scaled(1, 50), 1);
        assert_eq!(scaled(0, 100), 1);
    }

    #[test]
    fn bonus_applies_only_to_poisoned_targets() {
        let mut state = state();
        attack_bonus_if_poisoned(&mut state, cast(CharacterId::Player(0)), &[CharacterId::Enemy], 200);
        assert_eq!(state.enemy.base.current_health, 190);

        state.enemy.base.effects.poison = 3;
        attack_bonus_if_poisoned(&mut state, cast(CharacterId::Player(0)), &[CharacterId::Enemy], 200);
        assert_eq!(state.enemy.base.current_health, 170);
    }

    #[test]
    fn poison_is_half_the_users_power() {
        let mut state = state();
        poison(&mut state, cast(CharacterId::Enemy), &[CharacterId::Player(0), CharacterId::Player(1)]);
        assert_eq!(state.players[0].base.effects.poison, 4);
        assert_eq!(state.players[1].base.effects.poison, 4);
    }

    #[test]
    fn heal_by_percent_uses_the_targets_own_maximum() {
        let mut state = state();
        state.players[1].base.current_health = 10;
        heal_by_percent(&mut state, &[CharacterId::Player(1)], 200);
        assert_eq!(state.players[1].base.current_health, 20);
    }

    #[test]
    fn consuming_regen_heals_and_clears_it() {
        let mut state = state();
        state.players[0].base.current_health = 10;
        state.players[0].base.effects.healing = 4;
        consume_heal_over_time(&mut state, &[CharacterId::Player(0)], 3);
        assert_eq!(state.players[0].base.current_health, 22);
        assert_eq!(state.players[0].base.effects.healing, 0);

        // nothing pending still heals for one
        consume_heal_over_time(&mut state, &[CharacterId::Player(0)], 3);
        assert_eq!(state.players[0].base.current_health, 23);
    }
}
