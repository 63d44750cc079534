//! Target resolution.
//!
//! Resolution always yields a list, possibly a singleton. It runs before any
//! handler, so handlers never re-check target health.

use crate::catalog::TargetMode;
use crate::state::{CharacterId, GameState};

/// Why a target set could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("no character in slot {0}")]
    UnknownTarget(usize),

    #[error("target {0} is already dead")]
    DeadTarget(CharacterId),

    #[error("no living character matches the target mode")]
    NoLivingTargets,
}

/// Resolves the characters a skill used by `user` in `mode` affects.
///
/// `target_index` is only read by [`TargetMode::Ally`] and [`TargetMode::Enemy`]
/// when the chosen side holds players. The enemy's only ally is itself, and a
/// player's only enemy is the boss.
pub fn get_target(
    state: &GameState,
    user: CharacterId,
    mode: TargetMode,
    target_index: usize,
) -> Result<Vec<CharacterId>, TargetError> {
    let targets = match mode {
        TargetMode::SelfOnly => return Ok(vec![user]),
        TargetMode::Ally => vec![single(state, same_side(user), target_index)?],
        TargetMode::Enemy => vec![single(state, opposing_side(user), target_index)?],
        TargetMode::AllAllies => side(state, same_side(user)),
        TargetMode::AllEnemies => side(state, opposing_side(user)),
        TargetMode::AllCharacters => {
            let mut targets = side(state, opposing_side(user));
            targets.extend(side(state, same_side(user)));
            targets
        }
    };

    if targets.is_empty() {
        return Err(TargetError::NoLivingTargets);
    }
    Ok(targets)
}

#[derive(Clone, Copy)]
enum Side {
    Boss,
    Party,
}

fn same_side(user: CharacterId) -> Side {
    if user.is_enemy() { Side::Boss } else { Side::Party }
}

fn opposing_side(user: CharacterId) -> Side {
    if user.is_enemy() { Side::Party } else { Side::Boss }
}

fn single(state: &GameState, side: Side, index: usize) -> Result<CharacterId, TargetError> {
    let (id, alive) = match side {
        Side::Boss => (CharacterId::Enemy, state.enemy.base.is_alive()),
        Side::Party => {
            let player = state
                .players
                .get(index)
                .ok_or(TargetError::UnknownTarget(index))?;
            (player.base.id, player.is_alive())
        }
    };
    if !alive {
        return Err(TargetError::DeadTarget(id));
    }
    Ok(id)
}

fn side(state: &GameState, side: Side) -> Vec<CharacterId> {
    match side {
        Side::Boss if state.enemy.base.is_alive() => vec![CharacterId::Enemy],
        Side::Boss => Vec::new(),
        Side::Party => state.living_slots().map(CharacterId::Player).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Character, Enemy, PlayerCharacter, SkillInstance};

    fn state() -> GameState {
        let attack = SkillInstance::new("attack".into(), 0);
        let mut state = GameState::new(Enemy::new(
            Character::new(CharacterId::Enemy, "boss", 200, 10),
            attack.clone(),
            attack,
        ));
        for (slot, name) in ["a", "b", "c"].into_iter().enumerate() {
            state.players.push(PlayerCharacter::new(
                Character::new(CharacterId::Player(slot), "ranger", 20, 10),
                name.into(),
            ));
        }
        state.players[1].kill();
        state
    }

    #[test]
    fn self_ignores_target_index() {
        let state = state();
        let user = CharacterId::Player(2);
        assert_eq!(get_target(&state, user, TargetMode::SelfOnly, 99), Ok(vec![user]));
    }

    #[test]
    fn single_ally_must_be_alive_and_exist() {
        let state = state();
        let user = CharacterId::Player(0);
        assert_eq!(
            get_target(&state, user, TargetMode::Ally, 2),
            Ok(vec![CharacterId::Player(2)])
        );
        assert_eq!(
            get_target(&state, user, TargetMode::Ally, 1),
            Err(TargetError::DeadTarget(CharacterId::Player(1)))
        );
        assert_eq!(
            get_target(&state, user, TargetMode::Ally, 5),
            Err(TargetError::UnknownTarget(5))
        );
    }

    #[test]
    fn player_enemy_is_always_the_boss() {
        let state = state();
        assert_eq!(
            get_target(&state, CharacterId::Player(0), TargetMode::Enemy, 7),
            Ok(vec![CharacterId::Enemy])
        );
    }

    #[test]
    fn enemy_sides_are_mirrored() {
        let state = state();
        let user = CharacterId::Enemy;
        assert_eq!(
            get_target(&state, user, TargetMode::Ally, 2),
            Ok(vec![CharacterId::Enemy])
        );
        assert_eq!(
            get_target(&state, user, TargetMode::Enemy, 2),
            Ok(vec![CharacterId::Player(2)])
        );
        assert_eq!(
            get_target(&state, user, TargetMode::AllEnemies, 0),
            Ok(vec![CharacterId::Player(0), CharacterId::Player(2)])
        );
        assert_eq!(
            get_target(&state, user, TargetMode::AllCharacters, 0),
            Ok(vec![
                CharacterId::Player(0),
                CharacterId::Player(2),
                CharacterId::Enemy
            ])
        );
    }

    #[test]
    fn all_allies_skips_the_dead() {
        let state = state();
        assert_eq!(
            get_target(&state, CharacterId::Player(0), TargetMode::AllAllies, 0),
            Ok(vec![CharacterId::Player(0), CharacterId::Player(2)])
        );
    }
}
