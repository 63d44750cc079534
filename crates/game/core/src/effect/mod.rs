//! Effect resolver: turns one skill use into state changes and events.
//!
//! [`resolve_skill`] records the use, puts the skill on cooldown and then
//! dispatches on the skill's [`Mechanic`]. The dispatch is an exhaustive
//! `match`, so adding a mechanic fails to compile until it has a handler.
//! Composite mechanics are sequences of the simple handlers.
pub mod damage;
pub mod handlers;
pub mod healing;
pub mod modifiers;
mod targeting;

pub use handlers::Cast;
pub use targeting::{TargetError, get_target};

use crate::catalog::{Catalog, Mechanic, SkillDefinition, SkillId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BattleEvent, CharacterId, GameState, SkillInstance};

/// Names a skill instance owned by a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillRef {
    /// Index into the character's skill slots.
    Slot(usize),
    /// The enemy's fallback attack.
    BasicAttack,
    /// The enemy's self-heal.
    Recovery,
}

/// Structural failures while resolving a skill. These indicate broken
/// content, not bad input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("skill '{0}' is not in the catalog")]
    UnknownSkill(SkillId),

    #[error("{user} has no skill {skill:?}")]
    MissingSkill { user: CharacterId, skill: SkillRef },
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSkill(_) => "RESOLVE_UNKNOWN_SKILL",
            Self::MissingSkill { .. } => "RESOLVE_MISSING_SKILL",
        }
    }
}

fn instance(state: &GameState, user: CharacterId, skill: SkillRef) -> Option<&SkillInstance> {
    match (skill, user) {
        (SkillRef::Slot(index), _) => state.character(user)?.skills.get(index),
        (SkillRef::BasicAttack, CharacterId::Enemy) => Some(&state.enemy.basic_attack),
        (SkillRef::Recovery, CharacterId::Enemy) => Some(&state.enemy.recovery),
        _ => None,
    }
}

fn instance_mut(
    state: &mut GameState,
    user: CharacterId,
    skill: SkillRef,
) -> Option<&mut SkillInstance> {
    match (skill, user) {
        (SkillRef::Slot(index), _) => state.character_mut(user)?.skills.get_mut(index),
        (SkillRef::BasicAttack, CharacterId::Enemy) => Some(&mut state.enemy.basic_attack),
        (SkillRef::Recovery, CharacterId::Enemy) => Some(&mut state.enemy.recovery),
        _ => None,
    }
}

/// Looks up the definition behind one of `user`'s skill instances.
pub fn definition_of<'c>(
    state: &GameState,
    catalog: &'c Catalog,
    user: CharacterId,
    skill: SkillRef,
) -> Result<&'c SkillDefinition, ResolveError> {
    let instance = instance(state, user, skill).ok_or(ResolveError::MissingSkill { user, skill })?;
    catalog
        .skill(instance.skill.as_str())
        .ok_or_else(|| ResolveError::UnknownSkill(instance.skill.clone()))
}

/// Resolves `skill` used by `user` against the already resolved `targets`.
///
/// Events are appended to `state.events`; the log is not cleared here.
pub fn resolve_skill(
    state: &mut GameState,
    catalog: &Catalog,
    user: CharacterId,
    skill: SkillRef,
    targets: &[CharacterId],
) -> Result<(), ResolveError> {
    let definition = definition_of(state, catalog, user, skill)?;
    if let Some(instance) = instance_mut(state, user, skill) {
        instance.trigger(definition.cooldown);
    }

    state.events.push(BattleEvent::SkillUsed {
        user,
        skill: definition.id.clone(),
    });

    tracing::debug!(
        %user,
        skill = %definition.id,
        mechanic = definition.mechanic.name(),
        targets = targets.len(),
        "resolving skill"
    );

    let cast = Cast {
        user,
        school: definition.school,
    };
    match definition.mechanic {
        Mechanic::Attack => handlers::attack(state, cast, targets),
        Mechanic::DamageByFactor { percent } => {
            handlers::damage_by_factor(state, cast, targets, percent)
        }
        Mechanic::HealByFactor { percent } => handlers::heal_by_factor(state, cast, targets, percent),
        Mechanic::HealByPercent { permille } => handlers::heal_by_percent(state, targets, permille),
        Mechanic::Poison => handlers::poison(state, cast, targets),
        Mechanic::AttackPoison => {
            handlers::attack(state, cast, targets);
            handlers::poison(state, cast, targets);
        }
        Mechanic::DamagePoison { percent } => {
            handlers::damage_by_factor(state, cast, targets, percent);
            handlers::poison(state, cast, targets);
        }
        Mechanic::AttackBonusIfPoisoned { percent } => {
            handlers::attack_bonus_if_poisoned(state, cast, targets, percent)
        }
        Mechanic::Stun { duration } => handlers::stun(state, targets, duration),
        Mechanic::AttackStun { duration } => {
            handlers::attack(state, cast, targets);
            handlers::stun(state, targets, duration);
        }
        Mechanic::Invulnerable { duration } => handlers::invulnerable(state, targets, duration),
        Mechanic::ArmorBreak { duration } => handlers::armor_break(state, targets, duration),
        Mechanic::Shield { percent } => handlers::shield(state, cast, targets, percent),
        Mechanic::BuffPower { value } => handlers::buff_power(state, targets, value),
        Mechanic::HealOverTime { percent } => handlers::heal_over_time(state, cast, targets, percent),
        Mechanic::ConsumeHealOverTime { multiplier } => {
            handlers::consume_heal_over_time(state, targets, multiplier)
        }
    }
    Ok(())
}
