//! Battle events emitted for the presentation layer.

use crate::catalog::{DamageSchool, SkillId};

use super::CharacterId;

/// Status change reported by a [`BattleEvent::Modifier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ModifierKind {
    Poison,
    Shield,
    Stun,
    Armor,
    Invulnerable,
    HealOverTime,
}

/// One observable change produced while resolving an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    SkillUsed {
        user: CharacterId,
        skill: SkillId,
    },
    Damage {
        target: CharacterId,
        /// Damage that reached health, after armor, invulnerability and shield.
        value: u32,
        starting_health: u32,
        final_health: u32,
        final_shield: u32,
        school: DamageSchool,
    },
    Heal {
        target: CharacterId,
        value: u32,
        starting_health: u32,
        final_health: u32,
    },
    PowerChanged {
        target: CharacterId,
        value: u32,
        starting_power: u32,
        final_power: u32,
    },
    Modifier {
        target: CharacterId,
        kind: ModifierKind,
        value: u32,
    },
}

impl BattleEvent {
    /// Character the event is about (the user for `SkillUsed`).
    pub fn subject(&self) -> CharacterId {
        match *self {
            BattleEvent::SkillUsed { user, .. } => user,
            BattleEvent::Damage { target, .. }
            | BattleEvent::Heal { target, .. }
            | BattleEvent::PowerChanged { target, .. }
            | BattleEvent::Modifier { target, .. } => target,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            BattleEvent::SkillUsed { .. } => "skill_used",
            BattleEvent::Damage { .. } => "damage",
            BattleEvent::Heal { .. } => "heal",
            BattleEvent::PowerChanged { .. } => "power_changed",
            BattleEvent::Modifier { .. } => "modifier",
        }
    }
}
