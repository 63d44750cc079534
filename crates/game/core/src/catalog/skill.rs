//! Skill definitions: targeting, mechanics and their numeric parameters.

use std::borrow::Borrow;
use std::fmt;

/// Stable string identifier of a skill definition.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SkillId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SkillId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Which characters a skill may be aimed at.
///
/// "Ally" and "enemy" are relative to the user: for a player the enemy is the
/// boss, for the boss the enemies are the players.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetMode {
    SelfOnly,
    Ally,
    Enemy,
    AllAllies,
    AllEnemies,
    AllCharacters,
}

impl TargetMode {
    /// Returns true if the action must name a target index.
    pub fn requires_target_index(&self) -> bool {
        matches!(self, TargetMode::Ally | TargetMode::Enemy)
    }
}

/// Damage school carried by damage events so observers can tell a fire
/// breath from a sword hit or a poison tick.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageSchool {
    #[default]
    Physical,
    Fire,
    Poison,
}

/// Effect-resolution handler selected by a skill.
///
/// Each variant carries the parameters its handler needs. Factors are integer
/// percentages of the user's power, so `percent: 150` reads "1.5x power".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mechanic {
    /// Hit each target for the user's power; each target strikes back.
    Attack,
    /// Deal a percentage of the user's power to each target.
    DamageByFactor { percent: u32 },
    /// Heal each target by a percentage of the user's power.
    HealByFactor { percent: u32 },
    /// Heal each target by a per-mille share of its own max health.
    HealByPercent { permille: u32 },
    /// Poison each target for half the user's power.
    Poison,
    AttackPoison,
    DamagePoison { percent: u32 },
    /// Attack, with power scaled by `percent` against poisoned targets.
    AttackBonusIfPoisoned { percent: u32 },
    Stun { duration: u32 },
    AttackStun { duration: u32 },
    Invulnerable { duration: u32 },
    /// Targets take increased damage while the modifier lasts.
    ArmorBreak { duration: u32 },
    /// Add a percentage of the user's power to each target's shield pool.
    Shield { percent: u32 },
    BuffPower { value: u32 },
    /// Set each target's regen to a percentage of the user's power.
    HealOverTime { percent: u32 },
    /// Burst-heal each target for `regen * multiplier`, clearing the regen.
    ConsumeHealOverTime { multiplier: u32 },
}

impl Mechanic {
    /// Duration carried by status-applying mechanics.
    pub fn duration(&self) -> Option<u32> {
        match *self {
            Mechanic::Stun { duration }
            | Mechanic::AttackStun { duration }
            | Mechanic::Invulnerable { duration }
            | Mechanic::ArmorBreak { duration } => Some(duration),
            _ => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Mechanic::Attack => "attack",
            Mechanic::DamageByFactor { .. } => "damage_by_factor",
            Mechanic::HealByFactor { .. } => "heal_by_factor",
            Mechanic::HealByPercent { .. } => "heal_by_percent",
            Mechanic::Poison => "poison",
            Mechanic::AttackPoison => "attack_poison",
            Mechanic::DamagePoison { .. } => "damage_poison",
            Mechanic::AttackBonusIfPoisoned { .. } => "attack_bonus_if_poisoned",
            Mechanic::Stun { .. } => "stun",
            Mechanic::AttackStun { .. } => "attack_stun",
            Mechanic::Invulnerable { .. } => "invulnerable",
            Mechanic::ArmorBreak { .. } => "armor_break",
            Mechanic::Shield { .. } => "shield",
            Mechanic::BuffPower { .. } => "buff_power",
            Mechanic::HealOverTime { .. } => "heal_over_time",
            Mechanic::ConsumeHealOverTime { .. } => "consume_heal_over_time",
        }
    }
}

/// Immutable definition of a skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    /// Turns the skill stays unavailable after use.
    pub cooldown: u32,
    pub target: TargetMode,
    /// Threat granted to a player using this skill. Negative values are allowed
    /// (resting lowers threat).
    pub threat: i32,
    pub mechanic: Mechanic,
    #[cfg_attr(feature = "serde", serde(default))]
    pub school: DamageSchool,
}

impl SkillDefinition {
    pub fn new(id: impl Into<String>, target: TargetMode, mechanic: Mechanic) -> Self {
        Self {
            id: SkillId::new(id),
            cooldown: 0,
            target,
            threat: 0,
            mechanic,
            school: DamageSchool::Physical,
        }
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_threat(mut self, threat: i32) -> Self {
        self.threat = threat;
        self
    }

    pub fn with_school(mut self, school: DamageSchool) -> Self {
        self.school = school;
        self
    }
}
