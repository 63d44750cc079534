//! Playable classes and boss templates.

use super::SkillId;

/// Template for a playable character class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDefinition {
    pub id: String,
    pub health: u32,
    pub power: u32,
    /// Ordered skill list, at most `BattleConfig::MAX_SKILLS` entries.
    pub skills: Vec<SkillId>,
    /// Whether the class is dealt to players at setup. Unlisted classes can
    /// still be referenced by tests or custom hosts.
    #[cfg_attr(feature = "serde", serde(default = "default_playable"))]
    pub playable: bool,
}

#[cfg(feature = "serde")]
fn default_playable() -> bool {
    true
}

/// Template for the single enemy of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossDefinition {
    pub id: String,
    pub health: u32,
    pub power: u32,
    /// Fallback when no special is ready.
    pub basic_attack: SkillId,
    /// Low-cost recovery used when badly hurt.
    pub recovery: SkillId,
    /// Specials, scanned in order for the first one off cooldown.
    pub skills: Vec<SkillId>,
}
