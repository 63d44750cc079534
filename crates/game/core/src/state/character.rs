//! Player characters and the enemy.

use std::fmt;

use arrayvec::{ArrayVec, CapacityError};

use crate::catalog::{BossDefinition, Catalog, CatalogError, ClassDefinition, SkillId};
use crate::config::BattleConfig;

use super::StatusEffects;

/// External identity of the player controlling a character, as issued by the host.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifies a combatant inside one battle.
///
/// Player ids are slot indices into `GameState::players`; they are renumbered
/// when a player leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterId {
    Enemy,
    Player(usize),
}

impl CharacterId {
    pub fn is_enemy(&self) -> bool {
        matches!(self, CharacterId::Enemy)
    }

    pub fn slot(&self) -> Option<usize> {
        match *self {
            CharacterId::Player(slot) => Some(slot),
            CharacterId::Enemy => None,
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterId::Enemy => write!(f, "enemy"),
            CharacterId::Player(slot) => write!(f, "player#{slot}"),
        }
    }
}

/// A skill slot: the definition it points at plus its cooldown tracker.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillInstance {
    pub skill: SkillId,
    /// Turns remaining before the skill can be used again.
    pub wait: u32,
}

impl SkillInstance {
    /// Creates an instance that starts on its full cooldown.
    pub fn new(skill: SkillId, cooldown: u32) -> Self {
        Self {
            skill,
            wait: cooldown,
        }
    }

    pub fn from_catalog(catalog: &Catalog, skill: &SkillId, owner: &str) -> Result<Self, CatalogError> {
        let definition = catalog
            .skill(skill.as_str())
            .ok_or_else(|| CatalogError::UnknownSkill {
                owner: owner.to_string(),
                skill: skill.clone(),
            })?;
        Ok(Self::new(skill.clone(), definition.cooldown))
    }

    pub fn is_ready(&self) -> bool {
        self.wait == 0
    }

    /// Puts the skill on cooldown. The extra turn covers the tick that runs at
    /// the end of the very turn it was used in.
    pub fn trigger(&mut self, cooldown: u32) {
        self.wait = cooldown + 1;
    }

    pub fn tick(&mut self) {
        self.wait = self.wait.saturating_sub(1);
    }
}

pub type SkillSlots = ArrayVec<SkillInstance, { BattleConfig::MAX_SKILLS }>;

/// State shared by every combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub class_id: String,
    /// Maximum health.
    pub health: u32,
    /// Always within `[0, health]`.
    pub current_health: u32,
    /// Damage/heal scalar.
    pub power: u32,
    pub skills: SkillSlots,
    pub effects: StatusEffects,
}

impl Character {
    pub fn new(id: CharacterId, class_id: impl Into<String>, health: u32, power: u32) -> Self {
        Self {
            id,
            class_id: class_id.into(),
            health,
            current_health: health,
            power,
            skills: ArrayVec::new(),
            effects: StatusEffects::default(),
        }
    }

    /// Appends a skill slot. Fails once every slot is taken.
    pub fn with_skill(
        mut self,
        skill: SkillInstance,
    ) -> Result<Self, CapacityError<SkillInstance>> {
        self.skills.try_push(skill)?;
        Ok(self)
    }

    fn with_skills(
        mut self,
        catalog: &Catalog,
        skills: &[SkillId],
    ) -> Result<Self, CatalogError> {
        if skills.len() > BattleConfig::MAX_SKILLS {
            return Err(CatalogError::TooManySkills {
                owner: self.class_id.clone(),
                count: skills.len(),
                max: BattleConfig::MAX_SKILLS,
            });
        }
        for skill in skills {
            let instance = SkillInstance::from_catalog(catalog, skill, &self.class_id)?;
            self.skills.push(instance);
        }
        Ok(self)
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Ticks every skill cooldown by one turn.
    pub fn tick_cooldowns(&mut self) {
        for skill in &mut self.skills {
            skill.tick();
        }
    }
}

/// A character controlled by a player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerCharacter {
    pub base: Character,
    pub player_id: PlayerId,
    /// Aggro score driving enemy targeting. Never negative.
    pub threat: i32,
    pub dead: bool,
}

impl PlayerCharacter {
    pub fn new(base: Character, player_id: PlayerId) -> Self {
        Self {
            base,
            player_id,
            threat: 0,
            dead: false,
        }
    }

    /// Instantiates `class` in `slot` for `player_id`.
    pub fn from_class(
        slot: usize,
        player_id: PlayerId,
        class: &ClassDefinition,
        catalog: &Catalog,
    ) -> Result<Self, CatalogError> {
        let base = Character::new(CharacterId::Player(slot), &class.id, class.health, class.power)
            .with_skills(catalog, &class.skills)?;
        Ok(Self::new(base, player_id))
    }

    pub fn slot(&self) -> usize {
        self.base.id.slot().unwrap_or_default()
    }

    pub fn is_alive(&self) -> bool {
        !self.dead && self.base.is_alive()
    }

    /// Marks the character dead and wipes its effects and threat.
    pub fn kill(&mut self) {
        self.dead = true;
        self.threat = 0;
        self.base.current_health = 0;
        self.base.effects.clear();
    }
}

/// The single opponent of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub base: Character,
    pub basic_attack: SkillInstance,
    pub recovery: SkillInstance,
    /// Turn counter value when the recovery skill was last used.
    pub last_healed: u32,
    /// Turn counter value when a special was last used.
    pub last_special: u32,
}

impl Enemy {
    pub fn new(base: Character, basic_attack: SkillInstance, recovery: SkillInstance) -> Self {
        Self {
            base,
            basic_attack,
            recovery,
            last_healed: 0,
            last_special: 0,
        }
    }

    pub fn from_boss(boss: &BossDefinition, catalog: &Catalog) -> Result<Self, CatalogError> {
        let base = Character::new(CharacterId::Enemy, &boss.id, boss.health, boss.power)
            .with_skills(catalog, &boss.skills)?;
        let basic_attack = SkillInstance::from_catalog(catalog, &boss.basic_attack, &boss.id)?;
        let recovery = SkillInstance::from_catalog(catalog, &boss.recovery, &boss.id)?;
        Ok(Self::new(base, basic_attack, recovery))
    }

    /// Raises max and current health by `amount`.
    pub fn grant_bonus(&mut self, amount: u32) {
        self.base.health += amount;
        self.base.current_health += amount;
    }

    /// Removes a bonus granted by [`Enemy::grant_bonus`]. Max health never drops
    /// to or below the bonus itself; current health is clamped to the new max.
    pub fn take_bonus(&mut self, amount: u32) {
        if self.base.health > amount {
            self.base.health -= amount;
            self.base.current_health = self.base.current_health.min(self.base.health);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_instance_cooldown_cycle() {
        let mut skill = SkillInstance::new("stun".into(), 2);
        assert!(!skill.is_ready());
        skill.tick();
        skill.tick();
        assert!(skill.is_ready());
        skill.tick();
        assert_eq!(skill.wait, 0);

        skill.trigger(2);
        assert_eq!(skill.wait, 3);
    }

    #[test]
    fn skill_slots_are_bounded() {
        let mut base = Character::new(CharacterId::Player(0), "ranger", 20, 5);
        for _ in 0..BattleConfig::MAX_SKILLS {
            base = base.with_skill(SkillInstance::new("volley".into(), 0)).unwrap();
        }
        let overflow = base
            .clone()
            .with_skill(SkillInstance::new("extra".into(), 0))
            .unwrap_err();
        assert_eq!(overflow.element().skill.as_str(), "extra");
        assert_eq!(base.skills.len(), BattleConfig::MAX_SKILLS);
    }

    #[test]
    fn kill_clears_effects_and_threat() {
        let base = Character::new(CharacterId::Player(0), "rogue", 50, 5);
        let mut player = PlayerCharacter::new(base, "p1".into());
        player.threat = 12;
        player.base.effects.poison = 3;
        player.base.current_health = 4;

        player.kill();

        assert!(player.dead);
        assert!(!player.is_alive());
        assert_eq!(player.threat, 0);
        assert_eq!(player.base.current_health, 0);
        assert_eq!(player.base.effects, StatusEffects::default());
    }

    #[test]
    fn enemy_bonus_clamps_current_health() {
        let base = Character::new(CharacterId::Enemy, "gargoyle", 200, 8);
        let attack = SkillInstance::new("attack".into(), 0);
        let mut enemy = Enemy::new(base, attack.clone(), attack);

        enemy.grant_bonus(100);
        assert_eq!((enemy.base.health, enemy.base.current_health), (300, 300));

        enemy.take_bonus(100);
        assert_eq!((enemy.base.health, enemy.base.current_health), (200, 200));

        enemy.base.health = 100;
        enemy.take_bonus(100);
        assert_eq!(enemy.base.health, 100);
    }
}
