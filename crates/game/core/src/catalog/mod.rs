//! Static skill, class and boss tables.
//!
//! A [`Catalog`] is built once (usually by the content crate), validated, and
//! then shared by reference with every battle for the lifetime of the process.
//! Nothing in the engine mutates it.

mod class;
mod skill;

pub use class::{BossDefinition, ClassDefinition};
pub use skill::{DamageSchool, Mechanic, SkillDefinition, SkillId, TargetMode};

use std::collections::{BTreeMap, BTreeSet};

use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};

/// Authoring errors detected while assembling a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate skill id '{0}'")]
    DuplicateSkill(SkillId),

    #[error("duplicate class id '{0}'")]
    DuplicateClass(String),

    #[error("duplicate boss id '{0}'")]
    DuplicateBoss(String),

    #[error("'{owner}' references unknown skill '{skill}'")]
    UnknownSkill { owner: String, skill: SkillId },

    #[error("'{owner}' has {count} skills (max {max})")]
    TooManySkills {
        owner: String,
        count: usize,
        max: usize,
    },

    #[error("skill '{0}' applies a status with zero duration")]
    ZeroDuration(SkillId),

    #[error("catalog defines no bosses")]
    NoBosses,
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateSkill(_) => "CATALOG_DUPLICATE_SKILL",
            Self::DuplicateClass(_) => "CATALOG_DUPLICATE_CLASS",
            Self::DuplicateBoss(_) => "CATALOG_DUPLICATE_BOSS",
            Self::UnknownSkill { .. } => "CATALOG_UNKNOWN_SKILL",
            Self::TooManySkills { .. } => "CATALOG_TOO_MANY_SKILLS",
            Self::ZeroDuration(_) => "CATALOG_ZERO_DURATION",
            Self::NoBosses => "CATALOG_NO_BOSSES",
        }
    }
}

/// Validated, read-only skill/class/boss tables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Catalog {
    skills: BTreeMap<SkillId, SkillDefinition>,
    classes: Vec<ClassDefinition>,
    bosses: Vec<BossDefinition>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids, dangling skill references,
    /// oversized skill lists and zero-duration status skills.
    pub fn new(
        skills: Vec<SkillDefinition>,
        classes: Vec<ClassDefinition>,
        bosses: Vec<BossDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut table = BTreeMap::new();
        for skill in skills {
            if skill.mechanic.duration() == Some(0) {
                return Err(CatalogError::ZeroDuration(skill.id));
            }
            if table.contains_key(&skill.id) {
                return Err(CatalogError::DuplicateSkill(skill.id));
            }
            table.insert(skill.id.clone(), skill);
        }

        let check_refs = |owner: &str, refs: &[&SkillId]| -> Result<(), CatalogError> {
            for skill in refs {
                if !table.contains_key(*skill) {
                    return Err(CatalogError::UnknownSkill {
                        owner: owner.to_string(),
                        skill: (*skill).clone(),
                    });
                }
            }
            Ok(())
        };
        let check_len = |owner: &str, count: usize| -> Result<(), CatalogError> {
            if count > BattleConfig::MAX_SKILLS {
                return Err(CatalogError::TooManySkills {
                    owner: owner.to_string(),
                    count,
                    max: BattleConfig::MAX_SKILLS,
                });
            }
            Ok(())
        };

        let mut seen = BTreeSet::new();
        for class in &classes {
            if !seen.insert(class.id.as_str()) {
                return Err(CatalogError::DuplicateClass(class.id.clone()));
            }
            check_len(&class.id, class.skills.len())?;
            check_refs(&class.id, &class.skills.iter().collect::<Vec<_>>())?;
        }

        if bosses.is_empty() {
            return Err(CatalogError::NoBosses);
        }
        let mut seen = BTreeSet::new();
        for boss in &bosses {
            if !seen.insert(boss.id.as_str()) {
                return Err(CatalogError::DuplicateBoss(boss.id.clone()));
            }
            check_len(&boss.id, boss.skills.len())?;
            let mut refs: Vec<&SkillId> = boss.skills.iter().collect();
            refs.push(&boss.basic_attack);
            refs.push(&boss.recovery);
            check_refs(&boss.id, &refs)?;
        }

        Ok(Self {
            skills: table,
            classes,
            bosses,
        })
    }

    pub fn skill(&self, id: &str) -> Option<&SkillDefinition> {
        self.skills.get(id)
    }

    pub fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|class| class.id == id)
    }

    pub fn boss(&self, id: &str) -> Option<&BossDefinition> {
        self.bosses.iter().find(|boss| boss.id == id)
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values()
    }

    pub fn classes(&self) -> &[ClassDefinition] {
        &self.classes
    }

    /// Classes dealt to players at setup, in catalog order.
    pub fn playable_classes(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.iter().filter(|class| class.playable)
    }

    pub fn bosses(&self) -> &[BossDefinition] {
        &self.bosses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack() -> SkillDefinition {
        SkillDefinition::new("attack", TargetMode::Enemy, Mechanic::Attack).with_threat(5)
    }

    fn boss(skills: Vec<SkillId>) -> BossDefinition {
        BossDefinition {
            id: "dragon".into(),
            health: 200,
            power: 7,
            basic_attack: "attack".into(),
            recovery: "attack".into(),
            skills,
        }
    }

    #[test]
    fn builds_valid_catalog() {
        let catalog = Catalog::new(vec![attack()], vec![], vec![boss(vec![])]).unwrap();
        assert!(catalog.skill("attack").is_some());
        assert!(catalog.boss("dragon").is_some());
        assert!(catalog.skill("missing").is_none());
    }

    #[test]
    fn rejects_dangling_skill_reference() {
        let err = Catalog::new(vec![attack()], vec![], vec![boss(vec!["fireBreath".into()])])
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownSkill { ref skill, .. } if skill.as_str() == "fireBreath"));
        assert!(err.severity().is_fatal());
    }

    #[test]
    fn rejects_zero_duration_status() {
        let stun = SkillDefinition::new("stun", TargetMode::Enemy, Mechanic::Stun { duration: 0 });
        let err = Catalog::new(vec![attack(), stun], vec![], vec![boss(vec![])]).unwrap_err();
        assert_eq!(err, CatalogError::ZeroDuration("stun".into()));
    }

    #[test]
    fn rejects_oversized_class() {
        let class = ClassDefinition {
            id: "juggler".into(),
            health: 10,
            power: 1,
            skills: vec!["attack".into(); 5],
            playable: true,
        };
        let err = Catalog::new(vec![attack()], vec![class], vec![boss(vec![])]).unwrap_err();
        assert!(matches!(err, CatalogError::TooManySkills { count: 5, .. }));
    }

    #[test]
    fn rejects_missing_bosses() {
        assert_eq!(
            Catalog::new(vec![attack()], vec![], vec![]).unwrap_err(),
            CatalogError::NoBosses
        );
    }
}
