//! Skill, class and boss table loaders.

use std::path::Path;

use raid_core::{BossDefinition, ClassDefinition, SkillDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTable {
    pub skills: Vec<SkillDefinition>,
}

/// Class table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassTable {
    pub classes: Vec<ClassDefinition>,
}

/// Boss table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossTable {
    pub bosses: Vec<BossDefinition>,
}

/// Loader for skill definitions from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill definitions from a RON file containing a [`SkillTable`].
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillDefinition>> {
        let table: SkillTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill table RON: {}", e))?;

        Ok(table.skills)
    }
}

/// Loader for class definitions from RON files.
pub struct ClassLoader;

impl ClassLoader {
    /// Load class definitions from a RON file containing a [`ClassTable`].
    pub fn load(path: &Path) -> LoadResult<Vec<ClassDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ClassDefinition>> {
        let table: ClassTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse class table RON: {}", e))?;

        Ok(table.classes)
    }
}

/// Loader for boss templates from RON files.
pub struct BossLoader;

impl BossLoader {
    /// Load boss templates from a RON file containing a [`BossTable`].
    pub fn load(path: &Path) -> LoadResult<Vec<BossDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<BossDefinition>> {
        let table: BossTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse boss table RON: {}", e))?;

        Ok(table.bosses)
    }
}
