//! Content bundled into the binary, so a host can run without a data
//! directory.

use raid_core::{BattleConfig, Catalog};

use crate::loaders::{BossLoader, ClassLoader, ConfigLoader, LoadResult, SkillLoader};

const SKILLS: &str = include_str!("../data/skills.ron");
const CLASSES: &str = include_str!("../data/classes.ron");
const BOSSES: &str = include_str!("../data/bosses.ron");
const CONFIG: &str = include_str!("../data/config.toml");

/// The bundled skill, class and boss tables.
pub fn builtin_catalog() -> LoadResult<Catalog> {
    let catalog = Catalog::new(
        SkillLoader::parse(SKILLS)?,
        ClassLoader::parse(CLASSES)?,
        BossLoader::parse(BOSSES)?,
    )
    .map_err(|e| anyhow::anyhow!("Invalid builtin catalog: {}", e))?;

    Ok(catalog)
}

/// The bundled battle tunables.
pub fn builtin_config() -> LoadResult<BattleConfig> {
    ConfigLoader::parse(CONFIG)
}
