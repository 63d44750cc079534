//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use raid_core::{BattleConfig, BossDefinition, Catalog, ClassDefinition, SkillDefinition};

use crate::loaders::{BossLoader, ClassLoader, ConfigLoader, LoadResult, SkillLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// ├── classes.ron
/// └── bosses.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load skill definitions from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        let path = self.data_dir.join("skills.ron");
        SkillLoader::load(&path)
    }

    /// Load class definitions from `classes.ron`.
    pub fn load_classes(&self) -> LoadResult<Vec<ClassDefinition>> {
        let path = self.data_dir.join("classes.ron");
        ClassLoader::load(&path)
    }

    /// Load boss templates from `bosses.ron`.
    pub fn load_bosses(&self) -> LoadResult<Vec<BossDefinition>> {
        let path = self.data_dir.join("bosses.ron");
        BossLoader::load(&path)
    }

    /// Load and validate the full catalog.
    ///
    /// Fails if any table is missing or malformed, or if the tables do not
    /// agree with each other (dangling skill ids, duplicates, and so on).
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let skills = self.load_skills()?;
        let classes = self.load_classes()?;
        let bosses = self.load_bosses()?;

        let catalog = Catalog::new(skills, classes, bosses).map_err(|e| {
            anyhow::anyhow!("Invalid catalog in {}: {}", self.data_dir.display(), e)
        })?;

        tracing::info!(
            data_dir = %self.data_dir.display(),
            skills = catalog.skills().count(),
            classes = catalog.classes().len(),
            bosses = catalog.bosses().len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SKILLS: &str = r#"(skills: [
        (id: "attack", cooldown: 0, target: Enemy, threat: 5, mechanic: Attack),
        (id: "rest", cooldown: 0, target: SelfOnly, threat: -2, mechanic: HealByPercent(permille: 75)),
    ])"#;
    const CLASSES: &str = r#"(classes: [
        (id: "ranger", health: 92, power: 10, skills: ["attack", "rest"]),
    ])"#;
    const BOSSES: &str = r#"(bosses: [
        (id: "gargoyle", health: 200, power: 8, basic_attack: "attack", recovery: "rest", skills: []),
    ])"#;

    fn data_dir(classes: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("skills.ron"), SKILLS).unwrap();
        fs::write(dir.path().join("classes.ron"), classes).unwrap();
        fs::write(dir.path().join("bosses.ron"), BOSSES).unwrap();
        fs::write(dir.path().join("config.toml"), "enemy_bonus_health = 50\n").unwrap();
        dir
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_a_data_directory() {
        let dir = data_dir(CLASSES);
        let factory = ContentFactory::new(dir.path());

        let catalog = factory.load_catalog().unwrap();
        assert!(catalog.class("ranger").is_some());
        assert!(catalog.boss("gargoyle").is_some());
        assert_eq!(catalog.skills().count(), 2);

        let config = factory.load_config().unwrap();
        assert_eq!(config.enemy_bonus_health, 50);
        assert_eq!(config.max_party_size, BattleConfig::DEFAULT_MAX_PARTY_SIZE);
    }

    #[test]
    fn dangling_skill_reference_is_rejected() {
        let dir = data_dir(r#"(classes: [(id: "ranger", health: 92, power: 10, skills: ["volley"])])"#);
        let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
        assert!(err.to_string().contains("volley"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_skills().unwrap_err();
        assert!(err.to_string().contains("skills.ron"));
    }
}
