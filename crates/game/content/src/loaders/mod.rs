//! Content loaders for reading battle data from files.
//!
//! Skill, class and boss tables are RON; the battle tunables are TOML. Every
//! loader returns plain `raid-core` types, and [`ContentFactory`] ties them
//! together into a validated [`raid_core::Catalog`].

pub mod catalog;
pub mod config;
pub mod factory;

pub use catalog::{BossLoader, BossTable, ClassLoader, ClassTable, SkillLoader, SkillTable};
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
