//! Data-driven battle content and its loaders.
//!
//! This crate houses the skill, class and boss tables and the battle tunables,
//! stored as RON/TOML under `data/`:
//! - Skill definitions (`skills.ron`)
//! - Playable classes (`classes.ron`)
//! - Boss templates (`bosses.ron`)
//! - Battle configuration (`config.toml`)
//!
//! The same files are embedded at compile time (see [`builtin_catalog`]), so
//! hosts only need a data directory to override them.
//!
//! All loaders use raid-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
mod builtin;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use builtin::{builtin_catalog, builtin_config};
#[cfg(feature = "loaders")]
pub use loaders::{
    BossLoader, BossTable, ClassLoader, ClassTable, ConfigLoader, ContentFactory, LoadResult,
    SkillLoader, SkillTable,
};
