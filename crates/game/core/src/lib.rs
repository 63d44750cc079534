//! Deterministic battle rules and data types shared by every host.
//!
//! `raid-core` defines the canonical rules of a party-vs-boss encounter
//! (catalog, effect resolution, threat, enemy AI, turn order) and exposes pure
//! APIs that the runtime and offline tools reuse. All state mutation flows
//! through [`engine::BattleSession`], and supporting crates depend on the types
//! re-exported here.
pub mod ai;
pub mod catalog;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod threat;

pub use ai::{EnemyChoice, choose_skill};
pub use catalog::{
    BossDefinition, Catalog, CatalogError, ClassDefinition, DamageSchool, Mechanic,
    SkillDefinition, SkillId, TargetMode,
};
pub use config::BattleConfig;
pub use effect::{ResolveError, SkillRef, TargetError, get_target, resolve_skill};
pub use engine::{ActionError, ActionReport, BattleSession, ExecuteError, PartyError};
pub use env::{BattleEnv, PcgRng, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    BattleEvent, BattleOutcome, BattlePhase, Character, CharacterId, Enemy, GameState,
    ModifierKind, OutcomeResult, PlayerCharacter, PlayerId, SetupError, SkillInstance,
    StatusEffects,
};
pub use threat::{retarget, update_threat};
