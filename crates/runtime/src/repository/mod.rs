//! Persistence of accepted commands.
//!
//! The action log is the replay source of truth: every command the engine
//! accepted, in order, next to the [`BattleSetup`] that started the battle.
mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileActionLog;
pub use memory::InMemoryActionLog;
pub use traits::ActionRepository;
pub use types::{ActionLogEntry, BattleSetup, Command};
