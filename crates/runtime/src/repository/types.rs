//! Action log entry types.

use serde::{Deserialize, Serialize};

use raid_core::PlayerId;

/// Inputs of battle setup. Together with the action log it reproduces a
/// battle exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSetup {
    pub players: Vec<PlayerId>,
    pub seed: u64,
    /// Fixed boss, or `None` to draw one from the seed.
    #[serde(default)]
    pub boss: Option<String>,
}

impl BattleSetup {
    pub fn new(players: Vec<PlayerId>, seed: u64) -> Self {
        Self {
            players,
            seed,
            boss: None,
        }
    }

    pub fn with_boss(mut self, boss: impl Into<String>) -> Self {
        self.boss = Some(boss.into());
        self
    }
}

/// A host command accepted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    UseSkill {
        player: PlayerId,
        skill_index: usize,
        target_index: usize,
    },
    Join {
        player: PlayerId,
    },
    Leave {
        player: PlayerId,
    },
}

/// Action log entry.
///
/// Only accepted commands are logged; a rejected command changed nothing and
/// is not needed to replay the battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    /// Sequential nonce, starting at 0
    pub nonce: u64,

    /// Turn counter before the command ran
    pub turn: u32,

    pub command: Command,
}

impl ActionLogEntry {
    pub fn new(nonce: u64, turn: u32, command: Command) -> Self {
        Self {
            nonce,
            turn,
            command,
        }
    }
}
