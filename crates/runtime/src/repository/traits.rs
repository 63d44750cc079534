//! Repository contracts for the action log.

use super::{ActionLogEntry, BattleSetup, Result};

/// Repository for action log persistence
///
/// Append-only log of accepted commands, headed by the setup that started
/// the battle. Entries are appended in nonce order.
pub trait ActionRepository: Send {
    /// Record the battle setup. Called once, before any entry.
    fn begin(&mut self, setup: &BattleSetup) -> Result<()>;

    /// Append an action log entry
    fn append(&mut self, entry: &ActionLogEntry) -> Result<()>;

    /// Flush buffered writes
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Setup and entries recorded so far, or `None` before [`Self::begin`].
    fn read_all(&self) -> Result<Option<(BattleSetup, Vec<ActionLogEntry>)>>;
}
