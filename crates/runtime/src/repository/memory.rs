//! In-memory action log.

use super::{ActionLogEntry, ActionRepository, BattleSetup, RepositoryError, Result};

/// Action log kept in memory. The default log of a [`crate::BattleHost`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryActionLog {
    setup: Option<BattleSetup>,
    entries: Vec<ActionLogEntry>,
}

impl InMemoryActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ActionLogEntry] {
        &self.entries
    }
}

impl ActionRepository for InMemoryActionLog {
    fn begin(&mut self, setup: &BattleSetup) -> Result<()> {
        self.setup = Some(setup.clone());
        self.entries.clear();
        Ok(())
    }

    fn append(&mut self, entry: &ActionLogEntry) -> Result<()> {
        let expected = self.entries.len() as u64;
        if entry.nonce != expected {
            return Err(RepositoryError::OutOfOrder {
                expected,
                found: entry.nonce,
            });
        }
        self.entries.push(entry.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Option<(BattleSetup, Vec<ActionLogEntry>)>> {
        Ok(self
            .setup
            .clone()
            .map(|setup| (setup, self.entries.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Command;

    #[test]
    fn rejects_gaps_in_nonces() {
        let mut log = InMemoryActionLog::new();
        log.begin(&BattleSetup::new(vec!["a".into()], 1)).unwrap();
        let leave = Command::Leave { player: "a".into() };

        log.append(&ActionLogEntry::new(0, 0, leave.clone())).unwrap();
        assert!(matches!(
            log.append(&ActionLogEntry::new(2, 0, leave)),
            Err(RepositoryError::OutOfOrder { expected: 1, found: 2 })
        ));
        assert_eq!(log.entries().len(), 1);
    }
}
