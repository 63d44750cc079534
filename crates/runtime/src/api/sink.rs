//! Delivery of the final battle outcome.

use std::sync::{Arc, Mutex};

use raid_core::BattleOutcome;

/// Receives the outcome of a battle. The host calls [`OutcomeSink::deliver`]
/// at most once per battle.
pub trait OutcomeSink: Send {
    fn deliver(&mut self, outcome: &BattleOutcome);
}

impl<F> OutcomeSink for F
where
    F: FnMut(&BattleOutcome) + Send,
{
    fn deliver(&mut self, outcome: &BattleOutcome) {
        self(outcome)
    }
}

/// Shared slot that stores every delivered outcome, for tests and hosts that
/// poll instead of reacting.
#[derive(Clone, Debug, Default)]
pub struct OutcomeSlot {
    delivered: Arc<Mutex<Vec<BattleOutcome>>>,
}

impl OutcomeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcomes delivered so far, oldest first.
    pub fn delivered(&self) -> Vec<BattleOutcome> {
        match self.delivered.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl OutcomeSink for OutcomeSlot {
    fn deliver(&mut self, outcome: &BattleOutcome) {
        match self.delivered.lock() {
            Ok(mut guard) => guard.push(outcome.clone()),
            Err(poisoned) => poisoned.into_inner().push(outcome.clone()),
        }
    }
}
