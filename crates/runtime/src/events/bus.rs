//! Topic-based event bus implementation.

use raid_core::{BattleEvent, BattleOutcome};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Per-action battle events, in resolution order
    Battle,
    /// The final outcome, published once
    Outcome,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Battle {
        /// Nonce of the accepted command that produced the event
        nonce: u64,
        event: BattleEvent,
    },
    Outcome(BattleOutcome),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Battle { .. } => Topic::Battle,
            Event::Outcome(_) => Topic::Outcome,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; lagging receivers lose
/// the oldest events.
#[derive(Clone)]
pub struct EventBus {
    battle: broadcast::Sender<Event>,
    outcome: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            battle: broadcast::channel(capacity).0,
            outcome: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Battle => &self.battle,
            Topic::Outcome => &self.outcome,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
