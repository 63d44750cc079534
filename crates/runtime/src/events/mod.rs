//! Topic-based fan-out of battle events to observers.
mod bus;

pub use bus::{Event, EventBus, Topic};
