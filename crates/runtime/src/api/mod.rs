//! Public API surface for runtime consumers.
//!
//! Re-exports the error type and the outcome sink contract hosts plug into
//! [`crate::BattleHost`].
mod errors;
mod sink;

pub use errors::{RepositoryError, Result, RuntimeError};
pub use sink::{OutcomeSink, OutcomeSlot};
