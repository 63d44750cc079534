//! Reference host for raid battles.
//!
//! This crate wires the engine, the content catalog and an action log into a
//! single [`BattleHost`]. Consumers drive it with [`Command`]s, subscribe to
//! events, and receive the outcome through an [`OutcomeSink`].
//!
//! Modules are organized by responsibility:
//! - [`host`] owns one battle and its builder
//! - [`api`] exposes the error type and outcome delivery contract
//! - [`events`] provides the topic-based event bus
//! - [`repository`] persists accepted commands for [`replay`]
//! - [`sim`] and [`config`] back the `raid-sim` binary
pub mod api;
pub mod config;
pub mod events;
pub mod host;
pub mod replay;
pub mod repository;
pub mod sim;

pub use api::{OutcomeSink, OutcomeSlot, RepositoryError, Result, RuntimeError};
pub use config::SimConfig;
pub use events::{Event, EventBus, Topic};
pub use host::{BattleHost, BattleHostBuilder};
pub use repository::{
    ActionLogEntry, ActionRepository, BattleSetup, Command, FileActionLog, InMemoryActionLog,
};
pub use sim::{SimulationReport, next_command, run_simulation};
