//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine refusals, setup failures and repository errors so hosts can
//! bubble them up with consistent context.
use thiserror::Error;

use raid_core::{ErrorSeverity, ExecuteError, GameError, PartyError, SetupError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to set up battle: {0}")]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Party(#[from] PartyError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("host requires a catalog before building")]
    MissingCatalog,

    #[error("host requires a battle setup before building")]
    MissingSetup,

    #[error("failed to serialize snapshot: {0}")]
    Snapshot(String),

    #[error("replay rejected entry {nonce}: {source}")]
    ReplayRejected {
        nonce: u64,
        #[source]
        source: Box<RuntimeError>,
    },

    #[error("replay diverged from the live battle")]
    ReplayDiverged,
}

impl RuntimeError {
    /// Engine severity of the wrapped error. Host-level failures are fatal.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Execute(err) => err.severity(),
            Self::Party(err) => err.severity(),
            Self::Setup(err) => err.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }

    /// True when the engine refused the command without touching state.
    pub fn is_rejection(&self) -> bool {
        !self.severity().is_fatal()
    }
}
