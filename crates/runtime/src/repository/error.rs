//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data at line {line}: {reason}")]
    CorruptedData { line: usize, reason: String },

    #[error("log already exists: {0}")]
    LogAlreadyExists(String),

    #[error("log header missing in {0}")]
    MissingHeader(String),

    #[error("entry nonce {found} does not follow {expected}")]
    OutOfOrder { expected: u64, found: u64 },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
