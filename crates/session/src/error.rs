//! Session error types.

use thiserror::Error;

use crate::snapshot::SnapshotError;

/// Session error type.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("seed generation failed: {0}")]
    SeedGeneration(String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Session result type.
pub type Result<T> = std::result::Result<T, SessionError>;
