//! Engine error types.

use std::fmt;

use cq_parse::ExprError;
use thiserror::Error;

use crate::host::HostError;

/// Convenience result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// The synchronization stage a host write belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    /// Writing the effort value.
    Effort,
    /// Writing the four sentence slots.
    Sentence,
    /// Writing pool values, maxima, and edges.
    Pools,
    /// Deleting the character's embedded records.
    DeleteEmbedded,
    /// Creating the folded embedded records.
    CreateEmbedded,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Effort => write!(f, "effort update"),
            Self::Sentence => write!(f, "sentence update"),
            Self::Pools => write!(f, "pool update"),
            Self::DeleteEmbedded => write!(f, "embedded record deletion"),
            Self::CreateEmbedded => write!(f, "embedded record creation"),
        }
    }
}

/// Errors surfaced by folding and synchronization.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An accumulated modifier expression failed to evaluate.
    #[error(transparent)]
    InvalidModifier(#[from] ExprError),
    /// A host operation outside synchronization failed.
    #[error("host error: {0}")]
    Host(#[from] HostError),
    /// A host write failed partway through synchronization.
    #[error("synchronization failed during {stage}: {source}")]
    SyncFailed {
        /// The stage whose host call failed.
        stage: SyncStage,
        /// The underlying host error.
        source: HostError,
    },
}
