//! Journal folding engine and host synchronization for Cypherquill.
//!
//! The engine reads creation journals from a host through a small set of
//! async traits, folds their tags into a [`cq_core::CreationData`]
//! aggregate, and writes the aggregate back to the character in one
//! synchronization pass. Linking and unlinking a journal are the two
//! entry points; everything in between is deterministic and testable
//! without a host.

/// Engine configuration.
pub mod config;
/// The engine facade tying folding and synchronization together.
pub mod engine;
/// Engine error types.
pub mod error;
/// Host collaborator traits and document types.
pub mod host;
/// Per-invocation contribution ledger.
mod ledger;
/// Label vocabulary for skill proficiency levels.
pub mod levels;
/// The document folding pass.
mod processor;
/// The synchronization pass that writes an aggregate to the host.
mod sync;

/// Re-export the configuration type.
pub use config::EngineConfig;
/// Re-export the engine facade.
pub use engine::CreationEngine;
/// Re-export error types.
pub use error::{EngineError, EngineResult, SyncStage};
/// Re-export host collaborator types.
pub use host::{
    referenced_document_id, ActorRecord, DocumentStore, EmbeddedSummary, HostError, HostResult,
    ItemLookup, JournalDocument, Localization, NoLocalization,
};
/// Re-export the level vocabulary.
pub use levels::LevelVocabulary;
