//! Core types for Cypherquill: tags, statistics, skill levels, and the
//! creation aggregate.
//!
//! This crate defines the data model that journal folding produces. It is
//! independent of any host system — you can construct a [`CreationData`]
//! programmatically and inspect or serialize it without a game backend.

/// The creation aggregate that collects every pending effect.
pub mod creation;
/// Skill proficiency levels and their numeric ladder.
pub mod level;
/// Owned item payloads exchanged with the host.
pub mod payload;
/// Granted skills, abilities, and inventory records.
pub mod record;
/// The four-part creation sentence and its slots.
pub mod sentence;
/// Pool statistics and modifier targets.
pub mod stat;
/// Tag vocabularies recognized in journal text.
pub mod tag;

/// Re-export the creation aggregate.
pub use creation::CreationData;
/// Re-export the proficiency ladder.
pub use level::SkillLevel;
/// Re-export item payload types.
pub use payload::{ItemKind, ItemPayload};
/// Re-export record types.
pub use record::{AbilityRecord, ItemRecord, SkillRecord, MAX_ABILITY_TIER};
/// Re-export sentence types.
pub use sentence::{Sentence, SentenceSlot};
/// Re-export statistic types.
pub use stat::{ModifierTarget, Stat, StatName, Stats, DEFAULT_EDGE, DEFAULT_POOL};
/// Re-export tag vocabularies.
pub use tag::{ItemCategory, OptionTag, SentenceTag, StatTag, DEFAULT_SENTINEL};
