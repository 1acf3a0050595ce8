//! Host collaborator traits and document types.
//!
//! The engine never talks to a concrete game backend. Instead the host
//! hands it four collaborators: a document store for journals, an item
//! lookup for world and compendium items, the actor being built, and an
//! optional localization source for level labels. All reads that can
//! block are async; plain accessors on the actor are not.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use cq_core::{ItemKind, ItemPayload, SentenceSlot, SkillLevel};

/// Convenience result alias for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors a host collaborator can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// No journal document exists under the given identifier.
    #[error("document not found: {0}")]
    DocumentNotFound(String),
    /// No item exists under the given identifier.
    #[error("item not found: {0}")]
    ItemNotFound(String),
    /// No compendium pack exists under the given name.
    #[error("pack not found: {0}")]
    PackNotFound(String),
    /// Any other backend failure, in the host's own words.
    #[error("host backend error: {0}")]
    Backend(String),
}

/// A journal document fetched from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalDocument {
    /// Host identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Raw content, markup included.
    pub content: String,
}

impl JournalDocument {
    /// Build a document from its parts.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// The display value written into a sentence slot when this document
    /// is linked: the name followed by the identifier in braces.
    pub fn slot_reference(&self) -> String {
        format!("{} {{{}}}", self.name, self.id)
    }
}

/// Extract the document identifier from a sentence-slot value, the
/// brace-wrapped suffix [`JournalDocument::slot_reference`] writes.
/// Returns `None` for vacant slots and values without a closed brace
/// group.
pub fn referenced_document_id(slot: &str) -> Option<&str> {
    let open = slot.rfind('{')?;
    let close = slot.rfind('}')?;
    let inner = slot.get(open + 1..close)?;
    if inner.is_empty() {
        return None;
    }
    Some(inner)
}

/// Read access to the host's journal documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by identifier.
    async fn document(&self, id: &str) -> HostResult<JournalDocument>;

    /// Fetch several documents by identifier, preserving the given order.
    /// Identifiers that resolve to nothing are silently dropped; other
    /// failures abort the fetch.
    async fn documents_by_ids(&self, ids: &[String]) -> HostResult<Vec<JournalDocument>> {
        let mut documents = Vec::with_capacity(ids.len());
        for id in ids {
            match self.document(id).await {
                Ok(document) => documents.push(document),
                Err(HostError::DocumentNotFound(_)) => {}
                Err(other) => return Err(other),
            }
        }
        Ok(documents)
    }
}

/// Read access to the host's items, in the world and in compendium packs.
#[async_trait]
pub trait ItemLookup: Send + Sync {
    /// Fetch an owned copy of a world item by identifier.
    async fn item(&self, id: &str) -> HostResult<ItemPayload>;

    /// Fetch an owned copy of an item inside a compendium pack.
    async fn pack_item(&self, pack: &str, id: &str) -> HostResult<ItemPayload>;
}

/// Summary of an embedded record already sitting on the actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedSummary {
    /// Host identifier of the embedded record.
    pub id: String,
    /// Host type discriminator, e.g. `"skill"`.
    pub type_name: String,
}

impl EmbeddedSummary {
    /// Build a summary from its parts.
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
        }
    }

    /// The parsed kind of the embedded record.
    pub fn kind(&self) -> ItemKind {
        ItemKind::parse(&self.type_name)
    }
}

/// The character being built.
#[async_trait]
pub trait ActorRecord: Send + Sync {
    /// Current character tier.
    fn tier(&self) -> u8;

    /// Current display value of a sentence slot.
    fn sentence_slot(&self, slot: SentenceSlot) -> String;

    /// Summaries of every embedded record on the character.
    fn embedded_items(&self) -> Vec<EmbeddedSummary>;

    /// Write one field, addressed the host's way: `"basic.effort"`,
    /// `"pools.might.value"`, `"pools.mightEdge"`.
    async fn update(&self, path: &str, value: Value) -> HostResult<()>;

    /// Create embedded records from owned payloads, in one call.
    async fn create_embedded(&self, items: Vec<ItemPayload>) -> HostResult<()>;

    /// Delete embedded records by identifier, in one call.
    async fn delete_embedded(&self, ids: Vec<String>) -> HostResult<()>;
}

/// Locale-specific labels for proficiency levels.
pub trait Localization: Send + Sync {
    /// The locale's label for a level, if the locale defines one.
    fn skill_level_label(&self, level: SkillLevel) -> Option<String>;
}

/// A localization source that defines no extra labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalization;

impl Localization for NoLocalization {
    fn skill_level_label(&self, _level: SkillLevel) -> Option<String> {
        None
    }
}
