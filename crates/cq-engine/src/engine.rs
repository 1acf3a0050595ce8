//! The engine facade tying document store, item lookup and actor
//! together.

use tokio::sync::Mutex;
use tracing::debug;

use cq_core::{CreationData, SentenceSlot};
use cq_parse::{classify_first_line, plain_lines};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::host::{
    referenced_document_id, ActorRecord, DocumentStore, ItemLookup, JournalDocument, Localization,
};
use crate::levels::LevelVocabulary;
use crate::processor::Folder;
use crate::sync::write_actor;

/// Replays journal documents into character creation data and keeps a
/// character sheet in step with its linked journals.
///
/// One engine serves one game world: it holds the world's document
/// store and item lookup, and serializes sheet rewrites so overlapping
/// link events cannot interleave their writes.
pub struct CreationEngine<D, I> {
    documents: D,
    items: I,
    levels: LevelVocabulary,
    config: EngineConfig,
    gate: Mutex<()>,
}

impl<D, I> CreationEngine<D, I>
where
    D: DocumentStore,
    I: ItemLookup,
{
    /// An engine with the canonical proficiency vocabulary and default
    /// configuration.
    pub fn new(documents: D, items: I) -> Self {
        Self {
            documents,
            items,
            levels: LevelVocabulary::new(),
            config: EngineConfig::default(),
            gate: Mutex::new(()),
        }
    }

    /// An engine whose proficiency vocabulary also accepts the labels
    /// of the given locale.
    pub fn with_localization(documents: D, items: I, localization: &dyn Localization) -> Self {
        Self {
            levels: LevelVocabulary::with_localization(localization),
            ..Self::new(documents, items)
        }
    }

    /// Replace the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Document ids referenced by the actor's sentence slots.
    fn linked_ids<A>(&self, actor: &A) -> Vec<String>
    where
        A: ActorRecord + ?Sized,
    {
        let mut ids = Vec::new();
        for slot in SentenceSlot::all() {
            let value = actor.sentence_slot(slot);
            if let Some(id) = referenced_document_id(&value) {
                ids.push(id.to_string());
            }
        }
        ids
    }

    /// The journal documents currently linked to the actor, in slot
    /// order. Slots referencing documents the store no longer has are
    /// dropped.
    pub async fn linked_documents<A>(&self, actor: &A) -> EngineResult<Vec<JournalDocument>>
    where
        A: ActorRecord + ?Sized,
    {
        let ids = self.linked_ids(actor);
        Ok(self.documents.documents_by_ids(&ids).await?)
    }

    /// Replay the actor's linked documents plus `target` as the final
    /// pass. A grant pass drops `target` from the linked set first, so
    /// relinking an already linked journal does not double its effects.
    async fn replay<A>(
        &self,
        actor: &A,
        target: &JournalDocument,
        removal: bool,
    ) -> EngineResult<CreationData>
    where
        A: ActorRecord + ?Sized,
    {
        let mut ids = self.linked_ids(actor);
        if !removal {
            ids.retain(|id| id != &target.id);
        }
        let linked = self.documents.documents_by_ids(&ids).await?;

        let mut folder = Folder::new(actor.tier(), &self.items, &self.levels, &self.config);
        for document in &linked {
            folder.fold_document(document, false).await;
        }
        folder.fold_document(target, removal).await;
        Ok(folder.finish())
    }

    /// Link a journal document to the actor and rewrite the sheet.
    ///
    /// Returns `Ok(None)` without touching the actor when the document
    /// is not a creation journal, that is when its first line does not
    /// open with a sentence tag. Whether the target's slot is already
    /// claimed by another journal is for the caller to decide before
    /// linking.
    pub async fn link<A>(&self, actor: &A, document_id: &str) -> EngineResult<Option<CreationData>>
    where
        A: ActorRecord + ?Sized,
    {
        let _gate = self.gate.lock().await;

        let target = self.documents.document(document_id).await?;
        let lines = plain_lines(&target.content);
        let opens_with_slot = lines
            .first()
            .is_some_and(|first| classify_first_line(first, self.config.sentinel).is_some());
        if !opens_with_slot {
            debug!(journal = %target.name, "not a creation journal, link ignored");
            return Ok(None);
        }

        let mut data = self.replay(actor, &target, false).await?;
        write_actor(actor, &mut data).await?;
        Ok(Some(data))
    }

    /// Unlink a journal document from the actor and rewrite the sheet.
    ///
    /// The linked set is replayed in full, target included, and the
    /// target then runs once more as a removal pass. No first-line
    /// check happens here, so a journal whose content was edited into
    /// something unrecognizable can still be unlinked.
    pub async fn unlink<A>(&self, actor: &A, document_id: &str) -> EngineResult<CreationData>
    where
        A: ActorRecord + ?Sized,
    {
        let _gate = self.gate.lock().await;

        let target = self.documents.document(document_id).await?;
        let mut data = self.replay(actor, &target, true).await?;
        write_actor(actor, &mut data).await?;
        Ok(data)
    }

    /// Fold an explicit list of passes into creation data without
    /// touching any actor. Each pass pairs a document with its removal
    /// flag. Unreadable lines are skipped, so folding never fails.
    pub async fn fold(&self, tier: u8, passes: &[(JournalDocument, bool)]) -> CreationData {
        let mut folder = Folder::new(tier, &self.items, &self.levels, &self.config);
        for (document, removal) in passes {
            folder.fold_document(document, *removal).await;
        }
        folder.finish()
    }

    /// Write previously folded creation data onto the actor, consuming
    /// its accumulated modifiers. Held behind the same gate as link and
    /// unlink.
    pub async fn synchronize<A>(&self, actor: &A, data: &mut CreationData) -> EngineResult<()>
    where
        A: ActorRecord + ?Sized,
    {
        let _gate = self.gate.lock().await;
        write_actor(actor, data).await
    }
}
