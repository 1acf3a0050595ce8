//! The document folding pass.
//!
//! A fold walks a set of journal documents in order and replays each
//! document's tags into one [`CreationData`] aggregate. Every document
//! runs either as a grant pass or as a removal pass; a removal pass
//! applies the inverse of each effect, which is how unlinking cancels a
//! journal that earlier grant passes contributed. Lines that cannot be
//! understood are skipped with a diagnostic, never an error.

use tracing::{debug, warn};

use cq_core::{
    AbilityRecord, CreationData, ItemKind, ItemPayload, ItemRecord, ModifierTarget, OptionTag,
    SentenceTag, SkillLevel, SkillRecord, StatTag, DEFAULT_EDGE, DEFAULT_POOL,
};
use cq_parse::{
    classify_body_tag, classify_first_line, plain_lines, scan_line, signed_terms,
    unsigned_literals, BodyTag, LineTags,
};

use crate::config::EngineConfig;
use crate::host::{ItemLookup, JournalDocument};
use crate::ledger::Ledger;
use crate::levels::LevelVocabulary;

/// State of one fold over a document set.
pub(crate) struct Folder<'a, I: ItemLookup> {
    items: &'a I,
    levels: &'a LevelVocabulary,
    config: &'a EngineConfig,
    data: CreationData,
    ledger: Ledger,
}

impl<'a, I: ItemLookup> Folder<'a, I> {
    /// A fresh fold for a character at `tier`.
    pub(crate) fn new(
        tier: u8,
        items: &'a I,
        levels: &'a LevelVocabulary,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            items,
            levels,
            config,
            data: CreationData::with_tier(tier),
            ledger: Ledger::new(),
        }
    }

    /// The folded aggregate.
    pub(crate) fn finish(self) -> CreationData {
        self.data
    }

    /// Replay one document into the aggregate. With `removal` set the
    /// document's effects are reversed instead of applied.
    pub(crate) async fn fold_document(&mut self, document: &JournalDocument, removal: bool) {
        let lines = plain_lines(&document.content);
        let Some(first) = lines.first() else {
            return;
        };
        let Some(sentence_tag) = classify_first_line(first, self.config.sentinel) else {
            debug!(
                journal = %document.name,
                "first line names no sentence slot, journal skipped"
            );
            return;
        };

        let slot_value = if removal {
            String::new()
        } else {
            document.slot_reference()
        };
        self.data.set_sentence(sentence_tag.slot(), slot_value);

        for line in lines.iter().skip(1) {
            self.fold_line(document, line, sentence_tag, removal).await;
        }
    }

    async fn fold_line(
        &mut self,
        document: &JournalDocument,
        line: &str,
        sentence_tag: SentenceTag,
        removal: bool,
    ) {
        if !line.starts_with(self.config.sentinel) {
            return;
        }
        let Some(tags) = scan_line(line, self.config.sentinel) else {
            return;
        };
        // A body line restating the document's own slot tag is a title
        // line, not an effect.
        if SentenceTag::parse(tags.type_ident) == Some(sentence_tag) {
            return;
        }
        match classify_body_tag(tags.type_ident) {
            Some(BodyTag::Stat(stat)) => self.fold_stat_line(line, stat, removal),
            Some(BodyTag::Item(_)) => self.fold_item_line(document, &tags, removal).await,
            None => {}
        }
    }

    // --- statistics ---

    fn fold_stat_line(&mut self, line: &str, stat: StatTag, removal: bool) {
        let terms = signed_terms(line);
        if terms.is_empty() {
            self.fold_absolute_stat(line, stat, removal);
            return;
        }

        // A removal pass appends each term with its sign flipped, so the
        // expression cancels out to the pre-link value.
        let orient = |term: i64| if removal { -term } else { term };
        match stat {
            StatTag::Effort => {
                self.data
                    .add_modifier(ModifierTarget::Effort, &format!("{:+}", orient(terms[0])));
            }
            StatTag::Pool(name) => {
                self.data
                    .add_modifier(ModifierTarget::Pool(name), &format!("{:+}", orient(terms[0])));
                if let Some(&second) = terms.get(1) {
                    self.data
                        .add_modifier(ModifierTarget::Edge(name), &format!("{:+}", orient(second)));
                }
            }
        }
    }

    fn fold_absolute_stat(&mut self, line: &str, stat: StatTag, removal: bool) {
        let literals = unsigned_literals(line);
        let Some(&first) = literals.first() else {
            debug!(%line, "statistic line without a numeral, skipped");
            return;
        };
        let Ok(first) = i32::try_from(first) else {
            debug!(%line, "statistic value out of range, skipped");
            return;
        };
        match stat {
            StatTag::Effort => {
                let value = if removal { 0 } else { first };
                self.data.set_effort(value);
            }
            StatTag::Pool(name) => {
                if removal {
                    self.data.set_stat(name, DEFAULT_POOL, DEFAULT_EDGE);
                } else {
                    // An unreadable second literal falls back like a missing one.
                    let edge = literals
                        .get(1)
                        .and_then(|&e| i32::try_from(e).ok())
                        .unwrap_or(DEFAULT_EDGE);
                    self.data.set_stat(name, first, edge);
                }
            }
        }
    }

    // --- item grants ---

    async fn fold_item_line(
        &mut self,
        document: &JournalDocument,
        tags: &LineTags<'_>,
        removal: bool,
    ) {
        let Some(reference) = tags.entity_ref else {
            debug!(
                journal = %document.name,
                "item line without an entity reference, skipped"
            );
            return;
        };
        let Some(payload) = self.resolve_reference(reference).await else {
            return;
        };

        if payload.has_quantity() {
            self.fold_quantity_grant(payload, tags.option, removal);
        } else {
            match payload.kind() {
                ItemKind::Skill => self.fold_skill_grant(document, payload, tags.option, removal),
                ItemKind::Ability => {
                    self.fold_ability_grant(document, payload, tags.option, removal);
                }
                _ => self.fold_plain_grant(document, payload, removal),
            }
        }
    }

    /// Fetch the payload behind an entity reference. A reference with
    /// dots addresses a compendium pack by its trailing two segments;
    /// anything before them is scope and is ignored.
    async fn resolve_reference(&self, reference: &str) -> Option<ItemPayload> {
        let result = {
            let mut segments = reference.rsplit('.');
            let last = segments.next().unwrap_or(reference);
            match segments.next() {
                Some(pack) => self.items.pack_item(pack, last).await,
                None => self.items.item(reference).await,
            }
        };
        match result {
            Ok(payload) => Some(payload),
            Err(error) => {
                warn!(%reference, %error, "item reference could not be resolved, line skipped");
                None
            }
        }
    }

    fn fold_quantity_grant(
        &mut self,
        payload: ItemPayload,
        option: Option<(OptionTag, &str)>,
        removal: bool,
    ) {
        let quantity = match option {
            Some((OptionTag::Quantity, raw)) => raw.parse().unwrap_or_else(|_| {
                debug!(value = %raw, "unreadable quantity, defaulting to 1");
                1
            }),
            _ => 1,
        };

        let existing = self
            .data
            .find_item(&payload.name)
            .map(|item| (item.id.clone(), item.quantity));
        match existing {
            Some((id, current)) => {
                let next = if removal {
                    current - quantity
                } else {
                    current + quantity
                };
                self.data.set_item_quantity(&id, next);
            }
            None => self.data.add_item(ItemRecord::new(payload, quantity)),
        }
    }

    fn fold_skill_grant(
        &mut self,
        document: &JournalDocument,
        payload: ItemPayload,
        option: Option<(OptionTag, &str)>,
        removal: bool,
    ) {
        let level = match option {
            Some((OptionTag::Level, raw)) => self.levels.resolve(raw).unwrap_or_else(|| {
                debug!(value = %raw, "unknown proficiency label, defaulting");
                SkillLevel::default()
            }),
            _ => SkillLevel::default(),
        };
        let name = payload.name.clone();
        let existing = self
            .data
            .find_skill(&name)
            .map(|skill| (skill.id.clone(), skill.level));

        if removal {
            let Some((id, _)) = existing else {
                return;
            };
            let remaining = self.ledger.skill_levels_from_others(&name, &document.id);
            if remaining.is_empty() {
                self.data.remove_skill(&id);
            } else {
                let sum: u32 = remaining.iter().map(|level| u32::from(level.index())).sum();
                let mean = (sum / remaining.len() as u32) as u8;
                self.data
                    .set_skill_level(&id, SkillLevel::from_index(mean).unwrap_or_default());
            }
            return;
        }

        match existing {
            Some((id, current)) => {
                self.data.set_skill_level(&id, current.merge(level));
            }
            None => self.data.add_skill(SkillRecord::new(payload, level)),
        }
        self.ledger.record_skill(&document.id, &name, level);
    }

    fn fold_ability_grant(
        &mut self,
        document: &JournalDocument,
        payload: ItemPayload,
        option: Option<(OptionTag, &str)>,
        removal: bool,
    ) {
        let tier: u8 = match option {
            Some((OptionTag::Tier, raw)) => raw.parse().unwrap_or_else(|_| {
                debug!(value = %raw, "unreadable tier requirement, defaulting to 0");
                0
            }),
            _ => 0,
        };
        if tier > self.data.tier {
            debug!(
                ability = %payload.name,
                tier,
                "tier requirement above character tier, grant rejected"
            );
            return;
        }

        let name = payload.name.clone();
        if removal {
            if !self.ledger.ability_granted_by_others(&name, &document.id) {
                self.data.remove_ability(&name);
            }
            return;
        }

        if self.data.find_ability(&name).is_none() {
            self.data.add_ability(AbilityRecord::new(payload, tier));
        }
        self.ledger.record_ability(&document.id, &name);
    }

    fn fold_plain_grant(&mut self, document: &JournalDocument, payload: ItemPayload, removal: bool) {
        let name = payload.name.clone();
        if removal {
            if self.ledger.item_was_granted(&name) {
                self.data.remove_item(&name);
            }
            return;
        }

        self.ledger.record_item(&document.id, &name);
        if payload.kind() == ItemKind::Artifact && self.data.find_item(&name).is_some() {
            debug!(artifact = %name, "artifact already granted, duplicate skipped");
            return;
        }
        self.data.add_item(ItemRecord::new(payload, 1));
    }
}
