//! Per-invocation contribution ledger.
//!
//! While a fold walks its documents, the ledger remembers which document
//! contributed which skill, ability, or item. The removal pass consults
//! it to decide whether a grant survives the unlinked document and what
//! a surviving skill's level becomes. The ledger lives and dies with one
//! fold; nothing here is persisted.

use cq_core::SkillLevel;

/// One document's contribution of a skill.
#[derive(Debug, Clone, PartialEq)]
struct SkillContribution {
    document: String,
    skill: String,
    level: SkillLevel,
}

/// One document's contribution of an ability.
#[derive(Debug, Clone, PartialEq)]
struct AbilityContribution {
    document: String,
    ability: String,
}

/// One document's contribution of an inventory item.
#[derive(Debug, Clone, PartialEq)]
struct ItemContribution {
    document: String,
    item: String,
}

/// Contribution records for one fold.
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    skills: Vec<SkillContribution>,
    abilities: Vec<AbilityContribution>,
    items: Vec<ItemContribution>,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Remember that `document` granted `skill` at `level`. The recorded
    /// level is the document's own, before any merging.
    pub(crate) fn record_skill(&mut self, document: &str, skill: &str, level: SkillLevel) {
        self.skills.push(SkillContribution {
            document: document.to_string(),
            skill: skill.to_string(),
            level,
        });
    }

    /// Remember that `document` granted `ability`.
    pub(crate) fn record_ability(&mut self, document: &str, ability: &str) {
        self.abilities.push(AbilityContribution {
            document: document.to_string(),
            ability: ability.to_string(),
        });
    }

    /// Remember that `document` granted `item`.
    pub(crate) fn record_item(&mut self, document: &str, item: &str) {
        self.items.push(ItemContribution {
            document: document.to_string(),
            item: item.to_string(),
        });
    }

    /// The levels every document other than `excluded` contributed to
    /// `skill`, in contribution order.
    pub(crate) fn skill_levels_from_others(&self, skill: &str, excluded: &str) -> Vec<SkillLevel> {
        self.skills
            .iter()
            .filter(|c| c.skill == skill && c.document != excluded)
            .map(|c| c.level)
            .collect()
    }

    /// Whether any document other than `excluded` granted `ability`.
    pub(crate) fn ability_granted_by_others(&self, ability: &str, excluded: &str) -> bool {
        self.abilities
            .iter()
            .any(|c| c.ability == ability && c.document != excluded)
    }

    /// Whether any document at all granted `item`.
    pub(crate) fn item_was_granted(&self, item: &str) -> bool {
        self.items.iter().any(|c| c.item == item)
    }
}
