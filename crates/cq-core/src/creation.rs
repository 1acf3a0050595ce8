//! The creation aggregate that collects every pending effect.

use serde::{Deserialize, Serialize};

use crate::level::SkillLevel;
use crate::record::{AbilityRecord, ItemRecord, SkillRecord, MAX_ABILITY_TIER};
use crate::sentence::{Sentence, SentenceSlot};
use crate::stat::{ModifierTarget, StatName, Stats};

/// Everything journal folding has decided about a character, gathered in
/// memory before a single synchronization pass writes it to the host.
///
/// Record lookups accept either a host identifier or a display name and
/// return the first match, checking the identifier before the name on
/// each record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationData {
    /// The assembled creation sentence.
    pub sentence: Sentence,
    /// Character tier the fold ran against.
    pub tier: u8,
    /// Base effort value.
    pub effort: i32,
    /// Accumulated signed terms for effort.
    pub effort_modifier: String,
    /// The four pool statistics.
    pub stats: Stats,
    skills: Vec<SkillRecord>,
    abilities: Vec<AbilityRecord>,
    items: Vec<ItemRecord>,
}

impl CreationData {
    /// An empty aggregate for a tier 1 character.
    pub fn new() -> Self {
        Self {
            sentence: Sentence::default(),
            tier: 1,
            effort: 0,
            effort_modifier: String::new(),
            stats: Stats::default(),
            skills: Vec::new(),
            abilities: Vec::new(),
            items: Vec::new(),
        }
    }

    /// An empty aggregate for a character at the given tier.
    pub fn with_tier(tier: u8) -> Self {
        Self { tier, ..Self::new() }
    }

    // --- sentence and numbers ---

    /// Overwrite one sentence slot.
    pub fn set_sentence(&mut self, slot: SentenceSlot, value: impl Into<String>) {
        self.sentence.set(slot, value);
    }

    /// Overwrite the character tier.
    pub fn set_tier(&mut self, tier: u8) {
        self.tier = tier;
    }

    /// Overwrite the base effort value.
    pub fn set_effort(&mut self, value: i32) {
        self.effort = value;
    }

    /// Overwrite a statistic's absolute numbers. Pending modifier terms on
    /// that statistic survive the overwrite.
    pub fn set_stat(&mut self, name: StatName, value: i32, edge: i32) {
        let stat = self.stats.get_mut(name);
        stat.value = value;
        stat.edge = edge;
    }

    /// Append a signed term such as `"+2"` or `"-1"` to a modifier
    /// expression. Terms are folded in once, at synchronization.
    pub fn add_modifier(&mut self, target: ModifierTarget, term: &str) {
        match target {
            ModifierTarget::Pool(name) => self.stats.get_mut(name).pool_modifier.push_str(term),
            ModifierTarget::Edge(name) => self.stats.get_mut(name).edge_modifier.push_str(term),
            ModifierTarget::Effort => self.effort_modifier.push_str(term),
        }
    }

    // --- skills ---

    /// The skills granted so far.
    pub fn skills(&self) -> &[SkillRecord] {
        &self.skills
    }

    /// Record a new skill grant.
    pub fn add_skill(&mut self, record: SkillRecord) {
        self.skills.push(record);
    }

    /// Find a skill by host identifier or display name.
    pub fn find_skill(&self, key: &str) -> Option<&SkillRecord> {
        self.skills.iter().find(|s| s.id == key || s.name == key)
    }

    /// Change a skill's effective level. Returns false when no skill
    /// matches the key.
    pub fn set_skill_level(&mut self, key: &str, level: SkillLevel) -> bool {
        match self.skills.iter_mut().find(|s| s.id == key || s.name == key) {
            Some(skill) => {
                skill.set_level(level);
                true
            }
            None => false,
        }
    }

    /// Drop a skill grant. Returns false when no skill matches the key.
    pub fn remove_skill(&mut self, key: &str) -> bool {
        match self.skills.iter().position(|s| s.id == key || s.name == key) {
            Some(index) => {
                self.skills.remove(index);
                true
            }
            None => false,
        }
    }

    // --- abilities ---

    /// The abilities granted so far.
    pub fn abilities(&self) -> &[AbilityRecord] {
        &self.abilities
    }

    /// Record a new ability grant.
    pub fn add_ability(&mut self, record: AbilityRecord) {
        self.abilities.push(record);
    }

    /// Find an ability by host identifier or display name.
    pub fn find_ability(&self, key: &str) -> Option<&AbilityRecord> {
        self.abilities.iter().find(|a| a.id == key || a.name == key)
    }

    /// Change an ability's tier requirement. Returns false when no ability
    /// matches the key or the tier exceeds [`MAX_ABILITY_TIER`].
    pub fn set_ability_tier(&mut self, key: &str, tier: u8) -> bool {
        if tier > MAX_ABILITY_TIER {
            return false;
        }
        match self.abilities.iter_mut().find(|a| a.id == key || a.name == key) {
            Some(ability) => {
                ability.set_tier(tier);
                true
            }
            None => false,
        }
    }

    /// Drop an ability grant. Returns false when no ability matches the key.
    pub fn remove_ability(&mut self, key: &str) -> bool {
        match self.abilities.iter().position(|a| a.id == key || a.name == key) {
            Some(index) => {
                self.abilities.remove(index);
                true
            }
            None => false,
        }
    }

    // --- items ---

    /// The inventory items granted so far.
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    /// Record a new inventory grant.
    pub fn add_item(&mut self, record: ItemRecord) {
        self.items.push(record);
    }

    /// Find an item by host identifier or display name.
    pub fn find_item(&self, key: &str) -> Option<&ItemRecord> {
        self.items.iter().find(|i| i.id == key || i.name == key)
    }

    /// Change an item's quantity. Returns false when no item matches the
    /// key.
    pub fn set_item_quantity(&mut self, key: &str, quantity: i64) -> bool {
        match self.items.iter_mut().find(|i| i.id == key || i.name == key) {
            Some(item) => {
                item.set_quantity(quantity);
                true
            }
            None => false,
        }
    }

    /// Drop one matching inventory grant. Duplicate grants are removed one
    /// instance at a time. Returns false when no item matches the key.
    pub fn remove_item(&mut self, key: &str) -> bool {
        match self.items.iter().position(|i| i.id == key || i.name == key) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

impl Default for CreationData {
    fn default() -> Self {
        Self::new()
    }
}
