//! Label vocabulary for skill proficiency levels.
//!
//! Journals write levels as words (`@level trained`). The canonical
//! English labels always resolve; a host can extend the vocabulary with
//! its locale's labels at engine construction. Lookups are
//! case-insensitive, and the canonical labels cannot be shadowed.

use std::collections::HashMap;

use cq_core::SkillLevel;

use crate::host::Localization;

/// Case-insensitive mapping from level labels to levels.
#[derive(Debug, Clone)]
pub struct LevelVocabulary {
    labels: HashMap<String, SkillLevel>,
}

impl LevelVocabulary {
    /// A vocabulary of just the canonical English labels.
    pub fn new() -> Self {
        let mut vocabulary = Self {
            labels: HashMap::new(),
        };
        for level in SkillLevel::all() {
            vocabulary.add_synonym(level.label(), level);
        }
        vocabulary
    }

    /// A vocabulary extended with every label the localization source
    /// defines.
    pub fn with_localization(localization: &dyn Localization) -> Self {
        let mut vocabulary = Self::new();
        for level in SkillLevel::all() {
            if let Some(label) = localization.skill_level_label(level) {
                vocabulary.add_synonym(&label, level);
            }
        }
        vocabulary
    }

    /// Register another spelling for a level. The first registration of a
    /// spelling wins, so canonical labels keep their meaning.
    pub fn add_synonym(&mut self, label: &str, level: SkillLevel) {
        self.labels.entry(label.to_lowercase()).or_insert(level);
    }

    /// Resolve a label to its level, ignoring case.
    pub fn resolve(&self, label: &str) -> Option<SkillLevel> {
        self.labels.get(&label.to_lowercase()).copied()
    }
}

impl Default for LevelVocabulary {
    fn default() -> Self {
        Self::new()
    }
}
