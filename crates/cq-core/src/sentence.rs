//! The four-part creation sentence and its slots.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four sentence slots on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentenceSlot {
    /// The adjective of the sentence ("I am an adjective ...").
    Descriptor,
    /// The noun ("... noun ...").
    Type,
    /// The verb phrase ("... who verbs.").
    Focus,
    /// Free-form extra clause some settings add.
    AdditionalSentence,
}

impl SentenceSlot {
    /// All slots, in the order synchronization writes them.
    pub fn all() -> [Self; 4] {
        [
            Self::Descriptor,
            Self::Focus,
            Self::Type,
            Self::AdditionalSentence,
        ]
    }

    /// The host field name for this slot under the character's basic data.
    pub fn field(self) -> &'static str {
        match self {
            Self::Descriptor => "descriptor",
            Self::Focus => "focus",
            Self::Type => "type",
            Self::AdditionalSentence => "additionalSentence",
        }
    }
}

impl fmt::Display for SentenceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field())
    }
}

/// The assembled creation sentence. Each slot holds the display value the
/// host shows on the sheet; an empty string means the slot is vacant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// The descriptor slot.
    pub descriptor: String,
    /// The focus slot.
    pub focus: String,
    /// The character type slot.
    pub character_type: String,
    /// The additional sentence slot.
    pub additional: String,
}

impl Sentence {
    /// Read one slot.
    pub fn get(&self, slot: SentenceSlot) -> &str {
        match slot {
            SentenceSlot::Descriptor => &self.descriptor,
            SentenceSlot::Focus => &self.focus,
            SentenceSlot::Type => &self.character_type,
            SentenceSlot::AdditionalSentence => &self.additional,
        }
    }

    /// Overwrite one slot.
    pub fn set(&mut self, slot: SentenceSlot, value: impl Into<String>) {
        let value = value.into();
        match slot {
            SentenceSlot::Descriptor => self.descriptor = value,
            SentenceSlot::Focus => self.focus = value,
            SentenceSlot::Type => self.character_type = value,
            SentenceSlot::AdditionalSentence => self.additional = value,
        }
    }
}
