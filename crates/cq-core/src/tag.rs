//! Tag vocabularies recognized in journal text.
//!
//! A tag is a sentinel-prefixed identifier such as `@descriptor` or
//! `@might`. Three closed vocabularies exist: sentence tags (valid only on
//! a document's first line), statistic tags, and item-category tags. The
//! identifier `additional` belongs to both the sentence and the statistic
//! vocabulary; its meaning is decided by position, so the first-line
//! classifier and the body classifier each consult their own vocabulary.

use std::fmt;

use crate::sentence::SentenceSlot;
use crate::stat::StatName;

/// Default sentinel character that introduces a tag.
pub const DEFAULT_SENTINEL: char = '@';

/// A sentence tag, valid only as the first word of a document.
///
/// The tag names the sentence slot the whole document is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceTag {
    /// The descriptor slot (`@descriptor`).
    Descriptor,
    /// The focus slot (`@focus`).
    Focus,
    /// The character type slot (`@type`).
    Type,
    /// Short form selecting the additional sentence slot.
    Additional,
    /// Long form selecting the additional sentence slot.
    AdditionalSentence,
}

impl SentenceTag {
    /// Try to parse a sentence tag from a bare identifier (no sentinel).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "descriptor" => Some(Self::Descriptor),
            "focus" => Some(Self::Focus),
            "type" => Some(Self::Type),
            "additional" => Some(Self::Additional),
            "additionalsentence" => Some(Self::AdditionalSentence),
            _ => None,
        }
    }

    /// The sentence slot this tag selects. `Additional` and
    /// `AdditionalSentence` select the same slot.
    pub fn slot(self) -> SentenceSlot {
        match self {
            Self::Descriptor => SentenceSlot::Descriptor,
            Self::Focus => SentenceSlot::Focus,
            Self::Type => SentenceSlot::Type,
            Self::Additional | Self::AdditionalSentence => SentenceSlot::AdditionalSentence,
        }
    }
}

impl fmt::Display for SentenceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descriptor => write!(f, "descriptor"),
            Self::Focus => write!(f, "focus"),
            Self::Type => write!(f, "type"),
            Self::Additional => write!(f, "additional"),
            Self::AdditionalSentence => write!(f, "additionalsentence"),
        }
    }
}

/// A statistic tag found on a body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatTag {
    /// A pool statistic. Past the first line, `additional` and
    /// `additionalpool` both name the additional pool.
    Pool(StatName),
    /// The effort value.
    Effort,
}

impl StatTag {
    /// Try to parse a statistic tag from a bare identifier (no sentinel).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "might" => Some(Self::Pool(StatName::Might)),
            "speed" => Some(Self::Pool(StatName::Speed)),
            "intellect" => Some(Self::Pool(StatName::Intellect)),
            "additional" | "additionalpool" => Some(Self::Pool(StatName::Additional)),
            "effort" => Some(Self::Effort),
            _ => None,
        }
    }
}

impl fmt::Display for StatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool(name) => write!(f, "{name}"),
            Self::Effort => write!(f, "effort"),
        }
    }
}

/// An item-category tag found on a body line.
///
/// The category only marks the line as an item grant; which branch the
/// grant takes is decided by the resolved payload, not by the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    /// A generic inventory item.
    Item,
    /// A skill the character can roll.
    Skill,
    /// A special ability.
    Ability,
    /// A one-use cypher.
    Cypher,
    /// A persistent artifact.
    Artifact,
    /// An oddity with no mechanical effect.
    Oddity,
    /// A weapon.
    Weapon,
    /// Armor.
    Armor,
    /// A piece of equipment.
    Equipment,
    /// Crafting material.
    Material,
}

impl ItemCategory {
    /// Try to parse an item-category tag from a bare identifier (no sentinel).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "item" => Some(Self::Item),
            "skill" => Some(Self::Skill),
            "ability" => Some(Self::Ability),
            "cypher" => Some(Self::Cypher),
            "artifact" => Some(Self::Artifact),
            "oddity" => Some(Self::Oddity),
            "weapon" => Some(Self::Weapon),
            "armor" => Some(Self::Armor),
            "equipment" => Some(Self::Equipment),
            "material" => Some(Self::Material),
            _ => None,
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Skill => write!(f, "skill"),
            Self::Ability => write!(f, "ability"),
            Self::Cypher => write!(f, "cypher"),
            Self::Artifact => write!(f, "artifact"),
            Self::Oddity => write!(f, "oddity"),
            Self::Weapon => write!(f, "weapon"),
            Self::Armor => write!(f, "armor"),
            Self::Equipment => write!(f, "equipment"),
            Self::Material => write!(f, "material"),
        }
    }
}

/// An option qualifier that refines an item grant on the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionTag {
    /// How many copies a quantity-bearing grant adds (`@quantity`).
    Quantity,
    /// The proficiency level of a skill grant (`@level`).
    Level,
    /// The character tier an ability grant requires (`@tier`).
    Tier,
}

impl OptionTag {
    /// Try to parse an option tag from a bare identifier (no sentinel).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quantity" => Some(Self::Quantity),
            "level" => Some(Self::Level),
            "tier" => Some(Self::Tier),
            _ => None,
        }
    }
}

impl fmt::Display for OptionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quantity => write!(f, "quantity"),
            Self::Level => write!(f, "level"),
            Self::Tier => write!(f, "tier"),
        }
    }
}
