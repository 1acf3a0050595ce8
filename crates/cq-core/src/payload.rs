//! Owned item payloads exchanged with the host.
//!
//! A payload is this crate's copy of a host item: identifier, display
//! name, type discriminator, and the free-form `data` block the host
//! stores alongside. Payloads are cloned out of the host on lookup and
//! handed back verbatim on synchronization, so edits made here never
//! touch the host's own records until a create call ships them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::level::SkillLevel;

/// The kind of a host item. Extensible via `Custom(String)` for types
/// this crate has no special handling for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A learnable skill.
    Skill,
    /// A tier-gated special ability.
    Ability,
    /// A permanent magical device.
    Artifact,
    /// A one-use magical device.
    Cypher,
    /// A curious trinket.
    Oddity,
    /// A weapon.
    Weapon,
    /// Armor.
    Armor,
    /// General equipment.
    Equipment,
    /// Crafting material.
    Material,
    /// Any other item type the host defines.
    Custom(String),
}

impl ItemKind {
    /// Parse a host type discriminator.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "skill" => Self::Skill,
            "ability" => Self::Ability,
            "artifact" => Self::Artifact,
            "cypher" => Self::Cypher,
            "oddity" => Self::Oddity,
            "weapon" => Self::Weapon,
            "armor" => Self::Armor,
            "equipment" => Self::Equipment,
            "material" => Self::Material,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skill => write!(f, "skill"),
            Self::Ability => write!(f, "ability"),
            Self::Artifact => write!(f, "artifact"),
            Self::Cypher => write!(f, "cypher"),
            Self::Oddity => write!(f, "oddity"),
            Self::Weapon => write!(f, "weapon"),
            Self::Armor => write!(f, "armor"),
            Self::Equipment => write!(f, "equipment"),
            Self::Material => write!(f, "material"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// An owned copy of a host item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    /// Host identifier of the item this payload was cloned from.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Host type discriminator, e.g. `"skill"` or `"artifact"`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// The host's free-form data block.
    pub data: Value,
}

impl ItemPayload {
    /// Build a payload from its parts.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        type_name: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_name: type_name.into(),
            data,
        }
    }

    /// The parsed kind of this payload.
    pub fn kind(&self) -> ItemKind {
        ItemKind::parse(&self.type_name)
    }

    /// Whether the data block carries a `quantity` field. Quantity-bearing
    /// payloads take the quantity branch of journal folding regardless of
    /// their kind.
    pub fn has_quantity(&self) -> bool {
        self.data
            .as_object()
            .is_some_and(|data| data.contains_key("quantity"))
    }

    /// The current quantity, if the data block has a numeric one.
    pub fn quantity(&self) -> Option<i64> {
        self.data.get("quantity").and_then(Value::as_i64)
    }

    /// Overwrite the quantity. A payload without a `quantity` field is
    /// left untouched.
    pub fn set_quantity(&mut self, quantity: i64) {
        if let Some(slot) = self.data.get_mut("quantity") {
            *slot = Value::from(quantity);
        }
    }

    /// Write a proficiency level into the data block: the canonical label
    /// lands in `skillLevel` and in `rollButton.skill` so the host's roll
    /// dialog preselects it.
    pub fn set_skill_level(&mut self, level: SkillLevel) {
        let Some(data) = self.data.as_object_mut() else {
            return;
        };
        let label = Value::String(level.label().to_string());
        data.insert("skillLevel".to_string(), label.clone());
        let button = data
            .entry("rollButton")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(button) = button.as_object_mut() {
            button.insert("skill".to_string(), label);
        }
    }
}
