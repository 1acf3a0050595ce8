//! Granted skills, abilities, and inventory records.
//!
//! A record pairs the bookkeeping fields journal folding works with
//! (identifier, name, level or tier or quantity) with the owned payload
//! that synchronization eventually ships back to the host. Constructors
//! keep payload and record in step, so a record's payload always reflects
//! its current level or quantity.

use serde::{Deserialize, Serialize};

use crate::level::SkillLevel;
use crate::payload::ItemPayload;

/// Highest tier an ability requirement may declare.
pub const MAX_ABILITY_TIER: u8 = 6;

/// A skill granted during creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// Host identifier of the source item.
    pub id: String,
    /// Display name, the key merging is done under.
    pub name: String,
    /// Current effective proficiency level.
    pub level: SkillLevel,
    /// Owned payload shipped to the host on synchronization.
    pub payload: ItemPayload,
}

impl SkillRecord {
    /// Wrap a payload as a skill grant at the given level.
    pub fn new(mut payload: ItemPayload, level: SkillLevel) -> Self {
        payload.set_skill_level(level);
        Self {
            id: payload.id.clone(),
            name: payload.name.clone(),
            level,
            payload,
        }
    }

    /// Change the effective level, keeping the payload's labels in step.
    pub fn set_level(&mut self, level: SkillLevel) {
        self.level = level;
        self.payload.set_skill_level(level);
    }
}

/// An ability granted during creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityRecord {
    /// Host identifier of the source item.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Tier the character must have reached for this ability.
    pub tier: u8,
    /// Owned payload shipped to the host on synchronization.
    pub payload: ItemPayload,
}

impl AbilityRecord {
    /// Wrap a payload as an ability grant with the given tier requirement.
    pub fn new(payload: ItemPayload, tier: u8) -> Self {
        Self {
            id: payload.id.clone(),
            name: payload.name.clone(),
            tier,
            payload,
        }
    }

    /// Change the tier requirement. Values above [`MAX_ABILITY_TIER`] are
    /// rejected and leave the record untouched.
    pub fn set_tier(&mut self, tier: u8) {
        if tier <= MAX_ABILITY_TIER {
            self.tier = tier;
        }
    }
}

/// An inventory item granted during creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Host identifier of the source item.
    pub id: String,
    /// Display name.
    pub name: String,
    /// How many copies the character receives.
    pub quantity: i64,
    /// Owned payload shipped to the host on synchronization.
    pub payload: ItemPayload,
}

impl ItemRecord {
    /// Wrap a payload as an inventory grant of the given quantity.
    pub fn new(mut payload: ItemPayload, quantity: i64) -> Self {
        payload.set_quantity(quantity);
        Self {
            id: payload.id.clone(),
            name: payload.name.clone(),
            quantity,
            payload,
        }
    }

    /// Change the quantity, keeping a quantity-bearing payload in step.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.payload.set_quantity(quantity);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn skill_records_stamp_the_level_into_the_payload() {
        let payload = ItemPayload::new("s1", "Lore", "skill", json!({ "skillLevel": "Practiced" }));
        let mut record = SkillRecord::new(payload, SkillLevel::Trained);
        assert_eq!(record.level, SkillLevel::Trained);
        assert_eq!(record.payload.data["skillLevel"], json!("Trained"));

        record.set_level(SkillLevel::Specialized);
        assert_eq!(record.payload.data["skillLevel"], json!("Specialized"));
        assert_eq!(record.payload.data["rollButton"]["skill"], json!("Specialized"));
    }

    #[test]
    fn ability_tiers_above_the_cap_are_rejected() {
        let payload = ItemPayload::new("a1", "Ward", "ability", json!({}));
        let mut record = AbilityRecord::new(payload, 2);
        record.set_tier(MAX_ABILITY_TIER + 1);
        assert_eq!(record.tier, 2);
        record.set_tier(MAX_ABILITY_TIER);
        assert_eq!(record.tier, MAX_ABILITY_TIER);
    }

    #[test]
    fn item_records_write_the_quantity_through() {
        let payload = ItemPayload::new("i1", "Rope", "equipment", json!({ "quantity": 1 }));
        let mut record = ItemRecord::new(payload, 3);
        assert_eq!(record.payload.quantity(), Some(3));
        record.set_quantity(7);
        assert_eq!(record.quantity, 7);
        assert_eq!(record.payload.quantity(), Some(7));
    }

    #[test]
    fn items_without_a_quantity_field_keep_their_payload_untouched() {
        let payload = ItemPayload::new("i2", "Idol", "oddity", json!({ "weight": 2 }));
        let record = ItemRecord::new(payload, 1);
        assert_eq!(record.quantity, 1);
        assert_eq!(record.payload.quantity(), None);
    }
}
