//! Skill proficiency levels and their numeric ladder.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Proficiency level of a skill, ordered from best to worst.
///
/// The numeric index is what journal contributions are averaged over, so
/// the variant order is load-bearing: `Specialized` is 0 and `Inability`
/// is 3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    /// The character excels at this skill (index 0).
    Specialized,
    /// The character is trained in this skill (index 1).
    Trained,
    /// Baseline proficiency for a new grant (index 2).
    #[default]
    Practiced,
    /// The character is hindered at this skill (index 3).
    Inability,
}

impl SkillLevel {
    /// All levels, best first.
    pub fn all() -> [Self; 4] {
        [
            Self::Specialized,
            Self::Trained,
            Self::Practiced,
            Self::Inability,
        ]
    }

    /// The position of this level on the ladder.
    pub fn index(self) -> u8 {
        match self {
            Self::Specialized => 0,
            Self::Trained => 1,
            Self::Practiced => 2,
            Self::Inability => 3,
        }
    }

    /// The level at a ladder position, if the position is valid.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Specialized),
            1 => Some(Self::Trained),
            2 => Some(Self::Practiced),
            3 => Some(Self::Inability),
            _ => None,
        }
    }

    /// The canonical English label written into host payloads.
    pub fn label(self) -> &'static str {
        match self {
            Self::Specialized => "Specialized",
            Self::Trained => "Trained",
            Self::Practiced => "Practiced",
            Self::Inability => "Inability",
        }
    }

    /// Try to resolve a canonical label, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "specialized" => Some(Self::Specialized),
            "trained" => Some(Self::Trained),
            "practiced" => Some(Self::Practiced),
            "inability" => Some(Self::Inability),
            _ => None,
        }
    }

    /// Merge an incoming contribution into this level: the floor of the
    /// mean of both indexes.
    pub fn merge(self, incoming: Self) -> Self {
        Self::from_index((self.index() + incoming.index()) / 2).unwrap_or_default()
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
