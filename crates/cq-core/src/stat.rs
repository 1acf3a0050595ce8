//! Pool statistics and modifier targets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Baseline pool value for a fresh statistic.
pub const DEFAULT_POOL: i32 = 10;
/// Baseline edge for a fresh statistic.
pub const DEFAULT_EDGE: i32 = 0;

/// Name of one of the four pool statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatName {
    /// Physical power and endurance.
    Might,
    /// Quickness and coordination.
    Speed,
    /// Knowledge and willpower.
    Intellect,
    /// The extra pool some settings add.
    Additional,
}

impl StatName {
    /// All statistics, in the order synchronization writes them.
    pub fn all() -> [Self; 4] {
        [Self::Might, Self::Speed, Self::Intellect, Self::Additional]
    }

    /// The host field stem for this statistic, e.g. `"might"` in
    /// `pools.might.value` and `pools.mightEdge`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Might => "might",
            Self::Speed => "speed",
            Self::Intellect => "intellect",
            Self::Additional => "additional",
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Target of an accumulated modifier term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierTarget {
    /// A statistic's pool value.
    Pool(StatName),
    /// A statistic's edge.
    Edge(StatName),
    /// The effort value.
    Effort,
}

/// A single pool statistic with its pending modifier expressions.
///
/// `value` and `edge` hold the absolute numbers set by journal lines;
/// the modifier strings accumulate signed terms that synchronization
/// evaluates and folds in exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    /// Base pool value.
    pub value: i32,
    /// Edge applied to this pool.
    pub edge: i32,
    /// Accumulated signed terms for the pool value.
    pub pool_modifier: String,
    /// Accumulated signed terms for the edge.
    pub edge_modifier: String,
}

impl Stat {
    /// A statistic with the given absolute numbers and no pending terms.
    pub fn new(value: i32, edge: i32) -> Self {
        Self {
            value,
            edge,
            pool_modifier: String::new(),
            edge_modifier: String::new(),
        }
    }
}

impl Default for Stat {
    fn default() -> Self {
        Self::new(DEFAULT_POOL, DEFAULT_EDGE)
    }
}

/// The four pool statistics of a character in creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// The might pool.
    pub might: Stat,
    /// The speed pool.
    pub speed: Stat,
    /// The intellect pool.
    pub intellect: Stat,
    /// The additional pool.
    pub additional: Stat,
}

impl Stats {
    /// Borrow one statistic by name.
    pub fn get(&self, name: StatName) -> &Stat {
        match name {
            StatName::Might => &self.might,
            StatName::Speed => &self.speed,
            StatName::Intellect => &self.intellect,
            StatName::Additional => &self.additional,
        }
    }

    /// Mutably borrow one statistic by name.
    pub fn get_mut(&mut self, name: StatName) -> &mut Stat {
        match name {
            StatName::Might => &mut self.might,
            StatName::Speed => &mut self.speed,
            StatName::Intellect => &mut self.intellect,
            StatName::Additional => &mut self.additional,
        }
    }
}
