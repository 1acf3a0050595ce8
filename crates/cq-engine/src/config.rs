//! Engine configuration.

use cq_core::DEFAULT_SENTINEL;

/// Configuration for a creation engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Sentinel character that introduces a tag in journal text.
    pub sentinel: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL,
        }
    }
}

impl EngineConfig {
    /// Set the tag sentinel.
    pub fn with_sentinel(mut self, sentinel: char) -> Self {
        self.sentinel = sentinel;
        self
    }
}
