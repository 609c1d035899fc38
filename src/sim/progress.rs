//! Highest-unlocked-level tracking
//!
//! Process-lifetime only; nothing is persisted across restarts.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEVEL;

/// Monotonically non-decreasing unlock state, starting at level 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    unlocked: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self { unlocked: 1 }
    }
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unlocked_level(&self) -> u32 {
        self.unlocked
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        level <= self.unlocked
    }

    /// Record a level outcome. Only a success below the last level
    /// unlocks anything; the unlocked level never decreases.
    pub fn record_level_result(&mut self, level: u32, success: bool) {
        if success && level < MAX_LEVEL {
            self.unlocked = self.unlocked.max(level + 1);
        }
    }
}
