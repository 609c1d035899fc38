//! Level catalog: immutable definitions for the three trainer levels

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::consts::MAX_LEVEL;

/// Weapon the host shows and sounds for a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    Pistol,
    Rifle,
    Shotgun,
}

/// Background music track for a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    Level1,
    Level2,
    Level3,
}

/// Static configuration for one level. Defined once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub id: u32,
    /// How many targets the level spawns in total
    pub target_count: u32,
    /// Uniform speed range for spawned targets (min, max)
    pub speed_range: (f32, f32),
    /// Target visual/collision scale
    pub scale: f32,
    /// Minimum hits/target_count percentage to pass the level
    pub accuracy_goal_percent: u32,
    pub weapon: Weapon,
    pub music: MusicTrack,
}

const LEVELS: [LevelDefinition; MAX_LEVEL as usize] = [
    LevelDefinition {
        id: 1,
        target_count: 10,
        speed_range: (10.0, 15.0),
        scale: 2.8,
        accuracy_goal_percent: 40,
        weapon: Weapon::Pistol,
        music: MusicTrack::Level1,
    },
    LevelDefinition {
        id: 2,
        target_count: 10,
        speed_range: (15.0, 22.0),
        scale: 2.0,
        accuracy_goal_percent: 70,
        weapon: Weapon::Rifle,
        music: MusicTrack::Level2,
    },
    LevelDefinition {
        id: 3,
        target_count: 10,
        speed_range: (20.0, 28.0),
        scale: 1.8,
        accuracy_goal_percent: 90,
        weapon: Weapon::Shotgun,
        music: MusicTrack::Level3,
    },
];

/// Look up the definition for a level id. Fails for ids outside 1..=3.
pub fn definition(level: u32) -> Result<&'static LevelDefinition, ConfigError> {
    if (1..=MAX_LEVEL).contains(&level) {
        Ok(&LEVELS[(level - 1) as usize])
    } else {
        Err(ConfigError { level })
    }
}
