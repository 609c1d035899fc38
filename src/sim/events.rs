//! Events emitted by the session for the host's renderer, audio and UI

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::levels::{MusicTrack, Weapon};
use super::target::TargetColor;

/// Fire-and-forget notifications drained by the host each frame.
/// No return value is expected from any of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Level started: enable the weapon, crosshair and stats UI, lock
    /// the pointer, switch to the level's music.
    LevelStart {
        level: u32,
        weapon: Weapon,
        music: MusicTrack,
    },
    /// Level finished: show the end-of-level summary and its buttons.
    LevelEnd {
        level: u32,
        accuracy_percent: u32,
        success: bool,
    },
    /// A target entered play: create its visual proxy.
    TargetSpawned {
        id: u32,
        position: Vec3,
        scale: f32,
        color: TargetColor,
    },
    /// A target left the play bounds: destroy its proxy.
    TargetEscaped { id: u32 },
    /// A live target was discarded by a state transition.
    TargetDespawned { id: u32 },
    /// A shot was accepted: weapon sound and recoil animation.
    ShotFired { weapon: Weapon },
    /// A shot connected: explosion/flash visuals and the hit sound.
    Hit {
        position: Vec3,
        color: TargetColor,
        scale: f32,
    },
    /// A shot resolved without a target: ricochet sound.
    Miss,
    /// Live stats text refresh.
    StatsUpdated {
        hits: u32,
        targets_total: u32,
        accuracy_percent: u32,
    },
    /// Unlock the pointer, mute the music.
    Paused,
    /// Relock the pointer, restore the music volume.
    Resumed,
}
