//! Shot acceptance: cooldown gating against the game clock

use serde::{Deserialize, Serialize};

use crate::consts::SHOT_COOLDOWN;

/// Minimum-interval gate between accepted shots. Anchored to the
/// original shoot timestamp; the deferred hit/miss resolution never
/// re-checks or re-anchors it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cooldown {
    last_shot: f64,
    duration: f64,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self {
            last_shot: 0.0,
            duration: SHOT_COOLDOWN,
        }
    }
}

impl Cooldown {
    /// Accept or reject a shot at `now`. Accepting anchors the window
    /// to `now`; a rejected shot leaves it untouched.
    pub fn try_fire(&mut self, now: f64) -> bool {
        if now - self.last_shot < self.duration {
            return false;
        }
        self.last_shot = now;
        true
    }

    /// Re-anchor without firing. Level start arms the gate so the
    /// first shot cannot land before the first target is visible.
    pub fn reset(&mut self, now: f64) {
        self.last_shot = now;
    }
}
