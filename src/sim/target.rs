//! A single moving target
//!
//! At most one target is alive at a time; the spawn controller owns
//! the active slot. The `alive` flag is the one-shot resolution guard
//! shared by the hit path and the escape check.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::AlreadyResolved;
use crate::consts::ESCAPE_X;

/// Palette a spawned target draws its color from. Carried on spawn
/// and hit events for the host's explosion/flash visuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetColor {
    Red,
    Blue,
    Green,
    Yellow,
    Magenta,
    Cyan,
}

impl TargetColor {
    pub const ALL: [TargetColor; 6] = [
        TargetColor::Red,
        TargetColor::Blue,
        TargetColor::Green,
        TargetColor::Yellow,
        TargetColor::Magenta,
        TargetColor::Cyan,
    ];
}

/// Why a target's life ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveReason {
    Hit,
    Escaped,
}

/// A moving target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec3,
    /// Direction of travel, used directly as a velocity basis
    pub dir: Vec3,
    pub speed: f32,
    pub scale: f32,
    pub color: TargetColor,
    alive: bool,
}

impl Target {
    pub fn new(id: u32, pos: Vec3, dir: Vec3, speed: f32, scale: f32, color: TargetColor) -> Self {
        Self {
            id,
            pos,
            dir,
            speed,
            scale,
            color,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Advance position by one frame tick.
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
    }

    /// True once the target has crossed the horizontal play bound.
    pub fn escaped(&self) -> bool {
        self.pos.x.abs() > ESCAPE_X
    }

    /// Flip the alive flag exactly once. A second resolution attempt
    /// (hit racing an escape in the same frame) fails and must be
    /// ignored by the caller.
    pub fn resolve(&mut self) -> Result<(), AlreadyResolved> {
        if !self.alive {
            return Err(AlreadyResolved);
        }
        self.alive = false;
        Ok(())
    }
}
