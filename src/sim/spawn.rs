//! Target spawn sequencing for the active level
//!
//! Owns the single active target slot and the spawned counter. Spawn
//! randomness comes from the session's seeded RNG so sequences replay
//! exactly under a fixed seed.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::levels::LevelDefinition;
use super::target::{Target, TargetColor};
use crate::consts::SPAWN_X;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnController {
    active: Option<Target>,
    targets_spawned: u32,
    targets_total: u32,
    next_id: u32,
}

impl SpawnController {
    /// Reset counters for a fresh level attempt. The caller spawns
    /// the first target immediately afterwards.
    pub fn start_level(&mut self, def: &LevelDefinition) {
        self.active = None;
        self.targets_spawned = 0;
        self.targets_total = def.target_count;
    }

    pub fn active(&self) -> Option<&Target> {
        self.active.as_ref()
    }

    pub fn targets_spawned(&self) -> u32 {
        self.targets_spawned
    }

    pub fn targets_total(&self) -> u32 {
        self.targets_total
    }

    /// True once every target for the level has been spawned.
    pub fn all_spawned(&self) -> bool {
        self.targets_spawned >= self.targets_total
    }

    /// Drop the live target on a state transition. Returns its id so
    /// the host can destroy the visual proxy.
    pub fn discard_active(&mut self) -> Option<u32> {
        self.active.take().map(|t| t.id)
    }

    /// Spawn the next target into the slot. Side, entry height, depth,
    /// lateral jitter, speed and color are all sampled from `rng`.
    pub fn spawn_next(&mut self, def: &LevelDefinition, rng: &mut Pcg32) -> Target {
        let side = if rng.random_bool(0.5) { 1.0f32 } else { -1.0 };
        let pos = Vec3::new(
            SPAWN_X * side,
            rng.random_range(-8.0..-2.0),
            rng.random_range(15.0..25.0),
        );
        // Opposite the spawn side, with small lateral and depth jitter
        let dir = Vec3::new(
            -side,
            rng.random_range(-0.2..0.2),
            rng.random_range(-0.1..0.1),
        );
        let speed = rng.random_range(def.speed_range.0..def.speed_range.1);
        let color = TargetColor::ALL[rng.random_range(0..TargetColor::ALL.len())];

        let id = self.next_id;
        self.next_id += 1;
        self.targets_spawned += 1;
        log::debug!(
            "spawn target {} ({}/{}) side={:+} speed={:.1}",
            id,
            self.targets_spawned,
            self.targets_total,
            side,
            speed
        );

        let target = Target::new(id, pos, dir, speed, def.scale, color);
        self.active = Some(target);
        target
    }

    /// Advance the live target by one frame tick and report an escape
    /// if it crossed the bound. The escaped target is resolved and
    /// removed from the slot.
    pub fn tick_motion(&mut self, dt: f32) -> Option<Target> {
        let target = self.active.as_mut()?;
        if !target.is_alive() {
            return None;
        }
        target.advance(dt);
        if target.escaped() && target.resolve().is_ok() {
            return self.active.take();
        }
        None
    }

    /// Resolve a shot against the aimed entity. Returns the downed
    /// target on a hit; `None` is a miss (no entity, wrong entity, or
    /// one already resolved by the escape check).
    pub fn resolve_hit(&mut self, aimed: Option<u32>) -> Option<Target> {
        let id = aimed?;
        let target = self.active.as_mut()?;
        if target.id != id {
            return None;
        }
        match target.resolve() {
            Ok(()) => self.active.take(),
            Err(_) => None,
        }
    }
}
