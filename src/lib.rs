//! Aim Trainer - a target-shooting session core
//!
//! Core modules:
//! - `sim`: deterministic session simulation (levels, target spawning,
//!   shot resolution, scoring, progression, state machine)
//! - `settings`: host-facing audio/control preferences
//!
//! Rendering, audio playback, mouse capture and UI widgets live in the
//! host engine. The sim consumes a per-tick [`sim::TickInput`] plus
//! [`sim::SessionCommand`]s from menu buttons, and emits
//! [`sim::GameEvent`]s for the host to drain each frame.

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Minimum interval between accepted shots (seconds)
    pub const SHOT_COOLDOWN: f64 = 0.5;
    /// Delay between the weapon sound and hit/miss resolution, so the
    /// two sounds don't overlap (seconds)
    pub const SHOT_RESOLVE_DELAY: f64 = 0.05;
    /// Delay between a resolved target and the next spawn (seconds)
    pub const SPAWN_DELAY: f64 = 0.5;
    /// Delay between the last resolved target and level completion (seconds)
    pub const LEVEL_END_DELAY: f64 = 1.0;

    /// Targets enter at x = ±SPAWN_X
    pub const SPAWN_X: f32 = 22.0;
    /// A target past |x| > ESCAPE_X has escaped
    pub const ESCAPE_X: f32 = 24.0;

    /// Points awarded per downed target
    pub const POINTS_PER_HIT: u32 = 100;
    /// Highest selectable level
    pub const MAX_LEVEL: u32 = 3;
}
