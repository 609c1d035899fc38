//! Deterministic session simulation
//!
//! Everything gameplay-relevant lives here: the level catalog, the
//! active target, spawn sequencing, shot resolution, progression and
//! the session state machine. No rendering or audio code.

pub mod error;
pub mod events;
pub mod levels;
pub mod progress;
pub mod schedule;
pub mod session;
pub mod shot;
pub mod spawn;
pub mod target;

pub use error::{AlreadyResolved, ConfigError, NotAllowed, SessionError};
pub use events::GameEvent;
pub use levels::{LevelDefinition, MusicTrack, Weapon};
pub use progress::Progression;
pub use session::{Session, SessionCommand, SessionState, SessionStats, TickInput};
pub use spawn::SpawnController;
pub use target::{ResolveReason, Target, TargetColor};
