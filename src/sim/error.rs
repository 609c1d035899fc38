//! Error types for the session core
//!
//! Cooldown violations and shots outside of active play are not
//! errors; they are dropped without touching any state.

use std::fmt;

/// Requested a level definition outside the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigError {
    pub level: u32,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no level definition for level {}", self.level)
    }
}

impl std::error::Error for ConfigError {}

/// Tried to select a level that is still locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotAllowed {
    pub level: u32,
    pub unlocked: u32,
}

impl fmt::Display for NotAllowed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level {} is locked (unlocked up to {})",
            self.level, self.unlocked
        )
    }
}

impl std::error::Error for NotAllowed {}

/// Tried to resolve a target that was already resolved this session.
/// Callers ignore it; only the first resolution counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyResolved;

impl fmt::Display for AlreadyResolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target already resolved")
    }
}

impl std::error::Error for AlreadyResolved {}

/// Rejections surfaced by the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    Config(ConfigError),
    NotAllowed(NotAllowed),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Config(e) => e.fmt(f),
            SessionError::NotAllowed(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        SessionError::Config(e)
    }
}

impl From<NotAllowed> for SessionError {
    fn from(e: NotAllowed) -> Self {
        SessionError::NotAllowed(e)
    }
}
