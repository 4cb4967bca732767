//! Configuration errors
//!
//! The only fallible surface of the engine is construction: every tick-time
//! operation is total over its inputs.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Playfield width or height is not a positive finite number
    InvalidPlayfield { width: f32, height: f32 },
    /// Enemy cap must allow at least one enemy
    ZeroEnemyCap,
    /// A time interval (ms) is zero, negative or not finite
    InvalidInterval { field: &'static str, value: f64 },
    /// A speed or multiplier is zero, negative or not finite
    InvalidSpeed { field: &'static str, value: f32 },
    /// Friction must lie in (0, 1]
    InvalidFriction { value: f32 },
    /// Starting lives must be at least one
    InvalidMaxHealth { value: i32 },
    /// Configuration JSON failed to parse
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlayfield { width, height } => {
                write!(f, "invalid playfield: {width}x{height} (both must be > 0)")
            }
            Self::ZeroEnemyCap => write!(f, "enemy cap must be at least 1"),
            Self::InvalidInterval { field, value } => {
                write!(f, "invalid interval for {field}: {value} ms (must be > 0)")
            }
            Self::InvalidSpeed { field, value } => {
                write!(f, "invalid value for {field}: {value} (must be > 0)")
            }
            Self::InvalidFriction { value } => {
                write!(f, "invalid friction: {value} (allowed (0, 1])")
            }
            Self::InvalidMaxHealth { value } => {
                write!(f, "invalid max health: {value} (must be >= 1)")
            }
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
