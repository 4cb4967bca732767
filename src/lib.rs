//! Nova Defender - simulation core for a vertical arcade space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, motion, collisions, cleanup)
//! - `engine`: Facade the host drives once per frame
//! - `config`: Validated engine configuration
//! - `session`: Host-level play/pause/game-over flags and the high score

pub mod config;
pub mod engine;
pub mod error;
pub mod session;
pub mod sim;

pub use config::EngineConfig;
pub use engine::{Engine, GameSnapshot};
pub use error::ConfigError;
pub use session::{FrameReport, HighScore, Session};
pub use sim::{GameEvent, TickInput};

use glam::Vec2;

/// Game tuning constants
pub mod consts {
    /// Largest frame delta accepted by a tick (ms); longer frames are clamped
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Playfield defaults (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance of the ship's centre above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;
    pub const PLAYER_FIRE_INTERVAL_MS: f64 = 200.0;
    pub const PLAYER_MAX_HEALTH: i32 = 3;
    pub const FRICTION: f32 = 0.95;

    /// Bullets
    pub const PLAYER_BULLET_SPEED: f32 = -10.0;
    pub const PLAYER_BULLET_SIZE: (f32, f32) = (4.0, 12.0);
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;
    pub const ENEMY_BULLET_SIZE: (f32, f32) = (4.0, 8.0);
    pub const BULLET_DAMAGE: i32 = 1;
    /// Horizontal spacing of the side barrels during MultiShot
    pub const MULTI_SHOT_SPREAD: f32 = 12.0;

    /// Spawning
    pub const ENEMY_SPAWN_INTERVAL_MS: f64 = 1000.0;
    pub const MAX_ENEMIES_ON_SCREEN: usize = 8;
    pub const ENEMY_FIRE_INTERVAL_MS: f64 = 2000.0;
    pub const ENEMY_SPAWN_MARGIN: f32 = 20.0;
    pub const POWER_UP_SPAWN_INTERVAL_MS: f64 = 15000.0;
    pub const POWER_UP_SPAWN_MARGIN: f32 = 15.0;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_SPAWN_Y: f32 = -20.0;
    pub const POWER_UP_FALL_SPEED: f32 = 2.0;
    pub const POWER_UP_SPIN: f32 = 0.05;
    pub const POWER_UP_DURATION_MS: f64 = 10000.0;
    pub const RAPID_FIRE_INTERVAL_MS: f64 = 100.0;

    /// Explosions
    pub const EXPLOSION_PARTICLES: usize = 8;
    pub const PARTICLE_LIFE: u32 = 30;
    pub const MAX_PARTICLES: usize = 512;

    /// Points needed per level
    pub const POINTS_PER_LEVEL: u32 = 1000;
    /// Lives at the start of a run
    pub const STARTING_LIVES: i32 = 3;
}

/// Level for a score: one level per 1000 points, starting at 1
#[inline]
pub fn level_for_score(score: u32) -> u32 {
    score / consts::POINTS_PER_LEVEL + 1
}

/// Unit vector for an angle in radians (y grows downward)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
