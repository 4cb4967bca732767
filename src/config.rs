//! Engine configuration
//!
//! Defaults reproduce the classic tuning. Hosts can override any field from
//! JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal speed while a direction key is held (px/tick)
    pub speed: f32,
    /// Minimum time between shots (ms)
    pub fire_interval_ms: f64,
    /// Lives at the start of a run
    pub max_health: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            fire_interval_ms: PLAYER_FIRE_INTERVAL_MS,
            max_health: PLAYER_MAX_HEALTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub spawn_interval_ms: f64,
    /// Spawning pauses while this many enemies are active
    pub max_on_screen: usize,
    /// Scales every enemy's descent speed
    pub speed_multiplier: f32,
    pub fire_interval_ms: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            max_on_screen: MAX_ENEMIES_ON_SCREEN,
            speed_multiplier: 1.0,
            fire_interval_ms: ENEMY_FIRE_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub spawn_interval_ms: f64,
    /// How long a collected effect lasts
    pub duration_ms: f64,
    /// Fire interval while RapidFire is active
    pub rapid_fire_interval_ms: f64,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: POWER_UP_SPAWN_INTERVAL_MS,
            duration_ms: POWER_UP_DURATION_MS,
            rapid_fire_interval_ms: RAPID_FIRE_INTERVAL_MS,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub playfield: PlayfieldConfig,
    pub player: PlayerConfig,
    pub enemies: EnemyConfig,
    pub power_ups: PowerUpConfig,
    /// Per-tick decay of the ship's horizontal velocity with no input
    pub friction: f32,
    /// Live particle cap; oldest particles are dropped first
    pub max_particles: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            playfield: PlayfieldConfig::default(),
            player: PlayerConfig::default(),
            enemies: EnemyConfig::default(),
            power_ups: PowerUpConfig::default(),
            friction: FRICTION,
            max_particles: MAX_PARTICLES,
        }
    }
}

fn check_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidInterval { field, value })
    }
}

fn check_speed(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpeed { field, value })
    }
}

impl EngineConfig {
    /// Default configuration with a custom playfield size
    pub fn with_playfield(width: f32, height: f32) -> Self {
        Self {
            playfield: PlayfieldConfig { width, height },
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let PlayfieldConfig { width, height } = self.playfield;
        // The ship must fit horizontally for the clamp range to be non-empty
        if !(width.is_finite() && height.is_finite())
            || width <= 0.0
            || height <= 0.0
            || width < PLAYER_SIZE
        {
            return Err(ConfigError::InvalidPlayfield { width, height });
        }
        if self.enemies.max_on_screen == 0 {
            return Err(ConfigError::ZeroEnemyCap);
        }
        if self.player.max_health < 1 {
            return Err(ConfigError::InvalidMaxHealth {
                value: self.player.max_health,
            });
        }
        if !(self.friction.is_finite() && self.friction > 0.0 && self.friction <= 1.0) {
            return Err(ConfigError::InvalidFriction {
                value: self.friction,
            });
        }

        check_speed("player.speed", self.player.speed)?;
        check_speed("enemies.speed_multiplier", self.enemies.speed_multiplier)?;
        check_interval("player.fire_interval_ms", self.player.fire_interval_ms)?;
        check_interval("enemies.spawn_interval_ms", self.enemies.spawn_interval_ms)?;
        check_interval("enemies.fire_interval_ms", self.enemies.fire_interval_ms)?;
        check_interval("power_ups.spawn_interval_ms", self.power_ups.spawn_interval_ms)?;
        check_interval("power_ups.duration_ms", self.power_ups.duration_ms)?;
        check_interval(
            "power_ups.rapid_fire_interval_ms",
            self.power_ups.rapid_fire_interval_ms,
        )?;
        Ok(())
    }
}
