//! Engine facade
//!
//! The only surface the host needs: `update` once per frame, `is_game_over`,
//! `reset`, a snapshot for the HUD and read-only views for the renderer.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::sim::lifecycle;
use crate::sim::{Bullet, Enemy, GameEvent, GameState, Particle, Player, PowerUp, TickInput, tick};

/// HUD data read by the host after each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub score: u32,
    pub level: u32,
    pub lives: i32,
    pub enemy_count: usize,
    pub bullet_count: usize,
}

/// Owns the world for a run
#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
}

impl Engine {
    /// Build an engine, rejecting configurations the simulation cannot run
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "Engine ready: {}x{} playfield, seed {}",
            config.playfield.width,
            config.playfield.height,
            seed
        );
        Ok(Self {
            state: GameState::new(config, seed),
        })
    }

    /// Run one tick with the given controls and frame delta (ms)
    ///
    /// Returns whether the run is over.
    pub fn update(&mut self, input: &TickInput, delta_ms: f64) -> bool {
        tick(&mut self.state, input, delta_ms)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Start a fresh run with the same configuration and seed
    pub fn reset(&mut self) {
        lifecycle::reset(&mut self.state);
    }

    /// Start a fresh run with the same configuration on a new seed
    pub fn restart(&mut self, seed: u64) {
        lifecycle::reseed(&mut self.state, seed);
    }

    pub fn seed(&self) -> u64 {
        self.state.seed
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            score: self.state.score,
            level: self.state.level,
            lives: self.state.lives,
            enemy_count: self.state.active_enemy_count(),
            bullet_count: self.state.active_bullet_count(),
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.state.config
    }

    /// Full world state (read-only)
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.state.enemies
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.state.bullets
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.state.power_ups
    }

    pub fn particles(&self) -> &[Particle] {
        &self.state.particles
    }
}
