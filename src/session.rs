//! Host-level session state
//!
//! Tracks the coarse play/pause/game-over flags around an [`Engine`] and the
//! persisted high score. The engine never reads any of this.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::sim::{GameEvent, TickInput};

/// Best score across runs, persisted as JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
}

impl HighScore {
    /// Record a finished run's score; returns true if it set a new best
    pub fn submit(&mut self, score: u32) -> bool {
        if score > self.score {
            self.score = score;
            true
        } else {
            false
        }
    }

    /// Load from disk; a missing or unreadable file starts fresh
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScore>(&json) {
                Ok(high_score) => {
                    log::info!("Loaded high score {}", high_score.score);
                    high_score
                }
                Err(err) => {
                    log::warn!("Ignoring corrupt high score file {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        log::info!("High score saved ({})", self.score);
        Ok(())
    }
}

/// What one host frame produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// True on the frame the run ends
    pub game_over: bool,
    /// Events raised during the frame, drained from the engine
    pub events: Vec<GameEvent>,
}

/// Display-side game state owned by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_playing: bool,
    pub is_paused: bool,
    pub is_game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lives: i32,
    pub high_score: HighScore,
    /// Set when the last finished run beat the previous best
    pub new_high_score: bool,
}

impl Session {
    pub fn new(high_score: HighScore) -> Self {
        Self {
            level: 1,
            high_score,
            ..Self::default()
        }
    }

    /// Begin (or restart) a run on the given seed
    pub fn start(&mut self, engine: &mut Engine, seed: u64) {
        engine.restart(seed);
        self.is_playing = true;
        self.is_paused = false;
        self.is_game_over = false;
        self.new_high_score = false;
        self.sync(engine);
    }

    /// Restart is only offered once the previous run ended
    pub fn restart(&mut self, engine: &mut Engine, seed: u64) -> bool {
        if !self.is_game_over {
            return false;
        }
        self.start(engine, seed);
        true
    }

    pub fn toggle_pause(&mut self) {
        if self.is_playing {
            self.is_paused = !self.is_paused;
        }
    }

    /// Drive one host frame and hand back the events it raised
    ///
    /// While paused or not playing no tick is issued, so the engine's clock
    /// simply stops.
    pub fn frame(&mut self, engine: &mut Engine, input: &TickInput, delta_ms: f64) -> FrameReport {
        if !self.is_playing || self.is_paused {
            return FrameReport::default();
        }

        let game_over = engine.update(input, delta_ms);
        self.sync(engine);
        if game_over {
            self.is_playing = false;
            self.is_game_over = true;
            self.new_high_score = self.high_score.submit(self.score);
        }
        FrameReport {
            game_over,
            events: engine.drain_events(),
        }
    }

    fn sync(&mut self, engine: &Engine) {
        let snapshot = engine.snapshot();
        self.score = snapshot.score;
        self.level = snapshot.level;
        self.lives = snapshot.lives;
    }
}
