//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Simulation clock only (no wall-clock reads)
//! - Seeded RNG only
//! - Stable iteration order (insertion order, survivors keep it)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lifecycle;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{apply_power_up, bodies_overlap, resolve_collisions};
pub use motion::TickInput;
pub use state::{
    ActivePowerUp, Body, Bullet, BulletOwner, EffectColor, Enemy, EnemyKind, GameEvent,
    GameState, Particle, Player, PowerUp, PowerUpKind,
};
pub use tick::{clamp_delta, tick};
