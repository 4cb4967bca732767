//! Per-frame simulation tick
//!
//! Runs the pipeline in a fixed order: effect expiry, input, motion,
//! spawning, particle decay, collisions, then cleanup and the terminal
//! check. Bursts raised by collisions are first aged on the next tick.

use super::collision::{expire_power_ups, resolve_collisions};
use super::lifecycle::{check_game_over, purge_inactive, update_level, update_particles};
use super::motion::{TickInput, apply_input, integrate};
use super::spawn::{spawn_enemies, spawn_power_ups};
use super::state::GameState;
use crate::consts::MAX_FRAME_MS;

/// Clamp a host frame delta (ms) into `[0, MAX_FRAME_MS]`; NaN counts as zero
pub fn clamp_delta(delta_ms: f64) -> f64 {
    if delta_ms.is_nan() || delta_ms <= 0.0 {
        0.0
    } else {
        delta_ms.min(MAX_FRAME_MS)
    }
}

/// Advance the world by one tick; returns whether the run is over
///
/// Once the run is over the world is frozen and further ticks are no-ops.
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f64) -> bool {
    if state.is_game_over() {
        return true;
    }

    let dt = clamp_delta(delta_ms);
    if dt != delta_ms {
        log::warn!("Frame delta {} ms clamped to {} ms", delta_ms, dt);
    }
    state.time_ms += dt;
    state.time_ticks += 1;

    expire_power_ups(state);
    apply_input(state, input);
    integrate(state);
    spawn_enemies(state);
    spawn_power_ups(state);
    update_particles(state);
    resolve_collisions(state);
    purge_inactive(state);
    update_level(state);
    check_game_over(state)
}
