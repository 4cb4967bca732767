//! Spawn gates
//!
//! Two independent timers decide when new enemies and power-ups enter from
//! above the top edge. Both compare against the simulation clock, so a pause
//! (no ticks) never builds up a burst of spawns.

use rand::Rng;

use super::state::{Enemy, EnemyKind, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// Spawn one random enemy if the gate is open and the cap allows it
pub fn spawn_enemies(state: &mut GameState) -> Option<EnemyKind> {
    let now = state.time_ms;
    if now - state.timers.last_enemy_ms < state.config.enemies.spawn_interval_ms {
        return None;
    }
    if state.active_enemy_count() >= state.config.enemies.max_on_screen {
        return None;
    }

    state.timers.last_enemy_ms = now;

    let kind = EnemyKind::SPAWNABLE[state.rng.random_range(0..EnemyKind::SPAWNABLE.len())];
    let x = random_x(state, ENEMY_SPAWN_MARGIN);
    spawn_enemy(state, kind, x);
    Some(kind)
}

/// Place an enemy of `kind` just above the top edge at horizontal offset `x`
pub fn spawn_enemy(state: &mut GameState, kind: EnemyKind, x: f32) -> u32 {
    let id = state.next_entity_id();
    let enemy = Enemy::new(id, kind, x, &mut state.rng);
    log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, x);
    state.enemies.push(enemy);
    id
}

/// Spawn one random power-up every interval, regardless of how many exist
pub fn spawn_power_ups(state: &mut GameState) -> Option<PowerUpKind> {
    let now = state.time_ms;
    if now - state.timers.last_power_up_ms < state.config.power_ups.spawn_interval_ms {
        return None;
    }

    state.timers.last_power_up_ms = now;

    let kind = PowerUpKind::SPAWNABLE[state.rng.random_range(0..PowerUpKind::SPAWNABLE.len())];
    let x = random_x(state, POWER_UP_SPAWN_MARGIN);
    spawn_power_up(state, kind, x);
    Some(kind)
}

/// Place a power-up of `kind` just above the top edge at horizontal offset `x`
pub fn spawn_power_up(state: &mut GameState, kind: PowerUpKind, x: f32) -> u32 {
    let id = state.next_entity_id();
    let power_up = PowerUp::new(id, kind, x, state.config.power_ups.duration_ms);
    log::debug!("Spawned power-up {:?} #{}", kind, id);
    state.power_ups.push(power_up);
    id
}

/// Uniform x in `[margin, width - margin]`, collapsing to the centre on narrow fields
fn random_x(state: &mut GameState, margin: f32) -> f32 {
    let width = state.config.playfield.width;
    let (lo, hi) = (margin, width - margin);
    if lo < hi {
        state.rng.random_range(lo..=hi)
    } else {
        width / 2.0
    }
}
