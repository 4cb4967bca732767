//! Input resolution and movement
//!
//! Positions advance by velocity once per tick. Frame delta only drives the
//! simulation clock, so motion is tied to tick rate like the classic game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bullet, EnemyKind, GameEvent, GameState, PowerUpKind};
use crate::consts::*;

/// Logical controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl TickInput {
    /// Map held keyboard codes (`ArrowLeft`/`KeyA`, `ArrowRight`/`KeyD`, `Space`)
    pub fn from_held_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut input = Self::default();
        for key in keys {
            match key {
                "ArrowLeft" | "KeyA" => input.left = true,
                "ArrowRight" | "KeyD" => input.right = true,
                "Space" => input.fire = true,
                _ => {}
            }
        }
        input
    }
}

/// Set the ship's horizontal velocity and fire if requested
pub fn apply_input(state: &mut GameState, input: &TickInput) {
    let speed = state.config.player.speed;
    let friction = state.config.friction;
    let vel = &mut state.player.body.vel;
    match (input.left, input.right) {
        (true, false) => vel.x = -speed,
        (false, true) => vel.x = speed,
        // Neither or both: coast
        _ => vel.x *= friction,
    }

    if input.fire {
        player_shoot(state);
    }
}

/// Fire from the ship's nose if the fire interval has elapsed
pub fn player_shoot(state: &mut GameState) -> bool {
    let now = state.time_ms;
    if let Some(last) = state.player.last_shot_ms {
        if now - last < state.player.fire_interval_ms {
            return false;
        }
    }
    state.player.last_shot_ms = Some(now);

    let body = &state.player.body;
    let nose = Vec2::new(body.pos.x, body.pos.y - body.size.y / 2.0);
    let offsets: &[f32] = if state.player.has_power_up(PowerUpKind::MultiShot) {
        &[-MULTI_SHOT_SPREAD, 0.0, MULTI_SHOT_SPREAD]
    } else {
        &[0.0]
    };
    for &dx in offsets {
        let id = state.next_entity_id();
        state.bullets.push(Bullet::player(id, nose + Vec2::new(dx, 0.0)));
    }
    true
}

/// Advance every active entity by one tick and retire anything off-screen
pub fn integrate(state: &mut GameState) {
    move_player(state);
    move_enemies(state);
    move_bullets(state);
    move_power_ups(state);
}

fn move_player(state: &mut GameState) {
    let width = state.config.playfield.width;
    let (min_x, max_x) = state.player.x_bounds(width);
    let body = &mut state.player.body;
    body.pos.x = (body.pos.x + body.vel.x).clamp(min_x, max_x);
}

fn move_enemies(state: &mut GameState) {
    let now = state.time_ms;
    let height = state.config.playfield.height;
    let multiplier = state.config.enemies.speed_multiplier;
    let fire_interval = state.config.enemies.fire_interval_ms;

    // Collected first: new bullets need fresh IDs from the state
    let mut muzzles: Vec<Vec2> = Vec::new();
    let mut escaped: Vec<EnemyKind> = Vec::new();

    for enemy in state.enemies.iter_mut().filter(|e| e.body.active) {
        enemy.body.pos.y += enemy.speed * multiplier;

        if enemy.kind.fires() {
            let ready = enemy
                .last_shot_ms
                .is_none_or(|last| now - last > fire_interval);
            if ready {
                muzzles.push(Vec2::new(
                    enemy.body.pos.x,
                    enemy.body.pos.y + enemy.body.size.y / 2.0,
                ));
                enemy.last_shot_ms = Some(now);
            }
        }

        if enemy.body.below(height) {
            enemy.body.active = false;
            escaped.push(enemy.kind);
        }
    }

    for pos in muzzles {
        let id = state.next_entity_id();
        state.bullets.push(Bullet::enemy(id, pos));
    }

    // Letting an enemy through costs the same as being hit
    for kind in escaped {
        log::debug!("{:?} escaped past the bottom edge", kind);
        state.lose_life();
        state.events.push(GameEvent::EnemyEscaped(kind));
    }
}

fn move_bullets(state: &mut GameState) {
    let height = state.config.playfield.height;
    for bullet in state.bullets.iter_mut().filter(|b| b.body.active) {
        bullet.body.pos.y += bullet.body.vel.y;
        if bullet.body.above() || bullet.body.below(height) {
            bullet.body.active = false;
        }
    }
}

fn move_power_ups(state: &mut GameState) {
    let height = state.config.playfield.height;
    for power_up in state.power_ups.iter_mut().filter(|p| p.body.active) {
        power_up.body.pos.y += power_up.body.vel.y;
        power_up.body.rotation += POWER_UP_SPIN;
        if power_up.body.below(height) {
            power_up.body.active = false;
        }
    }
}
