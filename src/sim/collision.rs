//! Collision detection and response
//!
//! Every entity is treated as a circle whose diameter is its `size.x`, even
//! for non-square sprites: two bodies touch when their centres are closer
//! than the average of their widths. Four passes run in a fixed order and
//! each one finishes before the next starts.

use glam::Vec2;

use super::state::{
    ActivePowerUp, Body, EffectColor, EnemyKind, GameEvent, GameState, PowerUpKind,
};

/// Circle overlap using `size.x` as the collision diameter
#[inline]
pub fn bodies_overlap(a: &Body, b: &Body) -> bool {
    a.pos.distance(b.pos) < (a.size.x + b.size.x) / 2.0
}

/// Run all four collision passes
pub fn resolve_collisions(state: &mut GameState) {
    player_bullets_vs_enemies(state);
    enemy_bullets_vs_player(state);
    player_vs_enemies(state);
    player_vs_power_ups(state);
}

/// Player bullets damage every live enemy they overlap, then retire
fn player_bullets_vs_enemies(state: &mut GameState) {
    let mut explosions: Vec<(Vec2, EffectColor)> = Vec::new();
    let mut kills: Vec<(EnemyKind, u32)> = Vec::new();

    for bullet in state
        .bullets
        .iter_mut()
        .filter(|b| b.body.active && b.is_player_bullet())
    {
        let mut hit = false;
        for enemy in state
            .enemies
            .iter_mut()
            .filter(|e| e.body.active && bodies_overlap(&bullet.body, &e.body))
        {
            hit = true;
            enemy.health -= bullet.damage;
            explosions.push((enemy.body.pos, EffectColor::Orange));

            if enemy.health <= 0 {
                enemy.body.active = false;
                kills.push((enemy.kind, enemy.points));
                explosions.push((enemy.body.pos, EffectColor::Cyan));
            }
        }
        if hit {
            bullet.body.active = false;
        }
    }

    for (kind, points) in kills {
        state.score += points;
        log::debug!("Destroyed {:?} (+{}), score {}", kind, points, state.score);
        state.events.push(GameEvent::EnemyDestroyed { kind, points });
    }
    for (pos, color) in explosions {
        state.spawn_explosion(pos, color);
    }
}

/// Enemy bullets cost the player a life unless shielded
fn enemy_bullets_vs_player(state: &mut GameState) {
    let mut hits = 0;
    for bullet in state
        .bullets
        .iter_mut()
        .filter(|b| b.body.active && !b.is_player_bullet())
    {
        if bodies_overlap(&bullet.body, &state.player.body) {
            bullet.body.active = false;
            hits += 1;
        }
    }
    for _ in 0..hits {
        hit_player(state);
    }
}

/// Ramming an enemy destroys it (no score) and costs a life unless shielded
fn player_vs_enemies(state: &mut GameState) {
    let mut hits = 0;
    for enemy in state.enemies.iter_mut().filter(|e| e.body.active) {
        if bodies_overlap(&state.player.body, &enemy.body) {
            enemy.body.active = false;
            hits += 1;
        }
    }
    for _ in 0..hits {
        hit_player(state);
    }
}

fn player_vs_power_ups(state: &mut GameState) {
    let mut collected: Vec<(PowerUpKind, Vec2, f64)> = Vec::new();
    for power_up in state.power_ups.iter_mut().filter(|p| p.body.active) {
        if bodies_overlap(&state.player.body, &power_up.body) {
            power_up.body.active = false;
            collected.push((power_up.kind, power_up.body.pos, power_up.duration_ms));
        }
    }
    for (kind, pos, duration_ms) in collected {
        apply_power_up(state, kind, duration_ms);
        state.spawn_explosion(pos, EffectColor::Green);
    }
}

fn hit_player(state: &mut GameState) {
    let pos = state.player.body.pos;
    if state.player.has_power_up(PowerUpKind::Shield) {
        state.events.push(GameEvent::ShieldAbsorbed);
    } else {
        state.lose_life();
        log::debug!("Player hit, {} lives left", state.lives);
        state.events.push(GameEvent::PlayerHit);
    }
    state.spawn_explosion(pos, EffectColor::Red);
}

/// Apply a collected power-up's effect
///
/// Timed effects store an expiry on the player; collecting the same kind
/// again extends it instead of stacking.
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind, duration_ms: f64) {
    log::debug!("Collected {:?}", kind);
    state.events.push(GameEvent::PowerUpCollected(kind));

    if kind == PowerUpKind::Health {
        let player = &mut state.player;
        if state.lives < player.max_health {
            state.lives += 1;
            player.health = state.lives;
        }
        return;
    }

    if kind == PowerUpKind::RapidFire {
        state.player.fire_interval_ms = state.config.power_ups.rapid_fire_interval_ms;
    }

    let expires_at_ms = state.time_ms + duration_ms;
    let player = &mut state.player;
    match player.power_ups.iter_mut().find(|p| p.kind == kind) {
        Some(active) => active.expires_at_ms = expires_at_ms,
        None => player.power_ups.push(ActivePowerUp {
            kind,
            expires_at_ms,
        }),
    }
}

/// Drop effects whose time is up and undo their changes
pub fn expire_power_ups(state: &mut GameState) {
    let now = state.time_ms;
    let base_interval = state.config.player.fire_interval_ms;
    let player = &mut state.player;

    player.power_ups.retain(|p| {
        if now < p.expires_at_ms {
            return true;
        }
        log::debug!("{:?} expired", p.kind);
        false
    });

    if !player.has_power_up(PowerUpKind::RapidFire) {
        player.fire_interval_ms = base_interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::consts::*;
    use crate::sim::spawn::{spawn_enemy, spawn_power_up};
    use crate::sim::state::Bullet;

    fn state() -> GameState {
        GameState::new(EngineConfig::default(), 11)
    }

    fn enemy_at(state: &mut GameState, kind: EnemyKind, pos: Vec2) -> usize {
        spawn_enemy(state, kind, pos.x);
        let idx = state.enemies.len() - 1;
        state.enemies[idx].body.pos = pos;
        idx
    }

    fn player_bullet_at(state: &mut GameState, pos: Vec2) -> usize {
        let id = state.next_entity_id();
        state.bullets.push(Bullet::player(id, pos));
        state.bullets.len() - 1
    }

    #[test]
    fn test_overlap_uses_average_width() {
        let a = Body::new(1, Vec2::ZERO, Vec2::new(30.0, 30.0));
        // Tall but thin: only width counts
        let b = Body::new(2, Vec2::new(16.9, 0.0), Vec2::new(4.0, 100.0));
        assert!(bodies_overlap(&a, &b));

        let b = Body::new(2, Vec2::new(17.0, 0.0), Vec2::new(4.0, 100.0));
        assert!(!bodies_overlap(&a, &b), "touching exactly is not a hit");

        let b = Body::new(2, Vec2::new(0.0, 17.0), Vec2::new(4.0, 100.0));
        assert!(!bodies_overlap(&a, &b));
    }

    #[test]
    fn test_bullet_damages_without_killing() {
        let mut state = state();
        let e = enemy_at(&mut state, EnemyKind::Heavy, Vec2::new(200.0, 200.0));
        let b = player_bullet_at(&mut state, Vec2::new(200.0, 210.0));

        resolve_collisions(&mut state);
        assert!(!state.bullets[b].body.active);
        assert_eq!(state.enemies[e].health, 3);
        assert!(state.enemies[e].body.active);
        assert_eq!(state.score, 0);
        assert_eq!(state.particles.len(), EXPLOSION_PARTICLES);
        assert!(state.particles.iter().all(|p| p.color == EffectColor::Orange));
    }

    #[test]
    fn test_kill_scores_points() {
        for (kind, hits) in [
            (EnemyKind::Asteroid, 1),
            (EnemyKind::Scout, 2),
            (EnemyKind::Heavy, 4),
        ] {
            let mut state = state();
            let e = enemy_at(&mut state, kind, Vec2::new(300.0, 100.0));
            for _ in 0..hits {
                player_bullet_at(&mut state, Vec2::new(300.0, 100.0));
            }
            resolve_collisions(&mut state);

            assert_eq!(state.enemies[e].health, 0);
            assert!(!state.enemies[e].body.active);
            assert_eq!(state.score, kind.points());
            assert!(state.bullets.iter().all(|b| !b.body.active));
            assert_eq!(
                state.events,
                vec![GameEvent::EnemyDestroyed {
                    kind,
                    points: kind.points()
                }]
            );
        }
    }

    #[test]
    fn test_bullet_damages_every_overlapping_enemy() {
        let mut state = state();
        let heavy = enemy_at(&mut state, EnemyKind::Heavy, Vec2::new(100.0, 100.0));
        let scout = enemy_at(&mut state, EnemyKind::Scout, Vec2::new(105.0, 100.0));
        let b = player_bullet_at(&mut state, Vec2::new(102.0, 100.0));

        resolve_collisions(&mut state);
        assert!(!state.bullets[b].body.active);
        assert_eq!(state.enemies[heavy].health, 3);
        assert_eq!(state.enemies[scout].health, 1);
        assert_eq!(state.particles.len(), 2 * EXPLOSION_PARTICLES);
    }

    #[test]
    fn test_overlap_damage_ignores_enemy_order() {
        let outcome = |order: [(EnemyKind, Vec2); 2]| {
            let mut state = state();
            for (kind, pos) in order {
                enemy_at(&mut state, kind, pos);
            }
            player_bullet_at(&mut state, Vec2::new(102.0, 100.0));
            resolve_collisions(&mut state);
            let mut healths: Vec<(EnemyKind, i32)> =
                state.enemies.iter().map(|e| (e.kind, e.health)).collect();
            healths.sort_by_key(|&(kind, _)| kind as u8);
            healths
        };

        let heavy = (EnemyKind::Heavy, Vec2::new(100.0, 100.0));
        let scout = (EnemyKind::Scout, Vec2::new(105.0, 100.0));
        let forward = outcome([heavy, scout]);
        assert_eq!(forward, outcome([scout, heavy]));
        assert_eq!(forward, vec![(EnemyKind::Scout, 1), (EnemyKind::Heavy, 3)]);
    }

    #[test]
    fn test_killed_enemy_scores_once() {
        let mut state = state();
        let e = enemy_at(&mut state, EnemyKind::Asteroid, Vec2::new(100.0, 100.0));
        let first = player_bullet_at(&mut state, Vec2::new(100.0, 100.0));
        let second = player_bullet_at(&mut state, Vec2::new(100.0, 100.0));

        resolve_collisions(&mut state);
        assert!(!state.enemies[e].body.active);
        assert!(!state.bullets[first].body.active);
        assert!(state.bullets[second].body.active, "nothing left to hit");
        assert_eq!(state.score, EnemyKind::Asteroid.points());
    }

    #[test]
    fn test_dead_enemies_do_not_absorb_bullets() {
        let mut state = state();
        let e = enemy_at(&mut state, EnemyKind::Asteroid, Vec2::new(100.0, 100.0));
        state.enemies[e].body.active = false;
        let b = player_bullet_at(&mut state, Vec2::new(100.0, 100.0));

        resolve_collisions(&mut state);
        assert!(state.bullets[b].body.active);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_enemy_bullet_costs_life() {
        let mut state = state();
        let id = state.next_entity_id();
        let pos = state.player.body.pos;
        state.bullets.push(Bullet::enemy(id, pos));

        resolve_collisions(&mut state);
        assert_eq!(state.lives, 2);
        assert!(!state.bullets[0].body.active);
        assert_eq!(state.events, vec![GameEvent::PlayerHit]);
        assert!(state.particles.iter().all(|p| p.color == EffectColor::Red));
    }

    #[test]
    fn test_player_bullets_ignore_player() {
        let mut state = state();
        let pos = state.player.body.pos;
        player_bullet_at(&mut state, pos);
        resolve_collisions(&mut state);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_body_collision() {
        let mut state = state();
        let pos = state.player.body.pos;
        let e = enemy_at(&mut state, EnemyKind::Scout, pos + Vec2::new(20.0, 0.0));

        resolve_collisions(&mut state);
        assert!(!state.enemies[e].body.active);
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 0, "ramming awards nothing");
    }

    #[test]
    fn test_shield_absorbs_hits() {
        let mut state = state();
        apply_power_up(&mut state, PowerUpKind::Shield, POWER_UP_DURATION_MS);
        state.events.clear();

        let pos = state.player.body.pos;
        let e = enemy_at(&mut state, EnemyKind::Asteroid, pos);
        let id = state.next_entity_id();
        state.bullets.push(Bullet::enemy(id, pos));

        resolve_collisions(&mut state);
        assert_eq!(state.lives, 3);
        assert!(!state.enemies[e].body.active);
        assert_eq!(
            state.events,
            vec![GameEvent::ShieldAbsorbed, GameEvent::ShieldAbsorbed]
        );
    }

    #[test]
    fn test_collect_power_up() {
        let mut state = state();
        let pos = state.player.body.pos;
        spawn_power_up(&mut state, PowerUpKind::RapidFire, pos.x);
        state.power_ups[0].body.pos = pos;

        resolve_collisions(&mut state);
        assert!(!state.power_ups[0].body.active);
        assert_eq!(state.player.fire_interval_ms, RAPID_FIRE_INTERVAL_MS);
        assert!(state.player.has_power_up(PowerUpKind::RapidFire));
        assert_eq!(state.particles.len(), EXPLOSION_PARTICLES);
        assert!(state.particles.iter().all(|p| p.color == EffectColor::Green));
    }

    #[test]
    fn test_rapid_fire_expires() {
        let mut state = state();
        state.time_ms = 1000.0;
        apply_power_up(&mut state, PowerUpKind::RapidFire, 10_000.0);

        state.time_ms = 10_999.0;
        expire_power_ups(&mut state);
        assert_eq!(state.player.fire_interval_ms, RAPID_FIRE_INTERVAL_MS);

        state.time_ms = 11_000.0;
        expire_power_ups(&mut state);
        assert_eq!(state.player.fire_interval_ms, PLAYER_FIRE_INTERVAL_MS);
        assert!(state.player.power_ups.is_empty());
    }

    #[test]
    fn test_recollect_extends_instead_of_stacking() {
        let mut state = state();
        apply_power_up(&mut state, PowerUpKind::MultiShot, 10_000.0);
        state.time_ms = 5000.0;
        apply_power_up(&mut state, PowerUpKind::MultiShot, 10_000.0);
        assert_eq!(state.player.power_ups.len(), 1);
        assert_eq!(state.player.power_ups[0].expires_at_ms, 15_000.0);
    }

    #[test]
    fn test_health_restores_up_to_max() {
        let mut state = state();
        apply_power_up(&mut state, PowerUpKind::Health, 0.0);
        assert_eq!(state.lives, 3);

        state.lose_life();
        apply_power_up(&mut state, PowerUpKind::Health, 0.0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.player.health, 3);
        assert!(state.player.power_ups.is_empty());
    }
}
