//! End-of-tick bookkeeping: particle countdown, purging dead entities,
//! level tracking, the game-over check and full resets.

use super::state::{GameEvent, GameState};
use crate::level_for_score;

/// Move particles, count their life down and drop the expired ones
pub fn update_particles(state: &mut GameState) {
    state.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.life = p.life.saturating_sub(1);
        p.life > 0
    });
}

/// Drop inactive enemies, bullets and power-ups, keeping survivors in order
pub fn purge_inactive(state: &mut GameState) {
    state.enemies.retain(|e| e.body.active);
    state.bullets.retain(|b| b.body.active);
    state.power_ups.retain(|p| p.body.active);
}

/// Recompute the level from the score, raising an event when it goes up
pub fn update_level(state: &mut GameState) {
    let level = level_for_score(state.score);
    if level > state.level {
        log::info!("Level {} reached at score {}", level, state.score);
        state.events.push(GameEvent::LevelUp(level));
    }
    state.level = level;
}

/// Terminal check, raising `GameOver` when lives run out
///
/// Ticks stop once the run is over, so the event is raised exactly once.
pub fn check_game_over(state: &mut GameState) -> bool {
    let over = state.is_game_over();
    if over {
        log::info!("Game over with score {}", state.score);
        state.events.push(GameEvent::GameOver { score: state.score });
    }
    over
}

/// Replace the world with a fresh run using the same config and seed
pub fn reset(state: &mut GameState) {
    reseed(state, state.seed);
}

/// Replace the world with a fresh run on a new seed
pub fn reseed(state: &mut GameState, seed: u64) {
    *state = GameState::new(state.config, seed);
    log::info!("World reset (seed {})", seed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::consts::*;
    use crate::sim::spawn::{spawn_enemy, spawn_power_up};
    use crate::sim::state::{EffectColor, EnemyKind, PowerUpKind};
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(EngineConfig::default(), 5)
    }

    #[test]
    fn test_particles_fade_and_expire() {
        let mut state = state();
        state.spawn_explosion(Vec2::new(100.0, 100.0), EffectColor::Cyan);
        let start = state.particles[0].pos;
        let vel = state.particles[0].vel;

        update_particles(&mut state);
        assert_eq!(state.particles.len(), EXPLOSION_PARTICLES);
        assert_eq!(state.particles[0].pos, start + vel);
        assert_eq!(state.particles[0].life, PARTICLE_LIFE - 1);
        assert!((state.particles[0].alpha() - 29.0 / 30.0).abs() < 1e-6);

        for _ in 1..PARTICLE_LIFE {
            update_particles(&mut state);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_purge_keeps_survivor_order() {
        let mut state = state();
        let ids: Vec<u32> = (0..5)
            .map(|i| spawn_enemy(&mut state, EnemyKind::Asteroid, 50.0 + i as f32 * 60.0))
            .collect();
        state.enemies[1].body.active = false;
        state.enemies[3].body.active = false;
        spawn_power_up(&mut state, PowerUpKind::Shield, 100.0);
        state.power_ups[0].body.active = false;

        purge_inactive(&mut state);
        let remaining: Vec<u32> = state.enemies.iter().map(|e| e.body.id).collect();
        assert_eq!(remaining, vec![ids[0], ids[2], ids[4]]);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_level_tracks_score() {
        let mut state = state();
        state.score = 999;
        update_level(&mut state);
        assert_eq!(state.level, 1);
        assert!(state.events.is_empty());

        state.score = 2010;
        update_level(&mut state);
        assert_eq!(state.level, 3);
        assert_eq!(state.events, vec![GameEvent::LevelUp(3)]);
    }

    #[test]
    fn test_game_over_check() {
        let mut state = state();
        assert!(!check_game_over(&mut state));
        assert!(state.events.is_empty());

        state.score = 40;
        state.lives = 0;
        assert!(check_game_over(&mut state));
        assert_eq!(state.events, vec![GameEvent::GameOver { score: 40 }]);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = state();
        let fresh = GameState::new(state.config, state.seed);

        spawn_enemy(&mut state, EnemyKind::Heavy, 100.0);
        state.spawn_explosion(Vec2::ZERO, EffectColor::Red);
        state.score = 1234;
        state.level = 2;
        state.lives = -1;
        state.time_ms = 50_000.0;
        state.timers.last_enemy_ms = 49_000.0;
        state.player.body.pos.x = 30.0;

        reset(&mut state);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.enemies.is_empty() && state.particles.is_empty());
        assert_eq!(state.player, fresh.player);
        assert_eq!(state.timers, fresh.timers);
        assert_eq!(state.time_ms, 0.0);
    }

    #[test]
    fn test_reseed_changes_the_run() {
        let mut state = state();
        reseed(&mut state, 77);
        assert_eq!(state.seed, 77);
        assert_eq!(state.lives, 3);
        assert_eq!(state.time_ms, 0.0);

        let picks = |seed: u64| {
            let mut state = GameState::new(EngineConfig::default(), seed);
            (0..8)
                .map(|_| {
                    spawn_enemy(&mut state, EnemyKind::Asteroid, 100.0);
                    state.enemies.last().map(|e| e.speed.to_bits())
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(77), picks(77));
        assert_ne!(picks(77), picks(78));
    }
}
