//! Game state and entity records
//!
//! Every entity embeds a [`Body`] by value and carries a closed kind tag.
//! All state that must survive a snapshot or replay lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::consts::*;
use crate::direction;

/// Physical fields shared by every collidable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    /// Centre position (origin top-left, y down)
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub size: Vec2,
    /// Radians, render only
    pub rotation: f32,
    /// Inactive bodies are logically dead and wait for the next cleanup pass
    pub active: bool,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size,
            rotation: 0.0,
            active: true,
        }
    }

    /// True once the body has fallen past the bottom edge by half its height
    pub fn below(&self, height: f32) -> bool {
        self.pos.y > height + self.size.y / 2.0
    }

    /// True once the body has risen past the top edge by half its height
    pub fn above(&self) -> bool {
        self.pos.y < -self.size.y / 2.0
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Shorter fire interval
    RapidFire,
    /// Three parallel bullets per shot
    MultiShot,
    /// Hits cost no life
    Shield,
    /// Restores one life (never spawned)
    Health,
}

impl PowerUpKind {
    /// Kinds the spawner picks from
    pub const SPAWNABLE: [PowerUpKind; 3] = [
        PowerUpKind::RapidFire,
        PowerUpKind::MultiShot,
        PowerUpKind::Shield,
    ];
}

/// A timed effect currently held by the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    /// Simulation time (ms) at which the effect ends
    pub expires_at_ms: f64,
}

/// The player's ship (one per run)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Mirrors the lives counter for display
    pub health: i32,
    pub max_health: i32,
    /// Current minimum time between shots (ms)
    pub fire_interval_ms: f64,
    /// `None` until the first shot of the run
    pub last_shot_ms: Option<f64>,
    pub power_ups: Vec<ActivePowerUp>,
}

impl Player {
    pub const ID: u32 = 0;

    pub fn new(config: &EngineConfig) -> Self {
        let pos = Self::spawn_position(config);
        Self {
            body: Body::new(Self::ID, pos, Vec2::splat(PLAYER_SIZE)),
            health: config.player.max_health,
            max_health: config.player.max_health,
            fire_interval_ms: config.player.fire_interval_ms,
            last_shot_ms: None,
            power_ups: Vec::new(),
        }
    }

    /// Centred horizontally, a fixed distance above the bottom edge
    pub fn spawn_position(config: &EngineConfig) -> Vec2 {
        Vec2::new(
            config.playfield.width / 2.0,
            config.playfield.height - PLAYER_BOTTOM_OFFSET,
        )
    }

    pub fn has_power_up(&self, kind: PowerUpKind) -> bool {
        self.power_ups.iter().any(|p| p.kind == kind)
    }

    /// Horizontal range the ship's centre may occupy
    pub fn x_bounds(&self, width: f32) -> (f32, f32) {
        let half = self.body.size.x / 2.0;
        (half, width - half)
    }
}

/// Enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Asteroid,
    Scout,
    Heavy,
    /// Never spawned
    Boss,
}

impl EnemyKind {
    /// Kinds the spawner picks from
    pub const SPAWNABLE: [EnemyKind; 3] = [EnemyKind::Asteroid, EnemyKind::Scout, EnemyKind::Heavy];

    pub fn health(self) -> i32 {
        match self {
            EnemyKind::Asteroid => 1,
            EnemyKind::Scout => 2,
            EnemyKind::Heavy => 4,
            EnemyKind::Boss => 20,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Asteroid => 10,
            EnemyKind::Scout => 25,
            EnemyKind::Heavy => 50,
            EnemyKind::Boss => 500,
        }
    }

    /// Square sprite edge length
    pub fn size(self) -> f32 {
        match self {
            EnemyKind::Asteroid => 30.0,
            EnemyKind::Scout => 35.0,
            EnemyKind::Heavy => 50.0,
            EnemyKind::Boss => 80.0,
        }
    }

    /// Descent speed range (px/tick), sampled uniformly at spawn
    pub fn speed_range(self) -> (f32, f32) {
        match self {
            EnemyKind::Asteroid => (2.0, 4.0),
            EnemyKind::Scout => (1.5, 2.5),
            EnemyKind::Heavy => (1.0, 1.0),
            EnemyKind::Boss => (0.5, 0.5),
        }
    }

    /// Spawn height, just above the top edge
    pub fn spawn_y(self) -> f32 {
        match self {
            EnemyKind::Asteroid => -30.0,
            EnemyKind::Scout => -40.0,
            EnemyKind::Heavy => -50.0,
            EnemyKind::Boss => -80.0,
        }
    }

    pub fn fires(self) -> bool {
        !matches!(self, EnemyKind::Asteroid)
    }
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub health: i32,
    /// Base descent speed before the global multiplier
    pub speed: f32,
    pub points: u32,
    /// `None` until this enemy first fires
    pub last_shot_ms: Option<f64>,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, x: f32, rng: &mut impl Rng) -> Self {
        let (lo, hi) = kind.speed_range();
        let speed = if lo < hi { rng.random_range(lo..hi) } else { lo };
        let mut body = Body::new(id, Vec2::new(x, kind.spawn_y()), Vec2::splat(kind.size()));
        if kind == EnemyKind::Asteroid {
            body.rotation = rng.random_range(0.0..std::f32::consts::TAU);
        }
        Self {
            body,
            kind,
            health: kind.health(),
            speed,
            points: kind.points(),
            last_shot_ms: None,
        }
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// Display colours shared by bullets and explosions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectColor {
    Cyan,
    Red,
    Orange,
    Green,
}

/// A bullet entity (moves vertically only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub owner: BulletOwner,
    pub damage: i32,
    pub color: EffectColor,
}

impl Bullet {
    /// Upward shot leaving the ship's nose
    pub fn player(id: u32, pos: Vec2) -> Self {
        let (w, h) = PLAYER_BULLET_SIZE;
        let mut body = Body::new(id, pos, Vec2::new(w, h));
        body.vel = Vec2::new(0.0, PLAYER_BULLET_SPEED);
        Self {
            body,
            owner: BulletOwner::Player,
            damage: BULLET_DAMAGE,
            color: EffectColor::Cyan,
        }
    }

    /// Downward shot leaving an enemy's underside
    pub fn enemy(id: u32, pos: Vec2) -> Self {
        let (w, h) = ENEMY_BULLET_SIZE;
        let mut body = Body::new(id, pos, Vec2::new(w, h));
        body.vel = Vec2::new(0.0, ENEMY_BULLET_SPEED);
        Self {
            body,
            owner: BulletOwner::Enemy,
            damage: BULLET_DAMAGE,
            color: EffectColor::Red,
        }
    }

    pub fn is_player_bullet(&self) -> bool {
        self.owner == BulletOwner::Player
    }
}

/// A falling, spinning power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    /// Effect duration once collected
    pub duration_ms: f64,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, x: f32, duration_ms: f64) -> Self {
        let mut body = Body::new(
            id,
            Vec2::new(x, POWER_UP_SPAWN_Y),
            Vec2::splat(POWER_UP_SIZE),
        );
        body.vel = Vec2::new(0.0, POWER_UP_FALL_SPEED);
        Self {
            body,
            kind,
            duration_ms,
        }
    }
}

/// A cosmetic explosion fragment (not collidable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
    pub color: EffectColor,
    pub size: f32,
}

impl Particle {
    /// Render opacity, fading linearly to zero
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player lost a life (bullet or body collision)
    PlayerHit,
    /// A collision was absorbed by the shield
    ShieldAbsorbed,
    /// An enemy slipped past the bottom edge
    EnemyEscaped(EnemyKind),
    EnemyDestroyed { kind: EnemyKind, points: u32 },
    PowerUpCollected(PowerUpKind),
    LevelUp(u32),
    GameOver { score: u32 },
}

/// Last trigger time of each spawn gate (simulation ms)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub last_enemy_ms: f64,
    pub last_power_up_ms: f64,
}

/// Complete world state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: EngineConfig,
    /// Run seed; reset reseeds from it
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation clock (ms), advanced by each tick's clamped delta
    pub time_ms: f64,
    pub time_ticks: u64,
    pub score: u32,
    pub level: u32,
    pub lives: i32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub timers: SpawnTimers,
    /// Events raised since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh world for a validated configuration
    pub fn new(config: EngineConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ms: 0.0,
            time_ticks: 0,
            score: 0,
            level: 1,
            lives: config.player.max_health,
            player: Player::new(&config),
            enemies: Vec::new(),
            bullets: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            timers: SpawnTimers::default(),
            events: Vec::new(),
            next_id: Player::ID + 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.lives <= 0
    }

    /// Take one life and keep the ship's display health in step
    pub fn lose_life(&mut self) {
        self.lives -= 1;
        self.player.health = self.lives.max(0);
    }

    pub fn active_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.body.active).count()
    }

    pub fn active_bullet_count(&self) -> usize {
        self.bullets.iter().filter(|b| b.body.active).count()
    }

    /// Emit a ring of particles at `pos`
    pub fn spawn_explosion(&mut self, pos: Vec2, color: EffectColor) {
        for i in 0..EXPLOSION_PARTICLES {
            let angle = i as f32 / EXPLOSION_PARTICLES as f32 * std::f32::consts::TAU;
            let speed: f32 = self.rng.random_range(2.0..5.0);
            let size: f32 = self.rng.random_range(3.0..6.0);
            self.particles.push(Particle {
                pos,
                vel: direction(angle) * speed,
                life: PARTICLE_LIFE,
                max_life: PARTICLE_LIFE,
                color,
                size,
            });
        }

        let cap = self.config.max_particles;
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            self.particles.drain(..excess);
        }
    }
}
