//! Nova Defender headless host
//!
//! Runs a seeded, scripted run without a window: the ship sweeps across the
//! playfield firing continuously until it dies or the frame budget runs out.
//!
//! Usage: `nova-defender [config.json] [seed]`
//!
//! Without a seed each run is seeded from the system clock.

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use nova_defender::sim::GameEvent;
#[cfg(not(target_arch = "wasm32"))]
use nova_defender::{Engine, EngineConfig, HighScore, Session, TickInput};

/// Host frame length (ms), roughly 60 Hz
const FRAME_MS: f64 = 16.0;
/// Ten simulated minutes
const MAX_FRAMES: u32 = 60 * 60 * 10;
/// Frames spent travelling in one direction before turning around
const SWEEP_FRAMES: u32 = 90;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Nova Defender (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| EngineConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(err) => {
                log::error!("Failed to load config {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(clock_seed);

    let mut engine = match Engine::new(config, seed) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(HighScore::default());
    session.start(&mut engine, seed);

    let mut frame = 0;
    while frame < MAX_FRAMES {
        let going_left = (frame / SWEEP_FRAMES) % 2 == 0;
        let input = TickInput {
            left: going_left,
            right: !going_left,
            fire: true,
        };
        let report = session.frame(&mut engine, &input, FRAME_MS);

        for event in report.events {
            match event {
                GameEvent::LevelUp(level) => log::info!("Frame {}: level {}", frame, level),
                GameEvent::PlayerHit => log::info!("Frame {}: hit, {} lives left", frame, session.lives),
                other => log::trace!("Frame {}: {:?}", frame, other),
            }
        }

        frame += 1;
        if report.game_over {
            break;
        }
    }

    match serde_json::to_string(&engine.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Failed to encode snapshot: {}", err),
    }
    log::info!(
        "Run finished after {} frames: score {}, level {}, game over: {}",
        frame,
        session.score,
        session.level,
        session.is_game_over
    );
    ExitCode::SUCCESS
}

/// Fresh seed per run when none is given
#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0x5EED)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Engine` directly
}
