//! Flappy Cat entry point
//!
//! Headless native driver: runs the simulation in demo mode at a fixed
//! 60 Hz frame time, logs gameplay events, and persists new records.
//!
//! Usage: `flappy-cat [config.json]`. The high score file defaults to
//! `flappy_cat_highscore.json` and can be moved with `FLAPPY_CAT_HIGHSCORE`.

use flappy_cat::config::GameConfig;
use flappy_cat::highscores::{HighScoreStore, JsonFileStore};
use flappy_cat::sim::{GameEvent, GameState, TickInput, tick};

/// Frame time handed to the simulation (ms)
const FRAME_MS: f32 = 1000.0 / 60.0;
/// One minute of frames
const MAX_FRAMES: u32 = 60 * 60;
const MAX_ROUNDS: u32 = 5;

fn main() {
    env_logger::init();
    log::info!("Flappy Cat (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Invalid config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let store_path = std::env::var("FLAPPY_CAT_HIGHSCORE")
        .unwrap_or_else(|_| JsonFileStore::DEFAULT_FILE.to_string());
    let mut store = JsonFileStore::new(store_path);

    let seed: u64 = rand::random();
    let mut state = match GameState::new(config, store.load(), seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start session: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Session created with seed: {}", seed);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut rounds = 0;
    for _ in 0..MAX_FRAMES {
        tick(&mut state, &input, FRAME_MS);

        for event in state.drain_events() {
            match event {
                GameEvent::Started => {
                    rounds += 1;
                    log::info!("Round {} started", rounds);
                }
                GameEvent::Jump { .. } => log::trace!("Jump at y={:.1}", state.body.pos.y),
                GameEvent::Scored { score, .. } => log::debug!("Score: {}", score),
                GameEvent::DifficultyIncreased { level, speed } => {
                    log::debug!("Difficulty {:.2} (speed {:.2})", level, speed)
                }
                GameEvent::Hit { pos } => log::debug!("Hit at ({:.0}, {:.0})", pos.x, pos.y),
                GameEvent::GameOver { score } => log::info!("Round {} over: {}", rounds, score),
                GameEvent::NewRecord { score } => {
                    if let Err(e) = store.save(score) {
                        log::warn!("Could not save high score: {}", e);
                    }
                }
            }
        }

        if rounds >= MAX_ROUNDS && !state.is_running() {
            break;
        }
    }

    log::info!(
        "Demo finished after {} rounds, high score {}",
        rounds,
        state.high_score
    );
}
