//! Flappy Cat - A side-scrolling gap-runner arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (body physics, obstacle stream, session state)
//! - `config`: Data-driven game tuning with fail-fast validation
//! - `highscores`: Single-value high score persistence

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::{BodyConfig, Canvas, ConfigError, GameConfig, StreamConfig};
pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore};

/// Game configuration constants
///
/// Physics values are per-frame deltas, not per-second rates. The simulation
/// applies them once per `tick` call regardless of the frame's `deltaTime`.
pub mod consts {
    /// Logical canvas size (renderers scale this to the display)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Body defaults
    pub const BODY_X_FRACTION: f32 = 0.25;
    pub const BODY_WIDTH: f32 = 55.0;
    pub const BODY_HEIGHT: f32 = 45.0;
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_IMPULSE: f32 = -9.0;
    pub const MAX_FALL_SPEED: f32 = 10.0;
    /// Hitbox inset on every side of the sprite box
    pub const HITBOX_PADDING: f32 = 8.0;

    /// Rotation targets (degrees)
    pub const RISING_TILT_DEG: f32 = -25.0;
    pub const FALLING_TILT_PER_SPEED: f32 = 3.0;
    pub const MAX_FALLING_TILT_DEG: f32 = 70.0;
    /// Fraction of the remaining rotation covered per frame
    pub const ROTATION_SMOOTHING: f32 = 0.1;
    pub const GLOW_DECAY: f32 = 0.95;

    /// Sprite sheet animation
    pub const SPRITE_FRAMES: u32 = 8;
    pub const FRAME_INTERVAL_MS: f32 = 100.0;

    /// Obstacle geometry
    pub const PIPE_WIDTH: f32 = 80.0;
    /// End-cap overhang on each side of the pipe body
    pub const PIPE_CAP_MARGIN: f32 = 12.0;
    /// Spawn offset past the right edge of the canvas
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Gap centers stay this far from the top and bottom edges
    pub const GAP_EDGE_MARGIN: f32 = 100.0;
    pub const GLOW_PHASE_RATE: f32 = 0.003;
    pub const HUE_MIN: f32 = 260.0;
    pub const HUE_RANGE: f32 = 40.0;

    /// Stream defaults
    pub const SPAWN_INTERVAL_MS: f32 = 2200.0;
    pub const BASE_SPEED: f32 = 3.5;
    pub const MAX_SPEED: f32 = 4.5;
    pub const SPEED_PER_LEVEL: f32 = 0.15;
    pub const BASE_MIN_GAP: f32 = 160.0;
    pub const BASE_MAX_GAP: f32 = 200.0;
    pub const MIN_GAP_FLOOR: f32 = 130.0;
    pub const MAX_GAP_FLOOR: f32 = 145.0;
    pub const GAP_SHRINK_PER_LEVEL: f32 = 3.0;
    pub const START_DIFFICULTY: f32 = 1.0;
    pub const DIFFICULTY_STEP: f32 = 0.08;

    /// Score milestone that triggers a difficulty bump
    pub const MILESTONE_EVERY: u32 = 5;
}

/// Move `current` a fraction `t` of the way toward `target`
#[inline]
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t
}

/// Clamp `value` into `[lo, hi]` without panicking on inverted bounds
#[inline]
pub fn clamp_soft(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}
