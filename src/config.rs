//! Game tuning and configuration
//!
//! Loaded from JSON (file IO helper included). Every field has a default
//! matching the shipped tuning, so a config file only needs the values it
//! overrides. Validation happens once, up front; the simulation assumes a
//! validated config afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration rejected before a session or body is built
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("canvas must be positive and finite, got {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },
    #[error("canvas height {height} leaves no room for gap centers (needs > {needed})")]
    CanvasTooShort { height: f32, needed: f32 },
    #[error("body size must be positive, got {width}x{height}")]
    InvalidBodySize { width: f32, height: f32 },
    #[error("hitbox padding {padding} swallows a {width}x{height} body")]
    PaddingTooLarge { padding: f32, width: f32, height: f32 },
    #[error("body x fraction {0} must lie in (0, 1)")]
    BodyOutsideCanvas(f32),
    #[error("jump impulse {0} must be negative (upward)")]
    InvalidJumpImpulse(f32),
    #[error("gravity {gravity} and max fall speed {max_fall_speed} must be positive")]
    InvalidGravity { gravity: f32, max_fall_speed: f32 },
    #[error("gap bounds invalid: min {min} max {max} (floors {min_floor}/{max_floor})")]
    InvalidGap {
        min: f32,
        max: f32,
        min_floor: f32,
        max_floor: f32,
    },
    #[error("gap ceiling {max_gap} does not fit between edge margins of {edge_margin}")]
    GapExceedsBand { max_gap: f32, edge_margin: f32 },
    #[error("pipe width {width} and cap margin {cap_margin} must be positive")]
    InvalidPipe { width: f32, cap_margin: f32 },
    #[error("spawn interval must be positive, got {0} ms")]
    InvalidSpawnInterval(f32),
    #[error("speed curve invalid: base {base} max {max}")]
    InvalidSpeed { base: f32, max: f32 },
    #[error("difficulty step must be positive, got {0}")]
    InvalidDifficultyStep(f32),
    #[error("milestone interval must be at least 1")]
    InvalidMilestone,
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Logical drawing area in pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if !ok(self.width) || !ok(self.height) {
            return Err(ConfigError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Player body tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Horizontal position as a fraction of canvas width
    pub x_fraction: f32,
    pub width: f32,
    pub height: f32,
    /// Velocity added per frame
    pub gravity: f32,
    /// Velocity set (not added) on jump
    pub jump_impulse: f32,
    pub max_fall_speed: f32,
    pub hitbox_padding: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            x_fraction: BODY_X_FRACTION,
            width: BODY_WIDTH,
            height: BODY_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            max_fall_speed: MAX_FALL_SPEED,
            hitbox_padding: HITBOX_PADDING,
        }
    }
}

impl BodyConfig {
    pub fn validate(&self, canvas: Canvas) -> Result<(), ConfigError> {
        canvas.validate()?;
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::InvalidBodySize {
                width: self.width,
                height: self.height,
            });
        }
        if self.hitbox_padding < 0.0
            || self.hitbox_padding * 2.0 >= self.width
            || self.hitbox_padding * 2.0 >= self.height
        {
            return Err(ConfigError::PaddingTooLarge {
                padding: self.hitbox_padding,
                width: self.width,
                height: self.height,
            });
        }
        if !(self.x_fraction > 0.0 && self.x_fraction < 1.0) {
            return Err(ConfigError::BodyOutsideCanvas(self.x_fraction));
        }
        if !(self.jump_impulse < 0.0) {
            return Err(ConfigError::InvalidJumpImpulse(self.jump_impulse));
        }
        if !(self.gravity > 0.0 && self.max_fall_speed > 0.0) {
            return Err(ConfigError::InvalidGravity {
                gravity: self.gravity,
                max_fall_speed: self.max_fall_speed,
            });
        }
        Ok(())
    }
}

/// Obstacle stream and difficulty curve tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub pipe_width: f32,
    /// End-cap overhang on each side; part of the collision box
    pub cap_margin: f32,
    /// Distance past the right canvas edge where obstacles appear
    pub spawn_margin: f32,
    /// Gap centers are drawn from `[gap_edge_margin, height - gap_edge_margin]`
    pub gap_edge_margin: f32,
    pub spawn_interval_ms: f32,
    pub base_speed: f32,
    pub max_speed: f32,
    pub speed_per_level: f32,
    pub base_min_gap: f32,
    pub base_max_gap: f32,
    pub min_gap_floor: f32,
    pub max_gap_floor: f32,
    pub gap_shrink_per_level: f32,
    pub start_difficulty: f32,
    pub difficulty_step: f32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            pipe_width: PIPE_WIDTH,
            cap_margin: PIPE_CAP_MARGIN,
            spawn_margin: SPAWN_MARGIN,
            gap_edge_margin: GAP_EDGE_MARGIN,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            base_speed: BASE_SPEED,
            max_speed: MAX_SPEED,
            speed_per_level: SPEED_PER_LEVEL,
            base_min_gap: BASE_MIN_GAP,
            base_max_gap: BASE_MAX_GAP,
            min_gap_floor: MIN_GAP_FLOOR,
            max_gap_floor: MAX_GAP_FLOOR,
            gap_shrink_per_level: GAP_SHRINK_PER_LEVEL,
            start_difficulty: START_DIFFICULTY,
            difficulty_step: DIFFICULTY_STEP,
        }
    }
}

impl StreamConfig {
    pub fn validate(&self, canvas: Canvas) -> Result<(), ConfigError> {
        canvas.validate()?;
        let needed = self.gap_edge_margin * 2.0;
        if canvas.height <= needed {
            return Err(ConfigError::CanvasTooShort {
                height: canvas.height,
                needed,
            });
        }
        if !(self.pipe_width > 0.0 && self.cap_margin >= 0.0) {
            return Err(ConfigError::InvalidPipe {
                width: self.pipe_width,
                cap_margin: self.cap_margin,
            });
        }
        if !(self.spawn_interval_ms > 0.0) {
            return Err(ConfigError::InvalidSpawnInterval(self.spawn_interval_ms));
        }
        if !(self.base_speed > 0.0
            && self.max_speed >= self.base_speed
            && self.speed_per_level >= 0.0)
        {
            return Err(ConfigError::InvalidSpeed {
                base: self.base_speed,
                max: self.max_speed,
            });
        }
        let gap_ok = self.min_gap_floor > 0.0
            && self.base_min_gap >= self.min_gap_floor
            && self.base_max_gap >= self.base_min_gap
            && self.max_gap_floor >= self.min_gap_floor
            && self.base_max_gap >= self.max_gap_floor
            && self.base_max_gap < canvas.height
            && self.gap_shrink_per_level >= 0.0;
        if !gap_ok {
            return Err(ConfigError::InvalidGap {
                min: self.base_min_gap,
                max: self.base_max_gap,
                min_floor: self.min_gap_floor,
                max_floor: self.max_gap_floor,
            });
        }
        // Half the widest gap must fit inside the edge margin or a pipe goes negative
        if !(self.gap_edge_margin >= 0.0 && self.base_max_gap / 2.0 <= self.gap_edge_margin) {
            return Err(ConfigError::GapExceedsBand {
                max_gap: self.base_max_gap,
                edge_margin: self.gap_edge_margin,
            });
        }
        if !(self.difficulty_step > 0.0) {
            return Err(ConfigError::InvalidDifficultyStep(self.difficulty_step));
        }
        Ok(())
    }
}

/// Root game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: Canvas,
    pub body: BodyConfig,
    pub stream: StreamConfig,
    /// Every Nth point raises difficulty
    pub milestone_every: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            body: BodyConfig::default(),
            stream: StreamConfig::default(),
            milestone_every: MILESTONE_EVERY,
        }
    }
}

impl GameConfig {
    /// Parse config from JSON; omitted fields keep their defaults
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.canvas.validate()?;
        self.body.validate(self.canvas)?;
        self.stream.validate(self.canvas)?;
        if self.milestone_every == 0 {
            return Err(ConfigError::InvalidMilestone);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "canvas": { "width": 1024, "height": 600 },
            "stream": { "max_speed": 6.0 }
        }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.canvas.width, 1024.0);
        assert_eq!(config.stream.max_speed, 6.0);
        assert_eq!(config.stream.base_speed, BASE_SPEED);
        assert_eq!(config.body, BodyConfig::default());
        assert_eq!(config.milestone_every, MILESTONE_EVERY);
    }

    #[test]
    fn test_negative_canvas_rejected() {
        let mut config = GameConfig::default();
        config.canvas = Canvas::new(-800.0, 600.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn test_short_canvas_rejected() {
        let mut config = GameConfig::default();
        config.canvas.height = 200.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CanvasTooShort { .. })
        ));
    }

    #[test]
    fn test_inverted_gap_rejected() {
        let mut config = GameConfig::default();
        config.stream.base_max_gap = 150.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGap { .. })
        ));
    }

    #[test]
    fn test_gap_wider_than_band_rejected() {
        let mut config = GameConfig::default();
        config.stream.gap_edge_margin = 20.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapExceedsBand { .. })
        ));

        config.stream.gap_edge_margin = -5.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapExceedsBand { .. })
        ));
    }

    #[test]
    fn test_padding_larger_than_body_rejected() {
        let mut body = BodyConfig::default();
        body.hitbox_padding = 30.0;
        assert!(matches!(
            body.validate(Canvas::default()),
            Err(ConfigError::PaddingTooLarge { .. })
        ));
    }

    #[test]
    fn test_downward_jump_rejected() {
        let mut body = BodyConfig::default();
        body.jump_impulse = 9.0;
        assert!(body.validate(Canvas::default()).is_err());
    }

    #[test]
    fn test_zero_milestone_rejected() {
        let mut config = GameConfig::default();
        config.milestone_every = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMilestone)
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
