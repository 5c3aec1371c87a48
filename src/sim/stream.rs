//! Obstacle stream: timed spawning, scrolling, pruning and difficulty
//!
//! All live obstacles scroll at the stream's single shared `speed`. A
//! difficulty bump therefore speeds up pipes already on screen, not just
//! the ones spawned afterwards.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::obstacle::{Obstacle, PassState};
use crate::config::{Canvas, ConfigError, StreamConfig};
use crate::consts::{HUE_MIN, HUE_RANGE};

/// Scroll speed at a difficulty level, between base and max speed
pub fn speed_at(config: &StreamConfig, level: f32) -> f32 {
    crate::clamp_soft(
        config.base_speed + level * config.speed_per_level,
        config.base_speed,
        config.max_speed,
    )
}

/// Smallest gap at a difficulty level, never below its floor
pub fn min_gap_at(config: &StreamConfig, level: f32) -> f32 {
    crate::clamp_soft(
        config.base_min_gap - level * config.gap_shrink_per_level,
        config.min_gap_floor,
        config.base_min_gap,
    )
}

/// Largest gap at a difficulty level, never below its floor
pub fn max_gap_at(config: &StreamConfig, level: f32) -> f32 {
    crate::clamp_soft(
        config.base_max_gap - level * config.gap_shrink_per_level,
        config.max_gap_floor,
        config.base_max_gap,
    )
}

/// Spawns and owns the obstacles, in spawn (= left to right) order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleStream {
    pub obstacles: Vec<Obstacle>,
    pub spawn_timer_ms: f32,
    /// Shared scroll speed (px/frame) for every live obstacle
    pub speed: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    pub difficulty: f32,
    /// Obstacles spawned since the stream was created
    pub spawned: u32,
    config: StreamConfig,
    canvas: Canvas,
}

impl ObstacleStream {
    /// Validate `config` against `canvas` and build an empty stream
    pub fn new(config: &StreamConfig, canvas: Canvas) -> Result<Self, ConfigError> {
        config.validate(canvas)?;
        Ok(Self::from_valid(config, canvas))
    }

    /// Caller guarantees `config` passed validation against `canvas`
    pub(crate) fn from_valid(config: &StreamConfig, canvas: Canvas) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer_ms: 0.0,
            speed: config.base_speed,
            min_gap: config.base_min_gap,
            max_gap: config.base_max_gap,
            difficulty: config.start_difficulty,
            spawned: 0,
            config: config.clone(),
            canvas,
        }
    }

    /// Drop all obstacles and return to starting difficulty
    pub fn reset(&mut self) {
        *self = Self::from_valid(&self.config, self.canvas);
    }

    /// Append one obstacle just past the right edge
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let margin = self.config.gap_edge_margin;
        let gap_center = rng.random_range(margin..=self.canvas.height - margin);
        let gap_size = rng.random_range(self.min_gap..=self.max_gap);
        let hue = HUE_MIN + rng.random_range(0.0..HUE_RANGE);
        let glow_phase = rng.random_range(0.0..std::f32::consts::TAU);

        let obstacle = Obstacle::new(
            self.canvas.width + self.config.spawn_margin,
            gap_center,
            gap_size,
            self.config.pipe_width,
            self.config.cap_margin,
            self.canvas.height,
        )
        .with_cosmetics(hue, glow_phase);

        log::debug!(
            "Spawned obstacle: gap {:.0} at y={:.0}, speed {:.2}",
            gap_size,
            gap_center,
            self.speed
        );
        self.obstacles.push(obstacle);
        self.spawned += 1;
    }

    /// Spawn check, then advance all, then prune off-screen obstacles
    pub fn update<R: Rng>(&mut self, delta_ms: f32, rng: &mut R) {
        self.spawn_timer_ms += delta_ms;
        if self.spawn_timer_ms >= self.config.spawn_interval_ms {
            self.spawn_timer_ms = 0.0;
            self.spawn(rng);
        }

        let speed = self.speed;
        for obstacle in &mut self.obstacles {
            obstacle.advance(speed, delta_ms);
        }

        self.obstacles.retain(|o| !o.is_off_screen());
    }

    /// Step difficulty and recompute speed and gap bounds from it
    pub fn increase_difficulty(&mut self) {
        self.difficulty += self.config.difficulty_step;
        self.speed = speed_at(&self.config, self.difficulty);
        self.min_gap = min_gap_at(&self.config, self.difficulty);
        self.max_gap = max_gap_at(&self.config, self.difficulty);
        log::info!(
            "Difficulty {:.2}: speed {:.2}, gaps {:.0}-{:.0}",
            self.difficulty,
            self.speed,
            self.min_gap,
            self.max_gap
        );
    }

    pub fn check_collision(&self, body_bounds: &Aabb) -> bool {
        self.obstacles.iter().any(|o| o.collides(body_bounds))
    }

    /// Score at most one newly passed obstacle per call
    ///
    /// Returns the score marker of the obstacle that just passed. Any other
    /// obstacle crossing in the same frame is picked up on the next call.
    pub fn check_score(&mut self, body_x: f32) -> Option<Vec2> {
        self.obstacles
            .iter_mut()
            .find_map(|o| match o.check_passed(body_x) {
                PassState::JustPassed => Some(o.score_marker()),
                PassState::NotYetReached | PassState::AlreadyPassed => None,
            })
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
