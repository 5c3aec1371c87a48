//! Session state machine
//!
//! Owns the phase, score and high score plus the body and obstacle stream
//! for the current run. Collaborators read the public fields after each
//! frame and drain the event queue; they never mutate gameplay state except
//! through `handle_input` and `toggle_pause`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::events::{EventQueue, GameEvent};
use super::stream::ObstacleStream;
use crate::config::{ConfigError, GameConfig};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first input
    Idle,
    /// Active gameplay
    Running,
    /// Gameplay frozen; ambient animation keeps going
    Paused,
    /// Run ended, waiting for restart input
    Over,
}

/// One game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    /// Best score so far, loaded by the caller; updated on a new record
    pub high_score: u32,
    pub body: Body,
    pub stream: ObstacleStream,
    /// Time accumulated in every phase, for background animation
    pub ambient_ms: f32,
    /// Ground/backdrop scroll, advances only while running
    pub backdrop_offset: f32,
    config: GameConfig,
    pub(super) rng: Pcg32,
    events: EventQueue,
}

impl GameState {
    /// Validate `config` and build an idle session
    pub fn new(config: GameConfig, high_score: u32, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let body = Body::from_valid(&config.body, config.canvas);
        let stream = ObstacleStream::from_valid(&config.stream, config.canvas);
        Ok(Self {
            phase: GamePhase::Idle,
            score: 0,
            high_score,
            body,
            stream,
            ambient_ms: 0.0,
            backdrop_offset: 0.0,
            config,
            rng: Pcg32::seed_from_u64(seed),
            events: EventQueue::default(),
        })
    }

    /// Begin a fresh run, discarding the previous body and obstacles
    ///
    /// The first obstacle spawns immediately.
    pub fn start(&mut self) {
        self.score = 0;
        self.body = Body::from_valid(&self.config.body, self.config.canvas);
        self.stream = ObstacleStream::from_valid(&self.config.stream, self.config.canvas);
        self.stream.spawn(&mut self.rng);
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Run started (high score {})", self.high_score);
    }

    /// Running <-> Paused; ignored in any other phase
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
    }

    /// Single entry point for the generic "activate" gesture
    pub fn handle_input(&mut self) {
        match self.phase {
            GamePhase::Idle | GamePhase::Over => self.start(),
            GamePhase::Running => self.jump(),
            GamePhase::Paused => self.toggle_pause(),
        }
    }

    /// Jump if running; silently ignored otherwise
    pub fn jump(&mut self) {
        if self.phase == GamePhase::Running {
            let event = self.body.apply_jump_impulse();
            self.events.push(event);
        }
    }

    pub(crate) fn add_score(&mut self, marker: glam::Vec2) {
        self.score += 1;
        self.events.push(GameEvent::Scored {
            score: self.score,
            marker,
        });

        if self.score % self.config.milestone_every == 0 {
            self.stream.increase_difficulty();
            self.events.push(GameEvent::DifficultyIncreased {
                level: self.stream.difficulty,
                speed: self.stream.speed,
            });
        }
    }

    /// Enter Over after a collision or ground contact
    pub(crate) fn end_run(&mut self) {
        self.phase = GamePhase::Over;
        self.events.push(GameEvent::Hit { pos: self.body.pos });
        self.events.push(GameEvent::GameOver { score: self.score });

        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewRecord { score: self.score });
            log::info!("Game over: new record {}", self.score);
        } else {
            log::info!("Game over: score {} (best {})", self.score, self.high_score);
        }
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
