//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Driven by an external `tick` per frame, no internal timing
//! - Seeded RNG only
//! - Obstacles kept in spawn order (= left to right)
//! - No rendering, audio or persistence dependencies; those react to events

pub mod body;
pub mod collision;
pub mod events;
pub mod obstacle;
pub mod state;
pub mod stream;
pub mod tick;

pub use body::{Body, target_rotation_for};
pub use collision::Aabb;
pub use events::{EventQueue, GameEvent};
pub use obstacle::{Obstacle, PassState};
pub use state::{GamePhase, GameState};
pub use stream::{ObstacleStream, max_gap_at, min_gap_at, speed_at};
pub use tick::{TickInput, tick};
