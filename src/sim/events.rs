//! Discrete gameplay events
//!
//! The session queues these during `tick`/`handle_input`; audio, particle and
//! persistence layers drain the queue after the frame and react. Nothing the
//! listeners do feeds back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began
    Started,
    /// Body jumped; `pos` is the underside of the sprite (particle origin)
    Jump { pos: Vec2 },
    /// An obstacle was cleared; `marker` is its right edge at gap height
    Scored { score: u32, marker: Vec2 },
    /// Difficulty stepped up on a score milestone
    DifficultyIncreased { level: f32, speed: f32 },
    /// Body struck an obstacle or the ground
    Hit { pos: Vec2 },
    /// Run ended with this score
    GameOver { score: u32 },
    /// Run beat the stored high score; persist `score`
    NewRecord { score: u32 },
}

/// Ordered per-frame event queue
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all queued events, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut queue = EventQueue::default();
        queue.push(GameEvent::Started);
        queue.push(GameEvent::GameOver { score: 3 });
        assert_eq!(queue.iter().count(), 2);

        let events = queue.drain();
        assert_eq!(events, vec![GameEvent::Started, GameEvent::GameOver { score: 3 }]);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
