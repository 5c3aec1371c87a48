//! Axis-aligned collision boxes
//!
//! Everything in the playfield collides as rectangles: the body's inset
//! hitbox and the two cap-widened halves of each obstacle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box, `min` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Shrink by `padding` on every side
    pub fn inset(&self, padding: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(padding),
            size: self.size - Vec2::splat(padding * 2.0),
        }
    }

    /// Open-interval overlap on both axes; touching edges do not collide
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}
