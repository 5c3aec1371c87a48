//! A single top/bottom pipe pair with a fixed gap

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::GLOW_PHASE_RATE;

/// Outcome of checking an obstacle against the body's x position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    /// Trailing edge has not crossed the body yet
    NotYetReached,
    /// Crossed on this check; score it
    JustPassed,
    /// Already scored on an earlier check
    AlreadyPassed,
}

/// Paired barrier scrolling right to left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge of the pipe body (cap overhangs this by `cap_margin`)
    pub x: f32,
    pub width: f32,
    pub cap_margin: f32,
    pub gap_center: f32,
    pub gap_size: f32,
    /// Height of the top pipe
    pub top_height: f32,
    /// y where the bottom pipe begins
    pub bottom_start: f32,
    pub bottom_height: f32,
    /// Render tint seed in degrees
    pub hue: f32,
    /// Pulsing glow phase (radians)
    pub glow_phase: f32,
    passed: bool,
}

impl Obstacle {
    pub fn new(
        x: f32,
        gap_center: f32,
        gap_size: f32,
        width: f32,
        cap_margin: f32,
        canvas_height: f32,
    ) -> Self {
        let top_height = gap_center - gap_size / 2.0;
        let bottom_start = gap_center + gap_size / 2.0;
        Self {
            x,
            width,
            cap_margin,
            gap_center,
            gap_size,
            top_height,
            bottom_start,
            bottom_height: canvas_height - bottom_start,
            hue: 0.0,
            glow_phase: 0.0,
            passed: false,
        }
    }

    /// Attach render seeds
    pub fn with_cosmetics(mut self, hue: f32, glow_phase: f32) -> Self {
        self.hue = hue;
        self.glow_phase = glow_phase;
        self
    }

    /// Scroll left by the stream's current `speed` (px/frame)
    ///
    /// Like gravity, speed is per-frame. `delta_ms` only drives the glow.
    pub fn advance(&mut self, speed: f32, delta_ms: f32) {
        self.x -= speed;
        self.glow_phase += delta_ms * GLOW_PHASE_RATE;
    }

    /// Top pipe collision box, widened to the end cap
    pub fn top_bounds(&self) -> Aabb {
        Aabb::new(self.cap_left(), 0.0, self.cap_width(), self.top_height)
    }

    /// Bottom pipe collision box, widened to the end cap
    pub fn bottom_bounds(&self) -> Aabb {
        Aabb::new(
            self.cap_left(),
            self.bottom_start,
            self.cap_width(),
            self.bottom_height,
        )
    }

    pub fn collides(&self, bounds: &Aabb) -> bool {
        bounds.intersects(&self.top_bounds()) || bounds.intersects(&self.bottom_bounds())
    }

    /// Right edge of the cap has left the screen
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width + self.cap_margin * 2.0 < 0.0
    }

    /// Flip to passed the first time the pipe's center x is left of `body_x`
    pub fn check_passed(&mut self, body_x: f32) -> PassState {
        if self.passed {
            PassState::AlreadyPassed
        } else if self.x + self.width / 2.0 < body_x {
            self.passed = true;
            PassState::JustPassed
        } else {
            PassState::NotYetReached
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Point for score particles: right edge at gap height
    pub fn score_marker(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.gap_center)
    }

    #[inline]
    fn cap_left(&self) -> f32 {
        self.x - self.cap_margin
    }

    #[inline]
    fn cap_width(&self) -> f32 {
        self.width + self.cap_margin * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(x: f32) -> Obstacle {
        Obstacle::new(x, 300.0, 160.0, 80.0, 12.0, 600.0)
    }

    #[test]
    fn test_derived_geometry() {
        let p = pipe(500.0);
        assert_eq!(p.top_height, 220.0);
        assert_eq!(p.bottom_start, 380.0);
        assert_eq!(p.bottom_height, 220.0);
        assert!(!p.passed());
    }

    #[test]
    fn test_bounds_include_cap() {
        let p = pipe(500.0);
        assert_eq!(p.top_bounds(), Aabb::new(488.0, 0.0, 104.0, 220.0));
        assert_eq!(p.bottom_bounds(), Aabb::new(488.0, 380.0, 104.0, 220.0));

        // Touches the cap overhang but not the pipe body
        let grazing = Aabb::new(480.0, 100.0, 10.0, 10.0);
        assert!(p.collides(&grazing));
    }

    #[test]
    fn test_body_in_gap_is_safe() {
        let p = pipe(180.0);
        // 39x29 hitbox centered on the gap
        let body = Aabb::from_center(Vec2::new(200.0, 300.0), Vec2::new(39.0, 29.0));
        assert!(!p.collides(&body));

        let high = Aabb::from_center(Vec2::new(200.0, 0.0), Vec2::new(39.0, 29.0));
        assert!(high.intersects(&p.top_bounds()));
        assert!(p.collides(&high));
    }

    #[test]
    fn test_advance_is_frame_coupled() {
        let mut a = pipe(500.0);
        let mut b = pipe(500.0);
        a.advance(3.5, 1.0);
        b.advance(3.5, 100.0);
        assert_eq!(a.x, 496.5);
        assert_eq!(a.x, b.x);
        assert!(b.glow_phase > a.glow_phase);
    }

    #[test]
    fn test_off_screen_uses_cap_edge() {
        let mut p = pipe(-100.0);
        assert!(!p.is_off_screen());
        p.x = -104.0;
        assert!(!p.is_off_screen());
        p.x = -104.5;
        assert!(p.is_off_screen());
    }

    #[test]
    fn test_check_passed_exactly_once() {
        let mut p = pipe(200.0);
        assert_eq!(p.check_passed(200.0), PassState::NotYetReached);

        p.x = 150.0;
        // center 190 < 200
        assert_eq!(p.check_passed(200.0), PassState::JustPassed);
        assert_eq!(p.check_passed(200.0), PassState::AlreadyPassed);
        p.x = -50.0;
        assert_eq!(p.check_passed(200.0), PassState::AlreadyPassed);
        assert!(p.passed());
    }

    #[test]
    fn test_score_marker() {
        let p = pipe(100.0);
        assert_eq!(p.score_marker(), Vec2::new(180.0, 300.0));
    }
}
