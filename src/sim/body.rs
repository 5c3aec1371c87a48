//! The player body: gravity, jump and sprite animation state
//!
//! Gravity and jump values are per-frame deltas. `integrate` adds gravity once
//! per call no matter how long the frame was; only the sprite animation
//! timer consumes `delta_ms`. Tuning constants assume this frame-coupled
//! integration, so it must not be rescaled by frame time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::events::GameEvent;
use crate::config::{BodyConfig, Canvas, ConfigError};
use crate::consts::*;
use crate::approach;

/// Player-controlled falling/jumping entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Sprite center; x never changes during flight
    pub pos: Vec2,
    /// Vertical velocity in px/frame (positive = downward)
    pub velocity: f32,
    pub size: Vec2,
    /// Current sprite rotation (radians), eased toward `target_rotation`
    pub rotation: f32,
    pub target_rotation: f32,
    /// Jump highlight, 1.0 right after a jump, decays each frame
    pub glow: f32,
    gravity: f32,
    jump_impulse: f32,
    max_fall_speed: f32,
    hitbox_padding: f32,
    canvas: Canvas,
    frame: u32,
    frame_timer_ms: f32,
    anim_time_ms: f32,
}

impl Body {
    /// Build a body at the vertical center of the canvas
    pub fn new(config: &BodyConfig, canvas: Canvas) -> Result<Self, ConfigError> {
        config.validate(canvas)?;
        Ok(Self::from_valid(config, canvas))
    }

    /// Caller guarantees `config` passed validation against `canvas`
    pub(crate) fn from_valid(config: &BodyConfig, canvas: Canvas) -> Self {
        Self {
            pos: Vec2::new(canvas.width * config.x_fraction, canvas.height / 2.0),
            velocity: 0.0,
            size: Vec2::new(config.width, config.height),
            rotation: 0.0,
            target_rotation: 0.0,
            glow: 0.0,
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
            max_fall_speed: config.max_fall_speed,
            hitbox_padding: config.hitbox_padding,
            canvas,
            frame: 0,
            frame_timer_ms: 0.0,
            anim_time_ms: 0.0,
        }
    }

    /// Back to the vertical center, at rest
    pub fn reset(&mut self) {
        self.pos.y = self.canvas.height / 2.0;
        self.velocity = 0.0;
        self.rotation = 0.0;
        self.target_rotation = 0.0;
        self.glow = 0.0;
        self.frame = 0;
        self.frame_timer_ms = 0.0;
    }

    /// Overwrite velocity with the jump impulse (not additive)
    ///
    /// Returns the jump event for the session to queue.
    pub fn apply_jump_impulse(&mut self) -> GameEvent {
        self.velocity = self.jump_impulse;
        self.glow = 1.0;
        GameEvent::Jump {
            pos: Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0),
        }
    }

    /// Advance one frame
    pub fn integrate(&mut self, delta_ms: f32) {
        self.velocity = (self.velocity + self.gravity).min(self.max_fall_speed);
        self.pos.y += self.velocity;

        self.target_rotation = target_rotation_for(self.velocity);
        self.rotation = approach(self.rotation, self.target_rotation, ROTATION_SMOOTHING);

        self.advance_animation(delta_ms);
        self.glow *= GLOW_DECAY;

        // May rise above the screen; cannot sink below the ground line
        self.pos.y = self.pos.y.clamp(-self.size.y, self.canvas.height);
    }

    fn advance_animation(&mut self, delta_ms: f32) {
        self.anim_time_ms += delta_ms;
        self.frame_timer_ms += delta_ms;
        let interval = if self.is_rising() {
            FRAME_INTERVAL_MS * 0.5
        } else {
            FRAME_INTERVAL_MS
        };
        if self.frame_timer_ms >= interval {
            self.frame_timer_ms = 0.0;
            self.frame = (self.frame + 1) % SPRITE_FRAMES;
        }
    }

    /// Hitbox: the sprite box inset by the fairness padding
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size).inset(self.hitbox_padding)
    }

    /// Ground contact only; flying above the top edge is allowed
    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.y + self.size.y / 2.0 > self.canvas.height
    }

    #[inline]
    pub fn is_rising(&self) -> bool {
        self.velocity < 0.0
    }

    /// Sprite sheet frame index in `0..SPRITE_FRAMES`
    #[inline]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Total animation time since the body was created
    #[inline]
    pub fn anim_time_ms(&self) -> f32 {
        self.anim_time_ms
    }

    #[inline]
    pub fn max_fall_speed(&self) -> f32 {
        self.max_fall_speed
    }

    #[inline]
    pub fn jump_impulse(&self) -> f32 {
        self.jump_impulse
    }
}

/// Fixed nose-up tilt while rising; nose-down proportional to fall speed
pub fn target_rotation_for(velocity: f32) -> f32 {
    if velocity < 0.0 {
        RISING_TILT_DEG.to_radians()
    } else {
        (velocity * FALLING_TILT_PER_SPEED)
            .min(MAX_FALLING_TILT_DEG)
            .to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn body() -> Body {
        Body::new(&BodyConfig::default(), Canvas::default()).unwrap()
    }

    #[test]
    fn test_new_body_centered_at_rest() {
        let b = body();
        assert_eq!(b.pos, Vec2::new(200.0, 300.0));
        assert_eq!(b.velocity, 0.0);
        assert_eq!(b.frame(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BodyConfig {
            width: -1.0,
            ..Default::default()
        };
        assert!(Body::new(&config, Canvas::default()).is_err());
        assert!(Body::new(&BodyConfig::default(), Canvas::new(0.0, 600.0)).is_err());
    }

    #[test]
    fn test_jump_overwrites_velocity() {
        let mut b = body();
        b.velocity = 8.0;
        let event = b.apply_jump_impulse();
        assert_eq!(b.velocity, b.jump_impulse());
        assert_eq!(b.jump_impulse(), -9.0);
        assert!(matches!(event, GameEvent::Jump { pos } if pos.y == 300.0 + 22.5));

        b.velocity = -3.0;
        b.apply_jump_impulse();
        assert_eq!(b.velocity, -9.0);
    }

    #[test]
    fn test_gravity_ignores_frame_time() {
        let mut fast = body();
        let mut slow = body();
        fast.integrate(1.0);
        slow.integrate(100.0);
        assert_eq!(fast.velocity, 0.5);
        assert_eq!(fast.velocity, slow.velocity);
        assert_eq!(fast.pos.y, slow.pos.y);
        assert_eq!(fast.pos.y, 300.5);
    }

    #[test]
    fn test_fall_speed_clamped() {
        let mut b = body();
        for _ in 0..100 {
            b.integrate(FRAME_MS);
            assert!(b.velocity <= MAX_FALL_SPEED);
        }
        assert_eq!(b.velocity, MAX_FALL_SPEED);
    }

    #[test]
    fn test_position_clamped_to_flight_area() {
        let mut b = body();
        b.pos.y = -500.0;
        b.velocity = -9.0;
        b.integrate(FRAME_MS);
        assert_eq!(b.pos.y, -45.0);

        b.pos.y = 2000.0;
        b.integrate(FRAME_MS);
        assert_eq!(b.pos.y, 600.0);
    }

    #[test]
    fn test_ground_only_death() {
        let mut b = body();
        b.pos.y = -45.0;
        assert!(!b.is_out_of_bounds());

        b.pos.y = 600.0 - 22.5;
        assert!(!b.is_out_of_bounds());
        b.pos.y = 600.0 - 22.0;
        assert!(b.is_out_of_bounds());
    }

    #[test]
    fn test_bounds_inset_by_padding() {
        let b = body();
        let hit = b.bounds();
        assert_eq!(hit.min, Vec2::new(200.0 - 27.5 + 8.0, 300.0 - 22.5 + 8.0));
        assert_eq!(hit.size, Vec2::new(39.0, 29.0));
    }

    #[test]
    fn test_rotation_targets() {
        assert_eq!(target_rotation_for(-1.0), (-25.0f32).to_radians());
        assert_eq!(target_rotation_for(5.0), 15.0f32.to_radians());
        assert_eq!(target_rotation_for(50.0), 70.0f32.to_radians());

        let mut b = body();
        b.apply_jump_impulse();
        b.integrate(FRAME_MS);
        assert!(b.rotation < 0.0);
        assert!(b.rotation > b.target_rotation);
    }

    #[test]
    fn test_animation_runs_faster_while_rising() {
        let mut b = body();
        b.integrate(60.0);
        assert_eq!(b.frame(), 0);
        b.integrate(60.0);
        assert_eq!(b.frame(), 1);

        let mut r = body();
        r.apply_jump_impulse();
        r.integrate(60.0);
        assert!(r.is_rising());
        assert_eq!(r.frame(), 1);
        assert_eq!(r.anim_time_ms(), 60.0);
    }

    #[test]
    fn test_reset_recenters() {
        let mut b = body();
        b.apply_jump_impulse();
        for _ in 0..10 {
            b.integrate(FRAME_MS);
        }
        b.reset();
        assert_eq!(b.pos.y, 300.0);
        assert_eq!(b.velocity, 0.0);
        assert_eq!(b.rotation, 0.0);
    }

    proptest! {
        #[test]
        fn prop_velocity_never_exceeds_max(
            steps in proptest::collection::vec((any::<bool>(), 0.0f32..100.0), 1..300)
        ) {
            let mut b = body();
            for (jump, dt) in steps {
                if jump {
                    b.apply_jump_impulse();
                }
                b.integrate(dt);
                prop_assert!(b.velocity <= b.max_fall_speed());
                prop_assert!(b.pos.y >= -b.size.y && b.pos.y <= 600.0);
            }
        }
    }
}
