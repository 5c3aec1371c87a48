//! Per-frame simulation step
//!
//! Called once per animation frame by an external driver with the wall-clock
//! milliseconds since the previous frame. Within a frame the order is fixed:
//! body, then obstacles, then scoring, then collision. Scoring therefore sees
//! this frame's positions.

use super::state::{GamePhase, GameState};

/// Inputs gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Generic "activate" gesture (key, tap, click)
    pub activate: bool,
    /// Generic "cancel/pause" gesture
    pub pause: bool,
    /// Demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Apply this frame's input, then advance the simulation
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32) {
    if input.pause {
        state.toggle_pause();
    }

    let activate = input.activate || (input.idle_mode && autopilot_wants_input(state));
    if activate {
        state.handle_input();
    }

    state.update(delta_ms);
}

impl GameState {
    /// Advance one frame
    ///
    /// Ambient time always advances; gameplay only while running.
    pub fn update(&mut self, delta_ms: f32) {
        self.ambient_ms += delta_ms;

        if self.phase != GamePhase::Running {
            return;
        }
        self.backdrop_offset += 1.0;

        self.body.integrate(delta_ms);
        self.stream.update(delta_ms, &mut self.rng);

        if let Some(marker) = self.stream.check_score(self.body.pos.x) {
            self.add_score(marker);
        }

        if self.stream.check_collision(&self.body.bounds()) || self.body.is_out_of_bounds() {
            self.end_run();
        }
    }
}

/// Demo autopilot: restart finished runs, jump when sinking below the target
///
/// The target sits a quarter gap below the center of the nearest obstacle
/// that still overlaps or lies ahead of the body, since a jump carries the
/// body well above where it was triggered.
fn autopilot_wants_input(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Idle | GamePhase::Over => true,
        GamePhase::Paused => false,
        GamePhase::Running => {
            let body = &state.body;
            if body.is_rising() {
                return false;
            }
            let body_left = body.bounds().min.x;
            let target = state
                .stream
                .obstacles
                .iter()
                .find(|o| o.x + o.width + o.cap_margin >= body_left)
                .map(|o| o.gap_center + o.gap_size / 4.0)
                .unwrap_or(state.config().canvas.height / 2.0);
            body.pos.y > target
        }
    }
}
