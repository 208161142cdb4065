//! Fall speed escalation
//!
//! Speed is bucketed by completed milestones (every 5 collections), and the
//! per-milestone step itself grows at each milestone. Growth is therefore
//! steeper than linear in the number of collections:
//!
//! ```text
//! speed = base + increment * (collected / 5)
//! ```

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::Settings;
use crate::consts::{BASE_FALL_SPEED, FALL_SPEED_STEP, MILESTONE};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyController {
    /// Fall speed with zero milestones (pixels/s)
    pub base_speed: f32,
    /// Added to `fall_speed_increment` at every milestone
    pub step: u32,
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self {
            base_speed: BASE_FALL_SPEED,
            step: FALL_SPEED_STEP,
        }
    }
}

impl DifficultyController {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            base_speed: settings.base_fall_speed,
            step: settings.fall_speed_step,
        }
    }

    /// Current fall speed in pixels per second
    pub fn current_fall_speed(&self, state: &GameState) -> f32 {
        let milestones = state.collected_count / MILESTONE;
        // Float math: a large step must not overflow the integer counters
        self.base_speed + state.fall_speed_increment as f32 * milestones as f32
    }

    /// Bump the increment if the latest collection completed a milestone.
    ///
    /// Call once after each collection. Returns true when the increment grew.
    pub fn on_collected(&self, state: &mut GameState) -> bool {
        if state.collected_count == 0 || state.collected_count % MILESTONE != 0 {
            return false;
        }
        state.fall_speed_increment = state.fall_speed_increment.saturating_add(self.step);
        log::debug!(
            "Milestone at {} collected: increment {}, fall speed {}",
            state.collected_count,
            state.fall_speed_increment,
            self.current_fall_speed(state)
        );
        true
    }
}
