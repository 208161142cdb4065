//! Game settings and tuning
//!
//! Loaded from a JSON file; any missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result, read_json};
use crate::sim::Arena;

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Ticks per second (one tick per frame)
    pub fps: u32,

    // === Difficulty ===
    /// Fall speed before any milestone (pixels/s)
    pub base_fall_speed: f32,
    /// Added to the increment each milestone
    pub fall_speed_step: u32,
    /// Increment value at the start of a run
    pub initial_fall_speed_increment: u32,

    // === Entities ===
    pub collector_width: f32,
    pub collector_height: f32,
    /// Top edge of the basket
    pub collector_y: f32,
    pub item_width: f32,
    pub item_height: f32,

    // === Controllers ===
    /// Basket speed under keyboard control (pixels/s)
    pub human_speed: f32,
    /// Basket speed under a learned policy (pixels/s)
    pub policy_speed: f32,

    // === Session ===
    /// Seconds the game over message stays up
    pub game_over_delay_secs: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: FPS,

            base_fall_speed: BASE_FALL_SPEED,
            fall_speed_step: FALL_SPEED_STEP,
            initial_fall_speed_increment: INITIAL_FALL_SPEED_INCREMENT,

            collector_width: COLLECTOR_WIDTH,
            collector_height: COLLECTOR_HEIGHT,
            collector_y: COLLECTOR_Y,
            item_width: ITEM_WIDTH,
            item_height: ITEM_HEIGHT,

            human_speed: HUMAN_SPEED,
            policy_speed: POLICY_SPEED,

            game_over_delay_secs: GAME_OVER_DELAY_SECS,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: &Path) -> Result<Self> {
        let settings: Self = read_json(path)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("collector_width", self.collector_width),
            ("collector_height", self.collector_height),
            ("item_width", self.item_width),
            ("item_height", self.item_height),
        ];
        for (name, value) in positive {
            // Infinite sizes would poison the spawn range
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if self.fps == 0 {
            return Err(Error::InvalidConfig("fps must be at least 1".into()));
        }
        if self.collector_width > self.screen_width {
            return Err(Error::InvalidConfig(format!(
                "collector_width {} exceeds screen_width {}",
                self.collector_width, self.screen_width
            )));
        }
        if self.base_fall_speed < 0.0 || self.human_speed < 0.0 || self.policy_speed < 0.0 {
            return Err(Error::InvalidConfig("speeds must not be negative".into()));
        }
        if self.game_over_delay_secs < 0.0 {
            return Err(Error::InvalidConfig("game_over_delay_secs must not be negative".into()));
        }
        Ok(())
    }

    /// Fixed timestep for one tick
    pub fn dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Number of frames the game over message is held
    pub fn game_over_delay_frames(&self) -> u32 {
        (self.game_over_delay_secs * self.fps as f32).round() as u32
    }

    pub fn arena(&self) -> Arena {
        Arena {
            width: self.screen_width,
            height: self.screen_height,
        }
    }
}
