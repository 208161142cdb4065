//! Mushroom Collector - a falling-item arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, difficulty, game state)
//! - `controller`: Human and learned-policy controllers driving the basket
//! - `session`: Fixed frame-rate loop wiring the sim to render/audio sinks
//! - `render` / `audio`: Headless sinks for the renderable and audible state
//! - `training`: Neuroevolution harness producing learned policies
//! - `settings`: Data-driven game tuning

pub mod audio;
pub mod controller;
pub mod error;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod training;

pub use error::{Error, Result};
pub use settings::Settings;

/// Rules of the game that are not tunable
pub mod consts {
    /// Collections per difficulty milestone
    pub const MILESTONE: u32 = 5;
    /// Poisonous catches that end the run
    pub const POISON_LIMIT: u32 = 5;
    /// Every Nth collection plays the collected cue
    pub const COLLECTED_CUE_EVERY: u32 = 5;

    /// Default screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 700.0;
    pub const SCREEN_HEIGHT: f32 = 550.0;
    pub const FPS: u32 = 60;

    /// Fall speed at the start of a run (pixels/s)
    pub const BASE_FALL_SPEED: f32 = 150.0;
    /// Added to the fall speed increment at every milestone
    pub const FALL_SPEED_STEP: u32 = 10;
    /// Starting value of the fall speed increment
    pub const INITIAL_FALL_SPEED_INCREMENT: u32 = 1;

    /// Basket defaults
    pub const COLLECTOR_WIDTH: f32 = 132.0;
    pub const COLLECTOR_HEIGHT: f32 = 120.0;
    pub const COLLECTOR_Y: f32 = 430.0;

    /// Mushroom sprite size
    pub const ITEM_WIDTH: f32 = 64.0;
    pub const ITEM_HEIGHT: f32 = 64.0;

    /// Horizontal basket speeds (pixels/s)
    pub const HUMAN_SPEED: f32 = 300.0;
    pub const POLICY_SPEED: f32 = 150.0;

    /// Time the game over screen stays up before the run ends
    pub const GAME_OVER_DELAY_SECS: f32 = 3.0;
}
