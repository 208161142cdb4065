//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Effect, resolve};
pub use difficulty::DifficultyController;
pub use entity::{Arena, Entity, EntityKind, Rect};
pub use spawn::SpawnPolicy;
pub use state::{AudioCue, GameState, GameStatus, SINGLE_PLAYER_LAYOUT};
pub use tick::tick;
