//! Item placement when a mushroom (re-)enters play

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind};

/// Picks a random column just above the screen.
///
/// All randomness in a run flows through this one seeded generator, so a
/// fixed seed plus a fixed input sequence replays identically.
#[derive(Debug, Clone)]
pub struct SpawnPolicy {
    rng: Pcg32,
}

impl SpawnPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Top-left position for an item entering play.
    ///
    /// `x` is uniform over `[0, screen_width - item_width]`, `y` hides the
    /// item just above the visible area. Items wider than the screen are
    /// pinned to `x = 0`.
    pub fn spawn(
        &mut self,
        _kind: EntityKind,
        screen_width: f32,
        item_width: f32,
        item_height: f32,
    ) -> Vec2 {
        let max_x = (screen_width - item_width).max(0.0);
        let x = self.rng.random_range(0.0..=max_x);
        Vec2::new(x, -item_height)
    }

    /// Move an existing item back to the top
    pub fn respawn(&mut self, item: &mut Entity, screen_width: f32) {
        let size = item.bounds.size;
        item.bounds.pos = self.spawn(item.kind, screen_width, size.x, size.y);
    }
}
