//! Basket controllers
//!
//! A controller sees an [`Observation`] of the world once per tick and answers
//! with a [`Decision`]. The simulation does not care whether a keyboard or an
//! evolved network is on the other end.

pub mod human;
pub mod policy;

pub use human::{HeldKeys, HumanController, InputSource, ScriptedInput};
pub use policy::{FeedForwardNetwork, LearnedPolicy, PolicyFn};

use crate::sim::GameState;

/// Snapshot handed to a controller; lives for a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Left edge of the basket
    pub collector_x: f32,
    /// Left edge of the mushroom closest to the basket
    pub nearest_item_x: f32,
    /// Top edge of the mushroom closest to the basket
    pub nearest_item_y: f32,
    pub arena_width: f32,
    pub arena_height: f32,
}

impl Observation {
    /// Observe `state`; "nearest" compares rectangle centers.
    ///
    /// With no items in play the basket's own position stands in.
    pub fn capture(state: &GameState) -> Self {
        let basket = state.collector.bounds;
        let basket_center = basket.center();

        let nearest = state.items.iter().min_by(|a, b| {
            let da = a.bounds.center().distance_squared(basket_center);
            let db = b.bounds.center().distance_squared(basket_center);
            da.total_cmp(&db)
        });

        let (nearest_item_x, nearest_item_y) = match nearest {
            Some(item) => (item.bounds.pos.x, item.bounds.pos.y),
            None => (basket.pos.x, basket.pos.y),
        };

        Self {
            collector_x: basket.pos.x,
            nearest_item_x,
            nearest_item_y,
            arena_width: state.arena.width,
            arena_height: state.arena.height,
        }
    }

    /// Network inputs scaled by the screen size
    pub fn normalized(&self) -> [f32; 3] {
        [
            self.collector_x / self.arena_width,
            self.nearest_item_x / self.arena_width,
            self.nearest_item_y / self.arena_height,
        ]
    }
}

/// Horizontal movement for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    MoveLeft,
    MoveRight,
    Hold,
}

impl Decision {
    /// -1, +1 or 0
    pub fn direction(self) -> f32 {
        match self {
            Decision::MoveLeft => -1.0,
            Decision::MoveRight => 1.0,
            Decision::Hold => 0.0,
        }
    }
}

/// Anything that can steer the basket
pub trait Controller {
    fn decide(&mut self, observation: &Observation) -> Decision;

    /// Basket speed in pixels per second
    fn speed(&self) -> f32;
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn decide(&mut self, observation: &Observation) -> Decision {
        (**self).decide(observation)
    }

    fn speed(&self) -> f32 {
        (**self).speed()
    }
}
