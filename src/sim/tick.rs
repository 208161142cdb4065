//! Fixed timestep simulation tick
//!
//! Core game loop step shared by keyboard play and policy training.

use super::collision::resolve;
use super::state::{GameState, GameStatus};
use crate::controller::{Controller, Observation};

/// Advance the game state by one fixed timestep.
///
/// Order within a tick: controller decision, basket move, mushrooms fall,
/// collisions, status check. Caught and missed mushrooms are respawned in
/// the same tick. Nothing happens once the run is over.
pub fn tick(state: &mut GameState, controller: &mut dyn Controller, dt: f32) {
    if state.status == GameStatus::GameOver {
        return;
    }

    state.time_ticks += 1;

    // Basket first so collisions see this tick's decision
    let observation = Observation::capture(state);
    let decision = controller.decide(&observation);
    state.move_collector(decision.direction() * controller.speed() * dt);

    let fall = state.fall_speed() * dt;
    for item in &mut state.items {
        item.bounds.pos.y += fall;
    }

    // Items never collide with each other, so each is resolved on its own
    let basket = state.collector.bounds;
    for index in 0..state.items.len() {
        let item = state.items[index];
        if let Some(effect) = resolve(&basket, &item) {
            state.apply_effect(effect);
            state.respawn_item(index);
        } else if item.bounds.top() > state.arena.height {
            // Missed mushrooms come back without penalty
            state.missed_count += 1;
            log::debug!("{:?} {} missed, respawning", item.kind, item.id);
            state.respawn_item(index);
        }
    }

    state.update_status();
}
