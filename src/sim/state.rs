//! Game state and the Playing -> GameOver state machine
//!
//! One `GameState` is one run. It owns the basket, the fixed set of falling
//! mushrooms, the counters and the seeded spawner; nothing else mutates it
//! outside of a tick.

use serde::{Deserialize, Serialize};

use super::collision::Effect;
use super::difficulty::DifficultyController;
use super::entity::{Arena, Entity, EntityKind, Rect};
use super::spawn::SpawnPolicy;
use crate::Settings;
use crate::consts::{COLLECTED_CUE_EVERY, POISON_LIMIT};

/// Mushrooms falling in a single-player game: one of each kind
pub const SINGLE_PLAYER_LAYOUT: [EntityKind; 3] = [
    EntityKind::Beneficial,
    EntityKind::Poisonous,
    EntityKind::BeneficialAlt,
];

/// Run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Active gameplay
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Sound cues reported outward by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Every fifth mushroom collected
    Collected,
    /// Poisonous mushroom caught
    Warning,
    /// Fifth poisonous mushroom caught
    GameOver,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub arena: Arena,
    /// The basket
    pub collector: Entity,
    /// Falling mushrooms (fixed count for the whole run, sorted by id)
    pub items: Vec<Entity>,
    /// Good mushrooms caught
    pub collected_count: u32,
    /// Poisonous mushrooms caught
    pub poisonous_count: u32,
    /// Per-milestone fall speed step (only grows)
    pub fall_speed_increment: u32,
    pub status: GameStatus,
    /// Mushrooms that fell past the bottom edge (no penalty)
    pub missed_count: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub difficulty: DifficultyController,
    pub spawner: SpawnPolicy,
    /// Cues raised since the last drain
    cues: Vec<AudioCue>,
    next_id: u32,
}

impl GameState {
    /// New single-player run with three mushrooms
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self::with_layout(seed, settings, &SINGLE_PLAYER_LAYOUT)
    }

    /// New run with one falling item per entry of `kinds`
    pub fn with_layout(seed: u64, settings: &Settings, kinds: &[EntityKind]) -> Self {
        let arena = settings.arena();
        let collector = Entity {
            id: 0,
            kind: EntityKind::Collector,
            bounds: Rect::new(
                arena.width / 2.0 - settings.collector_width / 2.0,
                settings.collector_y,
                settings.collector_width,
                settings.collector_height,
            ),
        };

        let mut state = Self {
            seed,
            arena,
            collector,
            items: Vec::with_capacity(kinds.len()),
            collected_count: 0,
            poisonous_count: 0,
            fall_speed_increment: settings.initial_fall_speed_increment,
            status: GameStatus::Playing,
            missed_count: 0,
            time_ticks: 0,
            difficulty: DifficultyController::from_settings(settings),
            spawner: SpawnPolicy::new(seed),
            cues: Vec::new(),
            next_id: 1,
        };

        for &kind in kinds.iter().filter(|k| k.is_falling()) {
            let pos = state
                .spawner
                .spawn(kind, arena.width, settings.item_width, settings.item_height);
            let id = state.next_entity_id();
            state.items.push(Entity {
                id,
                kind,
                bounds: Rect::new(pos.x, pos.y, settings.item_width, settings.item_height),
            });
        }

        state
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Shift the basket horizontally, clamped to the screen
    pub fn move_collector(&mut self, dx: f32) {
        let max_x = (self.arena.width - self.collector.bounds.size.x).max(0.0);
        let bounds = &mut self.collector.bounds;
        bounds.pos.x = (bounds.pos.x + dx).clamp(0.0, max_x);
    }

    /// Send item `index` back above the screen
    pub fn respawn_item(&mut self, index: usize) {
        let width = self.arena.width;
        if let Some(item) = self.items.get_mut(index) {
            self.spawner.respawn(item, width);
        }
    }

    /// Apply a scoring effect and raise the matching cues
    pub fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Collected => {
                self.collected_count += 1;
                if self.collected_count % COLLECTED_CUE_EVERY == 0 {
                    self.cues.push(AudioCue::Collected);
                }
                let difficulty = self.difficulty;
                difficulty.on_collected(self);
            }
            Effect::Poisoned => {
                self.poisonous_count += 1;
                self.cues.push(AudioCue::Warning);
                if self.poisonous_count == POISON_LIMIT {
                    self.cues.push(AudioCue::GameOver);
                }
            }
        }
    }

    /// Playing -> GameOver once the poison limit is reached.
    ///
    /// Returns true on the tick the transition happens.
    pub fn update_status(&mut self) -> bool {
        if self.status == GameStatus::Playing && self.poisonous_count >= POISON_LIMIT {
            self.status = GameStatus::GameOver;
            log::info!(
                "Game over after {} ticks: collected {}, poisonous {}",
                self.time_ticks,
                self.collected_count,
                self.poisonous_count
            );
            return true;
        }
        false
    }

    /// Current fall speed (pixels/s)
    pub fn fall_speed(&self) -> f32 {
        self.difficulty.current_fall_speed(self)
    }

    /// Take the cues raised since the last call
    pub fn drain_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    /// Cues raised since the last drain, without consuming them
    pub fn pending_cues(&self) -> &[AudioCue] {
        &self.cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MILESTONE;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_layout() {
        let settings = Settings::default();
        let state = GameState::new(12345, &settings);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.collector.kind, EntityKind::Collector);
        assert_eq!(state.collector.bounds.pos.x, 700.0 / 2.0 - 66.0);
        assert_eq!(state.collector.bounds.pos.y, 430.0);
        for item in &state.items {
            assert_eq!(item.bounds.pos.y, -settings.item_height);
            assert!(item.bounds.pos.x >= 0.0);
            assert!(item.bounds.pos.x <= settings.screen_width - settings.item_width);
        }
        let kinds: Vec<_> = state.items.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, SINGLE_PLAYER_LAYOUT.to_vec());
    }

    #[test]
    fn test_layout_ignores_collector_kind() {
        let state = GameState::with_layout(
            1,
            &Settings::default(),
            &[EntityKind::Beneficial, EntityKind::Collector],
        );
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn test_collected_cue_every_fifth() {
        let mut state = GameState::new(1, &Settings::default());
        for _ in 0..4 {
            state.apply_effect(Effect::Collected);
        }
        assert!(state.drain_cues().is_empty());
        state.apply_effect(Effect::Collected);
        assert_eq!(state.drain_cues(), vec![AudioCue::Collected]);
    }

    #[test]
    fn test_poison_cues_and_game_over() {
        let mut state = GameState::new(1, &Settings::default());
        for i in 1..POISON_LIMIT {
            state.apply_effect(Effect::Poisoned);
            assert_eq!(state.drain_cues(), vec![AudioCue::Warning]);
            assert!(!state.update_status(), "poison {i} must not end the run");
        }
        state.apply_effect(Effect::Poisoned);
        assert_eq!(state.drain_cues(), vec![AudioCue::Warning, AudioCue::GameOver]);
        assert!(state.update_status());
        assert_eq!(state.status, GameStatus::GameOver);
        // Terminal: no second transition
        assert!(!state.update_status());
    }

    #[test]
    fn test_collector_clamped() {
        let mut state = GameState::new(1, &Settings::default());
        state.move_collector(-10_000.0);
        assert_eq!(state.collector.bounds.pos.x, 0.0);
        state.move_collector(10_000.0);
        assert_eq!(state.collector.bounds.pos.x, 700.0 - 132.0);
    }

    proptest! {
        #[test]
        fn increment_only_grows_at_milestones(
            effects in proptest::collection::vec(any::<bool>(), 0..80),
        ) {
            let mut state = GameState::new(3, &Settings::default());
            let mut previous = state.fall_speed_increment;
            for collected in effects {
                state.apply_effect(if collected { Effect::Collected } else { Effect::Poisoned });
                prop_assert!(state.fall_speed_increment >= previous);
                if state.fall_speed_increment != previous {
                    prop_assert!(collected);
                    prop_assert!(state.collected_count > 0);
                    prop_assert_eq!(state.collected_count % MILESTONE, 0);
                }
                previous = state.fall_speed_increment;
            }
        }

        #[test]
        fn collector_never_leaves_screen(
            moves in proptest::collection::vec(-2000.0f32..2000.0, 1..50),
        ) {
            let mut state = GameState::new(3, &Settings::default());
            for dx in moves {
                state.move_collector(dx);
                let bounds = state.collector.bounds;
                prop_assert!(bounds.left() >= 0.0);
                prop_assert!(bounds.right() <= state.arena.width);
            }
        }
    }
}
