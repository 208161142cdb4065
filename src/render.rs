//! Renderable snapshot of a run
//!
//! Drawing is left to whoever implements [`RenderSink`]. The crate ships a
//! headless [`LogRenderer`] that writes the HUD line to the log.

use crate::sim::{EntityKind, GameState, GameStatus, Rect};

/// Message shown once the run ends
pub const GAME_OVER_MESSAGE: &str = "Game Over";

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub tick: u64,
    pub collector: Rect,
    pub items: Vec<(Rect, EntityKind)>,
    pub collected_count: u32,
    pub poisonous_count: u32,
    pub status: GameStatus,
    /// Centered terminal message, if any
    pub message: Option<&'static str>,
}

impl RenderFrame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            collector: state.collector.bounds,
            items: state.items.iter().map(|i| (i.bounds, i.kind)).collect(),
            collected_count: state.collected_count,
            poisonous_count: state.poisonous_count,
            status: state.status,
            message: (state.status == GameStatus::GameOver).then_some(GAME_OVER_MESSAGE),
        }
    }

    /// Score line drawn in the top-right corner
    pub fn hud_text(&self) -> String {
        format!(
            "Count: {} Poisonous: {}",
            self.collected_count, self.poisonous_count
        )
    }
}

/// Consumer of one frame per tick
pub trait RenderSink {
    fn render(&mut self, frame: &RenderFrame);
}

/// Headless renderer: logs the HUD every `interval` frames
#[derive(Debug, Clone)]
pub struct LogRenderer {
    interval: u64,
    frames: u64,
    announced_game_over: bool,
    last_hud: String,
}

impl LogRenderer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
            announced_game_over: false,
            last_hud: String::new(),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_hud(&self) -> &str {
        &self.last_hud
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl RenderSink for LogRenderer {
    fn render(&mut self, frame: &RenderFrame) {
        self.frames += 1;
        self.last_hud = frame.hud_text();

        if let Some(message) = frame.message {
            if !self.announced_game_over {
                log::info!("{message} - {}", self.last_hud);
                self.announced_game_over = true;
            }
            return;
        }

        if self.frames % self.interval == 0 {
            log::debug!("[tick {}] {}", frame.tick, self.last_hud);
        }
    }
}
