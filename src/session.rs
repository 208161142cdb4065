//! Fixed frame-rate session loop
//!
//! One frame is one tick: decide, simulate, hand cues to audio and a snapshot
//! to the renderer, then wait for the next frame boundary. A quit request is
//! honored between ticks while the run is live. After game over the final
//! frame is held for a fixed, non-interactive delay before the session ends.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::Settings;
use crate::audio::AudioSink;
use crate::controller::Controller;
use crate::render::{RenderFrame, RenderSink};
use crate::sim::{GameState, tick};

/// Cooperative quit flag, cheap to clone and share with an input thread
#[derive(Debug, Clone, Default)]
pub struct QuitSignal(Arc<AtomicBool>);

impl QuitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Loop parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Simulation timestep (seconds)
    pub dt: f32,
    /// Frames the game over screen is held before the session ends
    pub game_over_delay_frames: u32,
    /// Stop after this many frames even if the run is still going
    pub max_frames: Option<u64>,
    /// Sleep to real frame boundaries instead of running flat out
    pub realtime: bool,
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            dt: settings.dt(),
            game_over_delay_frames: settings.game_over_delay_frames(),
            max_frames: None,
            realtime: false,
        }
    }
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    GameOver,
    Quit,
    FrameLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub end: EndReason,
    pub frames: u64,
    pub ticks: u64,
    pub collected_count: u32,
    pub poisonous_count: u32,
    pub missed_count: u32,
}

/// Blocks until the next frame boundary
struct FrameLimiter {
    frame: Duration,
    next: Instant,
}

impl FrameLimiter {
    fn new(dt: f32) -> Self {
        Self {
            frame: Duration::from_secs_f32(dt),
            next: Instant::now(),
        }
    }

    fn wait(&mut self) {
        self.next += self.frame;
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
        } else {
            // Running behind; don't try to catch up
            self.next = now;
        }
    }
}

/// A single run driven frame by frame
pub struct Session {
    state: GameState,
    config: SessionConfig,
    quit: QuitSignal,
}

impl Session {
    pub fn new(state: GameState, config: SessionConfig) -> Self {
        Self {
            state,
            config,
            quit: QuitSignal::new(),
        }
    }

    /// Handle for requesting a clean exit
    pub fn quit_signal(&self) -> QuitSignal {
        self.quit.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Run until game over (plus delay), quit or the frame limit
    pub fn run(
        &mut self,
        controller: &mut dyn Controller,
        renderer: &mut dyn RenderSink,
        audio: &mut dyn AudioSink,
    ) -> SessionSummary {
        let mut limiter = self.config.realtime.then(|| FrameLimiter::new(self.config.dt));
        let mut frames = 0u64;
        let mut held = 0u32;

        log::info!("Session starting (seed {})", self.state.seed);

        let end = loop {
            // The game over hold runs to completion
            if !self.state.is_over() && self.quit.is_requested() {
                break EndReason::Quit;
            }
            if self.config.max_frames.is_some_and(|max| frames >= max) {
                break EndReason::FrameLimit;
            }

            tick(&mut self.state, controller, self.config.dt);
            for cue in self.state.drain_cues() {
                audio.play(cue);
            }
            renderer.render(&RenderFrame::capture(&self.state));
            frames += 1;

            if self.state.is_over() {
                held += 1;
                if held > self.config.game_over_delay_frames {
                    break EndReason::GameOver;
                }
            }

            if let Some(limiter) = limiter.as_mut() {
                limiter.wait();
            }
        };

        let summary = SessionSummary {
            end,
            frames,
            ticks: self.state.time_ticks,
            collected_count: self.state.collected_count,
            poisonous_count: self.state.poisonous_count,
            missed_count: self.state.missed_count,
        };
        log::info!(
            "Session ended ({:?}) after {} frames: collected {}, poisonous {}, missed {}",
            summary.end,
            summary.frames,
            summary.collected_count,
            summary.poisonous_count,
            summary.missed_count
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::consts::POISON_LIMIT;
    use crate::controller::{HumanController, ScriptedInput};
    use crate::render::LogRenderer;
    use crate::sim::{AudioCue, EntityKind, GameStatus};

    /// Renderer that raises the quit flag after a number of frames
    struct QuitAfter {
        frames: u64,
        seen: u64,
        quit: QuitSignal,
    }

    impl RenderSink for QuitAfter {
        fn render(&mut self, _frame: &RenderFrame) {
            self.seen += 1;
            if self.seen == self.frames {
                self.quit.request();
            }
        }
    }

    /// Renderer that raises the quit flag as soon as the run is over
    struct QuitOnGameOver {
        quit: QuitSignal,
    }

    impl RenderSink for QuitOnGameOver {
        fn render(&mut self, frame: &RenderFrame) {
            if frame.status == GameStatus::GameOver {
                self.quit.request();
            }
        }
    }

    fn config(settings: &Settings) -> SessionConfig {
        SessionConfig::from_settings(settings)
    }

    /// One poisonous item already overlapping the basket, one catch from the limit
    fn about_to_lose(settings: &Settings) -> GameState {
        let mut state = GameState::with_layout(8, settings, &[EntityKind::Poisonous]);
        state.poisonous_count = POISON_LIMIT - 1;
        let basket = state.collector.bounds;
        state.items[0].bounds.pos = basket.pos;
        state
    }

    #[test]
    fn test_frame_limit() {
        let settings = Settings::default();
        let limited = SessionConfig {
            max_frames: Some(30),
            ..config(&settings)
        };
        let mut session = Session::new(GameState::new(1, &settings), limited);
        let mut human = HumanController::new(ScriptedInput::default(), settings.human_speed);
        let mut renderer = LogRenderer::default();
        let summary = session.run(&mut human, &mut renderer, &mut AudioManager::new());
        assert_eq!(summary.end, EndReason::FrameLimit);
        assert_eq!(summary.frames, 30);
        assert_eq!(summary.ticks, 30);
    }

    #[test]
    fn test_quit_checked_once_per_tick() {
        let settings = Settings::default();
        let mut session = Session::new(GameState::new(1, &settings), config(&settings));
        let mut renderer = QuitAfter {
            frames: 10,
            seen: 0,
            quit: session.quit_signal(),
        };
        let mut human = HumanController::new(ScriptedInput::default(), settings.human_speed);
        let summary = session.run(&mut human, &mut renderer, &mut AudioManager::new());
        assert_eq!(summary.end, EndReason::Quit);
        assert_eq!(summary.ticks, 10);
    }

    #[test]
    fn test_game_over_delay_then_end() {
        let settings = Settings {
            game_over_delay_secs: 0.5,
            ..Default::default()
        };
        let mut session = Session::new(about_to_lose(&settings), config(&settings));
        let mut human = HumanController::new(ScriptedInput::default(), settings.human_speed);
        let mut renderer = LogRenderer::default();
        let mut audio = AudioManager::new();
        let summary = session.run(&mut human, &mut renderer, &mut audio);

        assert_eq!(summary.end, EndReason::GameOver);
        // Game over on the first tick, then the frame is held for the delay
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.frames, 1 + settings.game_over_delay_frames() as u64);
        assert_eq!(renderer.frames(), summary.frames);

        let cues: Vec<AudioCue> = audio.take_requests().iter().map(|r| r.cue).collect();
        assert_eq!(cues, vec![AudioCue::Warning, AudioCue::GameOver]);
    }

    #[test]
    fn test_quit_ignored_during_game_over_hold() {
        let settings = Settings {
            game_over_delay_secs: 0.25,
            ..Default::default()
        };
        let mut session = Session::new(about_to_lose(&settings), config(&settings));
        let mut renderer = QuitOnGameOver {
            quit: session.quit_signal(),
        };
        let mut human = HumanController::new(ScriptedInput::default(), settings.human_speed);
        let summary = session.run(&mut human, &mut renderer, &mut AudioManager::new());

        assert!(session.quit_signal().is_requested());
        assert_eq!(summary.end, EndReason::GameOver);
        assert_eq!(summary.frames, 1 + settings.game_over_delay_frames() as u64);
    }
}
