//! Audio cue handling
//!
//! The simulation only raises [`AudioCue`]s. This module applies volume and
//! mute settings and turns cues into playback requests for whatever backend
//! actually mixes sound.

use crate::Settings;
use crate::sim::AudioCue;

/// Consumer of simulation cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Sound file played for a cue
pub fn asset_for(cue: AudioCue) -> &'static str {
    match cue {
        AudioCue::Collected => "mushrooms_collected.wav",
        AudioCue::Warning => "poisonous_warning.wav",
        AudioCue::GameOver => "game_over.wav",
    }
}

/// A cue resolved to a sound file at a given volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayRequest {
    pub cue: AudioCue,
    pub asset: &'static str,
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    requests: Vec<PlayRequest>,
    /// Total cues seen, including muted ones
    cues_seen: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            requests: Vec::new(),
            cues_seen: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        if !(0.0..=1.0).contains(&vol) {
            log::warn!("Master volume {vol} out of range, clamping");
        }
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        if !(0.0..=1.0).contains(&vol) {
            log::warn!("SFX volume {vol} out of range, clamping");
        }
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Hand pending requests to the playback backend
    pub fn take_requests(&mut self) -> Vec<PlayRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn cues_seen(&self) -> u64 {
        self.cues_seen
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, cue: AudioCue) {
        self.cues_seen += 1;
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }

        let asset = asset_for(cue);
        log::debug!("Play {asset} at {volume:.2}");
        self.requests.push(PlayRequest { cue, asset, volume });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_assets() {
        assert_eq!(asset_for(AudioCue::Collected), "mushrooms_collected.wav");
        assert_eq!(asset_for(AudioCue::Warning), "poisonous_warning.wav");
        assert_eq!(asset_for(AudioCue::GameOver), "game_over.wav");
    }

    #[test]
    fn test_volume_applied() {
        let mut audio = AudioManager::new();
        audio.set_sfx_volume(0.5);
        audio.play(AudioCue::Warning);
        let requests = audio.take_requests();
        assert_eq!(requests.len(), 1);
        assert!((requests[0].volume - 0.4).abs() < 1e-6);
        assert!(audio.take_requests().is_empty());
    }

    #[test]
    fn test_muted_drops_requests() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::from_settings(&settings);
        audio.play(AudioCue::GameOver);
        assert!(audio.take_requests().is_empty());
        assert_eq!(audio.cues_seen(), 1);
    }

    #[test]
    fn test_volume_clamped() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(1.0);
        audio.play(AudioCue::Collected);
        assert_eq!(audio.take_requests()[0].volume, 1.0);
    }
}
