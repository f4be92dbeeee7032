//! Sound cues
//!
//! Fire-and-forget: a cue rewinds its clip and plays it. Missing clips and
//! playback refused by the browser are logged, never propagated.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Ball hits a paddle
    PaddleHit,
    /// Either side scored
    ScoreUpdate,
    /// A power-up kicked in
    PowerUpActivated,
}

impl SoundCue {
    pub const ALL: [SoundCue; 3] = [
        SoundCue::PaddleHit,
        SoundCue::ScoreUpdate,
        SoundCue::PowerUpActivated,
    ];

    /// Cue for a simulation event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<SoundCue> {
        match event {
            GameEvent::PaddleHit { .. } => Some(SoundCue::PaddleHit),
            GameEvent::Scored { .. } => Some(SoundCue::ScoreUpdate),
            GameEvent::PowerUpActivated(_) => Some(SoundCue::PowerUpActivated),
            GameEvent::PowerUpExpired(_) => None,
        }
    }

    /// Clip location relative to the page
    pub fn asset_path(&self) -> &'static str {
        match self {
            SoundCue::PaddleHit => "sounds/paddle_hit.mp3",
            SoundCue::ScoreUpdate => "sounds/score_update.mp3",
            SoundCue::PowerUpActivated => "sounds/power_up.mp3",
        }
    }
}

/// Anything that can play a cue
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that remembers what it was asked to play (headless runs, tests)
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<SoundCue>,
}

impl SoundSink for RecordingSink {
    fn play(&mut self, cue: SoundCue) {
        self.played.push(cue);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    clips: Vec<(SoundCue, web_sys::HtmlAudioElement)>,
    volume: f32,
    muted: bool,
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        let clips = SoundCue::ALL
            .into_iter()
            .filter_map(|cue| match web_sys::HtmlAudioElement::new_with_src(cue.asset_path()) {
                Ok(clip) => Some((cue, clip)),
                Err(e) => {
                    log::warn!("Failed to load {}: {:?}", cue.asset_path(), e);
                    None
                }
            })
            .collect();
        Self {
            clips,
            volume: 1.0,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            muted: false,
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundSink for AudioManager {
    #[cfg(target_arch = "wasm32")]
    fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some((_, clip)) = self.clips.iter().find(|(c, _)| *c == cue) else {
            return;
        };

        clip.set_current_time(0.0);
        clip.set_volume(vol as f64);
        // A rejected promise (autoplay policy) only shows up in the console
        if let Err(e) = clip.play() {
            log::warn!("Playback of {:?} refused: {:?}", cue, e);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play(&mut self, cue: SoundCue) {
        if self.effective_volume() > 0.0 {
            log::debug!("Sound: {:?}", cue);
        }
    }
}
